//! Gaussian-type orbital integrals over Cartesian basis functions.
//!
//! Overlap, kinetic, nuclear-attraction and electron-repulsion integrals are
//! evaluated with the Taketa–Huzinaga–O-ohata closed-form expansions and
//! assembled into matrices over a [`cgto::BasisSet`] read from a basis file.

pub mod angmom;
pub mod basis;
pub mod basisfile;
pub mod cgto;
pub mod gto;
pub mod helper;
pub mod mathfun;
pub mod matrix;
pub mod molecule;
pub mod tho;
pub mod vec3;


pub use angmom::{AngMom, ShellType};
pub use basis::Integral;
pub use basisfile::{BasisFile, BasisFormat};
pub use cgto::{Basis, BasisSet};
pub use gto::Gauss;
pub use matrix::{Matrix, SymEigenSolver};
pub use molecule::Molecule;
pub use vec3::Vec3;
