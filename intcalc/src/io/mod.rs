//! Input/Output operations for integral jobs
//!
//! This module handles logging setup and basis set loading.

mod basis_loader;
mod output;

pub use basis_loader::{load_basis, resolve_basis_path};
pub use output::setup_output;
