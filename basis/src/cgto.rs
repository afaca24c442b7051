//! Contracted Cartesian Gaussian basis functions and basis sets,
//! built on the primitive integrals of gto.rs.

use crate::angmom::{generate_angmom, AngMom};
use crate::basis::Integral;
use crate::basisfile::{AtomBasis, BasisFile, ShellInfo};
use crate::gto::Gauss;
use crate::mathfun::semifactorial;
use crate::matrix::Matrix;
use crate::molecule::Molecule;
use crate::vec3::Vec3;
use itertools::iproduct;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs::File;
use std::io::{self, Read, Write};
use std::ops::Index;
use std::path::Path;
use tracing::debug;

/// Normalization constant of the primitive x^l y^m z^n exp(-alpha r²).
pub fn gto_norm_const(alpha: f64, l: i32, m: i32, n: i32) -> f64 {
    let dfl = semifactorial(2 * l - 1);
    let dfm = semifactorial(2 * m - 1);
    let dfn = semifactorial(2 * n - 1);

    (2.0 * alpha / PI).powf(0.75) * ((4.0 * alpha).powi(l + m + n) / (dfl * dfm * dfn)).sqrt()
}

/// Index of the unordered pair {i, j} in packed lower-triangular storage.
pub fn idx2(i: usize, j: usize) -> usize {
    let (hi, lo) = if i > j { (i, j) } else { (j, i) };
    hi * (hi + 1) / 2 + lo
}

/// Index of (ij|kl) among integrals unique under the 8-fold permutation
/// symmetry.
pub fn idx4(i: usize, j: usize, k: usize, l: usize) -> usize {
    idx2(idx2(i, j), idx2(k, l))
}

/// (ij|kl) from the packed column returned by `BasisSet::mat_int_repulsion`.
pub fn eri_at(packed: &Matrix, i: usize, j: usize, k: usize, l: usize) -> f64 {
    packed[idx4(i, j, k, l)]
}

/// Contracted function: a fixed linear combination of primitives sharing
/// one angular momentum and one centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    pub ijk: AngMom,
    pub center: Vec3,
    pub gauss: Vec<Gauss>,
}

impl Basis {
    /// `coeff[n]` must already include the normalization of primitive n.
    pub fn new(alpha: &[f64], coeff: &[f64], ijk: AngMom, center: Vec3) -> Self {
        assert_eq!(
            alpha.len(),
            coeff.len(),
            "{} exponents but {} coefficients",
            alpha.len(),
            coeff.len()
        );
        let gauss = alpha
            .iter()
            .zip(coeff)
            .map(|(&a, &c)| Gauss::new(a, c, ijk, center))
            .collect();
        Self { ijk, center, gauss }
    }

    pub fn len(&self) -> usize {
        self.gauss.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauss.is_empty()
    }

    /// Orbital label such as "s", "px" or "dxz".
    pub fn label(&self) -> String {
        const SHELLS: [char; 7] = ['s', 'p', 'd', 'f', 'g', 'h', 'i'];
        let mut label = String::new();
        label.push(SHELLS[self.ijk.sum() as usize]);
        label.push_str(&"x".repeat(self.ijk.i as usize));
        label.push_str(&"y".repeat(self.ijk.j as usize));
        label.push_str(&"z".repeat(self.ijk.k as usize));
        label
    }
}

impl Index<usize> for Basis {
    type Output = Gauss;

    fn index(&self, i: usize) -> &Gauss {
        &self.gauss[i]
    }
}

impl Integral for Basis {
    fn evaluate(&self, r: &Vec3) -> f64 {
        self.gauss.iter().map(|g| g.evaluate(r)).sum()
    }

    fn int_overlap(a: &Basis, b: &Basis) -> f64 {
        iproduct!(&a.gauss, &b.gauss)
            .map(|(ga, gb)| Gauss::int_overlap(ga, gb))
            .sum()
    }

    fn int_kinetic(a: &Basis, b: &Basis) -> f64 {
        iproduct!(&a.gauss, &b.gauss)
            .map(|(ga, gb)| Gauss::int_kinetic(ga, gb))
            .sum()
    }

    fn int_nuclear(a: &Basis, b: &Basis, c: &Vec3) -> f64 {
        iproduct!(&a.gauss, &b.gauss)
            .map(|(ga, gb)| Gauss::int_nuclear(ga, gb, c))
            .sum()
    }

    fn int_repulsion(a: &Basis, b: &Basis, c: &Basis, d: &Basis) -> f64 {
        iproduct!(&a.gauss, &b.gauss, &c.gauss, &d.gauss)
            .map(|(ga, gb, gc, gd)| Gauss::int_repulsion(ga, gb, gc, gd))
            .sum()
    }
}

/// Ordered list of contracted functions; the order fixes matrix indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasisSet {
    pub basis: Vec<Basis>,
}

impl Index<usize> for BasisSet {
    type Output = Basis;

    fn index(&self, i: usize) -> &Basis {
        &self.basis[i]
    }
}

impl BasisSet {
    pub fn new(basis: Vec<Basis>) -> Self {
        Self { basis }
    }

    pub fn len(&self) -> usize {
        self.basis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Basis> {
        self.basis.iter()
    }

    /// Expands one shell at `center`: one function per Cartesian component,
    /// plus a second P set for SP shells.
    pub fn from_shell(shell: &ShellInfo, center: Vec3) -> Self {
        let alpha: Vec<f64> = shell.gauss.iter().map(|g| g.alpha).collect();
        let coeff1: Vec<f64> = shell.gauss.iter().map(|g| g.coeff1).collect();

        let expand = |l: i32, contraction: &[f64]| -> Vec<Basis> {
            generate_angmom(l)
                .into_iter()
                .map(|ijk| {
                    let coeff: Vec<f64> = alpha
                        .iter()
                        .zip(contraction)
                        .map(|(&a, &c)| c * gto_norm_const(a, ijk.i, ijk.j, ijk.k))
                        .collect();
                    Basis::new(&alpha, &coeff, ijk, center)
                })
                .collect()
        };

        let mut basis = expand(shell.shell_type.angular_momentum(), &coeff1);
        if shell.shell_type.has_second_coeff() {
            let coeff2: Vec<f64> = shell.gauss.iter().map(|g| g.coeff2).collect();
            basis.extend(expand(1, &coeff2));
        }
        Self { basis }
    }

    pub fn from_atom_basis(atom: &AtomBasis, center: Vec3) -> Self {
        let basis = atom
            .shells
            .iter()
            .flat_map(|shell| Self::from_shell(shell, center).basis)
            .collect();
        Self { basis }
    }

    /// Places the basis of `atoms[n]` at `geom[n]` for every atom.
    pub fn from_basis_file(file: &BasisFile, atoms: &[&str], geom: &[Vec3]) -> io::Result<Self> {
        assert_eq!(
            atoms.len(),
            geom.len(),
            "{} atoms but {} positions",
            atoms.len(),
            geom.len()
        );
        let mut basis = Vec::new();
        for (sym, center) in atoms.iter().zip(geom) {
            let atom = file.get(sym).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("basis for {} is not found", sym),
                )
            })?;
            basis.extend(Self::from_atom_basis(atom, *center).basis);
        }
        debug!("built basis set of {} functions for {} atoms", basis.len(), atoms.len());
        Ok(Self { basis })
    }

    pub fn from_file<P: AsRef<Path>>(path: P, atoms: &[&str], geom: &[Vec3]) -> io::Result<Self> {
        let file = BasisFile::from_file(path)?;
        Self::from_basis_file(&file, atoms, geom)
    }

    pub fn from_molecule(file: &BasisFile, mol: &Molecule) -> io::Result<Self> {
        let atoms: Vec<&str> = mol.symbols.iter().map(String::as_str).collect();
        Self::from_basis_file(file, &atoms, &mol.geom)
    }

    // lower triangle (i >= j) of a symmetric one-electron matrix
    fn symmetric_matrix<F>(&self, f: F) -> Matrix
    where
        F: Fn(&Basis, &Basis) -> f64 + Sync,
    {
        let n = self.len();
        let pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| (0..=i).map(move |j| (i, j))).collect();
        let values: Vec<f64> = pairs
            .par_iter()
            .map(|&(i, j)| f(&self.basis[i], &self.basis[j]))
            .collect();

        let mut ret = Matrix::zeros(n, n);
        for (&(i, j), &v) in pairs.iter().zip(&values) {
            ret[(i, j)] = v;
            ret[(j, i)] = v;
        }
        ret
    }

    pub fn mat_int_overlap(&self) -> Matrix {
        self.symmetric_matrix(Basis::int_overlap)
    }

    pub fn mat_int_kinetic(&self) -> Matrix {
        self.symmetric_matrix(Basis::int_kinetic)
    }

    /// Σ_C Z_C <i| -1/|r - C| |j> over the nuclei in `geom`.
    pub fn mat_int_nuclear(&self, zval: &[u32], geom: &[Vec3]) -> Matrix {
        assert_eq!(
            zval.len(),
            geom.len(),
            "{} charges but {} positions",
            zval.len(),
            geom.len()
        );
        self.symmetric_matrix(|a, b| {
            zval.iter()
                .zip(geom)
                .map(|(&z, c)| z as f64 * Basis::int_nuclear(a, b, c))
                .sum()
        })
    }

    /// Unique two-electron integrals as an n_eri x 1 column; (ij|kl) is
    /// stored at `idx4(i, j, k, l)`.
    pub fn mat_int_repulsion(&self) -> Matrix {
        let n = self.len();
        if n == 0 {
            return Matrix::zeros(0, 1);
        }
        let n_eri = idx4(n - 1, n - 1, n - 1, n - 1) + 1;

        let pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| (0..=i).map(move |j| (i, j))).collect();
        let quads: Vec<(usize, usize, usize, usize)> = iproduct!(&pairs, &pairs)
            .filter(|(ij, kl)| idx2(ij.0, ij.1) <= idx2(kl.0, kl.1))
            .map(|(&(i, j), &(k, l))| (i, j, k, l))
            .collect();
        debug!("evaluating {} unique repulsion integrals", quads.len());

        let values: Vec<f64> = quads
            .par_iter()
            .map(|&(i, j, k, l)| {
                Basis::int_repulsion(&self.basis[i], &self.basis[j], &self.basis[k], &self.basis[l])
            })
            .collect();

        let mut ret = Matrix::zeros(n_eri, 1);
        for (&(i, j, k, l), &v) in quads.iter().zip(&values) {
            ret[idx4(i, j, k, l)] = v;
        }
        ret
    }
}

impl BasisSet {
    // Serialize to pickle format
    pub fn to_pickle(&self) -> Result<Vec<u8>, serde_pickle::Error> {
        let options = serde_pickle::SerOptions::new();
        serde_pickle::to_vec(self, options)
    }

    // Deserialize from pickle format
    pub fn from_pickle(bytes: &[u8]) -> Result<Self, serde_pickle::Error> {
        let options = serde_pickle::DeOptions::new();
        serde_pickle::from_slice(bytes, options)
    }

    // Save to file in pickle format
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> io::Result<()> {
        let serialized = self
            .to_pickle()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let mut file = File::create(filename)?;
        file.write_all(&serialized)
    }

    // Load from file in pickle format
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> io::Result<Self> {
        let mut file = File::open(filename)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        Self::from_pickle(&buffer).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
