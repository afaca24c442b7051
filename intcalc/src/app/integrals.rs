//! Integral evaluation for one molecule and its persistence

use crate::config::IntegralParams;
use color_eyre::eyre::{Result, WrapErr};
use gauss_int::{BasisSet, Matrix, Molecule};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Everything evaluated for a job; matrices that were not requested are None.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegralSet {
    pub molecule: Molecule,
    pub labels: Vec<String>,
    pub nuclear_repulsion: f64,
    pub overlap: Option<Matrix>,
    pub kinetic: Option<Matrix>,
    pub nuclear: Option<Matrix>,
    /// Unique (ij|kl), packed by `cgto::idx4`.
    pub repulsion: Option<Matrix>,
}

fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    info!("{} integrals done in {:.3} s", name, start.elapsed().as_secs_f64());
    out
}

impl IntegralSet {
    pub fn compute(set: &BasisSet, mol: &Molecule, params: &IntegralParams) -> Self {
        let wanted = |flag: Option<bool>| flag.unwrap_or(true);

        let overlap = wanted(params.overlap).then(|| timed("Overlap", || set.mat_int_overlap()));
        let kinetic = wanted(params.kinetic).then(|| timed("Kinetic", || set.mat_int_kinetic()));
        let nuclear = wanted(params.nuclear)
            .then(|| timed("Nuclear attraction", || set.mat_int_nuclear(&mol.zval, &mol.geom)));
        let repulsion =
            wanted(params.repulsion).then(|| timed("Electron repulsion", || set.mat_int_repulsion()));

        IntegralSet {
            molecule: mol.clone(),
            labels: set.iter().map(|b| b.label()).collect(),
            nuclear_repulsion: mol.nuclear_repulsion(),
            overlap,
            kinetic,
            nuclear,
            repulsion,
        }
    }

    pub fn n_basis(&self) -> usize {
        self.labels.len()
    }

    /// Core Hamiltonian T + V when both parts were evaluated
    pub fn core_hamiltonian(&self) -> Option<Matrix> {
        match (&self.kinetic, &self.nuclear) {
            (Some(t), Some(v)) => Some(t + v),
            _ => None,
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .wrap_err_with(|| format!("Unable to create output file: {}", path.display()))?;
        serde_pickle::to_writer(&mut BufWriter::new(file), self, Default::default())
            .wrap_err("Failed to serialize integrals")?;
        info!("Integrals saved to {}", path.display());
        Ok(())
    }
}
