//! Configuration management for integral jobs
//!
//! A job names a basis file, a geometry and the integral classes to
//! evaluate. Missing optional fields are filled by `with_defaults`.

mod args;

pub use args::Args;

use color_eyre::eyre::{eyre, Result};
use gauss_int::molecule::{Molecule, BOHR_PER_ANGSTROM};
use gauss_int::vec3::Vec3;
use gauss_int::BasisFormat;
use serde::{Deserialize, Serialize};

/// Main configuration structure for an integral job
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    pub basis_file: Option<String>,
    pub basis_format: Option<String>,
    pub units: Option<String>,
    pub charge: Option<i32>,
    pub multiplicity: Option<u32>,
    #[serde(default)]
    pub geometry: Vec<Atom>,
    pub integrals: Option<IntegralParams>,
}

/// Atomic position configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct Atom {
    pub element: String,
    pub coords: [f64; 3],
}

/// Which integral matrices to evaluate
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IntegralParams {
    pub overlap: Option<bool>,
    pub kinetic: Option<bool>,
    pub nuclear: Option<bool>,
    pub repulsion: Option<bool>,
}

impl Default for IntegralParams {
    fn default() -> Self {
        IntegralParams {
            overlap: Some(true),
            kinetic: Some(true),
            nuclear: Some(true),
            repulsion: Some(true),
        }
    }
}

impl IntegralParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.overlap.is_none() {
            self.overlap = defaults.overlap;
        }
        if self.kinetic.is_none() {
            self.kinetic = defaults.kinetic;
        }
        if self.nuclear.is_none() {
            self.nuclear = defaults.nuclear;
        }
        if self.repulsion.is_none() {
            self.repulsion = defaults.repulsion;
        }
        self
    }
}

/// Unit of the coordinates in `geometry`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Angstrom,
    Bohr,
}

impl Units {
    pub fn to_bohr(&self) -> f64 {
        match self {
            Units::Angstrom => BOHR_PER_ANGSTROM,
            Units::Bohr => 1.0,
        }
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        if self.units.is_none() {
            self.units = Some("angstrom".to_string());
        }
        if self.charge.is_none() {
            self.charge = Some(0);
        }
        if self.multiplicity.is_none() {
            self.multiplicity = Some(1);
        }
        self.integrals = Some(self.integrals.take().unwrap_or_default().with_defaults());
        self
    }

    pub fn units(&self) -> Result<Units> {
        match self.units.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("angstrom") | Some("a") => Ok(Units::Angstrom),
            Some("bohr") | Some("au") => Ok(Units::Bohr),
            Some(other) => Err(eyre!("unknown units {:?}, expected angstrom or bohr", other)),
        }
    }

    /// Explicit basis file format, or None to detect it from the content
    pub fn basis_format(&self) -> Result<Option<BasisFormat>> {
        self.basis_format
            .as_deref()
            .map(|s| s.parse::<BasisFormat>().map_err(|e| eyre!(e)))
            .transpose()
    }

    pub fn integrals(&self) -> IntegralParams {
        self.integrals.clone().unwrap_or_default().with_defaults()
    }

    /// Molecule described by the `geometry` section, coordinates in bohr
    pub fn molecule(&self) -> Result<Molecule> {
        if self.geometry.is_empty() {
            return Err(eyre!("configuration has no geometry"));
        }
        let scale = self.units()?.to_bohr();
        let symbols: Vec<&str> = self.geometry.iter().map(|a| a.element.as_str()).collect();
        let geom: Vec<Vec3> = self
            .geometry
            .iter()
            .map(|a| Vec3::from(a.coords) * scale)
            .collect();
        let mol = Molecule::new(
            self.basis_file.as_deref().unwrap_or_default(),
            self.charge.unwrap_or(0),
            self.multiplicity.unwrap_or(1),
            &symbols,
            geom,
        )?;
        Ok(mol)
    }
}
