//! Molecular geometry and its plain-text input format.
//!
//! The input is a free-form token stream (line breaks are insignificant):
//! the basis file name, the total charge, the spin multiplicity, then one
//! `Symbol x y z` group per atom with coordinates in angstrom. Everything
//! after a `!` on a line is a comment.
//!
//! ```text
//! sto-3g.gbs
//! 0 1             ! neutral singlet
//! O   0.000000   0.000000   0.117790
//! H   0.000000   0.755453  -0.471161
//! H   0.000000  -0.755453  -0.471161
//! ```

use crate::vec3::Vec3;
use periodic_table_on_an_enum::Element;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

pub const BOHR_PER_ANGSTROM: f64 = 1.88972612462577;
pub const ANGSTROM_PER_BOHR: f64 = 0.52917721090300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub basis_file: String,
    pub charge: i32,
    pub multiplicity: u32,
    pub symbols: Vec<String>,
    pub zval: Vec<u32>,
    /// Nuclear positions in bohr.
    pub geom: Vec<Vec3>,
}

fn invalid_data(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

/// Resolves an element symbol in any letter case ("he", "HE", "He").
pub fn lookup_element(symbol: &str) -> Option<Element> {
    let mut chars = symbol.chars();
    let first = chars.next()?;
    let canonical: String = first
        .to_uppercase()
        .chain(chars.flat_map(|c| c.to_lowercase()))
        .collect();
    Element::from_symbol(&canonical)
}

impl Molecule {
    /// Builds a molecule from element symbols and coordinates in bohr.
    pub fn new(
        basis_file: &str,
        charge: i32,
        multiplicity: u32,
        symbols: &[&str],
        geom: Vec<Vec3>,
    ) -> io::Result<Self> {
        assert_eq!(
            symbols.len(),
            geom.len(),
            "{} symbols for {} positions",
            symbols.len(),
            geom.len()
        );
        let mut canonical = Vec::with_capacity(symbols.len());
        let mut zval = Vec::with_capacity(symbols.len());
        for sym in symbols {
            let element = lookup_element(sym)
                .ok_or_else(|| invalid_data(format!("unknown element symbol: {}", sym)))?;
            canonical.push(element.get_symbol().to_string());
            zval.push(element.get_atomic_number() as u32);
        }
        Ok(Self {
            basis_file: basis_file.to_string(),
            charge,
            multiplicity,
            symbols: canonical,
            zval,
            geom,
        })
    }

    pub fn parse(text: &str) -> io::Result<Self> {
        let stripped: Vec<&str> = text
            .lines()
            .map(|line| line.split('!').next().unwrap_or(""))
            .collect();
        let mut tokens = stripped.iter().flat_map(|line| line.split_whitespace());

        let basis_file = tokens
            .next()
            .ok_or_else(|| invalid_data("molecule input is empty"))?;
        let charge = tokens
            .next()
            .and_then(|t| t.parse::<i32>().ok())
            .ok_or_else(|| invalid_data("missing or invalid charge"))?;
        let multiplicity = tokens
            .next()
            .and_then(|t| t.parse::<u32>().ok())
            .ok_or_else(|| invalid_data("missing or invalid multiplicity"))?;

        let mut symbols = Vec::new();
        let mut geom = Vec::new();
        while let Some(sym) = tokens.next() {
            let mut xyz = [0.0; 3];
            for (n, slot) in xyz.iter_mut().enumerate() {
                let tok = tokens.next().ok_or_else(|| {
                    invalid_data(format!("atom {} ({}) has {} of 3 coordinates", symbols.len() + 1, sym, n))
                })?;
                *slot = tok
                    .parse::<f64>()
                    .map_err(|_| invalid_data(format!("invalid coordinate {:?} for atom {}", tok, sym)))?;
            }
            symbols.push(sym);
            geom.push(Vec3::from(xyz) * BOHR_PER_ANGSTROM);
        }

        let mol = Self::new(basis_file, charge, multiplicity, &symbols, geom)?;
        debug!(
            "read molecule with {} atoms, charge {}, multiplicity {}",
            mol.n_atoms(),
            mol.charge,
            mol.multiplicity
        );
        Ok(mol)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn n_atoms(&self) -> usize {
        self.geom.len()
    }

    /// Number of electrons, Σ Z - charge.
    pub fn n_elec(&self) -> i32 {
        self.zval.iter().map(|&z| z as i32).sum::<i32>() - self.charge
    }

    /// Classical repulsion between the nuclei, in hartree.
    pub fn nuclear_repulsion(&self) -> f64 {
        let n = self.n_atoms();
        let mut energy = 0.0;
        for i in 0..n {
            for j in 0..i {
                energy += (self.zval[i] * self.zval[j]) as f64 / (self.geom[i] - self.geom[j]).len();
            }
        }
        energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = "\
sto-3g.gbs
0 1             ! neutral singlet
O   0.000000   0.000000   0.117790
H   0.000000   0.755453  -0.471161
! a full comment line
H   0.000000  -0.755453  -0.471161
";

    #[test]
    fn test_parse_water() {
        let mol = Molecule::parse(WATER).unwrap();
        assert_eq!(mol.basis_file, "sto-3g.gbs");
        assert_eq!(mol.charge, 0);
        assert_eq!(mol.multiplicity, 1);
        assert_eq!(mol.symbols, vec!["O", "H", "H"]);
        assert_eq!(mol.zval, vec![8, 1, 1]);
        assert_eq!(mol.n_elec(), 10);

        let h1 = mol.geom[1];
        assert!(h1.x.abs() < 1e-14);
        assert!((h1.y - 0.755453 * BOHR_PER_ANGSTROM).abs() < 1e-12);
        assert!((h1.z + 0.471161 * BOHR_PER_ANGSTROM).abs() < 1e-12);
    }

    #[test]
    fn test_single_line_and_charge() {
        let mol = Molecule::parse("basis.gbs 1 2 h 0 0 0 he 0 0 0.7").unwrap();
        assert_eq!(mol.symbols, vec!["H", "He"]);
        assert_eq!(mol.n_elec(), 2);
        assert!((mol.geom[1].z - 0.7 * BOHR_PER_ANGSTROM).abs() < 1e-12);
        assert!((mol.nuclear_repulsion() - 2.0 / (0.7 * BOHR_PER_ANGSTROM)).abs() < 1e-12);
    }

    #[test]
    fn test_unit_constants() {
        assert!((BOHR_PER_ANGSTROM * ANGSTROM_PER_BOHR - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Molecule::parse("").unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert!(Molecule::parse("b.gbs x 1").is_err());
        assert!(Molecule::parse("b.gbs 0 1 H 0.0 0.0").is_err());
        assert!(Molecule::parse("b.gbs 0 1 H 0.0 abc 0.0").is_err());
        let err = Molecule::parse("b.gbs 0 1 Xx 0 0 0").unwrap_err();
        assert!(err.to_string().contains("Xx"), "{}", err);
    }

    #[test]
    fn test_lookup_element() {
        assert_eq!(lookup_element("na").map(|e| e.get_atomic_number()), Some(11));
        assert_eq!(lookup_element("CL").map(|e| e.get_atomic_number()), Some(17));
        assert!(lookup_element("").is_none());
    }
}
