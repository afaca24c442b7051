//! Cartesian angular momentum exponents and shell types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exponents (i, j, k) of x^i y^j z^k in a Cartesian Gaussian.
///
/// Ordering is lexicographic on (i, j, k).
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AngMom {
    pub i: i32,
    pub j: i32,
    pub k: i32,
}

impl AngMom {
    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        Self { i, j, k }
    }

    pub fn sum(&self) -> i32 {
        self.i + self.j + self.k
    }
}

impl fmt::Display for AngMom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

/// Highest angular momentum supported (I shells).
pub const MAX_ANGMOM: i32 = 6;

/// All triples with i + j + k == n, i ascending, then j ascending.
pub fn generate_angmom(n: i32) -> Vec<AngMom> {
    assert!(
        (0..=MAX_ANGMOM).contains(&n),
        "angular momentum {} outside 0..={}",
        n,
        MAX_ANGMOM
    );
    (0..=n)
        .flat_map(|i| (0..=n - i).map(move |j| AngMom::new(i, j, n - i - j)))
        .collect()
}

/// Shell tag of a basis-file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellType {
    S,
    P,
    SP,
    D,
    F,
    G,
    H,
    I,
}

impl ShellType {
    /// Angular momentum of the first coefficient set; SP reports 0.
    pub fn angular_momentum(&self) -> i32 {
        match self {
            ShellType::S | ShellType::SP => 0,
            ShellType::P => 1,
            ShellType::D => 2,
            ShellType::F => 3,
            ShellType::G => 4,
            ShellType::H => 5,
            ShellType::I => 6,
        }
    }

    /// Whether the shell carries a second (P) coefficient column.
    pub fn has_second_coeff(&self) -> bool {
        matches!(self, ShellType::SP)
    }

    /// Number of Cartesian functions the shell expands to.
    pub fn n_functions(&self) -> usize {
        let l = self.angular_momentum() as usize;
        let n = (l + 1) * (l + 2) / 2;
        if self.has_second_coeff() {
            n + 3
        } else {
            n
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ShellType::S => "S",
            ShellType::P => "P",
            ShellType::SP => "SP",
            ShellType::D => "D",
            ShellType::F => "F",
            ShellType::G => "G",
            ShellType::H => "H",
            ShellType::I => "I",
        };
        f.write_str(tag)
    }
}

impl FromStr for ShellType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "S" => Ok(ShellType::S),
            "P" => Ok(ShellType::P),
            "SP" | "L" => Ok(ShellType::SP),
            "D" => Ok(ShellType::D),
            "F" => Ok(ShellType::F),
            "G" => Ok(ShellType::G),
            "H" => Ok(ShellType::H),
            "I" => Ok(ShellType::I),
            _ => Err(format!("unknown shell type: {}", s)),
        }
    }
}
