//! Reader for contracted Gaussian basis set files.
//!
//! Two layouts are understood. Gaussian94, as exported by the Basis Set
//! Exchange:
//!
//! ```text
//! ! STO-3G
//! ****
//! H     0
//! S    3   1.00
//!       0.3425250914D+01       0.1543289673D+00
//!       0.6239137298D+00       0.5353281423D+00
//!       0.1688554040D+00       0.4446345422D+00
//! ****
//! ```
//!
//! and NWChem:
//!
//! ```text
//! BASIS "ao basis" PRINT
//! #BASIS SET: (3s) -> [1s]
//! H    S
//!       3.42525091             0.15432897
//!       0.62391373             0.53532814
//!       0.16885540             0.44463454
//! END
//! ```

use crate::angmom::ShellType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// One primitive of a shell. `coeff2` is only meaningful for SP shells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussInfo {
    pub alpha: f64,
    pub coeff1: f64,
    pub coeff2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellInfo {
    pub shell_type: ShellType,
    pub gauss: Vec<GaussInfo>,
}

impl ShellInfo {
    pub fn size(&self) -> usize {
        self.gauss.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomBasis {
    pub symbol: String,
    pub shells: Vec<ShellInfo>,
}

impl AtomBasis {
    /// Number of contracted functions the atom contributes.
    pub fn n_functions(&self) -> usize {
        self.shells.iter().map(|s| s.shell_type.n_functions()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasisFile {
    pub atoms: Vec<AtomBasis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasisFormat {
    Gaussian94,
    NWChem,
}

impl BasisFormat {
    /// NWChem when a `BASIS` block header is present, Gaussian94 otherwise.
    pub fn detect(text: &str) -> Self {
        let is_nwchem = text.lines().any(|line| {
            line.split_whitespace()
                .next()
                .map_or(false, |tok| tok.eq_ignore_ascii_case("BASIS"))
        });
        if is_nwchem {
            BasisFormat::NWChem
        } else {
            BasisFormat::Gaussian94
        }
    }
}

impl FromStr for BasisFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gaussian94" | "gaussian" | "g94" | "gbs" => Ok(BasisFormat::Gaussian94),
            "nwchem" | "nw" => Ok(BasisFormat::NWChem),
            _ => Err(format!("unknown basis file format: {}", s)),
        }
    }
}

fn invalid_data(line_no: usize, msg: impl AsRef<str>) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("line {}: {}", line_no, msg.as_ref()),
    )
}

// Fortran style exponents use D instead of E
fn parse_real(tok: &str, line_no: usize) -> io::Result<f64> {
    tok.replace(|c: char| c == 'D' || c == 'd', "E")
        .parse::<f64>()
        .map_err(|_| invalid_data(line_no, format!("invalid number {:?}", tok)))
}

fn is_symbol(tok: &str) -> bool {
    (1..=2).contains(&tok.len()) && tok.chars().all(|c| c.is_ascii_alphabetic())
}

/// Reads `alpha coeff1 [coeff2]` from one primitive line.
fn parse_primitive(tokens: &[&str], shell_type: ShellType, line_no: usize) -> io::Result<GaussInfo> {
    let needed = if shell_type.has_second_coeff() { 3 } else { 2 };
    if tokens.len() < needed {
        return Err(invalid_data(
            line_no,
            format!(
                "{} shell primitive needs {} numbers, found {}",
                shell_type,
                needed,
                tokens.len()
            ),
        ));
    }
    let alpha = parse_real(tokens[0], line_no)?;
    let coeff1 = parse_real(tokens[1], line_no)?;
    let coeff2 = if needed == 3 {
        parse_real(tokens[2], line_no)?
    } else {
        0.0
    };
    if alpha <= 0.0 {
        return Err(invalid_data(line_no, format!("exponent must be positive, got {}", alpha)));
    }
    Ok(GaussInfo {
        alpha,
        coeff1,
        coeff2,
    })
}

/// Non-empty lines with the comment removed, paired with 1-based line numbers.
fn content_lines(text: &str, comment: char) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(move |(n, line)| {
        let line = match line.find(comment) {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();
        (!line.is_empty()).then_some((n + 1, line))
    })
}

impl BasisFile {
    pub fn parse(text: &str, format: BasisFormat) -> io::Result<Self> {
        let file = match format {
            BasisFormat::Gaussian94 => Self::parse_gaussian94(text)?,
            BasisFormat::NWChem => Self::parse_nwchem(text)?,
        };
        debug!(
            "parsed {:?} basis data: {} elements, {} shells",
            format,
            file.atoms.len(),
            file.atoms.iter().map(|a| a.shells.len()).sum::<usize>()
        );
        Ok(file)
    }

    /// Reads a basis file, guessing its format from the content.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        debug!("loading basis file {}", path.as_ref().display());
        Self::parse(&text, BasisFormat::detect(&text))
    }

    pub fn from_file_with_format<P: AsRef<Path>>(path: P, format: BasisFormat) -> io::Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        debug!("loading basis file {} as {:?}", path.as_ref().display(), format);
        Self::parse(&text, format)
    }

    /// Basis of one element, looked up case-insensitively by symbol.
    pub fn get(&self, symbol: &str) -> Option<&AtomBasis> {
        self.atoms
            .iter()
            .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|a| a.symbol.as_str())
    }

    fn parse_gaussian94(text: &str) -> io::Result<Self> {
        let lines: Vec<(usize, &str)> = content_lines(text, '!').collect();
        let mut atoms: Vec<AtomBasis> = Vec::new();
        let mut in_atom = false;
        let mut idx = 0;

        while idx < lines.len() {
            let (line_no, line) = lines[idx];
            idx += 1;

            if line.starts_with("****") {
                in_atom = false;
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();

            // atom header: "H     0"
            if tokens.len() == 2 && is_symbol(tokens[0]) && tokens[1] == "0" {
                atoms.push(AtomBasis {
                    symbol: tokens[0].to_string(),
                    shells: Vec::new(),
                });
                in_atom = true;
                continue;
            }

            if !in_atom {
                return Err(invalid_data(line_no, format!("expected an element header, found {:?}", line)));
            }

            // shell header: "SP   3   1.00"
            let shell_type = ShellType::from_str(tokens[0])
                .map_err(|e| invalid_data(line_no, e))?;
            let n_prim = tokens
                .get(1)
                .and_then(|t| t.parse::<usize>().ok())
                .ok_or_else(|| invalid_data(line_no, "missing primitive count in shell header"))?;
            let scale = match tokens.get(2) {
                Some(tok) => parse_real(tok, line_no)?,
                None => 1.0,
            };

            let mut gauss = Vec::with_capacity(n_prim);
            for _ in 0..n_prim {
                let (prim_no, prim_line) = *lines.get(idx).ok_or_else(|| {
                    invalid_data(line_no, format!("{} shell ends before {} primitives", shell_type, n_prim))
                })?;
                idx += 1;
                let prim_tokens: Vec<&str> = prim_line.split_whitespace().collect();
                let mut prim = parse_primitive(&prim_tokens, shell_type, prim_no)?;
                // scale factors multiply the exponents by scale^2
                prim.alpha *= scale * scale;
                gauss.push(prim);
            }

            if let Some(atom) = atoms.last_mut() {
                atom.shells.push(ShellInfo { shell_type, gauss });
            }
        }

        Ok(Self { atoms })
    }

    fn parse_nwchem(text: &str) -> io::Result<Self> {
        let mut atoms: Vec<AtomBasis> = Vec::new();
        let mut in_block = false;
        // index of the atom owning the shell being read
        let mut current: Option<usize> = None;

        for (line_no, line) in content_lines(text, '#') {
            let tokens: Vec<&str> = line.split_whitespace().collect();

            if !in_block {
                if tokens[0].eq_ignore_ascii_case("BASIS") {
                    in_block = true;
                }
                continue;
            }
            if tokens[0].eq_ignore_ascii_case("END") {
                in_block = false;
                current = None;
                continue;
            }

            // shell header: "O    SP"
            if tokens.len() == 2 && is_symbol(tokens[0]) {
                let shell_type = ShellType::from_str(tokens[1])
                    .map_err(|e| invalid_data(line_no, e))?;
                let pos = match atoms
                    .iter()
                    .position(|a| a.symbol.eq_ignore_ascii_case(tokens[0]))
                {
                    Some(pos) => pos,
                    None => {
                        atoms.push(AtomBasis {
                            symbol: tokens[0].to_string(),
                            shells: Vec::new(),
                        });
                        atoms.len() - 1
                    }
                };
                atoms[pos].shells.push(ShellInfo {
                    shell_type,
                    gauss: Vec::new(),
                });
                current = Some(pos);
                continue;
            }

            let shell = current
                .and_then(|pos| atoms[pos].shells.last_mut())
                .ok_or_else(|| invalid_data(line_no, format!("primitive outside of a shell: {:?}", line)))?;
            let prim = parse_primitive(&tokens, shell.shell_type, line_no)?;
            shell.gauss.push(prim);
        }

        if in_block {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "BASIS block is not terminated by END",
            ));
        }
        if let Some(shell) = atoms
            .iter()
            .flat_map(|a| a.shells.iter())
            .find(|s| s.gauss.is_empty())
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} shell without primitives", shell.shell_type),
            ));
        }

        Ok(Self { atoms })
    }
}
