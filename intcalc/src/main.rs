//! Integral calculation command-line interface
//!
//! Reads a YAML job (or a molecule file), builds the contracted basis set and
//! reports the overlap, kinetic, nuclear attraction and electron repulsion
//! integrals.

use color_eyre::eyre::Result;

mod app;
mod config;
mod io;

use app::IntcalcApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    IntcalcApplication::from_cli()?.run()
}
