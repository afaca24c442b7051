//! Command-line argument parsing for integral jobs

use clap::Parser;

/// Evaluate Gaussian integral matrices for a molecule
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML job file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Molecule file (basis file, charge, multiplicity, then `Sym x y z` in angstrom);
    /// replaces the geometry of the job file
    #[arg(short, long)]
    pub molecule: Option<String>,

    /// Override the basis file
    #[arg(long)]
    pub basis_file: Option<String>,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Skip the electron repulsion integrals
    #[arg(long)]
    pub no_repulsion: bool,

    /// Save the computed integrals as a pickle file
    #[arg(long)]
    pub save: Option<String>,

    /// Print the overlap eigenvalues and condition number
    #[arg(long)]
    pub print_eigen: bool,
}
