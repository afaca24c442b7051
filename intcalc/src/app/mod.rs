mod integrals;
mod report;

pub use integrals::IntegralSet;

use self::report::{report_basis, report_molecule, report_summary};
use crate::config::{Args, Config};
use crate::io::{load_basis, resolve_basis_path, setup_output};
use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use gauss_int::{BasisSet, Molecule};
use std::fs;
use std::path::Path;
use tracing::info;

pub struct IntcalcApplication {
    args: Args,
    config: Config,
}

impl IntcalcApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());
        info!("Configuration loaded:\n{:?}", self.config);

        let (mol, job_file) = self.molecule()?;
        report_molecule(&mol);

        let basis_name = self
            .args
            .basis_file
            .clone()
            .or_else(|| self.config.basis_file.clone())
            .filter(|name| !name.is_empty())
            .or_else(|| Some(mol.basis_file.clone()).filter(|name| !name.is_empty()))
            .ok_or_else(|| eyre!("No basis file given in the job, the molecule or on the command line"))?;
        let basis_path = resolve_basis_path(&basis_name, Some(Path::new(&job_file)));
        let basis_file = load_basis(&basis_path, self.config.basis_format()?)?;

        let set = BasisSet::from_molecule(&basis_file, &mol)
            .wrap_err_with(|| format!("Unable to build basis set from {}", basis_path.display()))?;
        report_basis(&set);

        let mut params = self.config.integrals();
        if self.args.no_repulsion {
            info!("Skipping electron repulsion integrals");
            params.repulsion = Some(false);
        }

        let ints = IntegralSet::compute(&set, &mol, &params);
        report_summary(&ints, self.args.print_eigen);

        if let Some(path) = &self.args.save {
            ints.save_to_file(path)?;
        }
        Ok(())
    }

    /// The molecule to work on and the file it came from
    fn molecule(&self) -> Result<(Molecule, String)> {
        match &self.args.molecule {
            Some(path) => {
                info!("Reading molecule from: {}", path);
                let mol = Molecule::from_file(path)
                    .wrap_err_with(|| format!("Unable to read molecule file: {}", path))?;
                Ok((mol, path.clone()))
            }
            None => {
                let mol = self.config.molecule().wrap_err_with(|| {
                    format!("Invalid geometry in configuration file: {}", self.args.config_file)
                })?;
                Ok((mol, self.args.config_file.clone()))
            }
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    // a molecule file alone is a complete job
    if args.molecule.is_some() && !Path::new(&args.config_file).exists() {
        return Ok(Config::default().with_defaults());
    }

    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
