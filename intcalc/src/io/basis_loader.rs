//! Basis set loading utilities

use color_eyre::eyre::{Result, WrapErr};
use gauss_int::{BasisFile, BasisFormat};
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolves a basis file name: as given when it exists, otherwise next to
/// the job file that referenced it.
pub fn resolve_basis_path(name: &str, job_file: Option<&Path>) -> PathBuf {
    let direct = PathBuf::from(name);
    if direct.exists() || direct.is_absolute() {
        return direct;
    }
    job_file
        .and_then(Path::parent)
        .map(|dir| dir.join(name))
        .filter(|p| p.exists())
        .unwrap_or(direct)
}

/// Read a basis file, detecting the format unless one is given
pub fn load_basis(path: &Path, format: Option<BasisFormat>) -> Result<BasisFile> {
    let file = match format {
        Some(format) => BasisFile::from_file_with_format(path, format),
        None => BasisFile::from_file(path),
    }
    .wrap_err_with(|| format!("Failed to read basis file: {}", path.display()))?;

    info!(
        "Loaded basis file {} with elements: {}",
        path.display(),
        file.elements().collect::<Vec<_>>().join(" ")
    );
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basis_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../basis/tests/basis_sets")
    }

    #[test]
    fn test_resolve_next_to_job_file() {
        let job = basis_dir().join("job.yaml");
        let resolved = resolve_basis_path("sto-3g.gbs", Some(&job));
        assert_eq!(resolved, basis_dir().join("sto-3g.gbs"));

        let missing = resolve_basis_path("no-such.gbs", Some(&job));
        assert_eq!(missing, PathBuf::from("no-such.gbs"));
    }

    #[test]
    fn test_load_basis() {
        let file = load_basis(&basis_dir().join("sto-3g.nwchem"), None).unwrap();
        assert!(file.get("he").is_some());

        let err = load_basis(&basis_dir().join("no-such.gbs"), None).unwrap_err();
        assert!(format!("{:?}", err).contains("no-such.gbs"));
    }
}
