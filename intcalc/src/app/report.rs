use super::integrals::IntegralSet;
use gauss_int::cgto::{eri_at, idx2};
use gauss_int::molecule::ANGSTROM_PER_BOHR;
use gauss_int::{BasisSet, Matrix, Molecule, SymEigenSolver};
use tracing::info;

// (ij|kl) smaller than this are left out of the listing
const ERI_PRINT_THRESHOLD: f64 = 1e-10;

pub fn report_molecule(mol: &Molecule) {
    info!(
        "\nMolecule: {} atoms, {} electrons, charge {}, multiplicity {}",
        mol.n_atoms(),
        mol.n_elec(),
        mol.charge,
        mol.multiplicity
    );
    info!("Geometry (angstrom):");
    for (idx, (sym, pos)) in mol.symbols.iter().zip(mol.geom.iter()).enumerate() {
        let r = *pos * ANGSTROM_PER_BOHR;
        info!("  Atom {:>2} {:>2}: [{:+.6}, {:+.6}, {:+.6}]", idx + 1, sym, r.x, r.y, r.z);
    }
    info!("Nuclear repulsion energy: {:.10} au", mol.nuclear_repulsion());
}

pub fn report_basis(set: &BasisSet) {
    info!("\nBasis set: {} contracted functions", set.len());
    for (idx, b) in set.iter().enumerate() {
        info!(
            "  {:>4} {:<4} {} primitives at [{:+.6}, {:+.6}, {:+.6}]",
            idx + 1,
            b.label(),
            b.len(),
            b.center.x,
            b.center.y,
            b.center.z
        );
    }
}

pub fn report_matrix(name: &str, mat: &Matrix) {
    info!("\n{} matrix ({}x{}):\n{}", name, mat.rows(), mat.cols(), mat);
}

pub fn report_repulsion(n_basis: usize, eri: &Matrix) {
    info!("\nTwo-electron integrals (ij|kl), {} unique:", eri.size());
    let mut printed = 0;
    for i in 0..n_basis {
        for j in 0..=i {
            for k in 0..n_basis {
                for l in 0..=k {
                    if idx2(k, l) > idx2(i, j) {
                        continue;
                    }
                    let val = eri_at(eri, i, j, k, l);
                    if val.abs() > ERI_PRINT_THRESHOLD {
                        info!("  ({:>3} {:>3} | {:>3} {:>3}) = {:16.10}", i + 1, j + 1, k + 1, l + 1, val);
                        printed += 1;
                    }
                }
            }
        }
    }
    info!("  {} integrals above {:e}", printed, ERI_PRINT_THRESHOLD);
}

pub fn report_overlap_spectrum(overlap: &Matrix) {
    if overlap.size() == 0 {
        return;
    }
    let eig = SymEigenSolver::new(overlap);
    let values = eig.eigen_val();
    info!("\nOverlap eigenvalues:");
    for i in 0..values.rows() {
        info!("  {:>4}: {:.10}", i + 1, values[i]);
    }
    let smallest = values[0];
    let largest = values[values.rows() - 1];
    if smallest > 0.0 {
        info!("Condition number: {:.6e}", largest / smallest);
    } else {
        info!("Overlap matrix is singular (smallest eigenvalue {:.3e})", smallest);
    }
}

pub fn report_summary(ints: &IntegralSet, print_eigen: bool) {
    if let Some(s) = &ints.overlap {
        report_matrix("Overlap", s);
        if print_eigen {
            report_overlap_spectrum(s);
        }
    }
    if let Some(t) = &ints.kinetic {
        report_matrix("Kinetic", t);
    }
    if let Some(v) = &ints.nuclear {
        report_matrix("Nuclear attraction", v);
    }
    if let Some(h) = ints.core_hamiltonian() {
        report_matrix("Core Hamiltonian", &h);
    }
    if let Some(eri) = &ints.repulsion {
        report_repulsion(ints.n_basis(), eri);
    }
}
