use crate::vec3::Vec3;

/// One-electron and two-electron integrals between functions of the same
/// kind, either primitive Gaussians or contracted basis functions.
pub trait Integral {
    /// Value of the function at point `r`.
    fn evaluate(&self, r: &Vec3) -> f64;

    fn int_overlap(a: &Self, b: &Self) -> f64;

    fn int_kinetic(a: &Self, b: &Self) -> f64;

    /// Attraction to a unit point charge at `c`; scale by the nuclear
    /// charge for a nucleus.
    fn int_nuclear(a: &Self, b: &Self, c: &Vec3) -> f64;

    /// (ab|cd) in chemists' notation.
    fn int_repulsion(a: &Self, b: &Self, c: &Self, d: &Self) -> f64;
}
