use crate::angmom::AngMom;
use crate::basis::Integral;
use crate::tho;
use crate::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// Primitive Cartesian Gaussian
/// coeff · (x-X)^i (y-Y)^j (z-Z)^k · exp(-alpha |r - center|²).
///
/// `coeff` already contains the normalization constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gauss {
    pub alpha: f64,
    pub coeff: f64,
    pub ijk: AngMom,
    pub center: Vec3,
}

impl Gauss {
    pub fn new(alpha: f64, coeff: f64, ijk: AngMom, center: Vec3) -> Self {
        Self {
            alpha,
            coeff,
            ijk,
            center,
        }
    }
}

impl Integral for Gauss {
    fn evaluate(&self, r: &Vec3) -> f64 {
        let d = *r - self.center;
        self.coeff
            * d.x.powi(self.ijk.i)
            * d.y.powi(self.ijk.j)
            * d.z.powi(self.ijk.k)
            * (-self.alpha * d.len2()).exp()
    }

    fn int_overlap(a: &Gauss, b: &Gauss) -> f64 {
        a.coeff
            * b.coeff
            * tho::gauss_int_overlap(a.alpha, a.ijk, &a.center, b.alpha, b.ijk, &b.center)
    }

    fn int_kinetic(a: &Gauss, b: &Gauss) -> f64 {
        a.coeff
            * b.coeff
            * tho::gauss_int_kinetic(a.alpha, a.ijk, &a.center, b.alpha, b.ijk, &b.center)
    }

    fn int_nuclear(a: &Gauss, b: &Gauss, c: &Vec3) -> f64 {
        a.coeff
            * b.coeff
            * tho::gauss_int_nuclear(a.alpha, a.ijk, &a.center, b.alpha, b.ijk, &b.center, c)
    }

    fn int_repulsion(a: &Gauss, b: &Gauss, c: &Gauss, d: &Gauss) -> f64 {
        a.coeff
            * b.coeff
            * c.coeff
            * d.coeff
            * tho::gauss_int_repulsion(
                a.alpha, a.ijk, &a.center, b.alpha, b.ijk, &b.center, c.alpha, c.ijk, &c.center,
                d.alpha, d.ijk, &d.center,
            )
    }
}
