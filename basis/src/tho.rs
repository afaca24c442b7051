//! Closed-form integrals over primitive Cartesian Gaussians
//! (Taketa, Huzinaga and O-ohata, J. Phys. Soc. Japan 21, 2313 (1966)).
//!
//! A primitive is described by its exponent, its angular momentum triple and
//! its centre. Normalization and contraction coefficients are applied by the
//! callers in `gto.rs`.

use crate::angmom::AngMom;
use crate::helper::boys_function;
use crate::mathfun::{combination, factorial, semifactorial};
use crate::vec3::Vec3;
use itertools::iproduct;
use std::f64::consts::PI;

#[inline]
fn parity(n: i32) -> f64 {
    if n & 1 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Coefficient of x^j in (x + a)^l (x + b)^m.
pub fn binomial_prefactor(j: i32, l: i32, m: i32, a: f64, b: f64) -> f64 {
    (0..=l)
        .filter(|&p| (0..=m).contains(&(j - p)))
        .map(|p| {
            let q = j - p;
            combination(l, p) * combination(m, q) * a.powi(l - p) * b.powi(m - q)
        })
        .sum()
}

/// One Cartesian factor of the overlap, without the exponential prefactor.
pub fn overlap_1d(alpha1: f64, l1: i32, x1: f64, alpha2: f64, l2: i32, x2: f64) -> f64 {
    if l1 < 0 || l2 < 0 {
        return 0.0;
    }
    let zeta = alpha1 + alpha2;
    let px = (alpha1 * x1 + alpha2 * x2) / zeta;
    let (pax, pbx) = (px - x1, px - x2);

    (0..=(l1 + l2) / 2)
        .map(|i| {
            binomial_prefactor(2 * i, l1, l2, pax, pbx) * semifactorial(2 * i - 1)
                / (2.0 * zeta).powi(i)
        })
        .sum()
}

pub fn gauss_int_overlap(
    alpha1: f64,
    lmn1: AngMom,
    a: &Vec3,
    alpha2: f64,
    lmn2: AngMom,
    b: &Vec3,
) -> f64 {
    if [lmn1.i, lmn1.j, lmn1.k, lmn2.i, lmn2.j, lmn2.k]
        .iter()
        .any(|&l| l < 0)
    {
        return 0.0;
    }
    let inv_zeta = 1.0 / (alpha1 + alpha2);
    let ab2 = (*a - *b).len2();

    (PI * inv_zeta).powf(1.5)
        * (-alpha1 * alpha2 * inv_zeta * ab2).exp()
        * overlap_1d(alpha1, lmn1.i, a.x, alpha2, lmn2.i, b.x)
        * overlap_1d(alpha1, lmn1.j, a.y, alpha2, lmn2.j, b.y)
        * overlap_1d(alpha1, lmn1.k, a.z, alpha2, lmn2.k, b.z)
}

/// Kinetic energy integral <a| -∇²/2 |b>, written through overlaps in which
/// the exponents of `b` are raised or lowered by two.
pub fn gauss_int_kinetic(
    alpha1: f64,
    lmn1: AngMom,
    a: &Vec3,
    alpha2: f64,
    lmn2: AngMom,
    b: &Vec3,
) -> f64 {
    let (l2, m2, n2) = (lmn2.i, lmn2.j, lmn2.k);
    let s = |lmn: AngMom| gauss_int_overlap(alpha1, lmn1, a, alpha2, lmn, b);

    let i0 = alpha2 * (2.0 * lmn2.sum() as f64 + 3.0) * s(lmn2);

    let i1 = -0.5
        * ((l2 * (l2 - 1)) as f64 * s(AngMom::new(l2 - 2, m2, n2))
            + (m2 * (m2 - 1)) as f64 * s(AngMom::new(l2, m2 - 2, n2))
            + (n2 * (n2 - 1)) as f64 * s(AngMom::new(l2, m2, n2 - 2)));

    let i2 = -2.0
        * alpha2
        * alpha2
        * (s(AngMom::new(l2 + 2, m2, n2))
            + s(AngMom::new(l2, m2 + 2, n2))
            + s(AngMom::new(l2, m2, n2 + 2)));

    i0 + i1 + i2
}

/// Expansion coefficient of F_I in one Cartesian direction of the nuclear
/// attraction integral. `g` is the combined exponent ζ.
pub fn g_i(i_order: i32, l1: i32, l2: i32, pax: f64, pbx: f64, pcx: f64, g: f64) -> f64 {
    let eps = 0.25 / g;
    let mut ret = 0.0;
    for i in 0..=l1 + l2 {
        let bp = binomial_prefactor(i, l1, l2, pax, pbx);
        if bp == 0.0 {
            continue;
        }
        for r in 0..=i / 2 {
            let u = i - 2 * r - i_order;
            if u < 0 || u > (i - 2 * r) / 2 {
                continue;
            }
            let k = i - 2 * (r + u);
            ret += parity(i + u) * bp * factorial(i) * pcx.powi(k) * eps.powi(r + u)
                / (factorial(r) * factorial(u) * factorial(k));
        }
    }
    ret
}

/// Attraction between the charge distribution a·b and a unit positive
/// charge at `c`. The result is negative.
pub fn gauss_int_nuclear(
    alpha1: f64,
    lmn1: AngMom,
    a: &Vec3,
    alpha2: f64,
    lmn2: AngMom,
    b: &Vec3,
    c: &Vec3,
) -> f64 {
    let zeta = alpha1 + alpha2;
    let inv_zeta = 1.0 / zeta;
    let p = (alpha1 * *a + alpha2 * *b) * inv_zeta;

    let ab2 = (*a - *b).len2();
    let cp2 = (p - *c).len2();

    let g_array = |dim: usize, l1: i32, l2: i32| -> Vec<f64> {
        (0..=l1 + l2)
            .map(|i| g_i(i, l1, l2, p[dim] - a[dim], p[dim] - b[dim], p[dim] - c[dim], zeta))
            .collect()
    };
    let gx = g_array(0, lmn1.i, lmn2.i);
    let gy = g_array(1, lmn1.j, lmn2.j);
    let gz = g_array(2, lmn1.k, lmn2.k);

    let sum: f64 = iproduct!(0..gx.len(), 0..gy.len(), 0..gz.len())
        .map(|(i, j, k)| gx[i] * gy[j] * gz[k] * boys_function((i + j + k) as i32, cp2 * zeta))
        .sum();

    -2.0 * PI * inv_zeta * (-alpha1 * alpha2 * inv_zeta * ab2).exp() * sum
}

/// Hermite-like coefficient of order `big_l` for one electron pair in one
/// direction; `a` and `b` are P - A and P - B, `g` the pair exponent.
///
/// Symmetric under exchanging (l1, a) with (l2, b).
pub fn h_l(big_l: i32, l1: i32, l2: i32, a: f64, b: f64, g: f64) -> f64 {
    let mut ret = 0.0;
    for i in big_l..=l1 + l2 {
        if (i - big_l) % 2 != 0 {
            continue;
        }
        let r = (i - big_l) / 2;
        ret += factorial(i) * binomial_prefactor(i, l1, l2, a, b)
            / (factorial(r) * factorial(big_l))
            / (4.0 * g).powi(i - r);
    }
    ret
}

/// Coefficients of F_I, I = 0..=l1+l2+l3+l4, in one direction of the
/// repulsion integral. `p`/`q` are the pair centres, `a`..`d` the
/// primitive centres, `g1`/`g2` the pair exponents.
#[allow(clippy::too_many_arguments)]
pub fn c_array(
    l1: i32,
    l2: i32,
    l3: i32,
    l4: i32,
    p: f64,
    a: f64,
    b: f64,
    q: f64,
    c: f64,
    d: f64,
    g1: f64,
    g2: f64,
    delta: f64,
) -> Vec<f64> {
    let mut ret = vec![0.0; (l1 + l2 + l3 + l4 + 1) as usize];

    let hl: Vec<f64> = (0..=l1 + l2).map(|l| h_l(l, l1, l2, p - a, p - b, g1)).collect();
    let hm: Vec<f64> = (0..=l3 + l4).map(|m| h_l(m, l3, l4, q - c, q - d, g2)).collect();

    for (big_l, big_m) in iproduct!(0..=l1 + l2, 0..=l3 + l4) {
        let h = hl[big_l as usize] * hm[big_m as usize];
        if h == 0.0 {
            continue;
        }
        let lm = big_l + big_m;
        for u in 0..=lm / 2 {
            ret[(lm - u) as usize] += h * parity(big_m + u) * factorial(lm) * (q - p).powi(lm - 2 * u)
                / (factorial(u) * factorial(lm - 2 * u))
                / delta.powi(lm - u);
        }
    }
    ret
}

/// Electron repulsion integral (ab|cd) in chemists' notation.
#[allow(clippy::too_many_arguments)]
pub fn gauss_int_repulsion(
    alpha1: f64,
    lmn1: AngMom,
    a: &Vec3,
    alpha2: f64,
    lmn2: AngMom,
    b: &Vec3,
    alpha3: f64,
    lmn3: AngMom,
    c: &Vec3,
    alpha4: f64,
    lmn4: AngMom,
    d: &Vec3,
) -> f64 {
    let zeta12 = alpha1 + alpha2;
    let zeta34 = alpha3 + alpha4;
    let inv_zeta12 = 1.0 / zeta12;
    let inv_zeta34 = 1.0 / zeta34;

    let p = (alpha1 * *a + alpha2 * *b) * inv_zeta12;
    let q = (alpha3 * *c + alpha4 * *d) * inv_zeta34;

    let ab2 = (*a - *b).len2();
    let cd2 = (*c - *d).len2();
    let pq2 = (p - q).len2();

    let delta = 0.25 * (inv_zeta12 + inv_zeta34);

    let coeffs = |dim: usize, l1: i32, l2: i32, l3: i32, l4: i32| {
        c_array(
            l1, l2, l3, l4, p[dim], a[dim], b[dim], q[dim], c[dim], d[dim], zeta12, zeta34, delta,
        )
    };
    let bx = coeffs(0, lmn1.i, lmn2.i, lmn3.i, lmn4.i);
    let by = coeffs(1, lmn1.j, lmn2.j, lmn3.j, lmn4.j);
    let bz = coeffs(2, lmn1.k, lmn2.k, lmn3.k, lmn4.k);

    let x = 0.25 * pq2 / delta;
    let sum: f64 = iproduct!(0..bx.len(), 0..by.len(), 0..bz.len())
        .map(|(i, j, k)| bx[i] * by[j] * bz[k] * boys_function((i + j + k) as i32, x))
        .sum();

    2.0 * PI.powf(2.5) / (zeta12 * zeta34 * (zeta12 + zeta34).sqrt())
        * (-alpha1 * alpha2 * inv_zeta12 * ab2).exp()
        * (-alpha3 * alpha4 * inv_zeta34 * cd2).exp()
        * sum
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: AngMom = AngMom::new(0, 0, 0);

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol * b.abs().max(1.0),
            "{} != {} (tol {})",
            a,
            b,
            tol
        );
    }

    // expand (x + a)^l (x + b)^m by repeated polynomial multiplication
    fn poly_coeffs(l: i32, m: i32, a: f64, b: f64) -> Vec<f64> {
        let mut poly = vec![1.0];
        let factors = std::iter::repeat(a)
            .take(l as usize)
            .chain(std::iter::repeat(b).take(m as usize));
        for shift in factors {
            let mut next = vec![0.0; poly.len() + 1];
            for (n, &c) in poly.iter().enumerate() {
                next[n] += c * shift;
                next[n + 1] += c;
            }
            poly = next;
        }
        poly
    }

    #[test]
    fn test_binomial_prefactor() {
        for (l, m) in iproduct!(0..=6, 0..=6) {
            let (a, b) = (0.37 * (l + 1) as f64, -1.21 + 0.1 * m as f64);
            let poly = poly_coeffs(l, m, a, b);
            for j in 0..=l + m {
                assert_close(binomial_prefactor(j, l, m, a, b), poly[j as usize], 1e-12);
            }
            assert_eq!(binomial_prefactor(l + m + 1, l, m, a, b), 0.0);
        }
        assert_eq!(binomial_prefactor(0, -1, 2, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_overlap_negative_index_is_zero() {
        let a = Vec3::new(0.0, 0.1, 0.2);
        let b = Vec3::new(1.0, -0.3, 0.5);
        assert_eq!(overlap_1d(1.0, -1, 0.0, 1.0, 0, 1.0), 0.0);
        assert_eq!(overlap_1d(1.0, 2, 0.0, 1.0, -2, 1.0), 0.0);
        assert_eq!(
            gauss_int_overlap(0.8, S, &a, 1.3, AngMom::new(0, -2, 1), &b),
            0.0
        );
    }

    #[test]
    fn test_overlap_ss_closed_form() {
        let a = Vec3::new(0.3, -0.2, 0.9);
        let b = Vec3::new(-0.4, 0.8, 0.1);
        let (alpha, beta) = (0.7, 1.9);
        let zeta = alpha + beta;
        let expected = (PI / zeta).powf(1.5) * (-alpha * beta / zeta * (a - b).len2()).exp();
        assert_close(gauss_int_overlap(alpha, S, &a, beta, S, &b), expected, 1e-14);
        assert_close(
            gauss_int_overlap(alpha, S, &a, alpha, S, &a),
            (PI / (2.0 * alpha)).powf(1.5),
            1e-14,
        );
    }

    #[test]
    fn test_overlap_same_centre_moments() {
        // ∫ x^2 exp(-2αx²) dx over all space is (1/(4α)) sqrt(π/(2α))
        let o = Vec3::default();
        let alpha = 0.9;
        let px = AngMom::new(1, 0, 0);
        let expected = 1.0 / (4.0 * alpha) * (PI / (2.0 * alpha)).powf(1.5);
        assert_close(gauss_int_overlap(alpha, px, &o, alpha, px, &o), expected, 1e-14);
        // odd moments vanish
        assert_close(gauss_int_overlap(alpha, px, &o, alpha, S, &o), 0.0, 1e-15);
    }

    #[test]
    fn test_kinetic_ss_closed_form() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.5, 1.2);
        let (alpha, beta) = (1.1, 0.4);
        let xi = alpha * beta / (alpha + beta);
        let s = gauss_int_overlap(alpha, S, &a, beta, S, &b);
        let expected = xi * (3.0 - 2.0 * xi * (a - b).len2()) * s;
        assert_close(gauss_int_kinetic(alpha, S, &a, beta, S, &b), expected, 1e-13);
    }

    #[test]
    fn test_kinetic_hermitian() {
        let a = Vec3::new(0.2, -0.1, 0.4);
        let b = Vec3::new(-0.5, 0.7, 0.0);
        for (la, lb) in iproduct!(
            crate::angmom::generate_angmom(2),
            crate::angmom::generate_angmom(1)
        ) {
            let ab = gauss_int_kinetic(0.6, la, &a, 1.7, lb, &b);
            let ba = gauss_int_kinetic(1.7, lb, &b, 0.6, la, &a);
            assert_close(ab, ba, 1e-12);
        }
    }

    #[test]
    fn test_nuclear_ss_closed_form() {
        let a = Vec3::new(0.1, 0.2, 0.3);
        let b = Vec3::new(-0.3, 0.4, 1.0);
        let c = Vec3::new(1.0, -1.0, 0.5);
        let (alpha, beta) = (0.8, 1.6);
        let zeta = alpha + beta;
        let p = (alpha * a + beta * b) / zeta;
        let expected = -2.0 * PI / zeta
            * (-alpha * beta / zeta * (a - b).len2()).exp()
            * boys_function(0, zeta * (p - c).len2());
        assert_close(gauss_int_nuclear(alpha, S, &a, beta, S, &b, &c), expected, 1e-14);
    }

    #[test]
    fn test_nuclear_hermitian() {
        let a = Vec3::new(0.0, 0.3, -0.2);
        let b = Vec3::new(0.9, -0.4, 0.1);
        let c = Vec3::new(-0.5, 0.5, 0.7);
        for (la, lb) in iproduct!(
            crate::angmom::generate_angmom(2),
            crate::angmom::generate_angmom(3)
        ) {
            let ab = gauss_int_nuclear(0.5, la, &a, 1.2, lb, &b, &c);
            let ba = gauss_int_nuclear(1.2, lb, &b, 0.5, la, &a, &c);
            assert_close(ab, ba, 1e-12);
        }
    }

    #[test]
    fn test_h_l_symmetry() {
        for (l1, l2) in iproduct!(0..=4, 0..=4) {
            for big_l in 0..=l1 + l2 {
                let h12 = h_l(big_l, l1, l2, 0.3, -0.7, 1.4);
                let h21 = h_l(big_l, l2, l1, -0.7, 0.3, 1.4);
                assert_close(h12, h21, 1e-13);
            }
        }
    }

    #[test]
    fn test_repulsion_ssss_closed_form() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, 1.4);
        let c = Vec3::new(0.5, 0.2, 0.0);
        let d = Vec3::new(-0.3, 0.8, 0.9);
        let (a1, a2, a3, a4) = (0.9, 1.3, 0.4, 2.2);
        let (p, q) = (a1 + a2, a3 + a4);
        let pc = (a1 * a + a2 * b) / p;
        let qc = (a3 * c + a4 * d) / q;
        let expected = 2.0 * PI.powf(2.5) / (p * q * (p + q).sqrt())
            * (-a1 * a2 / p * (a - b).len2()).exp()
            * (-a3 * a4 / q * (c - d).len2()).exp()
            * boys_function(0, p * q / (p + q) * (pc - qc).len2());
        let eri = gauss_int_repulsion(a1, S, &a, a2, S, &b, a3, S, &c, a4, S, &d);
        assert_close(eri, expected, 1e-13);
    }

    #[test]
    fn test_repulsion_permutational_symmetry() {
        let centres = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.3, -0.6, 1.1),
            Vec3::new(-0.8, 0.2, 0.4),
            Vec3::new(0.5, 0.9, -0.3),
        ];
        let alphas = [0.7, 1.3, 0.45, 2.1];
        let lmns = [
            AngMom::new(1, 0, 0),
            AngMom::new(0, 1, 1),
            AngMom::new(0, 0, 1),
            AngMom::new(0, 0, 0),
        ];
        let eri = |i: usize, j: usize, k: usize, l: usize| {
            gauss_int_repulsion(
                alphas[i], lmns[i], &centres[i], alphas[j], lmns[j], &centres[j], alphas[k],
                lmns[k], &centres[k], alphas[l], lmns[l], &centres[l],
            )
        };
        let reference = eri(0, 1, 2, 3);
        for (i, j, k, l) in [
            (1, 0, 2, 3),
            (0, 1, 3, 2),
            (1, 0, 3, 2),
            (2, 3, 0, 1),
            (3, 2, 0, 1),
            (2, 3, 1, 0),
            (3, 2, 1, 0),
        ] {
            assert_close(eri(i, j, k, l), reference, 1e-11);
        }
    }
}
