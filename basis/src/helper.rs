use libm::erf;
use std::f64::consts::PI;

#[cfg(test)]
use crate::vec3::Vec3;
#[cfg(test)]
use rayon::prelude::*;

const SMALL_X: f64 = 1.0e-5;
const LARGE_X: f64 = 30.0;
const SERIES_EPS: f64 = 1.0e-16;
const SERIES_MAX_TERMS: usize = 1000;

/// Boys function F_n(x) = ∫₀¹ t^(2n) exp(-x t²) dt.
///
/// Small x uses the limit 1/(2n+1), n == 0 the erf closed form. For large x
/// (x >= 30 and x >= n) the upward recurrence from F_0 is well conditioned;
/// everywhere else F_n is summed from the series
/// F_n(x) = exp(-x) Σ_k (2x)^k / ((2n+1)(2n+3)...(2n+2k+1)),
/// whose terms are all positive.
pub fn boys_function(n: i32, x: f64) -> f64 {
    assert!(n >= 0, "Boys function order must be nonnegative, got {}", n);
    assert!(x >= 0.0, "Boys function argument must be nonnegative, got {}", x);

    if x < SMALL_X {
        return 1.0 / (2.0 * n as f64 + 1.0);
    }
    if n == 0 {
        return boys_zero(x);
    }
    if x >= LARGE_X && x >= n as f64 {
        return boys_upward(n, x);
    }
    boys_series(n, x)
}

fn boys_zero(x: f64) -> f64 {
    0.5 * (PI / x).sqrt() * erf(x.sqrt())
}

// F_m = [(2m-1) F_{m-1} - exp(-x)] / (2x)
fn boys_upward(n: i32, x: f64) -> f64 {
    let ex = (-x).exp();
    (1..=n).fold(boys_zero(x), |f, m| ((2 * m - 1) as f64 * f - ex) / (2.0 * x))
}

fn boys_series(n: i32, x: f64) -> f64 {
    let mut denom = 2.0 * n as f64 + 1.0;
    let mut term = 1.0 / denom;
    let mut sum = term;
    for _ in 0..SERIES_MAX_TERMS {
        denom += 2.0;
        term *= 2.0 * x / denom;
        sum += term;
        if term < SERIES_EPS * sum {
            break;
        }
    }
    (-x).exp() * sum
}

// Simpson's rule integration
#[cfg(test)]
pub(crate) fn simpson_integration<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = if n % 2 == 0 { n } else { n + 1 };
    let h = (b - a) / n as f64;

    let mut sum = f(a) + f(b);
    for i in 1..n {
        let x = a + i as f64 * h;
        sum += if i % 2 == 0 { 2.0 * f(x) } else { 4.0 * f(x) };
    }
    sum * h / 3.0
}

#[cfg(test)]
fn simpson_weight(i: usize, n: usize) -> f64 {
    if i == 0 || i == n {
        1.0
    } else if i % 2 == 1 {
        4.0
    } else {
        2.0
    }
}

/// Parallel Simpson's rule over the box [a, b], `n` subdivisions per axis
/// (rounded up to even).
#[cfg(test)]
pub(crate) fn simpson_integration_3d<F>(f: F, a: Vec3, b: Vec3, n: usize) -> f64
where
    F: Fn(Vec3) -> f64 + Sync,
{
    let n = if n % 2 == 0 { n } else { n + 1 };
    let h = (b - a) / n as f64;

    let sum: f64 = (0..=n)
        .into_par_iter()
        .map(|i| {
            let mut acc = 0.0;
            for j in 0..=n {
                for k in 0..=n {
                    let w = simpson_weight(i, n) * simpson_weight(j, n) * simpson_weight(k, n);
                    let r = a + h * Vec3::new(i as f64, j as f64, k as f64);
                    acc += w * f(r);
                }
            }
            acc
        })
        .sum();

    sum * (h.x * h.y * h.z) / 27.0
}

/// Midpoint-rule integral of f(r) / |r - c| over the box [a, b].
///
/// Cells whose midpoint falls within `tolerance` of `c` are skipped.
#[cfg(test)]
pub(crate) fn integrate_coulomb_3d<F>(
    f: F,
    a: Vec3,
    b: Vec3,
    c: Vec3,
    n: usize,
    tolerance: f64,
) -> f64
where
    F: Fn(Vec3) -> f64 + Sync,
{
    let h = (b - a) / n as f64;

    let sum: f64 = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut acc = 0.0;
            for j in 0..n {
                for k in 0..n {
                    let r = a + h * Vec3::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5);
                    let dist = (r - c).len();
                    if dist > tolerance {
                        acc += f(r) / dist;
                    }
                }
            }
            acc
        })
        .sum();

    sum * h.x * h.y * h.z
}
