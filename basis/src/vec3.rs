//! A point or vector in 3D space, used for Gaussian centres and nuclei.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{
    Add, AddAssign, Deref, DerefMut, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub,
    SubAssign,
};
use std::str::FromStr;

/// Thin wrapper over `nalgebra::Vector3`; components read as `v.x`, `v.y`, `v.z`.
/// `*` and `/` between two vectors act elementwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3(Vector3<f64>);

#[derive(Debug, Clone, PartialEq)]
pub enum ParseVec3Error {
    MissingComponent(usize),
    InvalidNumber(String),
}

impl fmt::Display for ParseVec3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseVec3Error::MissingComponent(n) => {
                write!(f, "expected 3 components, found {}", n)
            }
            ParseVec3Error::InvalidNumber(tok) => write!(f, "invalid number: {:?}", tok),
        }
    }
}

impl std::error::Error for ParseVec3Error {}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3(Vector3::new(x, y, z))
    }

    pub fn len(&self) -> f64 {
        self.0.norm()
    }

    pub fn len2(&self) -> f64 {
        self.0.norm_squared()
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.0.dot(&other.0)
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Vec3(Vector3::zeros())
    }
}

impl Deref for Vec3 {
    type Target = Vector3<f64>;

    fn deref(&self) -> &Vector3<f64> {
        &self.0
    }
}

impl DerefMut for Vec3 {
    fn deref_mut(&mut self) -> &mut Vector3<f64> {
        &mut self.0
    }
}

/// Renders as three fixed-width fields with 8 decimals, the inverse of `FromStr`.
impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {:16.8} {:16.8} {:16.8}", self.x, self.y, self.z)
    }
}

/// Reads the first three whitespace separated reals, anything after is ignored.
impl FromStr for Vec3 {
    type Err = ParseVec3Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut xyz = [0.0; 3];
        let mut tokens = s.split_whitespace();
        for (n, slot) in xyz.iter_mut().enumerate() {
            let tok = tokens.next().ok_or(ParseVec3Error::MissingComponent(n))?;
            *slot = tok
                .parse::<f64>()
                .map_err(|_| ParseVec3Error::InvalidNumber(tok.to_string()))?;
        }
        Ok(Vec3::from(xyz))
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Vec3(v)
    }
}

impl From<Vec3> for Vector3<f64> {
    fn from(v: Vec3) -> Self {
        v.0
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Vec3(Vector3::from(v))
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        assert!(i < 3, "Vec3 index out of range: {}", i);
        &self.0[i]
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        assert!(i < 3, "Vec3 index out of range: {}", i);
        &mut self.0[i]
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3(-self.0)
    }
}

// Vec3 op Vec3, Vec3 op f64 and f64 op Vec3, given as expressions over the
// wrapped Vector3 values; the assign forms reuse the binary ones.
macro_rules! impl_vec3_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident,
     |$a:ident, $b:ident| $vec_vec:expr,
     |$v:ident, $s:ident| $vec_scalar:expr,
     |$t:ident, $w:ident| $scalar_vec:expr) => {
        impl $Op for Vec3 {
            type Output = Vec3;
            fn $op(self, rhs: Vec3) -> Vec3 {
                let ($a, $b) = (self.0, rhs.0);
                Vec3($vec_vec)
            }
        }

        impl $Op<f64> for Vec3 {
            type Output = Vec3;
            fn $op(self, rhs: f64) -> Vec3 {
                let ($v, $s) = (self.0, rhs);
                Vec3($vec_scalar)
            }
        }

        impl $Op<Vec3> for f64 {
            type Output = Vec3;
            fn $op(self, rhs: Vec3) -> Vec3 {
                let ($t, $w) = (self, rhs.0);
                Vec3($scalar_vec)
            }
        }

        impl $OpAssign for Vec3 {
            fn $op_assign(&mut self, rhs: Vec3) {
                *self = $Op::$op(*self, rhs);
            }
        }

        impl $OpAssign<f64> for Vec3 {
            fn $op_assign(&mut self, rhs: f64) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

impl_vec3_op!(Add, add, AddAssign, add_assign,
    |a, b| a + b,
    |v, s| v.add_scalar(s),
    |t, w| w.add_scalar(t));
impl_vec3_op!(Sub, sub, SubAssign, sub_assign,
    |a, b| a - b,
    |v, s| v.add_scalar(-s),
    |t, w| w.map(|x| t - x));
impl_vec3_op!(Mul, mul, MulAssign, mul_assign,
    |a, b| a.component_mul(&b),
    |v, s| v * s,
    |t, w| w * t);
impl_vec3_op!(Div, div, DivAssign, div_assign,
    |a, b| a.component_div(&b),
    |v, s| v / s,
    |t, w| w.map(|x| t / x));

#[cfg(test)]
mod tests {
    use super::*;

    const ABS_ERR: f64 = 1e-12;

    fn grid() -> impl Iterator<Item = (f64, f64, f64)> {
        let axis = |i: i32| -10.0 + 0.5 * i as f64;
        (0..=40).flat_map(move |i| {
            (0..=40).flat_map(move |j| (0..=40).map(move |k| (axis(i), axis(j), axis(k))))
        })
    }

    #[test]
    fn test_default_is_origin() {
        let v = Vec3::default();
        assert_eq!(v, Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_len_and_len2() {
        for (x, y, z) in grid() {
            let v = Vec3::new(x, y, z);
            let len = (x * x + y * y + z * z).sqrt();
            assert!((v.len() - len).abs() < ABS_ERR);
            assert!((v.len2() - v.len().powi(2)).abs() < ABS_ERR * v.len2().max(1.0));
        }
    }

    #[test]
    fn test_to_string_round_trip() {
        for (x, y, z) in grid() {
            let v1 = Vec3::new(x, y, z);
            let v2: Vec3 = v1.to_string().parse().unwrap();
            assert!((v2.x - x).abs() < ABS_ERR);
            assert!((v2.y - y).abs() < ABS_ERR);
            assert!((v2.z - z).abs() < ABS_ERR);
        }
    }

    #[test]
    fn test_render_format() {
        let v = Vec3::new(1.0, -2.5, 0.123456789);
        assert_eq!(
            v.to_string(),
            "       1.00000000      -2.50000000       0.12345679"
        );
    }

    #[test]
    fn test_parse_ignores_trailing_text() {
        let v: Vec3 = "1.5 -2.0 3.25 H atom".parse().unwrap();
        assert_eq!(v, Vec3::new(1.5, -2.0, 3.25));

        assert_eq!(
            "1.0 2.0".parse::<Vec3>(),
            Err(ParseVec3Error::MissingComponent(2))
        );
        assert!(matches!(
            "1.0 abc 2.0".parse::<Vec3>(),
            Err(ParseVec3Error::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);

        assert_eq!(a + b, Vec3::new(-3.0, 2.5, 5.0));
        assert_eq!(a - b, Vec3::new(5.0, 1.5, 1.0));
        assert_eq!(a * b, Vec3::new(-4.0, 1.0, 6.0));
        assert_eq!(a / b, Vec3::new(-0.25, 4.0, 1.5));
        assert_eq!(a + 1.0, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(1.0 - a, Vec3::new(0.0, -1.0, -2.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(6.0 / a, Vec3::new(6.0, 3.0, 2.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(&b), -4.0 + 1.0 + 6.0);

        let mut c = a;
        c += b;
        c -= b;
        c *= 3.0;
        c /= 3.0;
        assert_eq!(c, a);
        c *= b;
        c /= b;
        assert_eq!(c, a);
        c += 1.0;
        c -= 1.0;
        assert_eq!(c, a);
    }

    #[test]
    fn test_index_and_nalgebra_conversion() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v[2] = 7.0;
        assert_eq!(v[0] + v[1] + v[2], 10.0);

        let nv: Vector3<f64> = v.into();
        assert_eq!(nv, Vector3::new(1.0, 2.0, 7.0));
        assert_eq!(Vec3::from(nv), v);
        assert_eq!(Vec3::from([1.0, 2.0, 7.0]), v);

        // nalgebra methods reach through the wrapper
        assert_eq!(v.norm(), v.len());
        v.x = -1.0;
        assert_eq!(v.sum(), 8.0);
    }

    #[test]
    #[should_panic(expected = "Vec3 index out of range")]
    fn test_index_out_of_range() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let _ = v[3];
    }
}
