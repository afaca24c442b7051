//! Combinatorial helpers used by the integral expansions.

/// n! as a floating point number.
///
/// Exact for n <= 20; larger n (the repulsion expansion reaches 24 for
/// I shells) returns the rounded floating point product.
pub fn factorial(n: i32) -> f64 {
    assert!(n >= 0, "factorial of negative number: {}", n);
    (1..=n).fold(1.0, |acc, x| acc * x as f64)
}

/// Double factorial n!!, with (-1)!! = 0!! = 1.
///
/// https://en.wikipedia.org/wiki/Double_factorial
pub fn semifactorial(n: i32) -> f64 {
    assert!(n >= -1, "semifactorial of {} is undefined", n);
    let start = if n & 1 == 1 { 1 } else { 2 };
    (start..=n).step_by(2).fold(1.0, |acc, x| acc * x as f64)
}

/// Binomial coefficient C(n, k).
///
/// Accumulated as t *= (n - i + 1) / i so that every intermediate value is
/// itself a binomial coefficient, which keeps it exact up to n = 50.
pub fn combination(n: i32, k: i32) -> f64 {
    assert!(
        n >= 0 && k >= 0 && k <= n,
        "combination({}, {}) out of range",
        n,
        k
    );
    // C(n, k) == C(n, n - k), take the shorter product
    let k = k.min(n - k);
    let mut t = 1.0;
    for i in 1..=k {
        t = t * (n - i + 1) as f64 / i as f64;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABS_ERR: f64 = 1.0e-14;

    #[test]
    fn test_factorial() {
        for n in 0..=20 {
            let mut expected = 1.0;
            for i in 1..=n {
                expected *= i as f64;
            }
            assert!(
                (factorial(n) - expected).abs() < ABS_ERR,
                "factorial({}) = {}, expected {}",
                n,
                factorial(n),
                expected
            );
        }
    }

    #[test]
    fn test_semifactorial() {
        for n in -1..=30 {
            let mut expected = 1.0;
            if n >= 0 {
                let mut i = if n & 1 == 1 { 1 } else { 2 };
                while i <= n {
                    expected *= i as f64;
                    i += 2;
                }
            }
            assert!(
                (semifactorial(n) - expected).abs() < ABS_ERR,
                "semifactorial({}) = {}, expected {}",
                n,
                semifactorial(n),
                expected
            );
        }
        assert_eq!(semifactorial(-1), 1.0);
        assert_eq!(semifactorial(0), 1.0);
        assert_eq!(semifactorial(7), 105.0);
        assert_eq!(semifactorial(8), 384.0);
    }

    #[test]
    fn test_combination() {
        for n in 0..=50 {
            for k in 0..=n {
                // falling factorial over k!
                let mut expected = 1.0;
                let mut t = n;
                for i in 1..=k {
                    expected *= t as f64;
                    expected /= i as f64;
                    t -= 1;
                }
                let diff = (combination(n, k) - expected).abs();
                assert!(
                    diff <= ABS_ERR * expected.max(1.0),
                    "combination({}, {}) = {}, expected {}",
                    n,
                    k,
                    combination(n, k),
                    expected
                );
            }
        }
        assert_eq!(combination(50, 25), 126410606437752.0);
    }

    #[test]
    #[should_panic]
    fn test_factorial_negative() {
        factorial(-1);
    }

    #[test]
    #[should_panic]
    fn test_combination_k_greater_than_n() {
        combination(3, 4);
    }
}
