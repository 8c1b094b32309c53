//! Binomial coefficients for completion counting.

/// `n` choose `k` as a float.
///
/// Returns 1 when `n == k`, 0 when `n < k` (an exhausted rank or suit
/// contributes nothing), otherwise `n! / (k! (n - k)!)`.
///
/// # Examples
///
/// ```
/// use squares_ai::combinatorics::choose;
///
/// assert_eq!(choose(5, 2), 10.0);
/// assert_eq!(choose(4, 4), 1.0);
/// assert_eq!(choose(3, 5), 0.0);
/// ```
pub fn choose(n: usize, k: usize) -> f64 {
    if n == k {
        return 1.0;
    }
    if n < k {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut acc = 1.0;
    for i in 0..k {
        // stays integral at every step: acc == C(n, i + 1)
        acc = acc * (n - i) as f64 / (i + 1) as f64;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_cases() {
        assert_eq!(choose(0, 0), 1.0);
        assert_eq!(choose(7, 0), 1.0);
        assert_eq!(choose(0, 1), 0.0);
        assert_eq!(choose(3, 5), 0.0);
        assert_eq!(choose(4, 4), 1.0);
    }

    #[test]
    fn matches_known_values() {
        assert_eq!(choose(5, 2), 10.0);
        assert_eq!(choose(13, 5), 1287.0);
        assert_eq!(choose(47, 3), 16215.0);
        assert_eq!(choose(52, 5), 2_598_960.0);
    }

    #[test]
    fn symmetric() {
        for n in 0..=52 {
            for k in 0..=n {
                assert_eq!(choose(n, k), choose(n, n - k), "n={} k={}", n, k);
            }
        }
    }

    #[test]
    fn pascal_rule() {
        for n in 1..=30 {
            for k in 1..n {
                let lhs = choose(n, k);
                let rhs = choose(n - 1, k - 1) + choose(n - 1, k);
                assert!((lhs - rhs).abs() < 1e-6 * lhs, "n={} k={}", n, k);
            }
        }
    }
}
