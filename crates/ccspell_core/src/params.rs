//! Optimal Bloom filter sizing.
//!
//!   m = ceil(-n * ln(p) / ln(2)^2)
//!   k = max(1, round((m / n) * ln(2)))

use crate::errors::{BloomError, Result};
use std::f64::consts::LN_2;

/// `ln(2)` squared.
const LN_SQR: f64 = LN_2 * LN_2;

/// Derive `(m, k)` from the expected item count `n` and the target
/// false-positive probability `p`.
///
/// `m` is rounded up so the filter is never under-provisioned, and `k` is
/// floored at one. Both must fit the on-disk header (`m` in 32 bits, `k` in 16).
pub fn compute(n: i64, p: f64) -> Result<(u32, u32)> {
    if n <= 0 {
        return Err(BloomError::invalid("n", format!("expected item count must be > 0, got {n}")));
    }
    // NaN fails both comparisons
    if !(p > 0.0 && p < 1.0) {
        return Err(BloomError::invalid("p", format!("false-positive probability must be in (0, 1), got {p}")));
    }

    let nf = n as f64;
    let m = (-nf * p.ln() / LN_SQR).ceil();
    if m > u32::MAX as f64 {
        return Err(BloomError::invalid("n", format!("bit array of {m} positions does not fit in 32 bits")));
    }
    let m = m as u32;

    let k = ((m as f64 / nf) * LN_2).round().max(1.0);
    if k > u16::MAX as f64 {
        return Err(BloomError::invalid("p", format!("{k} hash functions do not fit in 16 bits")));
    }

    Ok((m, k as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regression_values() {
        assert_eq!(compute(100_000, 0.1).unwrap(), (479_253, 3));
        assert_eq!(compute(100_000, 0.01).unwrap(), (958_506, 7));
        assert_eq!(compute(1_000, 0.1).unwrap(), (4_793, 3));
    }

    #[test]
    fn k_is_floored_at_one() {
        // (3 / 100) * ln 2 rounds to zero
        assert_eq!(compute(100, 0.99).unwrap(), (3, 1));
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        for (n, p, name) in [(0, 0.1, "n"), (-5, 0.1, "n"), (100, 0.0, "p"), (100, 1.0, "p"), (100, f64::NAN, "p")] {
            match compute(n, p) {
                Err(BloomError::InvalidParameter { name: got, .. }) => assert_eq!(got, name),
                other => panic!("compute({n}, {p}) gave {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_bit_array_overflowing_header() {
        assert!(matches!(
            compute(i64::MAX, 0.01),
            Err(BloomError::InvalidParameter { name: "n", .. })
        ));
    }
}
