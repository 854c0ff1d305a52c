//! Seeded FNV-1a (32-bit). One primitive, `k` seeds, `k` probe positions.

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Full 32-bit seeded FNV-1a digest of `value`.
#[inline]
pub fn fnv1a32(value: &[u8], seed: u32) -> u32 {
    value.iter().fold(seed ^ FNV_OFFSET_BASIS, |h, &b| (h ^ b as u32).wrapping_mul(FNV_PRIME))
}

/// Probe position of `value` for hash function `seed` in an array of `m` slots.
/// `m` must be non-zero.
#[inline]
pub fn hash_at(value: &[u8], seed: u32, m: u32) -> u32 {
    fnv1a32(value, seed) % m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_matches_plain_fnv1a() {
        assert_eq!(fnv1a32(b"", 0), FNV_OFFSET_BASIS);
        assert_eq!(fnv1a32(b"a", 0), 0xE40C_292C);
    }

    #[test]
    fn known_probe_position() {
        assert_eq!(fnv1a32(b"hello", 17), 2_332_105_796);
        assert_eq!(hash_at(b"hello", 17, 479_253), 60_698);
    }

    #[test]
    fn seeds_change_the_digest() {
        let a = fnv1a32(b"concurrency", 17);
        let b = fnv1a32(b"concurrency", 34);
        assert_ne!(a, b);
    }

    #[test]
    fn always_in_range() {
        for m in [1u32, 2, 7, 1000, u32::MAX] {
            for w in ["", "a", "hello", "zzqqxx_not_a_word"] {
                assert!(hash_at(w.as_bytes(), 17, m) < m);
            }
        }
    }
}
