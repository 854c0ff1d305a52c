//! The membership structure: `m` positions, `k` seeded probes, no deletes.

use crate::bitvec::BitVec;
use crate::errors::{BloomError, Result};
use crate::hash::hash_at;
use crate::params;
use crate::seeds::SeedPolicy;
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct BloomFilter {
    m: u32,
    k: u32,
    seeds: Vec<u32>,
    bits: BitVec,
    // sizing hint; None for filters reconstructed from storage
    expected: Option<u64>,
    insertions: u64,
}

impl BloomFilter {
    /// Fresh, empty filter sized for `n` items at false-positive rate `p`,
    /// seeded with the arithmetic sequence.
    pub fn new(n: i64, p: f64) -> Result<Self> {
        Self::with_policy(n, p, SeedPolicy::default())
    }

    pub fn with_policy(n: i64, p: f64, policy: SeedPolicy) -> Result<Self> {
        let (m, k) = params::compute(n, p)?;
        debug!(n, p, m, k, ?policy, "derived filter parameters");
        Ok(Self {
            m,
            k,
            seeds: policy.generate(k),
            bits: BitVec::new(m as usize),
            expected: Some(n as u64),
            insertions: 0,
        })
    }

    /// Rebuild a filter from stored fields without re-deriving anything.
    pub fn from_parts(m: u32, k: u32, seeds: Vec<u32>, bits: BitVec) -> Result<Self> {
        if m == 0 {
            return Err(BloomError::invalid("m", "bit array must have at least one position"));
        }
        if k == 0 || k > u16::MAX as u32 {
            return Err(BloomError::invalid("k", format!("hash count must be in 1..=65535, got {k}")));
        }
        if seeds.len() != k as usize {
            return Err(BloomError::invalid("seeds", format!("expected {k} seeds, got {}", seeds.len())));
        }
        if bits.len() != m as usize {
            return Err(BloomError::invalid("bits", format!("expected {m} bits, got {}", bits.len())));
        }
        Ok(Self { m, k, seeds, bits, expected: None, insertions: 0 })
    }

    #[inline]
    fn positions<'a>(&'a self, word: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
        self.seeds.iter().map(move |&seed| hash_at(word, seed, self.m) as usize)
    }

    /// Set the `k` positions of `word`. Idempotent.
    pub fn insert(&mut self, word: impl AsRef<[u8]>) {
        let word = word.as_ref();
        let m = self.m;
        for &seed in &self.seeds {
            self.bits.set(hash_at(word, seed, m) as usize);
        }
        self.insertions += 1;
        if let Some(n) = self.expected {
            if self.insertions == n + 1 {
                warn!(expected = n, "more words inserted than the filter was sized for; false-positive rate will exceed target");
            }
        }
    }

    /// `false` means definitely absent; `true` means probably present.
    pub fn contains(&self, word: impl AsRef<[u8]>) -> bool {
        let word = word.as_ref();
        self.positions(word).all(|idx| self.bits.is_set(idx))
    }

    /// Insert every word yielded by `words`; returns how many were inserted.
    pub fn insert_all<I, W>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[u8]>,
    {
        let mut n = 0usize;
        for w in words {
            self.insert(w);
            n += 1;
        }
        n
    }

    pub fn m(&self) -> u32 { self.m }
    pub fn k(&self) -> u32 { self.k }
    pub fn seeds(&self) -> &[u32] { &self.seeds }

    /// Packed view of the bit array.
    pub fn bitvec(&self) -> &BitVec { &self.bits }

    /// One byte per logical bit, each 0 or 1.
    pub fn bits(&self) -> Vec<u8> { self.bits.to_flags() }

    /// Expected item count this filter was sized for (fresh filters only).
    pub fn expected_items(&self) -> Option<u64> { self.expected }

    /// Number of `insert` calls on this instance (not persisted).
    pub fn insertions(&self) -> u64 { self.insertions }

    pub fn count_ones(&self) -> usize { self.bits.count_ones() }

    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / self.m as f64
    }

    /// Observed false-positive estimate: probability that `k` random
    /// positions are all set, given the current fill.
    pub fn estimated_fpr(&self) -> f64 {
        self.fill_ratio().powi(self.k as i32)
    }
}

impl<W: AsRef<[u8]>> Extend<W> for BloomFilter {
    fn extend<T: IntoIterator<Item = W>>(&mut self, iter: T) {
        self.insert_all(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_filter_shape() {
        let f = BloomFilter::new(100_000, 0.1).unwrap();
        assert_eq!(f.m(), 479_253);
        assert_eq!(f.k(), 3);
        assert_eq!(f.seeds(), &[17, 34, 51]);
        assert_eq!(f.bits().len(), 479_253);
        assert_eq!(f.count_ones(), 0);
        assert_eq!(f.expected_items(), Some(100_000));
    }

    #[test]
    fn construction_is_deterministic() {
        let a = BloomFilter::new(5_000, 0.02).unwrap();
        let b = BloomFilter::new(5_000, 0.02).unwrap();
        assert_eq!((a.m(), a.k(), a.seeds()), (b.m(), b.k(), b.seeds()));
    }

    #[test]
    fn invalid_parameters_abort_construction() {
        assert!(matches!(BloomFilter::new(0, 0.1), Err(BloomError::InvalidParameter { name: "n", .. })));
        assert!(matches!(BloomFilter::new(10, 1.0), Err(BloomError::InvalidParameter { name: "p", .. })));
    }

    #[test]
    fn inserted_words_are_found() {
        let mut f = BloomFilter::new(100_000, 0.1).unwrap();
        f.insert("hello");
        f.insert("world");
        assert!(f.contains("hello"));
        assert!(f.contains("world"));
        // "zzqqxx_not_a_word" may or may not be reported; only absence is guaranteed meaningful
    }

    #[test]
    fn empty_filter_contains_nothing() {
        let f = BloomFilter::new(1_000, 0.1).unwrap();
        for w in ["hello", "world", "testing", ""] {
            assert!(!f.contains(w));
        }
    }

    #[test]
    fn no_false_negatives_under_load() {
        let mut f = BloomFilter::new(2_000, 0.01).unwrap();
        let words: Vec<String> = (0..2_000).map(|i| format!("word-{i}")).collect();
        f.insert("first");
        f.extend(words.iter());
        f.insert("last");
        assert!(f.contains("first"));
        assert!(f.contains("last"));
        assert!(words.iter().all(|w| f.contains(w)));
        assert_eq!(f.insertions(), 2_002);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut f = BloomFilter::new(100, 0.05).unwrap();
        f.insert("repeat");
        let once = f.bits();
        f.insert("repeat");
        assert_eq!(f.bits(), once);
        assert!(f.count_ones() >= 1 && f.count_ones() <= f.k() as usize);
    }

    #[test]
    fn bits_are_monotonic() {
        let mut f = BloomFilter::new(50, 0.1).unwrap();
        let mut prev = f.bits();
        for w in ["a", "b", "c", "d", "e", "f"] {
            f.insert(w);
            let now = f.bits();
            assert!(prev.iter().zip(&now).all(|(p, n)| p <= n));
            assert!(now.iter().all(|&b| b <= 1));
            prev = now;
        }
    }

    #[test]
    fn false_positive_rate_near_target() {
        let mut f = BloomFilter::new(10_000, 0.01).unwrap();
        f.extend((0..10_000).map(|i| format!("in-{i}")));
        let fp = (0..10_000).filter(|i| f.contains(format!("out-{i}"))).count();
        // generous bound; target is 1%
        assert!(fp < 500, "false positives: {fp}");
        assert!(f.estimated_fpr() > 0.0 && f.estimated_fpr() < 0.05);
    }

    #[test]
    fn from_parts_checks_invariants() {
        let ok = BloomFilter::from_parts(8, 2, vec![17, 34], BitVec::new(8)).unwrap();
        assert_eq!(ok.expected_items(), None);
        assert!(BloomFilter::from_parts(0, 1, vec![17], BitVec::new(0)).is_err());
        assert!(BloomFilter::from_parts(8, 0, vec![], BitVec::new(8)).is_err());
        assert!(BloomFilter::from_parts(8, 2, vec![17], BitVec::new(8)).is_err());
        assert!(BloomFilter::from_parts(8, 1, vec![17], BitVec::new(9)).is_err());
    }

    #[test]
    fn prng_seeds_still_find_inserted_words() {
        let mut f = BloomFilter::with_policy(1_000, 0.01, SeedPolicy::Prng(7)).unwrap();
        assert_ne!(f.seeds(), crate::seeds::generate_seeds(f.k()).as_slice());
        f.insert("concurrency");
        assert!(f.contains("concurrency"));
    }
}
