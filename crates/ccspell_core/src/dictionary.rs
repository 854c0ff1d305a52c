//! Newline-delimited word lists feeding a filter.

use crate::consts::{DEFAULT_COUNT, DEFAULT_PROB};
use crate::errors::Result;
use crate::filter::BloomFilter;
use crate::seeds::SeedPolicy;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Sizing for a freshly built dictionary filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildOptions {
    pub count: i64,
    pub prob: f64,
    pub seeds: SeedPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { count: DEFAULT_COUNT, prob: DEFAULT_PROB, seeds: SeedPolicy::Arithmetic }
    }
}

/// Trimmed, non-empty lines of `reader`, in order.
pub fn read_words<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.lines().filter_map(|line| match line {
        Ok(l) => {
            let w = l.trim();
            (!w.is_empty()).then(|| Ok(w.to_string()))
        }
        Err(e) => Some(Err(e)),
    })
}

impl BloomFilter {
    /// Insert every word of `reader`; returns the number inserted.
    pub fn insert_from_reader<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut n = 0usize;
        for word in read_words(reader) {
            self.insert(word?);
            n += 1;
        }
        Ok(n)
    }
}

pub fn build_from_reader<R: BufRead>(reader: R, opts: &BuildOptions) -> Result<(BloomFilter, usize)> {
    let mut filter = BloomFilter::with_policy(opts.count, opts.prob, opts.seeds)?;
    let n = filter.insert_from_reader(reader)?;
    Ok((filter, n))
}

pub fn build_from_file(path: impl AsRef<Path>, opts: &BuildOptions) -> Result<(BloomFilter, usize)> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let (filter, n) = build_from_reader(reader, opts)?;
    info!(path = %path.display(), words = n, m = filter.m(), k = filter.k(), "built filter from dictionary");
    Ok((filter, n))
}
