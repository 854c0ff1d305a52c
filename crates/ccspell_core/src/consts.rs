// crates/ccspell_core/src/consts.rs

pub const MAGIC: &[u8; 4] = b"CCBF";
pub const VERSION: u16 = 1;

/// magic[4] + version[2] + k[2] + m[4]
pub const HEADER_SIZE: usize = 12;
pub const SEED_SIZE: usize = 4;

pub const SEED_BASE: u32 = 17;
pub const SEED_STEP: u32 = 17;

pub const DEFAULT_OUTPUT: &str = "words.bf";
pub const DEFAULT_COUNT: i64 = 100_000;
pub const DEFAULT_PROB: f64 = 0.01;

const _: () = { assert!(HEADER_SIZE == MAGIC.len() + 2 + 2 + 4); };
