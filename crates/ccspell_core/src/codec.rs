//! Filter file format & IO
//!
//! Layout (big-endian):
//!   magic[4]   = "CCBF"
//!   version[2] = 1
//!   k[2]       = hash-function count
//!   m[4]       = bit-array length
//!   seeds[4*k] = u32 per hash function, in probe order
//!   bits[m]    = one byte per logical bit, 0 or 1
//!
//! Total length is exactly 12 + 4k + m; anything else is rejected.

use crate::bitvec::BitVec;
use crate::consts::{HEADER_SIZE, MAGIC, SEED_SIZE, VERSION};
use crate::errors::{FormatError, Result};
use crate::filter::BloomFilter;
use crate::utils::{read_u16, read_u32};
use memmap2::Mmap;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Fixed header fields following the magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    pub version: u16,
    pub k: u16,
    pub m: u32,
}

impl Header {
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + SEED_SIZE * self.k as usize + self.m as usize
    }
}

pub fn encoded_len(filter: &BloomFilter) -> usize {
    HEADER_SIZE + SEED_SIZE * filter.k() as usize + filter.m() as usize
}

pub fn serialize(filter: &BloomFilter) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(filter));
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_be_bytes());
    // k <= u16::MAX is a BloomFilter invariant
    out.extend_from_slice(&(filter.k() as u16).to_be_bytes());
    out.extend_from_slice(&filter.m().to_be_bytes());
    for seed in filter.seeds() {
        out.extend_from_slice(&seed.to_be_bytes());
    }
    filter.bitvec().write_flags(&mut out);
    debug!(k = filter.k(), m = filter.m(), len = out.len(), "serialized filter");
    out
}

/// Validate the magic and decode the fixed header.
pub fn read_header(bytes: &[u8]) -> std::result::Result<Header, FormatError> {
    if !bytes.starts_with(MAGIC) {
        let found = bytes[..bytes.len().min(MAGIC.len())].to_vec();
        return Err(FormatError::BadMagic { found });
    }
    if bytes.len() < HEADER_SIZE {
        return Err(FormatError::Truncated { needed: HEADER_SIZE, actual: bytes.len() });
    }
    let mut rdr = &bytes[MAGIC.len()..HEADER_SIZE];
    let truncated = |_| FormatError::Truncated { needed: HEADER_SIZE, actual: bytes.len() };
    let version = read_u16(&mut rdr).map_err(truncated)?;
    let k = read_u16(&mut rdr).map_err(truncated)?;
    let m = read_u32(&mut rdr).map_err(truncated)?;
    Ok(Header { version, k, m })
}

/// Decode a complete stream. The version is read but not branched on.
pub fn deserialize(bytes: &[u8]) -> Result<BloomFilter> {
    let header = read_header(bytes)?;
    if header.k == 0 {
        return Err(FormatError::InvalidHeader("k must be at least 1").into());
    }
    if header.m == 0 {
        return Err(FormatError::InvalidHeader("m must be at least 1").into());
    }

    let bits_off = HEADER_SIZE + SEED_SIZE * header.k as usize;
    if bytes.len() < bits_off {
        return Err(FormatError::Truncated { needed: bits_off, actual: bytes.len() }.into());
    }
    let mut rdr = &bytes[HEADER_SIZE..bits_off];
    let mut seeds = Vec::with_capacity(header.k as usize);
    for _ in 0..header.k {
        seeds.push(read_u32(&mut rdr)?);
    }

    let flags = &bytes[bits_off..];
    if flags.len() != header.m as usize {
        return Err(FormatError::BitArrayLength { expected: header.m as usize, actual: flags.len() }.into());
    }
    let bits = BitVec::from_flags(flags)?;

    debug!(version = header.version, k = header.k, m = header.m, "deserialized filter");
    BloomFilter::from_parts(header.m, header.k as u32, seeds, bits)
}

/// Write the encoded filter next to `path` and atomically move it into place.
pub fn save(filter: &BloomFilter, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = serialize(filter);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new().prefix(".ccbf_").tempfile_in(dir)?;
    tmp.as_file_mut().write_all(&bytes)?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path)?;
    info!(path = %path.display(), bytes = bytes.len(), "saved bloom filter");
    Ok(())
}

/// Map the file and decode it in one pass.
pub fn load(path: impl AsRef<Path>) -> Result<BloomFilter> {
    let path = path.as_ref();
    let f = File::open(path)?;
    if f.metadata()?.len() == 0 {
        return deserialize(&[]);
    }
    // SAFETY: the mapping is read-only and dropped before returning
    let mmap = unsafe { Mmap::map(&f)? };
    let filter = deserialize(&mmap)?;
    info!(path = %path.display(), bytes = mmap.len(), k = filter.k(), m = filter.m(), "loaded bloom filter");
    Ok(filter)
}

impl BloomFilter {
    pub fn to_bytes(&self) -> Vec<u8> { serialize(self) }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> { deserialize(bytes) }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> { save(self, path) }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> { load(path) }
}
