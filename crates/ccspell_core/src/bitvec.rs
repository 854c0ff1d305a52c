//! Packed bit vector (8 logical bits per byte). The on-disk layout keeps one
//! byte per bit; translation happens through `from_flags` / `write_flags`.

use crate::errors::FormatError;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitVec {
    bytes: Vec<u8>,
    nbits: usize,
}

impl BitVec {
    pub fn new(nbits: usize) -> Self {
        Self { bytes: vec![0u8; nbits.div_ceil(8)], nbits }
    }

    /// Build from one-byte-per-bit flags. Every flag must be 0 or 1.
    pub fn from_flags(flags: &[u8]) -> Result<Self, FormatError> {
        let mut bv = Self::new(flags.len());
        for (i, &f) in flags.iter().enumerate() {
            match f {
                0 => {}
                1 => bv.set(i),
                value => return Err(FormatError::InvalidBit { offset: i, value }),
            }
        }
        Ok(bv)
    }

    pub fn len(&self) -> usize { self.nbits }

    pub fn is_empty(&self) -> bool { self.nbits == 0 }

    /// Panics if `index >= len()`.
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(index < self.nbits, "index out of bounds: the len is {} but the index is {}", self.nbits, index);
        self.bytes[index / 8] |= 1u8 << (index & 7);
    }

    /// Panics if `index >= len()`.
    #[inline]
    pub fn is_set(&self, index: usize) -> bool {
        assert!(index < self.nbits, "index out of bounds: the len is {} but the index is {}", self.nbits, index);
        self.bytes[index / 8] & (1u8 << (index & 7)) != 0
    }

    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Append one byte (0 or 1) per logical bit.
    pub fn write_flags(&self, out: &mut Vec<u8>) {
        out.reserve(self.nbits);
        out.extend((0..self.nbits).map(|i| self.is_set(i) as u8));
    }

    pub fn to_flags(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.nbits);
        self.write_flags(&mut out);
        out
    }
}
