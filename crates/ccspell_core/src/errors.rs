use thiserror::Error;

#[derive(Debug, Error)]
pub enum BloomError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Persist: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// Reasons a byte stream is rejected by the codec. Rejection is wholesale.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("bad magic {found:?}, expected \"CCBF\"")]
    BadMagic { found: Vec<u8> },

    #[error("stream truncated: need {needed} bytes, have {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("truncated or oversized bit array: expected {expected} bytes, found {actual}")]
    BitArrayLength { expected: usize, actual: usize },

    #[error("invalid header: {0}")]
    InvalidHeader(&'static str),

    #[error("bit array byte {offset} is {value}, expected 0 or 1")]
    InvalidBit { offset: usize, value: u8 },
}

impl BloomError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        BloomError::InvalidParameter { name, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, BloomError>;
