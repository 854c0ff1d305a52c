pub mod consts;
pub mod errors;
pub mod utils;
pub mod params;
pub mod seeds;
pub mod hash;
pub mod bitvec;
pub mod filter;
pub mod codec;
pub mod dictionary;

pub use bitvec::BitVec;
pub use codec::{deserialize, serialize, Header};
pub use dictionary::{build_from_file, build_from_reader, read_words, BuildOptions};
pub use errors::{BloomError, FormatError, Result};
pub use filter::BloomFilter;
pub use params::compute;
pub use seeds::{generate_seeds, SeedPolicy};
