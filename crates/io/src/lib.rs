//! Binary I/O primitives shared by the neo2 crates.
//!
//! The wire format is little-endian throughout, with the usual var-int
//! prefix scheme for variable-length data: a single byte below `0xFD`
//! encodes the value directly, `0xFD`/`0xFE`/`0xFF` announce a 2-, 4- or
//! 8-byte little-endian length.

pub mod binary_reader;
pub mod binary_writer;
pub mod error;
pub mod serializable;

pub use binary_reader::BinaryReader;
pub use binary_writer::BinaryWriter;
pub use error::{IoError, IoResult};
pub use serializable::Serializable;
