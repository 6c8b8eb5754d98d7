//! Shared building blocks for `packget`: the hash registry and the error
//! taxonomy used by both the identifier parser and the checksum tools.

pub mod error;
pub mod hashes;

pub use error::{DigestMismatch, ErrorKind, PackError, Result, ResultExt, contains_kind};
pub use hashes::{DEFAULT_HASH, HASHES, HashAlgorithm, is_supported, supported_names};
