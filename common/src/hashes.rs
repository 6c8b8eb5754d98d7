//! Registry of the digest algorithms `packget` understands.
//!
//! The registry is a compile-time table. Its first element is the default
//! used when no algorithm is requested; nothing can be added at runtime.

use crate::error::{PackError, Result};
use sha2::digest::Output;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::io::{self, Read};

/// Size of the buffer used when streaming data through a hasher.
const READ_BUFFER_LEN: usize = 8192;

/// A supported digest algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256, the default.
    Sha256,
    /// SHA-512.
    Sha512,
}

/// Every supported algorithm, in registry order.
pub const HASHES: [HashAlgorithm; 2] = [HashAlgorithm::Sha256, HashAlgorithm::Sha512];

/// The algorithm used when none is requested.
pub const DEFAULT_HASH: HashAlgorithm = HASHES[0];

impl HashAlgorithm {
    /// Return the registry name, as used on the command line and in
    /// checksum file names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Return the length of a hex-encoded digest for this algorithm.
    #[must_use]
    pub const fn hex_len(self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }

    /// Look up a registered algorithm by name.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidHashFunction`] when `name` is not in the
    /// registry. Matching is exact: `SHA256` is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use packget_common::hashes::HashAlgorithm;
    ///
    /// assert_eq!(HashAlgorithm::from_name("sha256").unwrap(), HashAlgorithm::Sha256);
    /// assert!(HashAlgorithm::from_name("sha1").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        HASHES
            .into_iter()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| PackError::InvalidHashFunction {
                name: name.to_owned(),
                expected: supported_names(),
            })
    }

    /// Like [`HashAlgorithm::from_name`], but an empty name selects
    /// [`DEFAULT_HASH`].
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidHashFunction`] for unregistered names.
    pub fn resolve(name: &str) -> Result<Self> {
        if name.is_empty() {
            Ok(DEFAULT_HASH)
        } else {
            Self::from_name(name)
        }
    }

    /// Stream `reader` to the end and return its lowercase hex digest.
    ///
    /// # Errors
    ///
    /// Propagates read failures from `reader`.
    pub fn digest_reader<R: Read + ?Sized>(self, reader: &mut R) -> io::Result<String> {
        match self {
            Self::Sha256 => stream_digest::<Sha256, R>(reader),
            Self::Sha512 => stream_digest::<Sha512, R>(reader),
        }
    }

    /// Return the lowercase hex digest of an in-memory buffer.
    #[must_use]
    pub fn digest_bytes(self, bytes: &[u8]) -> String {
        match self {
            Self::Sha256 => format!("{:x}", Sha256::digest(bytes)),
            Self::Sha512 => format!("{:x}", Sha512::digest(bytes)),
        }
    }
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        DEFAULT_HASH
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Return `true` when `name` names a registered algorithm.
#[must_use]
pub fn is_supported(name: &str) -> bool {
    HASHES.iter().any(|algorithm| algorithm.name() == name)
}

/// Comma-separated list of registered names, in registry order.
#[must_use]
pub fn supported_names() -> String {
    HASHES
        .iter()
        .map(|algorithm| algorithm.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn stream_digest<D, R>(reader: &mut R) -> io::Result<String>
where
    D: Digest,
    R: Read + ?Sized,
    Output<D>: fmt::LowerHex,
{
    let mut hasher = D::new();
    let mut buffer = [0u8; READ_BUFFER_LEN];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn default_is_first_registry_entry() {
        assert_eq!(DEFAULT_HASH, HASHES[0]);
        assert_eq!(HashAlgorithm::default().name(), "sha256");
    }

    #[rstest]
    #[case::sha256("sha256", HashAlgorithm::Sha256)]
    #[case::sha512("sha512", HashAlgorithm::Sha512)]
    fn from_name_accepts_registered(#[case] name: &str, #[case] expected: HashAlgorithm) {
        assert_eq!(HashAlgorithm::from_name(name).ok(), Some(expected));
        assert!(is_supported(name));
    }

    #[rstest]
    #[case::sha1("sha1")]
    #[case::md5("md5")]
    #[case::uppercase("SHA256")]
    #[case::empty("")]
    fn from_name_rejects_unregistered(#[case] name: &str) {
        let err = HashAlgorithm::from_name(name).expect_err("unregistered name");
        assert!(matches!(err, PackError::InvalidHashFunction { .. }));
        assert!(!is_supported(name));
    }

    #[test]
    fn resolve_falls_back_to_default_for_empty_name() {
        assert_eq!(HashAlgorithm::resolve("").ok(), Some(DEFAULT_HASH));
        assert!(HashAlgorithm::resolve("sha1").is_err());
    }

    #[test]
    fn digest_reader_matches_known_vectors() {
        let mut empty: &[u8] = b"";
        let digest = HashAlgorithm::Sha256
            .digest_reader(&mut empty)
            .expect("in-memory read");
        assert_eq!(digest, EMPTY_SHA256);

        let mut hello: &[u8] = b"hello\n";
        let digest = HashAlgorithm::Sha256
            .digest_reader(&mut hello)
            .expect("in-memory read");
        assert_eq!(
            digest,
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[rstest]
    #[case::sha256(HashAlgorithm::Sha256)]
    #[case::sha512(HashAlgorithm::Sha512)]
    fn digests_are_lowercase_hex_of_expected_length(#[case] algorithm: HashAlgorithm) {
        let payload = vec![0x5a_u8; 3 * READ_BUFFER_LEN + 17];
        let streamed = algorithm
            .digest_reader(&mut payload.as_slice())
            .expect("in-memory read");
        assert_eq!(streamed.len(), algorithm.hex_len());
        assert!(
            streamed
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
        assert_eq!(streamed, algorithm.digest_bytes(&payload));
    }

    #[rstest]
    #[case::sha256(HashAlgorithm::Sha256, EMPTY_SHA256)]
    #[case::sha512(
        HashAlgorithm::Sha512,
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
    )]
    fn digest_bytes_matches_known_vectors(#[case] algorithm: HashAlgorithm, #[case] expected: &str) {
        assert_eq!(algorithm.digest_bytes(b""), expected);
    }

    #[test]
    fn supported_names_follow_registry_order() {
        assert_eq!(supported_names(), "sha256, sha512");
    }
}
