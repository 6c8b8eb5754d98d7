//! Hex digest newtype for checksum manifests.
//!
//! Validates that a value is a lowercase hexadecimal string whose length
//! matches the output size of the algorithm it was produced with.

use packget_common::HashAlgorithm;
use std::fmt;
use thiserror::Error;

/// Reasons a digest string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    /// The digest has the wrong number of characters for its algorithm.
    #[error("expected {expected} hex characters for {algorithm}, got {actual}")]
    WrongLength {
        /// The algorithm the digest claims to come from.
        algorithm: HashAlgorithm,
        /// Required length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },

    /// The digest contains a character outside `[0-9a-fA-F]`.
    #[error("non-hex character '{0}'")]
    NonHex(char),

    /// The digest contains uppercase hex digits.
    #[error("digest must be lowercase")]
    Uppercase,
}

/// A validated lowercase hex digest.
///
/// # Examples
///
/// ```
/// use packget_common::HashAlgorithm;
/// use packget_installer::checksum::digest::HexDigest;
///
/// let hex = "a".repeat(64);
/// let digest = HexDigest::parse(&hex, HashAlgorithm::Sha256).unwrap();
/// assert_eq!(digest.as_str().len(), 64);
/// assert!(HexDigest::parse(&hex, HashAlgorithm::Sha512).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexDigest(String);

impl HexDigest {
    /// Validate `value` as a digest produced by `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns a [`DigestError`] describing the first violation found.
    pub fn parse(value: &str, algorithm: HashAlgorithm) -> Result<Self, DigestError> {
        let expected = algorithm.hex_len();
        if value.len() != expected {
            return Err(DigestError::WrongLength {
                algorithm,
                expected,
                actual: value.len(),
            });
        }
        if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(DigestError::NonHex(bad));
        }
        if value.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(DigestError::Uppercase);
        }
        Ok(Self(value.to_owned()))
    }

    /// Wrap the output of [`HashAlgorithm::digest_reader`], which is always
    /// lowercase hex of the right length.
    pub(crate) fn from_computed(value: String) -> Self {
        Self(value)
    }

    /// Return the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for HexDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::sha256(HashAlgorithm::Sha256)]
    #[case::sha512(HashAlgorithm::Sha512)]
    fn accepts_lowercase_hex_of_algorithm_length(#[case] algorithm: HashAlgorithm) {
        let hex = "0123456789abcdef".repeat(algorithm.hex_len() / 16);
        let digest = HexDigest::parse(&hex, algorithm).expect("valid digest");
        assert_eq!(digest.as_str(), hex);
        assert_eq!(format!("{digest}"), hex);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = HexDigest::parse("abcdef", HashAlgorithm::Sha256).expect_err("too short");
        assert_eq!(
            err,
            DigestError::WrongLength {
                algorithm: HashAlgorithm::Sha256,
                expected: 64,
                actual: 6,
            }
        );
    }

    #[test]
    fn rejects_non_hex_characters() {
        let mut bad = "a".repeat(63);
        bad.push('g');
        let err = HexDigest::parse(&bad, HashAlgorithm::Sha256).expect_err("non-hex");
        assert_eq!(err, DigestError::NonHex('g'));
    }

    #[test]
    fn rejects_uppercase_hex() {
        let bad = "A".repeat(64);
        let err = HexDigest::parse(&bad, HashAlgorithm::Sha256).expect_err("uppercase");
        assert_eq!(err, DigestError::Uppercase);
    }

    #[test]
    fn into_inner_returns_original_text() {
        let hex = "f".repeat(64);
        let digest = HexDigest::parse(&hex, HashAlgorithm::Sha256).expect("valid");
        assert_eq!(digest.into_inner(), hex);
    }
}
