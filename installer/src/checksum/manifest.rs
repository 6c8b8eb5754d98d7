//! Checksum manifest format and naming.
//!
//! A manifest is a plain-text file with one `"<digest> <path>"` line per
//! archive entry. The hash algorithm is not stored in the body; it is the
//! token before `.checksum` in the file name, for example
//! `Vendor.Pack.1.2.3.pack.sha256.checksum`.

use super::digest::HexDigest;
use packget_common::{HashAlgorithm, PackError, Result};
use std::collections::HashSet;
use std::path::Path;

/// File extension shared by every checksum manifest.
pub const CHECKSUM_EXTENSION: &str = ".checksum";

/// One manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Archive-relative path of the entry.
    pub path: String,
    /// Recorded digest of the entry's decompressed bytes.
    pub digest: HexDigest,
}

/// An ordered list of entry digests computed with a single algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumManifest {
    algorithm: HashAlgorithm,
    entries: Vec<ManifestEntry>,
}

impl ChecksumManifest {
    /// Create an empty manifest for `algorithm`.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            entries: Vec::new(),
        }
    }

    /// Append an entry, keeping insertion order.
    pub fn push(&mut self, path: impl Into<String>, digest: HexDigest) {
        self.entries.push(ManifestEntry {
            path: path.into(),
            digest,
        });
    }

    /// Return the algorithm every digest was computed with.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Return the entries in manifest order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Return the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the manifest lists no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the manifest body: one newline-terminated line per entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use packget_common::HashAlgorithm;
    /// use packget_installer::checksum::digest::HexDigest;
    /// use packget_installer::checksum::manifest::ChecksumManifest;
    ///
    /// let mut manifest = ChecksumManifest::new(HashAlgorithm::Sha256);
    /// let digest = HexDigest::parse(&"0".repeat(64), HashAlgorithm::Sha256).unwrap();
    /// manifest.push("Vendor.Pack.pdsc", digest);
    /// assert_eq!(manifest.render(), format!("{} Vendor.Pack.pdsc\n", "0".repeat(64)));
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} {}\n", entry.digest, entry.path))
            .collect()
    }

    /// Parse a manifest body produced by [`ChecksumManifest::render`].
    ///
    /// Each non-blank line is split at its first space. A trailing `\r` is
    /// tolerated. `source` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::MalformedChecksum`] for a line without a
    /// separator, an empty path, a digest that does not fit `algorithm`, or
    /// a path listed twice.
    pub fn parse(text: &str, algorithm: HashAlgorithm, source: &Path) -> Result<Self> {
        let mut manifest = Self::new(algorithm);
        let mut seen = HashSet::new();

        for (index, raw_line) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let malformed = |reason: String| PackError::MalformedChecksum {
                path: source.to_path_buf(),
                line: line_number,
                reason,
            };

            let (digest, path) = line
                .split_once(' ')
                .ok_or_else(|| malformed("expected \"<digest> <path>\"".to_owned()))?;
            if path.is_empty() {
                return Err(malformed("empty entry path".to_owned()));
            }
            let digest =
                HexDigest::parse(digest, algorithm).map_err(|err| malformed(err.to_string()))?;
            if !seen.insert(path.to_owned()) {
                return Err(malformed(format!("entry {path} is listed twice")));
            }
            manifest.push(path, digest);
        }

        Ok(manifest)
    }
}

/// Return the manifest file name for a pack file and algorithm.
///
/// # Examples
///
/// ```
/// use packget_common::HashAlgorithm;
/// use packget_installer::checksum::manifest::checksum_file_name;
///
/// assert_eq!(
///     checksum_file_name("Vendor.Pack.1.2.3.pack", HashAlgorithm::Sha256),
///     "Vendor.Pack.1.2.3.pack.sha256.checksum"
/// );
/// ```
#[must_use]
pub fn checksum_file_name(pack_file_name: &str, algorithm: HashAlgorithm) -> String {
    format!("{pack_file_name}.{algorithm}{CHECKSUM_EXTENSION}")
}

/// Return the algorithm token of a checksum file name, if it has the
/// `<anything>.<algorithm>.checksum` shape.
#[must_use]
pub fn algorithm_token(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_suffix(CHECKSUM_EXTENSION)?;
    let token = stem.rsplit_once('.').map_or(stem, |(_, token)| token);
    (!token.is_empty()).then_some(token)
}

/// Infer the hash algorithm from a checksum file's name.
///
/// # Errors
///
/// Returns [`PackError::InvalidHashFunction`] when the name does not end in
/// `.<algorithm>.checksum` or the algorithm is not registered.
pub fn algorithm_from_path(path: &Path) -> Result<HashAlgorithm> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match algorithm_token(&file_name) {
        Some(token) => HashAlgorithm::from_name(token),
        None => HashAlgorithm::from_name(&file_name),
    }
}
