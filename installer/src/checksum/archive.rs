//! Read-only access to the entries of a pack archive.
//!
//! Packs are zip containers. Entries are visited in the order of the
//! archive's central directory, which is stable for an unchanged file, and
//! directory entries are skipped because they carry no content.

use super::digest::HexDigest;
use log::trace;
use packget_common::{HashAlgorithm, PackError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// The digest of a single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDigest {
    /// Archive-relative path of the entry.
    pub path: String,
    /// Digest of the decompressed bytes, or a description of why the
    /// entry's stored data could not be read back.
    pub digest: std::result::Result<HexDigest, String>,
}

/// Source of per-entry digests, enabling test mocking.
#[cfg_attr(test, mockall::automock)]
pub trait EntryDigester {
    /// Hash every file entry with `algorithm`, in archive order.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::FileNotFound`] when the archive is missing,
    /// [`PackError::ArchiveRead`] when it is not a readable container, and
    /// [`PackError::Io`] on other read failures.
    fn entry_digests(&self, algorithm: HashAlgorithm) -> Result<Vec<EntryDigest>>;
}

/// A pack archive on disk.
#[derive(Debug, Clone)]
pub struct ZipPack {
    path: PathBuf,
}

impl ZipPack {
    /// Refer to the archive at `path`, which must be an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::FileNotFound`] when `path` is not a file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PackError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Return the archive path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, reason: impl ToString) -> PackError {
        PackError::ArchiveRead {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl EntryDigester for ZipPack {
    fn entry_digests(&self, algorithm: HashAlgorithm) -> Result<Vec<EntryDigest>> {
        let file = File::open(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PackError::FileNotFound {
                path: self.path.clone(),
            },
            _ => PackError::Io(err),
        })?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(|err| self.read_error(err))?;

        let mut digests = Vec::with_capacity(archive.len());
        let mut seen = HashSet::new();
        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|err| self.read_error(err))?;
            if entry.is_dir() {
                continue;
            }
            let path = entry.name().to_owned();
            // Manifest lines must name each entry exactly once.
            if path.is_empty() {
                return Err(self.read_error(format!("entry {index} has an empty name")));
            }
            if path.contains(['\n', '\r']) {
                return Err(self.read_error(format!("entry name {path:?} contains a line break")));
            }
            if !seen.insert(path.clone()) {
                return Err(self.read_error(format!("entry {path} appears more than once")));
            }

            // A damaged entry must not hide the state of the others.
            let digest = algorithm
                .digest_reader(&mut entry)
                .map(HexDigest::from_computed)
                .map_err(|err| err.to_string());
            trace!("hashed {path} with {algorithm}");
            digests.push(EntryDigest { path, digest });
        }

        Ok(digests)
    }
}
