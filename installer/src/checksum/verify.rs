//! Checksum manifest verification.
//!
//! Verification recomputes every entry digest with the algorithm named by
//! the manifest file and compares it with the recorded value. All entries
//! are examined before a verdict is reported, so a failure lists every
//! offending entry at once.

use super::archive::{EntryDigester, ZipPack};
use super::manifest::{CHECKSUM_EXTENSION, ChecksumManifest, algorithm_from_path};
use log::debug;
use packget_common::{DigestMismatch, PackError, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// The outcome of comparing a pack against its manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Number of manifest entries that were compared.
    pub checked: usize,
    /// Entries whose recomputed digest differs from the manifest.
    pub mismatches: Vec<DigestMismatch>,
    /// Manifest entries absent from the archive.
    pub missing: Vec<String>,
    /// Archive file entries absent from the manifest.
    pub unlisted: Vec<String>,
}

impl VerificationReport {
    /// Return `true` when every entry matched and nothing is missing or
    /// unlisted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.mismatches.is_empty() && self.missing.is_empty() && self.unlisted.is_empty()
    }

    /// Convert the report into the error a failed verification reports.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::MissingEntries`] when manifest entries are
    /// absent; this takes precedence. Otherwise returns
    /// [`PackError::IntegrityCheckFailed`] for mismatched or unlisted
    /// entries.
    pub fn into_result(self, pack: &Path) -> Result<()> {
        if !self.missing.is_empty() {
            return Err(PackError::MissingEntries {
                pack: pack.to_path_buf(),
                entries: self.missing,
            });
        }
        if !self.mismatches.is_empty() || !self.unlisted.is_empty() {
            return Err(PackError::IntegrityCheckFailed {
                pack: pack.to_path_buf(),
                mismatches: self.mismatches,
                unlisted: self.unlisted,
            });
        }
        Ok(())
    }
}

/// Verify the pack at `pack_path` against a checksum manifest.
///
/// An empty `checksum_path` makes the manifest be looked up beside the
/// pack; see [`find_checksum_file`].
///
/// # Errors
///
/// Returns the errors of [`verify_checksum_report`] and, when the
/// comparison fails, the error of [`VerificationReport::into_result`].
///
/// # Examples
///
/// ```no_run
/// use packget_installer::checksum::verify_checksum;
/// use std::path::Path;
///
/// verify_checksum(
///     Path::new("TheVendor.ThePack.1.2.3.pack"),
///     Path::new("TheVendor.ThePack.1.2.3.pack.sha256.checksum"),
/// )?;
/// # Ok::<(), packget_common::PackError>(())
/// ```
pub fn verify_checksum(pack_path: &Path, checksum_path: &Path) -> Result<()> {
    verify_checksum_report(pack_path, checksum_path)?.into_result(pack_path)
}

/// Compare the pack at `pack_path` with its manifest and return the full
/// report instead of failing on the first problem.
///
/// # Errors
///
/// - [`PackError::FileNotFound`] when the pack or the manifest is missing,
///   or no manifest can be inferred.
/// - [`PackError::AmbiguousChecksum`] when several manifests could be
///   inferred.
/// - [`PackError::InvalidHashFunction`] when the manifest file name does
///   not name a registered algorithm.
/// - [`PackError::MalformedChecksum`] when the manifest cannot be parsed.
/// - [`PackError::ArchiveRead`] or [`PackError::Io`] on read failures.
pub fn verify_checksum_report(pack_path: &Path, checksum_path: &Path) -> Result<VerificationReport> {
    let pack = ZipPack::open(pack_path)?;

    let checksum_path = if checksum_path.as_os_str().is_empty() {
        find_checksum_file(pack_path)?
    } else {
        checksum_path.to_path_buf()
    };
    if !checksum_path.is_file() {
        return Err(PackError::FileNotFound {
            path: checksum_path,
        });
    }

    let algorithm = algorithm_from_path(&checksum_path)?;
    debug!(
        "verifying {} against {} ({algorithm})",
        pack_path.display(),
        checksum_path.display()
    );
    let text = std::fs::read_to_string(&checksum_path)?;
    let manifest = ChecksumManifest::parse(&text, algorithm, &checksum_path)?;

    verify_with(&manifest, &pack)
}

/// Compare `manifest` with the digests produced by `digester`.
///
/// # Errors
///
/// Propagates failures from [`EntryDigester::entry_digests`].
pub fn verify_with(
    manifest: &ChecksumManifest,
    digester: &dyn EntryDigester,
) -> Result<VerificationReport> {
    let computed = digester.entry_digests(manifest.algorithm())?;
    let by_path: HashMap<&str, _> = computed
        .iter()
        .map(|entry| (entry.path.as_str(), &entry.digest))
        .collect();

    let mut report = VerificationReport::default();
    let mut listed = HashSet::with_capacity(manifest.len());
    for entry in manifest.entries() {
        listed.insert(entry.path.as_str());
        let Some(actual) = by_path.get(entry.path.as_str()) else {
            debug!("{} is listed but not in the archive", entry.path);
            report.missing.push(entry.path.clone());
            continue;
        };
        report.checked += 1;

        let actual = match actual {
            Ok(digest) if *digest == entry.digest => continue,
            Ok(digest) => digest.to_string(),
            Err(reason) => format!("unreadable: {reason}"),
        };
        debug!("digest mismatch for {}", entry.path);
        report.mismatches.push(DigestMismatch {
            entry: entry.path.clone(),
            expected: entry.digest.to_string(),
            actual,
        });
    }

    report.unlisted = computed
        .iter()
        .filter(|entry| !listed.contains(entry.path.as_str()))
        .map(|entry| entry.path.clone())
        .collect();

    Ok(report)
}

/// Locate the manifest for `pack_path` in the pack's directory.
///
/// Candidates are named `<pack file name>.<algorithm>.checksum`, where the
/// algorithm token contains no `.`.
///
/// # Errors
///
/// Returns [`PackError::FileNotFound`] when there is no candidate and
/// [`PackError::AmbiguousChecksum`] when there is more than one.
pub fn find_checksum_file(pack_path: &Path) -> Result<PathBuf> {
    let file_name = pack_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let directory = match pack_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let pattern = format!(
        "{}/{}.*{CHECKSUM_EXTENSION}",
        glob::Pattern::escape(&directory.to_string_lossy()),
        glob::Pattern::escape(&file_name)
    );
    let paths = glob::glob(&pattern).map_err(|err| PackError::Io(std::io::Error::other(err)))?;

    let mut candidates = Vec::new();
    for path in paths {
        let path = path.map_err(|err| PackError::Io(err.into()))?;
        if is_candidate(&path, &file_name) {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(PackError::FileNotFound {
            path: directory.join(format!("{file_name}.<algorithm>{CHECKSUM_EXTENSION}")),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(PackError::AmbiguousChecksum {
            pack: pack_path.to_path_buf(),
            candidates,
        }),
    }
}

fn is_candidate(path: &Path, pack_file_name: &str) -> bool {
    let Some(name) = path.file_name().map(|name| name.to_string_lossy()) else {
        return false;
    };
    path.is_file()
        && name
            .strip_prefix(pack_file_name)
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|rest| rest.strip_suffix(CHECKSUM_EXTENSION))
            .is_some_and(|token| !token.is_empty() && !token.contains('.'))
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
