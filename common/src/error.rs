//! Error taxonomy shared by the identifier parser and the checksum tools.
//!
//! Every failure maps to a stable [`ErrorKind`]. Callers that wrap a
//! [`PackError`] with extra context (either through [`PackError::Context`] or
//! a foreign error type whose `source` chain leads back here) can still ask
//! whether the failure belongs to a given kind with [`contains_kind`].

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Stable classification of every failure produced by `packget`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A pack, checksum file, output directory, or archive entry is missing.
    FileNotFound,
    /// The requested or inferred hash function is not registered.
    InvalidHashFunction,
    /// The pack identifier does not have the `Vendor.Pack[.Version]` shape.
    BadPackName,
    /// The vendor segment violates the identifier grammar.
    BadPackNameInvalidVendor,
    /// The pack name segment (or, in short mode, the vendor) is invalid.
    BadPackNameInvalidName,
    /// The version segment is missing or violates the version grammar.
    BadPackNameInvalidVersion,
    /// The file name does not end in `.pack`, `.zip` or `.pdsc`.
    BadPackNameInvalidExtension,
    /// At least one archive entry does not match its recorded digest.
    IntegrityCheckFailed,
    /// More than one checksum file could belong to the pack.
    AmbiguousChecksum,
    /// An unclassified I/O or archive decoding failure.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::FileNotFound => "file not found",
            Self::InvalidHashFunction => "invalid hash function",
            Self::BadPackName => "bad pack name",
            Self::BadPackNameInvalidVendor => "bad pack name: invalid vendor",
            Self::BadPackNameInvalidName => "bad pack name: invalid name",
            Self::BadPackNameInvalidVersion => "bad pack name: invalid version",
            Self::BadPackNameInvalidExtension => "bad pack name: invalid extension",
            Self::IntegrityCheckFailed => "integrity check failed",
            Self::AmbiguousChecksum => "ambiguous checksum file",
            Self::Io => "I/O error",
        };
        f.write_str(text)
    }
}

/// A single archive entry whose digest differs from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestMismatch {
    /// Archive-relative path of the entry.
    pub entry: String,
    /// Digest recorded in the checksum manifest.
    pub expected: String,
    /// Digest computed from the archive.
    pub actual: String,
}

impl fmt::Display for DigestMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (expected {}, got {})",
            self.entry, self.expected, self.actual
        )
    }
}

/// Errors raised while parsing pack identifiers or checking pack integrity.
#[derive(Debug, Error)]
pub enum PackError {
    /// A required file or directory does not exist.
    #[error("file not found: {}", .path.display())]
    FileNotFound {
        /// The path that could not be found.
        path: PathBuf,
    },

    /// A hash function name is not part of the registry.
    #[error("invalid hash function \"{name}\"; expected one of: {expected}")]
    InvalidHashFunction {
        /// The rejected name.
        name: String,
        /// Comma-separated list of supported names.
        expected: String,
    },

    /// The identifier does not split into vendor and pack segments.
    #[error("bad pack name \"{input}\": {reason}")]
    BadPackName {
        /// The raw identifier as received.
        input: String,
        /// Description of the shape violation.
        reason: String,
    },

    /// The vendor segment contains characters outside `[A-Za-z0-9_-]`.
    #[error("bad pack name \"{input}\": invalid vendor \"{vendor}\"")]
    InvalidVendor {
        /// The raw identifier as received.
        input: String,
        /// The rejected vendor segment.
        vendor: String,
    },

    /// A name segment contains characters outside `[A-Za-z0-9_-]`.
    #[error("bad pack name \"{input}\": invalid name \"{name}\"")]
    InvalidName {
        /// The raw identifier as received.
        input: String,
        /// The rejected segment.
        name: String,
    },

    /// The version segment is missing or malformed.
    #[error("bad pack name \"{input}\": invalid version \"{version}\"")]
    InvalidVersion {
        /// The raw identifier as received.
        input: String,
        /// The rejected version segment (empty when missing).
        version: String,
    },

    /// The file name carries an unsupported extension.
    #[error("bad pack name \"{input}\": extension must be one of {expected}")]
    InvalidExtension {
        /// The raw identifier as received.
        input: String,
        /// Comma-separated list of accepted extensions.
        expected: String,
    },

    /// Entries listed in the checksum manifest are absent from the archive.
    #[error("{} missing from {}: {}", plural_entries(.entries.len()), .pack.display(), .entries.join(", "))]
    MissingEntries {
        /// The archive that was checked.
        pack: PathBuf,
        /// Manifest paths with no matching archive entry.
        entries: Vec<String>,
    },

    /// Recomputed digests do not match the checksum manifest.
    #[error("integrity check failed for {}: {}", .pack.display(), describe_integrity(.mismatches, .unlisted))]
    IntegrityCheckFailed {
        /// The archive that was checked.
        pack: PathBuf,
        /// Entries whose digests differ.
        mismatches: Vec<DigestMismatch>,
        /// Archive entries that the manifest does not mention.
        unlisted: Vec<String>,
    },

    /// A checksum manifest line could not be parsed.
    #[error("malformed checksum file {} at line {line}: {reason}", .path.display())]
    MalformedChecksum {
        /// The checksum manifest.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Several checksum files match the pack and none was named explicitly.
    #[error("several checksum files match {}; pick one with --path", .pack.display())]
    AmbiguousChecksum {
        /// The pack whose checksum file was being inferred.
        pack: PathBuf,
        /// Every matching candidate, in sorted order.
        candidates: Vec<PathBuf>,
    },

    /// The archive container could not be read.
    #[error("cannot read archive {}: {reason}", .path.display())]
    ArchiveRead {
        /// The archive that failed to open or decode.
        path: PathBuf,
        /// Description of the decoding failure.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Another [`PackError`] annotated with caller context.
    #[error("{context}: {source}")]
    Context {
        /// What the caller was doing when the error occurred.
        context: String,
        /// The wrapped error.
        #[source]
        source: Box<PackError>,
    },
}

impl PackError {
    /// Return the classification of this error, looking through any
    /// [`PackError::Context`] layers.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Context { source, .. } => source.kind(),
            other => other.own_kind().unwrap_or(ErrorKind::Io),
        }
    }

    /// Return `true` when this error, or anything it wraps, has `kind`.
    #[must_use]
    pub fn is(&self, kind: ErrorKind) -> bool {
        contains_kind(self, kind)
    }

    /// Wrap this error with a description of the failing operation.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The kind carried by this layer alone; `None` for context wrappers.
    fn own_kind(&self) -> Option<ErrorKind> {
        let kind = match self {
            Self::FileNotFound { .. } | Self::MissingEntries { .. } => ErrorKind::FileNotFound,
            Self::InvalidHashFunction { .. } => ErrorKind::InvalidHashFunction,
            Self::BadPackName { .. } => ErrorKind::BadPackName,
            Self::InvalidVendor { .. } => ErrorKind::BadPackNameInvalidVendor,
            Self::InvalidName { .. } => ErrorKind::BadPackNameInvalidName,
            Self::InvalidVersion { .. } => ErrorKind::BadPackNameInvalidVersion,
            Self::InvalidExtension { .. } => ErrorKind::BadPackNameInvalidExtension,
            Self::IntegrityCheckFailed { .. } | Self::MalformedChecksum { .. } => {
                ErrorKind::IntegrityCheckFailed
            }
            Self::AmbiguousChecksum { .. } => ErrorKind::AmbiguousChecksum,
            Self::ArchiveRead { .. } | Self::Io(_) => ErrorKind::Io,
            Self::Context { .. } => return None,
        };
        Some(kind)
    }
}

/// Return `true` when any link of `error`'s source chain is a [`PackError`]
/// classified as `kind`.
///
/// The walk follows [`std::error::Error::source`] and also looks inside
/// custom [`std::io::Error`] payloads, whose `source` skips the payload
/// itself.
///
/// # Examples
///
/// ```
/// use packget_common::error::{ErrorKind, PackError, contains_kind};
///
/// let err = PackError::FileNotFound { path: "Vendor.Pack.1.0.0.pack".into() }
///     .context("while creating checksum");
/// let wrapped = std::io::Error::other(err);
/// assert!(contains_kind(&wrapped, ErrorKind::FileNotFound));
/// assert!(!contains_kind(&wrapped, ErrorKind::IntegrityCheckFailed));
/// ```
#[must_use]
pub fn contains_kind(error: &(dyn StdError + 'static), kind: ErrorKind) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(pack_error) = err.downcast_ref::<PackError>() {
            if pack_error.own_kind() == Some(kind) {
                return true;
            }
        }
        if let Some(payload) = err.downcast_ref::<io::Error>().and_then(io::Error::get_ref) {
            let payload: &(dyn StdError + 'static) = payload;
            if contains_kind(payload, kind) {
                return true;
            }
        }
        current = err.source();
    }
    false
}

/// Convenience methods for attaching context to fallible results.
pub trait ResultExt<T> {
    /// Wrap the error, if any, with the given context.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in [`PackError::Context`].
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Like [`ResultExt::context`], building the message lazily.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in [`PackError::Context`].
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|err| err.context(context))
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|err| err.context(f()))
    }
}

fn plural_entries(count: usize) -> String {
    if count == 1 {
        "1 entry".to_owned()
    } else {
        format!("{count} entries")
    }
}

fn describe_integrity(mismatches: &[DigestMismatch], unlisted: &[String]) -> String {
    let mut parts: Vec<String> = mismatches
        .iter()
        .map(|mismatch| format!("digest mismatch for {mismatch}"))
        .collect();
    parts.extend(
        unlisted
            .iter()
            .map(|entry| format!("{entry} is not listed in the checksum file")),
    );
    parts.join("; ")
}

/// Result type alias using [`PackError`].
pub type Result<T> = std::result::Result<T, PackError>;
