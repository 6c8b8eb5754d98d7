//! Pack identifier and location parsing.
//!
//! Turns user input into a validated [`PackIdentity`]. Two modes exist:
//!
//! - short mode accepts `Vendor.Pack` or `Vendor.Pack.Version`;
//! - full mode accepts a file name, a relative or absolute path, or a URL
//!   whose final component is `Vendor.Pack.Version` plus one of the
//!   extensions in [`PackExtension::ALL`].
//!
//! Every malformed shape maps to a distinct [`ErrorKind`] so that callers
//! can react without inspecting messages.
//!
//! [`ErrorKind`]: packget_common::ErrorKind

pub mod grammar;
pub mod location;

pub use grammar::{PackExtension, is_valid_name, is_valid_version};

use log::debug;
use packget_common::{PackError, Result};
use serde::Serialize;
use std::path::Path;

/// Which error short mode reports for an invalid vendor segment.
///
/// Full mode always reports an invalid vendor as
/// [`PackError::InvalidVendor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShortVendorError {
    /// Report [`PackError::InvalidName`], matching how packs were
    /// classified historically.
    #[default]
    InvalidName,
    /// Report [`PackError::InvalidVendor`].
    InvalidVendor,
}

/// Tunables for [`extract_pack_info_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Classification of an invalid vendor in short mode.
    pub short_vendor_error: ShortVendorError,
}

/// A validated pack identity.
///
/// Vendor and pack are always non-empty and match the name grammar; a
/// present version always matches the version grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackIdentity {
    vendor: String,
    pack: String,
    version: Option<String>,
    extension: Option<PackExtension>,
    location: String,
}

impl PackIdentity {
    /// Return the vendor segment.
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Return the pack name segment.
    #[must_use]
    pub fn pack(&self) -> &str {
        &self.pack
    }

    /// Return the version, if one was given.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Return the file extension; always present in full mode.
    #[must_use]
    pub fn extension(&self) -> Option<PackExtension> {
        self.extension
    }

    /// Return the location prefix: a URL prefix or a `file://` directory,
    /// ending in `/`. Empty in short mode.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Return `Vendor.Pack` or `Vendor.Pack.Version`.
    #[must_use]
    pub fn fully_qualified_name(&self) -> String {
        match &self.version {
            Some(version) => format!("{}.{}.{version}", self.vendor, self.pack),
            None => format!("{}.{}", self.vendor, self.pack),
        }
    }

    /// Return the file name this identity was parsed from (empty extension
    /// in short mode).
    #[must_use]
    pub fn file_name(&self) -> String {
        let extension = self.extension.map_or("", PackExtension::as_str);
        format!("{}{extension}", self.fully_qualified_name())
    }

    /// Return the full location of the pack file.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.location, self.file_name())
    }

    /// Return `true` when the pack was found on the local filesystem.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.location.starts_with("file://")
    }

    /// Return `true` when the pack lives behind a non-`file` URL.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.location.is_empty() && !self.is_local()
    }
}

/// Parse `input` into a [`PackIdentity`] with default [`ParseOptions`].
///
/// # Errors
///
/// See [`extract_pack_info_with`].
///
/// # Examples
///
/// ```
/// use packget_installer::pack_info::extract_pack_info;
///
/// let info = extract_pack_info("TheVendor.ThePack.0.0.1", true).unwrap();
/// assert_eq!(info.vendor(), "TheVendor");
/// assert_eq!(info.pack(), "ThePack");
/// assert_eq!(info.version(), Some("0.0.1"));
///
/// let info = extract_pack_info("http://vendor.com/TheVendor.ThePack.0.0.1.pack", false).unwrap();
/// assert_eq!(info.location(), "http://vendor.com/");
/// ```
pub fn extract_pack_info(input: &str, short: bool) -> Result<PackIdentity> {
    extract_pack_info_with(input, short, &ParseOptions::default())
}

/// Parse `input` into a [`PackIdentity`].
///
/// # Errors
///
/// - [`PackError::InvalidExtension`] (full mode) when the file name does
///   not end in `.pack`, `.zip` or `.pdsc`; checked first.
/// - [`PackError::BadPackName`] when there are fewer than two
///   `.`-separated segments.
/// - [`PackError::InvalidVendor`] or [`PackError::InvalidName`] for a bad
///   vendor (see [`ShortVendorError`]); vendor is checked before pack.
/// - [`PackError::InvalidName`] for a bad pack name.
/// - [`PackError::InvalidVersion`] for a malformed version, or a missing
///   one in full mode.
/// - [`PackError::Io`] when a relative path cannot be resolved because
///   the current directory is unavailable.
pub fn extract_pack_info_with(
    input: &str,
    short: bool,
    options: &ParseOptions,
) -> Result<PackIdentity> {
    debug!("extracting pack info from \"{input}\" (short: {short})");
    if short {
        parse_short(input, options)
    } else {
        parse_full(input)
    }
}

fn parse_short(input: &str, options: &ParseOptions) -> Result<PackIdentity> {
    let segments = split_segments(input)?;
    if !is_valid_name(segments.vendor) {
        return Err(match options.short_vendor_error {
            ShortVendorError::InvalidName => PackError::InvalidName {
                input: input.to_owned(),
                name: segments.vendor.to_owned(),
            },
            ShortVendorError::InvalidVendor => invalid_vendor(input, segments.vendor),
        });
    }
    check_pack_name(input, segments.pack)?;
    if let Some(version) = segments.version {
        check_version(input, version)?;
    }

    Ok(PackIdentity {
        vendor: segments.vendor.to_owned(),
        pack: segments.pack.to_owned(),
        version: segments.version.map(str::to_owned),
        extension: None,
        location: String::new(),
    })
}

fn parse_full(input: &str) -> Result<PackIdentity> {
    let (origin, file_name) = if location::is_url(input) {
        let (prefix, file_name) = location::split_url(input);
        (Origin::Url(prefix), file_name.to_owned())
    } else {
        let (directory, file_name) = location::split_path(input);
        (Origin::Directory(directory), file_name)
    };

    let (stem, extension) =
        PackExtension::split(&file_name).ok_or_else(|| PackError::InvalidExtension {
            input: input.to_owned(),
            expected: PackExtension::expected(),
        })?;

    let segments = split_segments_of(input, stem)?;
    if !is_valid_name(segments.vendor) {
        return Err(invalid_vendor(input, segments.vendor));
    }
    check_pack_name(input, segments.pack)?;
    let version = segments.version.unwrap_or_default();
    check_version(input, version)?;

    let location = match origin {
        Origin::Url(prefix) => prefix,
        Origin::Directory(directory) => {
            let cwd = std::env::current_dir()?;
            location::file_location(directory, &cwd)
        }
    };

    Ok(PackIdentity {
        vendor: segments.vendor.to_owned(),
        pack: segments.pack.to_owned(),
        version: Some(version.to_owned()),
        extension: Some(extension),
        location,
    })
}

/// Where a full-form input points before the directory is resolved.
enum Origin<'a> {
    Url(String),
    Directory(&'a Path),
}

/// The `.`-separated pieces of an identifier.
struct Segments<'a> {
    vendor: &'a str,
    pack: &'a str,
    version: Option<&'a str>,
}

fn split_segments(input: &str) -> Result<Segments<'_>> {
    split_segments_of(input, input)
}

/// Split `stem` into vendor, pack and the remaining version; `input` is
/// only used for error reporting.
fn split_segments_of<'a>(input: &str, stem: &'a str) -> Result<Segments<'a>> {
    let mut parts = stem.splitn(3, '.');
    let vendor = parts.next().unwrap_or_default();
    let Some(pack) = parts.next() else {
        return Err(PackError::BadPackName {
            input: input.to_owned(),
            reason: "expected Vendor.Pack[.Version]".to_owned(),
        });
    };
    Ok(Segments {
        vendor,
        pack,
        version: parts.next(),
    })
}

fn invalid_vendor(input: &str, vendor: &str) -> PackError {
    PackError::InvalidVendor {
        input: input.to_owned(),
        vendor: vendor.to_owned(),
    }
}

fn check_pack_name(input: &str, pack: &str) -> Result<()> {
    if is_valid_name(pack) {
        Ok(())
    } else {
        Err(PackError::InvalidName {
            input: input.to_owned(),
            name: pack.to_owned(),
        })
    }
}

fn check_version(input: &str, version: &str) -> Result<()> {
    if is_valid_version(version) {
        Ok(())
    } else {
        Err(PackError::InvalidVersion {
            input: input.to_owned(),
            version: version.to_owned(),
        })
    }
}
