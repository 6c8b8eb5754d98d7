//! Naming grammar for pack identifiers.
//!
//! Vendor and pack names are restricted to ASCII letters, digits,
//! underscores and hyphens. Versions are dotted numeric sequences with an
//! optional `-<pre-release>` and `+<build>` suffix.

use serde::Serialize;
use std::fmt;

/// A recognised pack file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PackExtension {
    /// A compressed pack archive.
    #[serde(rename = ".pack")]
    Pack,
    /// A pack archive distributed with a `.zip` extension.
    #[serde(rename = ".zip")]
    Zip,
    /// A standalone pack description file.
    #[serde(rename = ".pdsc")]
    Pdsc,
}

impl PackExtension {
    /// Every accepted extension.
    pub const ALL: [Self; 3] = [Self::Pack, Self::Zip, Self::Pdsc];

    /// Return the extension including its leading dot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pack => ".pack",
            Self::Zip => ".zip",
            Self::Pdsc => ".pdsc",
        }
    }

    /// Split a file name into its stem and a recognised extension.
    ///
    /// Returns `None` when the name does not end in one of [`Self::ALL`].
    ///
    /// # Examples
    ///
    /// ```
    /// use packget_installer::pack_info::PackExtension;
    ///
    /// assert_eq!(
    ///     PackExtension::split("ARM.CMSIS.5.9.0.pack"),
    ///     Some(("ARM.CMSIS.5.9.0", PackExtension::Pack))
    /// );
    /// assert_eq!(PackExtension::split("notes.txt"), None);
    /// ```
    #[must_use]
    pub fn split(file_name: &str) -> Option<(&str, Self)> {
        Self::ALL.into_iter().find_map(|extension| {
            file_name
                .strip_suffix(extension.as_str())
                .map(|stem| (stem, extension))
        })
    }

    /// Comma-separated list of accepted extensions.
    #[must_use]
    pub fn expected() -> String {
        Self::ALL
            .iter()
            .map(|extension| extension.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PackExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return `true` when `segment` is a valid vendor or pack name.
#[must_use]
pub fn is_valid_name(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Return `true` when `version` matches the version grammar.
///
/// # Examples
///
/// ```
/// use packget_installer::pack_info::is_valid_version;
///
/// assert!(is_valid_version("0.0.1"));
/// assert!(is_valid_version("5.9.0-rc2+build.7"));
/// assert!(!is_valid_version("not-a-valid-version"));
/// ```
#[must_use]
pub fn is_valid_version(version: &str) -> bool {
    let (release, build) = match version.split_once('+') {
        Some((release, build)) => (release, Some(build)),
        None => (version, None),
    };
    let (core, pre_release) = match release.split_once('-') {
        Some((core, pre_release)) => (core, Some(pre_release)),
        None => (release, None),
    };

    is_numeric_core(core)
        && pre_release.is_none_or(is_valid_suffix)
        && build.is_none_or(is_valid_suffix)
}

fn is_numeric_core(core: &str) -> bool {
    core.split('.')
        .all(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
}

fn is_valid_suffix(suffix: &str) -> bool {
    suffix.split('.').all(|identifier| {
        !identifier.is_empty()
            && identifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
