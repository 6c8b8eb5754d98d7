//! Splitting full-form inputs into a location prefix and a file name.
//!
//! URLs keep everything up to and including the final `/` as their
//! location. Filesystem paths are made absolute against a base directory and
//! normalised lexically, without touching the filesystem, before being
//! rendered as a `file://` location.

use std::path::{Component, Path, PathBuf};

/// Delimiter that marks an input as a URL.
const SCHEME_DELIMITER: &str = "://";

/// Scheme prefix used for local locations.
const FILE_SCHEME: &str = "file://";

/// Return `true` when `input` should be handled as a URL.
#[must_use]
pub fn is_url(input: &str) -> bool {
    input.contains(SCHEME_DELIMITER)
}

/// Split a URL into its location prefix (ending in `/`) and file name.
#[must_use]
pub fn split_url(input: &str) -> (String, &str) {
    match input.rsplit_once('/') {
        Some((prefix, file_name)) => (format!("{prefix}/"), file_name),
        None => (String::new(), input),
    }
}

/// Split a filesystem path into its directory and file name.
///
/// A path without a final normal component (for example `..`) or one that
/// ends in a separator yields an empty file name.
#[must_use]
pub fn split_path(input: &str) -> (&Path, String) {
    let path = Path::new(input);
    if input.ends_with(std::path::is_separator) {
        return (path, String::new());
    }
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let directory = if file_name.is_empty() {
        path
    } else {
        path.parent().unwrap_or_else(|| Path::new(""))
    };
    (directory, file_name)
}

/// Resolve `directory` against `base` and return it as a `file://`
/// location with a single trailing separator.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use packget_installer::pack_info::location::file_location;
///
/// let location = file_location(Path::new("../path/to"), Path::new("/home/dev/work"));
/// assert_eq!(location, "file:///home/dev/path/to/");
/// ```
#[must_use]
pub fn file_location(directory: &Path, base: &Path) -> String {
    let absolute = if directory.is_absolute() {
        normalize(directory)
    } else {
        normalize(&base.join(directory))
    };
    let rendered = render(&absolute);
    format!("{FILE_SCHEME}{}/", rendered.trim_end_matches('/'))
}

/// Collapse `.`, `..` and redundant separators without resolving symlinks.
///
/// `..` at the root stays at the root.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                None | Some(Component::ParentDir | Component::CurDir) => {
                    normalized.push(component.as_os_str());
                }
            },
        }
    }
    normalized
}

#[cfg(windows)]
fn render(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(not(windows))]
fn render(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
