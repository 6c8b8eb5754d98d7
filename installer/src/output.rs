//! Output formatting for the `packget` CLI.
//!
//! Pack identities can be printed for people or as JSON for scripts.
//! Checksum commands report a one-line summary.

use crate::checksum::VerificationReport;
use crate::pack_info::PackIdentity;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Format a pack identity for human-readable output.
///
/// Only the parts that are present are listed.
///
/// # Examples
///
/// ```
/// use packget_installer::output::format_human;
/// use packget_installer::pack_info::extract_pack_info;
///
/// let info = extract_pack_info("TheVendor.ThePack.0.0.1", true).unwrap();
/// let output = format_human(&info);
/// assert!(output.contains("Vendor:    TheVendor"));
/// assert!(!output.contains("Location"));
/// ```
#[must_use]
pub fn format_human(identity: &PackIdentity) -> String {
    let mut output = format!(
        "Vendor:    {}\nPack:      {}\n",
        identity.vendor(),
        identity.pack()
    );
    if let Some(version) = identity.version() {
        output.push_str(&format!("Version:   {version}\n"));
    }
    if let Some(extension) = identity.extension() {
        output.push_str(&format!("Extension: {extension}\n"));
    }
    if !identity.location().is_empty() {
        output.push_str(&format!("Location:  {}\n", identity.location()));
        output.push_str(&format!("URL:       {}\n", identity.url()));
    }
    output
}

/// Format a pack identity as JSON.
///
/// # Examples
///
/// ```
/// use packget_installer::output::format_json;
/// use packget_installer::pack_info::extract_pack_info;
///
/// let info = extract_pack_info("TheVendor.ThePack", true).unwrap();
/// let json = format_json(&info);
/// assert!(json.contains("\"fully_qualified_name\": \"TheVendor.ThePack\""));
/// ```
#[must_use]
pub fn format_json(identity: &PackIdentity) -> String {
    let json_data = PackIdentityJson {
        fully_qualified_name: identity.fully_qualified_name(),
        identity,
    };
    serde_json::to_string_pretty(&json_data).unwrap_or_else(|_| "{}".to_owned())
}

/// JSON-serializable view of a pack identity.
#[derive(Debug, Serialize)]
pub struct PackIdentityJson<'a> {
    /// `Vendor.Pack` or `Vendor.Pack.Version`.
    pub fully_qualified_name: String,
    /// The parsed parts.
    #[serde(flatten)]
    pub identity: &'a PackIdentity,
}

/// Report a written checksum file.
#[must_use]
pub fn created_message(checksum_path: &Path) -> String {
    format!("Checksum file written to {}", checksum_path.display())
}

/// Report a successful verification.
///
/// # Examples
///
/// ```
/// use packget_installer::checksum::VerificationReport;
/// use packget_installer::output::verified_message;
/// use std::path::Path;
///
/// let report = VerificationReport { checked: 1, ..VerificationReport::default() };
/// assert_eq!(
///     verified_message(Path::new("A.B.1.0.0.pack"), &report),
///     "A.B.1.0.0.pack: 1 entry verified"
/// );
/// ```
#[must_use]
pub fn verified_message(pack: &Path, report: &VerificationReport) -> String {
    let noun = if report.checked == 1 {
        "entry"
    } else {
        "entries"
    };
    format!("{}: {} {noun} verified", pack.display(), report.checked)
}

/// Write `message` and a newline to `out`, ignoring write failures.
pub fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
