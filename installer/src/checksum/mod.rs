//! Per-entry checksum manifests for pack archives.
//!
//! [`generate_checksum`] hashes the decompressed bytes of every file entry
//! in a pack and records them in a manifest beside it.
//! [`verify_checksum`] recomputes the digests and reports every entry that
//! changed, vanished or appeared since the manifest was written.
//!
//! The manifest's algorithm is carried in its file name, never in its body.

pub mod archive;
pub mod digest;
pub mod generate;
pub mod manifest;
pub mod verify;

pub use archive::{EntryDigest, EntryDigester, ZipPack};
pub use digest::{DigestError, HexDigest};
pub use generate::generate_checksum;
pub use manifest::{ChecksumManifest, ManifestEntry, checksum_file_name};
pub use verify::{
    VerificationReport, find_checksum_file, verify_checksum, verify_checksum_report, verify_with,
};
