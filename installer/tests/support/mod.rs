//! Test support utilities for packget integration tests.
//!
//! Builds pack archives in scratch directories so scenarios can exercise the
//! public API against real files.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Entries of the pack used across scenarios, in archive order.
pub const PACK_ENTRIES: &[(&str, &[u8])] = &[
    ("ARM.CMSIS.pdsc", b"<package schemaVersion=\"1.7.7\"/>\n".as_slice()),
    ("CMSIS/Core/Include/", b"".as_slice()),
    ("CMSIS/Core/Include/core_cm4.h", b"#define __CM4_REV 0x0001U\n".as_slice()),
    ("CMSIS/Documentation/index.html", b"<html></html>\n".as_slice()),
    ("LICENSE.txt", b"Apache-2.0\n".as_slice()),
];

/// A pack written into its own temporary directory.
pub struct ScratchPack {
    /// Keeps the directory alive for the duration of the test.
    pub dir: TempDir,
    /// Absolute path of the pack archive.
    pub path: PathBuf,
}

impl ScratchPack {
    /// Writes `entries` into `<tempdir>/<file_name>`.
    pub fn new(file_name: &str, entries: &[(&str, &[u8])]) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(file_name);
        write_pack(&path, entries, CompressionMethod::Deflated);
        Self { dir, path }
    }

    /// Writes the standard scenario pack.
    pub fn standard() -> Self {
        Self::new("ARM.CMSIS.5.9.0.pack", PACK_ENTRIES)
    }

    /// Replaces the archive contents with `entries`.
    pub fn rewrite(&self, entries: &[(&str, &[u8])]) {
        write_pack(&self.path, entries, CompressionMethod::Deflated);
    }

    /// Returns the directory holding the pack.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Writes a zip archive; names ending in `/` become directory entries.
pub fn write_pack(path: &Path, entries: &[(&str, &[u8])], method: CompressionMethod) {
    let file = File::create(path).expect("create pack");
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(method);
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).expect("add directory");
        } else {
            writer.start_file(*name, options).expect("start entry");
            writer.write_all(data).expect("write entry");
        }
    }
    writer.finish().expect("finish pack");
}
