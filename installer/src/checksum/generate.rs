//! Checksum manifest generation.

use super::archive::{EntryDigester, ZipPack};
use super::manifest::{ChecksumManifest, checksum_file_name};
use log::{debug, info};
use packget_common::{HashAlgorithm, PackError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Hash every file entry of the pack at `pack_path` and write the manifest.
///
/// An empty `hash_algorithm` selects [`packget_common::DEFAULT_HASH`]. An
/// empty `output_dir` places the manifest beside the pack. The manifest is
/// named `<pack file name>.<algorithm>.checksum`; an existing file of that
/// name is replaced atomically.
///
/// Returns the path of the written manifest.
///
/// # Errors
///
/// - [`PackError::InvalidHashFunction`] when `hash_algorithm` is not
///   registered; checked before any file is touched.
/// - [`PackError::FileNotFound`] when the pack or `output_dir` is missing.
/// - [`PackError::ArchiveRead`] when the pack is not a readable archive or
///   an entry's data is damaged.
/// - [`PackError::Io`] when the manifest cannot be written.
pub fn generate_checksum(
    pack_path: &Path,
    output_dir: &Path,
    hash_algorithm: &str,
) -> Result<PathBuf> {
    let algorithm = HashAlgorithm::resolve(hash_algorithm)?;
    let pack = ZipPack::open(pack_path)?;

    let target_dir = target_directory(pack_path, output_dir)?;
    let file_name = pack_file_name(pack_path)?;
    let destination = target_dir.join(checksum_file_name(&file_name, algorithm));

    debug!(
        "generating {algorithm} checksums for {}",
        pack_path.display()
    );
    let manifest = build_manifest(&pack, algorithm, pack_path)?;
    write_atomically(&target_dir, &destination, manifest.render().as_bytes())?;
    info!(
        "wrote {} entries to {}",
        manifest.len(),
        destination.display()
    );

    Ok(destination)
}

/// Collect the digests from `digester` into a manifest.
///
/// # Errors
///
/// Propagates digester failures and returns [`PackError::ArchiveRead`] for
/// the first entry whose data could not be read.
pub fn build_manifest(
    digester: &dyn EntryDigester,
    algorithm: HashAlgorithm,
    pack_path: &Path,
) -> Result<ChecksumManifest> {
    let mut manifest = ChecksumManifest::new(algorithm);
    for entry in digester.entry_digests(algorithm)? {
        let digest = entry.digest.map_err(|reason| PackError::ArchiveRead {
            path: pack_path.to_path_buf(),
            reason: format!("entry {}: {reason}", entry.path),
        })?;
        manifest.push(entry.path, digest);
    }
    Ok(manifest)
}

fn target_directory(pack_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    if output_dir.as_os_str().is_empty() {
        return Ok(match pack_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        });
    }
    if !output_dir.is_dir() {
        return Err(PackError::FileNotFound {
            path: output_dir.to_path_buf(),
        });
    }
    Ok(output_dir.to_path_buf())
}

fn pack_file_name(pack_path: &Path) -> Result<String> {
    pack_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| PackError::FileNotFound {
            path: pack_path.to_path_buf(),
        })
}

fn write_atomically(dir: &Path, destination: &Path, contents: &[u8]) -> Result<()> {
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents)?;
    staged.flush()?;
    staged
        .persist(destination)
        .map_err(|err| PackError::Io(err.error))?;
    Ok(())
}
