//! Shared test utilities for the installer crate.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Writes a deflated pack containing `entries`. Names ending in `/` become
/// directory entries.
pub fn write_pack(path: &Path, entries: &[(&str, &[u8])]) {
    write_pack_with(path, entries, CompressionMethod::Deflated);
}

/// Writes a pack whose entries are stored without compression, so their
/// bytes can be located and altered in the file.
pub fn write_stored_pack(path: &Path, entries: &[(&str, &[u8])]) {
    write_pack_with(path, entries, CompressionMethod::Stored);
}

fn write_pack_with(path: &Path, entries: &[(&str, &[u8])], method: CompressionMethod) {
    let file = File::create(path).expect("create pack file");
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(method);

    for (name, data) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .expect("add directory entry");
        } else {
            writer.start_file(*name, options).expect("start entry");
            writer.write_all(data).expect("write entry");
        }
    }
    writer.finish().expect("finish pack");
}

/// Returns the standard set of entries used by checksum tests.
pub fn sample_entries() -> Vec<(&'static str, &'static [u8])> {
    vec![
        ("TheVendor.ThePack.pdsc", b"<package/>\n".as_slice()),
        ("src/", b"".as_slice()),
        ("src/main.c", b"int main(void) { return 0; }\n".as_slice()),
        ("docs/read me.md", b"# The pack\n".as_slice()),
    ]
}

/// Writes a stored archive of zero-length entries byte by byte, so names a
/// zip writer would refuse (empty or repeated) can still be produced.
pub fn write_empty_entries(path: &Path, names: &[&str]) {
    // DOS date 1980-01-01; CRC-32 and both sizes are zero for empty data.
    const DOS_DATE: u16 = 0x0021;
    let mut local = Vec::new();
    let mut central = Vec::new();

    for name in names {
        let offset = u32::try_from(local.len()).expect("small archive");
        let name_len = u16::try_from(name.len()).expect("short name");

        local.extend_from_slice(&0x0403_4b50_u32.to_le_bytes());
        local.extend_from_slice(&20_u16.to_le_bytes());
        local.extend_from_slice(&[0; 6]);
        local.extend_from_slice(&DOS_DATE.to_le_bytes());
        local.extend_from_slice(&[0; 12]);
        local.extend_from_slice(&name_len.to_le_bytes());
        local.extend_from_slice(&0_u16.to_le_bytes());
        local.extend_from_slice(name.as_bytes());

        central.extend_from_slice(&0x0201_4b50_u32.to_le_bytes());
        central.extend_from_slice(&20_u16.to_le_bytes());
        central.extend_from_slice(&20_u16.to_le_bytes());
        central.extend_from_slice(&[0; 6]);
        central.extend_from_slice(&DOS_DATE.to_le_bytes());
        central.extend_from_slice(&[0; 12]);
        central.extend_from_slice(&name_len.to_le_bytes());
        central.extend_from_slice(&[0; 12]);
        central.extend_from_slice(&offset.to_le_bytes());
        central.extend_from_slice(name.as_bytes());
    }

    let count = u16::try_from(names.len()).expect("few entries");
    let central_size = u32::try_from(central.len()).expect("small directory");
    let central_offset = u32::try_from(local.len()).expect("small archive");
    let mut bytes = local;
    bytes.extend_from_slice(&central);
    bytes.extend_from_slice(&0x0605_4b50_u32.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&count.to_le_bytes());
    bytes.extend_from_slice(&count.to_le_bytes());
    bytes.extend_from_slice(&central_size.to_le_bytes());
    bytes.extend_from_slice(&central_offset.to_le_bytes());
    bytes.extend_from_slice(&0_u16.to_le_bytes());
    std::fs::write(path, bytes).expect("write raw pack");
}
