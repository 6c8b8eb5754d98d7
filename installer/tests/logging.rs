//! Log records emitted by the checksum workflow.
//!
//! Runs as its own test binary because the capturing logger is global.

mod support;

use log::Level;
use logtest::Logger;
use packget_installer::checksum::{generate_checksum, verify_checksum};
use std::path::Path;
use support::ScratchPack;

#[test]
fn checksum_workflow_logs_progress() {
    let mut logger = Logger::start();
    let pack = ScratchPack::standard();

    let checksum = generate_checksum(&pack.path, Path::new(""), "sha512").expect("generated");
    verify_checksum(&pack.path, &checksum).expect("verified");

    let mut records = Vec::new();
    while let Some(record) = logger.pop() {
        records.push((record.level(), record.args().to_owned()));
    }

    assert!(
        records
            .iter()
            .any(|(level, message)| *level == Level::Debug
                && message.starts_with("generating sha512 checksums")),
        "records: {records:?}"
    );
    assert!(
        records
            .iter()
            .any(|(level, message)| *level == Level::Info && message.starts_with("wrote 4 entries")),
        "records: {records:?}"
    );
    assert!(
        records
            .iter()
            .any(|(level, message)| *level == Level::Trace
                && message == "hashed LICENSE.txt with sha512"),
        "records: {records:?}"
    );
    assert!(
        records
            .iter()
            .all(|(level, _)| *level != Level::Warn && *level != Level::Error),
        "records: {records:?}"
    );
}
