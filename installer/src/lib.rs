//! Pack identification and integrity library.
//!
//! This crate provides the core functionality behind the `packget` CLI:
//! turning pack references into validated identities and recording or
//! checking per-entry checksums of pack archives. It can be consumed
//! programmatically for testing or custom tooling.
//!
//! # Modules
//!
//! - [`checksum`] - Checksum manifest generation and verification
//! - [`cli`] - Command-line argument definitions
//! - [`logging`] - Stderr log subscriber for the binary
//! - [`output`] - Output formatting for the CLI
//! - [`pack_info`] - Pack identifier and location parsing

pub mod checksum;
pub mod cli;
pub mod logging;
pub mod output;
pub mod pack_info;

#[cfg(test)]
mod test_utils;
