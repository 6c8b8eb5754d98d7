//! CLI argument definitions for `packget`.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use packget_common::DEFAULT_HASH;

/// Inspect pack identifiers and check pack archive integrity.
#[derive(Parser, Debug)]
#[command(name = "packget")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Record checksums for every file in a pack:\n",
    "    $ packget checksum-create ARM.CMSIS.5.9.0.pack\n\n",
    "  Check a pack against the checksum file beside it:\n",
    "    $ packget checksum-verify ARM.CMSIS.5.9.0.pack\n\n",
    "  Show how a pack reference is understood:\n",
    "    $ packget pack-info https://example.com/packs/ARM.CMSIS.5.9.0.pack",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Increase log output (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only report errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a checksum file listing a digest for every file in a pack.
    ChecksumCreate(ChecksumCreateArgs),

    /// Check a pack against its checksum file.
    ChecksumVerify(ChecksumVerifyArgs),

    /// Parse a pack reference and print its parts.
    PackInfo(PackInfoArgs),
}

/// Arguments for `checksum-create`.
#[derive(Parser, Debug, Clone)]
pub struct ChecksumCreateArgs {
    /// Pack archive to hash.
    #[arg(value_name = "PACK")]
    pub pack: Utf8PathBuf,

    /// Hash function to use (sha256, sha512).
    #[arg(short = 'a', long, value_name = "ALG", default_value = DEFAULT_HASH.name())]
    pub hash_function: String,

    /// Directory for the checksum file [default: beside the pack].
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,
}

/// Arguments for `checksum-verify`.
#[derive(Parser, Debug, Clone)]
pub struct ChecksumVerifyArgs {
    /// Pack archive to check.
    #[arg(value_name = "PACK")]
    pub pack: Utf8PathBuf,

    /// Checksum file to check against [default: inferred from the pack name].
    #[arg(short, long, value_name = "CHECKSUM")]
    pub path: Option<Utf8PathBuf>,
}

/// Arguments for `pack-info`.
#[derive(Parser, Debug, Clone)]
pub struct PackInfoArgs {
    /// Pack reference: `Vendor.Pack[.Version]`, a path or a URL.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Treat the input as a bare `Vendor.Pack[.Version]` identifier.
    #[arg(long)]
    pub short: bool,

    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Return the log level filter selected by `-v` and `-q`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use packget_installer::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["packget", "-vv", "pack-info", "A.B.1.0.0.pack"]);
    /// assert_eq!(cli.log_level(), log::LevelFilter::Trace);
    /// ```
    #[must_use]
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
