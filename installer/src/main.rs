//! `packget` CLI entrypoint.
//!
//! Records and checks per-entry checksums of pack archives and explains how
//! pack references are parsed.

use clap::Parser;
use log::debug;
use packget_common::{Result, ResultExt};
use packget_installer::checksum::{generate_checksum, verify_checksum_report};
use packget_installer::cli::{
    ChecksumCreateArgs, ChecksumVerifyArgs, Cli, Command, PackInfoArgs,
};
use packget_installer::logging;
use packget_installer::output::{
    created_message, format_human, format_json, verified_message, write_line,
};
use packget_installer::pack_info::extract_pack_info;
use std::io::Write;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    if let Err(err) = logging::init(cli.log_level()) {
        write_line(&mut stderr, err);
    }

    let mut stdout = std::io::stdout();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::ChecksumCreate(args) => run_checksum_create(args, cli.quiet, stdout),
        Command::ChecksumVerify(args) => run_checksum_verify(args, cli.quiet, stdout),
        Command::PackInfo(args) => run_pack_info(args, stdout),
    }
}

fn run_checksum_create(
    args: &ChecksumCreateArgs,
    quiet: bool,
    stdout: &mut dyn Write,
) -> Result<()> {
    let output_dir = args
        .output_dir
        .as_ref()
        .map_or(Path::new(""), |dir| dir.as_std_path());
    let written = generate_checksum(args.pack.as_std_path(), output_dir, &args.hash_function)
        .with_context(|| format!("creating checksum for {}", args.pack))?;
    if !quiet {
        write_line(stdout, created_message(&written));
    }
    Ok(())
}

fn run_checksum_verify(
    args: &ChecksumVerifyArgs,
    quiet: bool,
    stdout: &mut dyn Write,
) -> Result<()> {
    let checksum_path = args
        .path
        .as_ref()
        .map_or(Path::new(""), |path| path.as_std_path());
    let pack = args.pack.as_std_path();
    let report = verify_checksum_report(pack, checksum_path)
        .with_context(|| format!("verifying {}", args.pack))?;
    debug!(
        "{} checked, {} mismatched, {} missing, {} unlisted",
        report.checked,
        report.mismatches.len(),
        report.missing.len(),
        report.unlisted.len()
    );

    let message = verified_message(pack, &report);
    report.into_result(pack)?;
    if !quiet {
        write_line(stdout, message);
    }
    Ok(())
}

fn run_pack_info(args: &PackInfoArgs, stdout: &mut dyn Write) -> Result<()> {
    let identity = extract_pack_info(&args.input, args.short)?;
    let rendered = if args.json {
        format_json(&identity)
    } else {
        format_human(&identity).trim_end().to_owned()
    };
    write_line(stdout, rendered);
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_line(stderr, format!("error: {err}"));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packget_common::PackError;
    use std::path::PathBuf;

    fn run_args(argv: &[&str]) -> (Result<()>, String) {
        let cli = Cli::parse_from(argv);
        let mut stdout = Vec::new();
        let result = run(&cli, &mut stdout);
        (result, String::from_utf8(stdout).expect("stdout was not UTF-8"))
    }

    fn write_sample_pack(path: &Path) {
        let file = std::fs::File::create(path).expect("create pack");
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("TheVendor.ThePack.pdsc", zip::write::SimpleFileOptions::default())
            .expect("start entry");
        writer.write_all(b"<package/>\n").expect("write entry");
        writer.finish().expect("finish pack");
    }

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = PackError::FileNotFound {
            path: PathBuf::from("DoesNotExist.Pack.1.2.3.pack"),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("error: file not found: DoesNotExist.Pack.1.2.3.pack"));
    }

    #[test]
    fn pack_info_prints_human_output() {
        let (result, stdout) = run_args(&["packget", "pack-info", "--short", "TheVendor.ThePack"]);
        result.expect("valid identifier");
        assert_eq!(stdout, "Vendor:    TheVendor\nPack:      ThePack\n");
    }

    #[test]
    fn pack_info_reports_classified_error() {
        let (result, stdout) = run_args(&["packget", "pack-info", "TheVendor.ThePack.1.0.0.tgz"]);
        let err = result.expect_err("bad extension");
        assert!(err.is(packget_common::ErrorKind::BadPackNameInvalidExtension));
        assert!(stdout.is_empty());
    }

    #[test]
    fn checksum_create_then_verify_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let pack = dir.path().join("TheVendor.ThePack.1.0.0.pack");
        write_sample_pack(&pack);
        let pack_arg = pack.to_str().expect("UTF-8 temp path");

        let (result, stdout) = run_args(&["packget", "checksum-create", pack_arg]);
        result.expect("created");
        assert!(stdout.contains("TheVendor.ThePack.1.0.0.pack.sha256.checksum"));

        let (result, stdout) = run_args(&["packget", "checksum-verify", pack_arg]);
        result.expect("verified");
        assert!(stdout.ends_with(": 1 entry verified\n"));
    }

    #[test]
    fn checksum_errors_name_the_pack() {
        let (result, _) = run_args(&["packget", "checksum-verify", "DoesNotExist.Pack.1.2.3.pack"]);
        let err = result.expect_err("missing pack");
        assert!(err.is(packget_common::ErrorKind::FileNotFound));
        assert!(
            err.to_string()
                .starts_with("verifying DoesNotExist.Pack.1.2.3.pack: file not found")
        );
    }

    #[test]
    fn quiet_suppresses_success_output() {
        let dir = tempfile::tempdir().expect("temp dir");
        let pack = dir.path().join("TheVendor.ThePack.1.0.0.pack");
        write_sample_pack(&pack);
        let pack_arg = pack.to_str().expect("UTF-8 temp path");

        let (result, stdout) = run_args(&["packget", "-q", "checksum-create", pack_arg]);
        result.expect("created");
        assert!(stdout.is_empty());
    }
}
