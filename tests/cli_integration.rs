//! Запуск собранного бинаря `unzip-io`.

use std::{
    fs,
    process::{Command, Output},
};

use serde_json::json;
use tempfile::tempdir;
use unzip_io::Gateway;

/// Бинарь с чистым окружением: только переданные `UNZIP_*`.
fn unzip_io_with_env(
    args: &[&str],
    vars: &[(&str, &str)],
) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_unzip-io"));
    cmd.args(args);
    for var in [
        "RUST_LOG",
        "UNZIP_LOG_LEVEL",
        "UNZIP_LOG_FORMAT",
        "UNZIP_LOG_DIR",
        "UNZIP_COMMAND_CHECK",
        "UNZIP_SETTINGS",
    ] {
        cmd.env_remove(var);
    }
    cmd.envs(vars.iter().copied()).output().unwrap()
}

fn unzip_io(args: &[&str]) -> Output {
    unzip_io_with_env(args, &[])
}

#[test]
fn test_convert_json_to_msgpack() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("in.json");
    let output = tmp.path().join("out/converted.msgpack");
    fs::write(&input, r#"{"b": [1, 2], "a": {"x": null}}"#).unwrap();

    let out = unzip_io(&["-q", "convert", input.to_str().unwrap(), output.to_str().unwrap()]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let value = Gateway::default().read(&output).unwrap();
    assert_eq!(value, json!({"b": [1, 2], "a": {"x": null}}));
}

#[test]
fn test_convert_unsupported_exit_code() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("in.json");
    fs::write(&input, "[]").unwrap();

    let out = unzip_io(&["-q", "convert", input.to_str().unwrap(), "out.txt"]);

    assert_eq!(out.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unknown extension"), "stderr: {stderr}");
}

#[test]
fn test_json_error_report() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("missing.msgpack");

    let out = unzip_io(&[
        "-q",
        "--log-format",
        "json",
        "convert",
        missing.to_str().unwrap(),
        "x.json",
    ]);

    assert_eq!(out.status.code(), Some(66));
    let stderr = String::from_utf8_lossy(&out.stderr);
    let report = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|v| v.get("error_type").is_some())
        .unwrap_or_else(|| panic!("no report in: {stderr}"));
    assert_eq!(report["code"], json!(3000));
}

#[test]
fn test_fofn_prints_absolute_paths() {
    let tmp = tempdir().unwrap();
    let fofn = tmp.path().join("reads.fofn");
    fs::write(&fofn, "a.fasta\n\n/abs/b.fasta\n").unwrap();

    let out = unzip_io(&["-q", "fofn", fofn.to_str().unwrap()]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, [tmp.path().join("a.fasta").to_str().unwrap(), "/abs/b.fasta"]);
}

#[test]
fn test_check_exit_status() {
    let tmp = tempdir().unwrap();
    let full = tmp.path().join("full");
    let empty = tmp.path().join("empty");
    fs::write(&full, b"x").unwrap();
    fs::write(&empty, b"").unwrap();

    assert_eq!(unzip_io(&["-q", "check", full.to_str().unwrap()]).status.code(), Some(0));
    assert_eq!(unzip_io(&["-q", "check", empty.to_str().unwrap()]).status.code(), Some(1));
}

#[test]
fn test_run_check_and_nocheck() {
    let out = unzip_io(&["-q", "run", "--", "sh", "-c", "echo hi; exit 3"]);
    assert_eq!(out.status.code(), Some(75));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "");

    let out = unzip_io(&["-q", "run", "--nocheck", "--", "sh", "-c", "echo hi; exit 3"]);
    assert_eq!(out.status.code(), Some(3));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "hi\n");
}

#[test]
fn test_validate_config_missing_smrt_bin() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("cfg.json");
    fs::write(&cfg, r#"{"smrt_bin": "/definitely/not/here"}"#).unwrap();

    let out = unzip_io(&["-q", "validate-config", cfg.to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(66));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Not a directory: smrt_bin="), "stderr: {stderr}");
}

#[test]
fn test_version_mentions_commit() {
    let out = unzip_io(&["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));

    let long = unzip_io(&["--help"]);
    assert!(long.status.success());
}

#[test]
fn test_quiet_flag_beats_log_level_variable() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("full.txt");
    fs::write(&file, "x").unwrap();

    let out = unzip_io_with_env(
        &["-q", "check", file.to_str().unwrap()],
        &[("UNZIP_LOG_LEVEL", "debug")],
    );

    assert_eq!(out.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("DEBUG"), "stderr: {stderr}");
    assert!(!stderr.contains("INFO"), "stderr: {stderr}");
}

#[test]
fn test_log_format_flag_beats_variable_and_skips_ansi() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("gone.json");
    let output = tmp.path().join("out.msgpack");

    let out = unzip_io_with_env(
        &[
            "--log-format",
            "json",
            "convert",
            missing.to_str().unwrap(),
            output.to_str().unwrap(),
        ],
        &[("UNZIP_LOG_FORMAT", "pretty")],
    );

    assert_eq!(out.status.code(), Some(66));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains('\u{1b}'), "stderr: {stderr:?}");
    for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
        assert!(
            serde_json::from_str::<serde_json::Value>(line).is_ok(),
            "not a json line: {line}"
        );
    }
}
