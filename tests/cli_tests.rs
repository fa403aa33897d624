//! End-to-end tests running the `html2eml` binary.

use std::path::Path;
use std::process::{Command, Output};

use assert_fs::prelude::*;
use predicates::prelude::*;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Run the binary in English with an isolated config and cache directory.
fn run(temp: &assert_fs::TempDir, args: &[&Path]) -> Output {
    let config = temp.child("config.toml");
    if !config.path().exists() {
        config
            .write_str(&format!(
                "[general]\ncache_dir = {:?}\n",
                temp.path().join("cache")
            ))
            .unwrap();
    }

    Command::new(env!("CARGO_BIN_EXE_html2eml"))
        .args(args)
        .env("HTML2EML_CONFIG", config.path())
        .env("HTML2EML_LANG", "en")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run html2eml")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn bundle(temp: &assert_fs::TempDir) -> assert_fs::fixture::ChildPath {
    let input = temp.child("mail");
    input
        .child("index.html")
        .write_str(r#"<img src="img/logo.png"><img src="https://example.com/x.png">"#)
        .unwrap();
    input.child("img/logo.png").write_binary(PNG).unwrap();
    input
}

#[test]
fn test_no_arguments_prints_usage() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = run(&temp, &[]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Usage: html2eml <input_folder> <output_file>"));
    assert!(out.contains("Example:"));
}

#[test]
fn test_one_argument_prints_usage() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = run(&temp, &[temp.path()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_too_many_arguments_prints_usage() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = bundle(&temp);
    let out = temp.child("out.eml");
    let output = run(&temp, &[input.path(), out.path(), Path::new("extra")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage:"));
    out.assert(predicate::path::missing());
}

#[test]
fn test_successful_conversion() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = bundle(&temp);
    let out = temp.child("out.eml");

    let output = run(&temp, &[input.path(), out.path()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("EML generated successfully"));
    assert!(text.contains(&out.path().display().to_string()));
    assert!(text.contains("logo.png"));
    out.assert(predicate::path::is_file());
    out.assert(predicate::str::contains("Content-ID: <").from_utf8().from_file_path());
    out.assert(
        predicate::str::contains("https://example.com/x.png")
            .from_utf8()
            .from_file_path(),
    );
}

#[test]
fn test_missing_index_exits_with_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("empty");
    input.create_dir_all().unwrap();
    let out = temp.child("out.eml");

    let output = run(&temp, &[input.path(), out.path()]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Cannot find"));
    assert!(text.contains("index.html"));
    out.assert(predicate::path::missing());
}

#[test]
fn test_missing_image_warns_but_succeeds() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("mail");
    input
        .child("index.html")
        .write_str(r#"<img src="img/nowhere.png">"#)
        .unwrap();
    let out = temp.child("out.eml");

    let output = run(&temp, &[input.path(), out.path()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Warning: Image not found"));
    assert!(text.contains("nowhere.png"));
    out.assert(predicate::path::is_file());
}

#[test]
fn test_json_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = bundle(&temp);
    let out = temp.child("out.eml");

    let output = run(
        &temp,
        &[input.path(), out.path(), Path::new("--json")],
    );

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["attached"].as_array().unwrap().len(), 1);
    assert_eq!(report["attached"][0]["filename"], "logo.png");
    assert_eq!(report["attached"][0]["content_type"], "image/png");
    assert_eq!(report["remote"], 1);
    assert!(report["missing"].as_array().unwrap().is_empty());
}

#[test]
fn test_subject_flag() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = bundle(&temp);
    let out = temp.child("out.eml");

    let output = run(
        &temp,
        &[
            input.path(),
            out.path(),
            Path::new("--subject"),
            Path::new("October offers"),
            Path::new("--no-unsent"),
        ],
    );

    assert!(output.status.success());
    out.assert(predicate::str::contains("Subject: October offers").from_utf8().from_file_path());
    out.assert(predicate::str::contains("X-Unsent").not().from_utf8().from_file_path());
}

#[test]
fn test_spanish_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = bundle(&temp);
    let out = temp.child("out.eml");

    let output = run(
        &temp,
        &[input.path(), out.path(), Path::new("--lang"), Path::new("es")],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("EML generado correctamente"));
}

#[test]
fn test_help_exits_zero() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = run(&temp, &[Path::new("--help")]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("INPUT_FOLDER"));
}

/// Run the binary with `config.toml` written verbatim and the platform cache
/// directory redirected into `temp`.
fn run_with_config(temp: &assert_fs::TempDir, config: &str, args: &[&Path]) -> Output {
    temp.child("config.toml").write_str(config).unwrap();
    Command::new(env!("CARGO_BIN_EXE_html2eml"))
        .args(args)
        .env("HTML2EML_CONFIG", temp.child("config.toml").path())
        .env("HTML2EML_LANG", "en")
        .env("XDG_CACHE_HOME", temp.path().join("xdg-cache"))
        .env("HOME", temp.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run html2eml")
}

#[cfg(unix)]
#[test]
fn test_non_utf8_input_folder() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.path().join(OsStr::from_bytes(b"mail\xff"));
    std::fs::create_dir_all(input.join("img")).unwrap();
    std::fs::write(input.join("index.html"), r#"<img src="img/logo.png">"#).unwrap();
    std::fs::write(input.join("img/logo.png"), PNG).unwrap();
    let out = temp.child("out.eml");

    let output = run(&temp, &[input.as_path(), out.path()]);

    assert_eq!(output.status.code(), Some(0));
    out.assert(predicate::str::contains("Content-ID: <").from_utf8().from_file_path());
}

#[test]
fn test_unusable_log_file_falls_back_to_stderr() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = bundle(&temp);
    let out = temp.child("out.eml");
    // A directory where the log file should be cannot be opened for append
    let cache = temp.child("cache");
    cache.child("html2eml.log").create_dir_all().unwrap();

    let output = run(&temp, &[input.path(), out.path()]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("EML generated successfully"));
    out.assert(predicate::path::is_file());
}

#[test]
fn test_broken_config_is_reported_and_defaults_used() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = bundle(&temp);
    let out = temp.child("out.eml");

    let output = run_with_config(&temp, "[message\nsubject = ", &[input.path(), out.path()]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config file"), "stderr: {stderr}");
    out.assert(predicate::str::contains("Subject: HTML Template").from_utf8().from_file_path());
}

#[test]
fn test_wrong_arity_does_not_read_config() {
    let temp = assert_fs::TempDir::new().unwrap();

    let output = run_with_config(&temp, "[message\nsubject = ", &[temp.path()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage:"));
    assert!(output.stderr.is_empty());
}
