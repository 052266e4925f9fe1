//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Most use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Parse the JSON a successful command wrote to stdout.
fn json_output(command: &mut Command) -> Value {
    let output = command.output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &Path) -> Value {
    json_output(cmd().args(["-C", dir.to_str().unwrap(), "info", "--json"]))
}

/// Run `analyze --json` on stdin from a directory and parse the report.
fn analyze_json(dir: &Path, essay: &str) -> Value {
    json_output(
        cmd()
            .args(["-C", dir.to_str().unwrap(), "analyze", "--json"])
            .write_stdin(essay),
    )
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert_eq!(json["config"]["keyword_limit"], 10);
    assert!(
        json["config"]["config_file"].is_null(),
        "no config file should be reported"
    );
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".essay-scorer.toml"), "keyword_limit = 3").unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["keyword_limit"], 3);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with(".essay-scorer.toml"),
        "should report dotfile: {reported}"
    );
}

#[test]
fn discovers_short_name_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("essay.toml"), r#"log_level = "warn""#).unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "warn");
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub = tmp.path().join("drafts").join("week1");
    fs::create_dir_all(&sub).unwrap();
    fs::write(tmp.path().join(".essay-scorer.toml"), "min_score = 40.0").unwrap();

    let json = info_json(&sub);
    assert_eq!(json["config"]["min_score"], 40.0);
}

// =============================================================================
// Config File Formats
// =============================================================================

#[test]
fn parses_yaml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".essay-scorer.yaml"), "keyword_limit: 4\n").unwrap();

    assert_eq!(info_json(tmp.path())["config"]["keyword_limit"], 4);
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".essay-scorer.json"),
        r#"{"keyword_limit": 6}"#,
    )
    .unwrap();

    assert_eq!(info_json(tmp.path())["config"]["keyword_limit"], 6);
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".essay-scorer.toml"), "keyword_limit = 3").unwrap();

    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, "keyword_limit = 7").unwrap();

    let json = json_output(cmd().args([
        "-C",
        tmp.path().to_str().unwrap(),
        "--config",
        explicit.to_str().unwrap(),
        "info",
        "--json",
    ]));
    assert_eq!(json["config"]["keyword_limit"], 7);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with("override.toml"),
        "--config path should be reported: {reported}"
    );
}

#[test]
fn environment_overrides_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".essay-scorer.toml"), "keyword_limit = 3").unwrap();

    let json = json_output(
        cmd()
            .env("ESSAY_SCORER_KEYWORD_LIMIT", "5")
            .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"]),
    );
    assert_eq!(json["config"]["keyword_limit"], 5);
}

#[test]
fn disable_input_limit_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".essay-scorer.toml"),
        "disable_input_limit = true",
    )
    .unwrap();

    assert!(info_json(tmp.path())["config"]["max_input_bytes"].is_null());
}

// =============================================================================
// Config Applied to Analysis
// =============================================================================

#[test]
fn configured_min_score_gates_analysis() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".essay-scorer.toml"), "min_score = 99.0").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze"])
        .write_stdin("The cat sat. The dog ran fast.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("min: 99.00"));
}

#[test]
fn configured_abbreviations_keep_sentences_together() {
    let essay = "See Sec. Four for details.";
    let tmp = TempDir::new().unwrap();
    assert_eq!(analyze_json(tmp.path(), essay)["sentence_count"], 2);

    fs::write(
        tmp.path().join(".essay-scorer.toml"),
        r#"abbreviations = ["sec"]"#,
    )
    .unwrap();
    assert_eq!(analyze_json(tmp.path(), essay)["sentence_count"], 1);
}

#[test]
fn configured_input_limit_rejects_large_essays() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".essay-scorer.toml"), "max_input_bytes = 10").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze"])
        .write_stdin("This essay is longer than ten bytes.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".essay-scorer.toml"),
        "this is not valid toml [[[",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn invalid_log_level_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".essay-scorer.toml"), r#"log_level = "loud""#).unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn out_of_range_min_score_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".essay-scorer.toml"), "min_score = 150.0").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_score"));
}

#[test]
fn invalid_abbreviation_fails_analysis() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".essay-scorer.toml"),
        r#"abbreviations = ["two words"]"#,
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze"])
        .write_stdin("The cat sat.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to initialize the essay analyzer"));
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".essay-scorer.toml"),
        "log_level = \"info\"\nunknown_field = \"should be ignored\"\n",
    )
    .unwrap();

    assert_eq!(info_json(tmp.path())["config"]["log_level"], "info");
}

// =============================================================================
// Boundary Marker Tests
// =============================================================================

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let work = repo.join("work");
    fs::create_dir_all(&work).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(tmp.path().join(".essay-scorer.toml"), "keyword_limit = 2").unwrap();

    let json = info_json(&work);
    assert_eq!(
        json["config"]["keyword_limit"], 10,
        "config above the repository root should not be found"
    );
}

#[test]
fn config_in_same_dir_as_git_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let work = repo.join("work");
    fs::create_dir_all(&work).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(repo.join(".essay-scorer.toml"), "keyword_limit = 2").unwrap();

    assert_eq!(info_json(&work)["config"]["keyword_limit"], 2);
}
