use std::fs;
use std::path::Path;

use predicates::prelude::{PredicateBooleanExt, predicate};
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

fn valid_report() -> Value {
    json!({
        "first-name": "Ada",
        "last-name": "Lovelace",
        "github-url": "https://github.com/ucll-vgo2122/minesweeper-alovelace",
        "extensions": ["undo", "timer", "flags"],
        "framework": "WPF"
    })
}

fn workdir_with_report(report: &Value) -> TempDir {
    let dir = tempdir().expect("tempdir");
    write_report(dir.path(), report.to_string().as_bytes());
    dir
}

fn write_report(dir: &Path, body: &[u8]) {
    fs::write(dir.join("report.json"), body).expect("write report");
}

#[test]
fn valid_report_prints_success_and_exits_zero() {
    let dir = workdir_with_report(&valid_report());

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with(
            "Looking for report.json\nOpening report.json...\nParsing JSON...\nChecking contents...\n",
        ))
        .stdout(predicate::str::contains(
            "Checking first-name\nChecking last-name\nChecking github-url\nChecking extensions\nChecking framework\n",
        ))
        .stdout(predicate::str::ends_with(
            "SUCCESS\nYou can upload your report now\n",
        ))
        .stderr(predicate::str::is_empty());
}

#[test]
fn invalid_github_url_stops_before_success() {
    let mut report = valid_report();
    report["github-url"] = json!("not-a-url");
    let dir = workdir_with_report(&report);

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "ERROR: github-url is invalid; it should have the form https://github.com/ucll-vgo2122/minesweeper-LOGIN",
        ))
        .stdout(predicate::str::contains("SUCCESS").not())
        .stdout(predicate::str::contains("Checking extensions").not());
}

#[test]
fn missing_report_exits_with_input_error() {
    let dir = tempdir().expect("tempdir");

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Looking for report.json"))
        .stdout(predicate::str::contains("ERROR: Failed to find report.json"));
}

#[test]
fn malformed_json_exits_with_input_error() {
    let dir = tempdir().expect("tempdir");
    write_report(dir.path(), b"{\"first-name\": \"Ada\",");

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Parsing JSON..."))
        .stdout(predicate::str::contains("ERROR: Failed to parse JSON file"));
}

#[test]
fn byte_order_mark_is_accepted() {
    let dir = tempdir().expect("tempdir");
    let mut body = b"\xEF\xBB\xBF".to_vec();
    body.extend_from_slice(valid_report().to_string().as_bytes());
    write_report(dir.path(), &body);

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("SUCCESS"));
}

#[test]
fn missing_field_names_the_key() {
    let mut report = valid_report();
    report.as_object_mut().expect("object").remove("extensions");
    let dir = workdir_with_report(&report);

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("ERROR: Missing extensions"))
        .stdout(predicate::str::contains("Checking framework").not());
}

#[test]
fn short_extension_list_warns_but_passes() {
    let mut report = valid_report();
    report["extensions"] = json!(["undo", "timer"]);
    let dir = workdir_with_report(&report);

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("WARNING: You only have 2 extensions!"))
        .stdout(predicate::str::contains("SUCCESS"));
}

#[test]
fn unknown_framework_fails() {
    let mut report = valid_report();
    report["framework"] = json!("React");
    let dir = workdir_with_report(&report);

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "ERROR: framework is invalid; it should be either WPF or Avalonia",
        ));
}

#[test]
fn loose_rule_set_accepts_any_github_url_without_framework() {
    let mut report = valid_report();
    report["github-url"] = json!("https://github.com/alovelace/analytical-engine");
    report.as_object_mut().expect("object").remove("framework");
    let dir = workdir_with_report(&report);

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .args(["--rule-set", "loose"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Checking framework").not())
        .stdout(predicate::str::contains("SUCCESS"));
}

#[test]
fn organization_flag_changes_strict_url_scope() {
    let mut report = valid_report();
    report["github-url"] = json!("https://github.com/pvm-2324/tetris-alovelace");
    let dir = workdir_with_report(&report);

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .args(["--organization", "pvm-2324", "--repository-prefix", "tetris"])
        .assert()
        .code(0);
}

#[test]
fn report_flag_reads_another_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("submission.json");
    fs::write(&path, valid_report().to_string()).expect("write report");

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .args(["--report", "submission.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("Looking for submission.json\n"));
}

#[test]
fn config_file_supplies_frameworks() {
    let mut report = valid_report();
    report["framework"] = json!("maui");
    let dir = workdir_with_report(&report);
    fs::write(
        dir.path().join("reportcheck.toml"),
        "frameworks = [\"WPF\", \"Avalonia\", \"MAUI\"]\n",
    )
    .expect("write config");

    assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .args(["--config", "reportcheck.toml"])
        .assert()
        .code(0);
}

#[test]
fn emit_pipeline_reports_failure_on_stderr() {
    let mut report = valid_report();
    report["last-name"] = json!(null);
    let dir = workdir_with_report(&report);

    let output = assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--emit-pipeline")
        .output()
        .expect("run command");

    assert_eq!(output.status.code(), Some(2));
    let pipeline: Value = serde_json::from_slice(&output.stderr).expect("stderr json");
    assert_eq!(pipeline["command"], json!("check"));
    assert_eq!(pipeline["rule_set"], json!("strict"));
    assert_eq!(pipeline["input"]["path"], json!("report.json"));
    assert_eq!(
        pipeline["steps"],
        json!(["resolve_config", "locate_report", "open_report", "parse_json", "check_fields"])
    );
    assert_eq!(pipeline["status"]["state"], json!("failed"));
    assert_eq!(pipeline["status"]["error"], json!("validation_error"));
    assert_eq!(pipeline["status"]["message"], json!("last-name should be string"));
}

#[test]
fn emit_pipeline_lists_checked_fields_and_warnings() {
    let mut report = valid_report();
    report["extensions"] = json!([]);
    let dir = workdir_with_report(&report);

    let output = assert_cmd::cargo::cargo_bin_cmd!("reportcheck")
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--emit-pipeline")
        .output()
        .expect("run command");

    assert_eq!(output.status.code(), Some(0));
    let pipeline: Value = serde_json::from_slice(&output.stderr).expect("stderr json");
    assert_eq!(pipeline["status"], json!({"state": "passed"}));
    assert_eq!(
        pipeline["checked_fields"],
        json!(["first-name", "last-name", "github-url", "extensions", "framework"])
    );
    assert_eq!(
        pipeline["warnings"],
        json!([{"field": "extensions", "message": "You only have 0 extensions!"}])
    );
}
