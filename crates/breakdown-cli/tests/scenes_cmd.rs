//! Integration tests for the `scenes` subcommand.

mod common;

use common::*;
use predicates::prelude::*;

#[test]
fn scenes_text_from_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = write_file(dir.path(), "plan.pdf", &schedule_pdf());

    cmd()
        .arg("scenes")
        .arg(&schedule)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("day\tscene\ttiming\tsummary\tcast"))
        .stdout(predicate::str::contains("1\t1\tI/T\tAnna wartet\t1 ANNA, 3 BEN"))
        .stdout(predicate::str::contains("1\t2\tA/N"));
}

#[test]
fn scenes_json_from_token_dump() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = write_file(dir.path(), "plan.json", SCHEDULE_TOKENS.as_bytes());

    let output = cmd()
        .args(["scenes", "--tokens", "--format", "json"])
        .arg(&schedule)
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["day"], "1");
    assert_eq!(records[0]["scene"], "1");
    assert_eq!(records[0]["cast"], "1 ANNA, 3 BEN");
    assert_eq!(records[1]["timing"], "A/N");
    assert_eq!(records[1]["cast"], "2 CARLA\n5 Komparsen");
}

#[test]
fn scenes_csv_quotes_cast_lists() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = write_file(dir.path(), "plan.json", SCHEDULE_TOKENS.as_bytes());

    cmd()
        .args(["scenes", "--tokens", "--format", "csv"])
        .arg(&schedule)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("day,scene,timing,summary,cast\n"))
        .stdout(predicate::str::contains("1,1,I/T,Anna wartet,\"1 ANNA, 3 BEN\""));
}

#[test]
fn scenes_warns_on_missing_legend() {
    let dir = tempfile::tempdir().unwrap();
    let dump = r#"{"pages":[{"width":612.0,"tokens":[]}]}"#;
    let schedule = write_file(dir.path(), "empty.json", dump.as_bytes());

    cmd()
        .args(["scenes", "--tokens"])
        .arg(&schedule)
        .assert()
        .success()
        .stderr(predicate::str::contains("EMPTY_ROLE_MAP"));
}

#[test]
fn scenes_rejects_invalid_dump() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = write_file(dir.path(), "bad.json", b"{\"pages\": 3}");

    cmd()
        .args(["scenes", "--tokens"])
        .arg(&schedule)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid token dump"));
}
