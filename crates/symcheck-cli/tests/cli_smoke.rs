use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn symcheck(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("symcheck").unwrap();
    cmd.current_dir(dir)
        .env_remove("GROQ_API_KEY")
        .env_remove("SYMCHECK_MODEL")
        .env_remove("SYMCHECK_DB")
        .env_remove("SYMCHECK_BASE_URL")
        .env_remove("SYMCHECK_TIMEOUT_SECS")
        .env_remove("SYMCHECK_LOG");
    cmd
}

#[test]
fn test_analyze_with_fake_provider_records_history() {
    let dir = tempdir().unwrap();

    symcheck(dir.path())
        .args(["analyze", "--provider", "fake", "--symptoms", "fever, cough"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Educational Disclaimer"))
        .stdout(predicate::str::contains("fever, cough"))
        .stderr(predicate::str::contains("saved to history as #1"));

    assert!(dir.path().join("symptom_checker_history.db").exists());

    symcheck(dir.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fever, cough"));

    symcheck(dir.path())
        .args(["history", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Symptoms:\nfever, cough"))
        .stdout(predicate::str::contains("LLM response:"));
}

#[test]
fn test_analyze_reads_symptoms_from_stdin() {
    let dir = tempdir().unwrap();

    symcheck(dir.path())
        .args(["--db", "data/h.db", "analyze", "--provider", "fake", "--show-raw"])
        .write_stdin("sore throat for 2 days")
        .assert()
        .success()
        .stdout(predicate::str::contains("sore throat for 2 days"))
        .stdout(predicate::str::contains("\"object\": \"chat.completion\""));

    assert!(dir.path().join("data/h.db").exists());
}

#[test]
fn test_history_write_failure_still_shows_advisory() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("dbdir")).unwrap();

    symcheck(dir.path())
        .args(["--db", "dbdir", "analyze", "--provider", "fake", "-s", "cough"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Educational Disclaimer"))
        .stdout(predicate::str::contains("cough"))
        .stderr(predicate::str::contains("history not saved"))
        .stderr(predicate::str::contains("saved to history as").not());
}

#[test]
fn test_empty_symptoms_are_rejected_before_the_pipeline() {
    let dir = tempdir().unwrap();

    symcheck(dir.path())
        .args(["analyze", "--provider", "fake", "--symptoms", "   "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Please enter symptoms"));

    assert!(!dir.path().join("symptom_checker_history.db").exists());
}

#[test]
fn test_missing_credential_halts_with_config_error() {
    let dir = tempdir().unwrap();

    symcheck(dir.path())
        .args(["analyze", "--symptoms", "headache"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GROQ_API_KEY not found"));
}

#[test]
fn test_unknown_model_is_config_error() {
    let dir = tempdir().unwrap();

    symcheck(dir.path())
        .args(["analyze", "--provider", "fake", "--model", "gpt-4", "-s", "cough"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown model 'gpt-4'"));
}

#[test]
fn test_unreachable_provider_still_prints_and_records() {
    let dir = tempdir().unwrap();

    // the retry warning goes to a pipe here, so it must be plain text
    symcheck(dir.path())
        .env("SYMCHECK_BASE_URL", "http://127.0.0.1:9/openai/v1")
        .env("SYMCHECK_TIMEOUT_SECS", "2")
        .args(["analyze", "--api-key", "gsk_test", "-s", "dizzy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error calling LLM:"))
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains("\x1b[").not());

    symcheck(dir.path())
        .args(["history", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error calling LLM:"));
}

#[test]
fn test_history_is_empty_and_missing_ids_fail() {
    let dir = tempdir().unwrap();

    symcheck(dir.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet"));

    symcheck(dir.path())
        .args(["history", "show", "9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no history entry with id 9"));
}

#[test]
fn test_zero_limit_does_not_report_empty_history() {
    let dir = tempdir().unwrap();

    symcheck(dir.path())
        .args(["analyze", "--provider", "fake", "-s", "cough"])
        .assert()
        .success();

    symcheck(dir.path())
        .args(["history", "list", "--limit", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet").not())
        .stdout(predicate::str::contains("1 stored"));
}

#[test]
fn test_export_writes_csv_with_header() {
    let dir = tempdir().unwrap();

    for s in ["fever, cough", "rash"] {
        symcheck(dir.path())
            .args(["analyze", "--provider", "fake", "-s", s])
            .assert()
            .success();
    }

    symcheck(dir.path())
        .args(["export", "--out", "out.csv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("exported 2 rows"));

    let csv = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("id,timestamp,symptoms,response_text"));

    // newest first; timestamps vary so only check the id column
    let re = regex::Regex::new(r"(?m)^(\d+),\d{4}-\d{2}-\d{2}T").unwrap();
    let ids: Vec<&str> = re.captures_iter(&csv).map(|c| c.get(1).unwrap().as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[test]
fn test_init_db_is_idempotent() {
    let dir = tempdir().unwrap();

    symcheck(dir.path())
        .args(["analyze", "--provider", "fake", "-s", "cough"])
        .assert()
        .success();

    for _ in 0..2 {
        symcheck(dir.path())
            .arg("init-db")
            .assert()
            .success()
            .stderr(predicate::str::contains("(1 records kept)"));
    }
}

#[test]
fn test_config_file_selects_model_and_db() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("symcheck.yaml"),
        "model: llama-3.1-70b-versatile\ndb_path: custom.db\nprovider: fake\n",
    )
    .unwrap();

    symcheck(dir.path())
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("llama-3.1-8b-instant (default)"))
        .stdout(predicate::str::contains("llama-3.1-70b-versatile (selected)"));

    symcheck(dir.path())
        .args(["analyze", "-s", "back pain"])
        .assert()
        .success();
    assert!(dir.path().join("custom.db").exists());
}

#[test]
fn test_missing_explicit_config_file_is_config_error() {
    let dir = tempdir().unwrap();

    symcheck(dir.path())
        .args(["--config", "does-not-exist.yaml", "models"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config error"))
        .stderr(predicate::str::contains("does-not-exist.yaml"));

    // without the flag an absent symcheck.yaml is fine
    symcheck(dir.path()).arg("models").assert().success();
}

#[test]
fn test_safety_notes() {
    let dir = tempdir().unwrap();
    symcheck(dir.path())
        .arg("safety")
        .assert()
        .success()
        .stdout(predicate::str::contains("seek emergency care immediately"));
}
