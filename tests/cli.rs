use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("words.txt"), "the 100\nten 20\ncat 50\nsat 40\n").unwrap();
    dir
}

fn livespell(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("livespell").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("LIVESPELL_CONFIG")
        .env_remove("RUST_LOG")
        .args(["--no-color", "--dict", "words.txt"]);
    cmd
}

#[test]
fn reports_misspellings_from_stdin() {
    let dir = workspace();
    livespell(&dir)
        .write_stdin("Teh cat sat.")
        .assert()
        .success()
        .stdout(predicate::str::contains("1:1 Teh → The, Ten"))
        .stdout(predicate::str::contains("Words: 3 | Errors Found: 1"));
}

#[test]
fn json_output() {
    let dir = workspace();
    let output = livespell(&dir)
        .args(["--format", "json"])
        .write_stdin("Teh cat sta.")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["words"], 3);
    assert_eq!(report["errors"], 2);
    assert_eq!(report["misspellings"][0]["word"], "Teh");
    assert_eq!(report["misspellings"][0]["start"], 0);
    assert_eq!(report["misspellings"][1]["word"], "sta");
    assert_eq!(report["misspellings"][1]["suggestions"][0], "sat");
}

#[test]
fn reads_file_argument() {
    let dir = workspace();
    fs::write(dir.path().join("note.txt"), "the cat\nsat on teh mat").unwrap();
    livespell(&dir)
        .arg("note.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("2:8 teh"));
}

#[test]
fn built_dictionary_is_used_for_checking() {
    let dir = workspace();
    Command::cargo_bin("livespell")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("LIVESPELL_CONFIG")
        .args(["dict", "build", "words.txt", "--output", "words.dict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dictionary installed"));
    assert!(dir.path().join("words.dict").exists());

    Command::cargo_bin("livespell")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("LIVESPELL_CONFIG")
        .args(["--no-color", "--dict", "words.dict"])
        .write_stdin("Teh cat sat.")
        .assert()
        .success()
        .stdout(predicate::str::contains("1:1 Teh → The, Ten"))
        .stdout(predicate::str::contains("Errors Found: 1"));
}

#[test]
fn missing_dictionary_is_a_notice_not_a_crash() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("livespell")
        .unwrap()
        .current_dir(dir.path())
        .args(["--no-color", "--dict", "missing.dict"])
        .write_stdin("Teh cat")
        .assert()
        .success()
        .stderr(predicate::str::contains("Spell checking is unavailable"))
        .stdout(predicate::str::contains("Errors Found: 0"));
}

#[test]
fn missing_file_fails() {
    let dir = workspace();
    livespell(&dir)
        .arg("nope.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
