//! Integration tests for the PinVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The PIN is supplied through `PINVAULT_PIN` and every test points
//! `--dir` at its own temp directory, so nothing is interactive.

use std::fs;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PIN: &str = "4711";

/// Helper: get a Command pointing at the pinvault binary.
fn pinvault() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("pinvault").expect("binary should exist");
    cmd.env_remove("PINVAULT_DIR").env_remove("PINVAULT_PIN");
    cmd
}

/// Helper: a command against `dir` with the PIN set.
fn in_vault(dir: &TempDir) -> Command {
    let mut cmd = pinvault();
    cmd.arg("--dir").arg(dir.path()).env("PINVAULT_PIN", PIN);
    cmd
}

fn init(dir: &TempDir) {
    in_vault(dir).arg("init").assert().success();
}

#[test]
fn help_flag_shows_usage() {
    pinvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "PIN-protected encrypted store for passwords and notes",
        ))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("password"))
        .stdout(predicate::str::contains("note"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn version_flag_shows_version() {
    pinvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pinvault"));
}

#[test]
fn no_args_shows_help() {
    pinvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_need_no_vault() {
    pinvault()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pinvault"));

    pinvault()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn commands_before_init_report_missing_pin() {
    let tmp = TempDir::new().unwrap();
    in_vault(&tmp)
        .args(["password", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PIN not set"));
}

#[test]
fn init_writes_verifier_and_kdf_profile() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    tmp.child("pin.hash").assert(predicate::path::exists());
    tmp.child("kdf.json")
        .assert(predicate::str::contains("sha256"));
    tmp.child("data.enc").assert(predicate::path::missing());
}

#[test]
fn missing_kdf_profile_is_reported_not_recreated() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    fs::remove_file(tmp.child("kdf.json").path()).unwrap();

    for args in [&["password", "list"][..], &["search", "x"][..], &["export"][..]] {
        in_vault(&tmp)
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("KDF profile"));
    }
    tmp.child("kdf.json").assert(predicate::path::missing());
}

#[test]
fn init_twice_is_refused() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    in_vault(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already set"));
}

#[test]
fn init_rejects_short_pin() {
    let tmp = TempDir::new().unwrap();
    pinvault()
        .arg("--dir")
        .arg(tmp.path())
        .env("PINVAULT_PIN", "12")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 4"));
}

#[test]
fn wrong_pin_is_rejected() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    pinvault()
        .arg("--dir")
        .arg(tmp.path())
        .env("PINVAULT_PIN", "0000")
        .args(["note", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid PIN"));
}

#[test]
fn add_list_search_and_show_records() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    in_vault(&tmp)
        .args([
            "password",
            "add",
            "--name",
            "GitHub",
            "--username",
            "alice",
            "--url",
            "https://github.com",
        ])
        .write_stdin("hunter2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Password 'GitHub' added"));

    in_vault(&tmp)
        .args(["note", "add", "--title", "Shopping List", "--content", "eggs"])
        .assert()
        .success();

    in_vault(&tmp)
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("hunter2").not());

    in_vault(&tmp)
        .args(["search", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping List"))
        .stdout(predicate::str::contains("GitHub").not());

    in_vault(&tmp)
        .args(["search", "Git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("Shopping List").not());

    // The data file on disk holds ciphertext only.
    let raw = fs::read(tmp.child("data.enc").path()).unwrap();
    assert!(!raw.is_empty());
    assert!(!raw.windows(b"GitHub".len()).any(|w| w == b"GitHub"));
    assert!(!raw.windows(b"hunter2".len()).any(|w| w == b"hunter2"));
}

#[test]
fn export_then_import_into_another_vault() {
    let source = TempDir::new().unwrap();
    init(&source);
    in_vault(&source)
        .args(["note", "add", "--title", "Recipe", "--content", "flour"])
        .assert()
        .success();

    let export_file = source.child("backup.json");
    in_vault(&source)
        .args(["export", "--output"])
        .arg(export_file.path())
        .assert()
        .success();
    export_file.assert(predicate::str::contains("\"Recipe\""));

    let target = TempDir::new().unwrap();
    init(&target);
    for _ in 0..2 {
        in_vault(&target)
            .arg("import")
            .arg(export_file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Imported 0 password(s) and 1 note(s)"));
    }

    in_vault(&target)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 note(s)"));
}

#[test]
fn export_to_stdout_is_json() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    in_vault(&tmp)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"passwords\""))
        .stdout(predicate::str::contains("\"notes\""));
}

#[test]
fn export_refuses_enc_target() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    in_vault(&tmp)
        .args(["export", "--output"])
        .arg(tmp.path().join("copy.enc"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing"));
}

#[test]
fn import_garbage_fails() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    let garbage = tmp.child("garbage.json");
    garbage.write_str("{ nope").unwrap();

    in_vault(&tmp)
        .arg("import")
        .arg(garbage.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed"));
}

#[test]
fn delete_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    in_vault(&tmp)
        .args(["note", "delete", "does-not-exist", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
