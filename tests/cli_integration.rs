//! Integration tests for the PassMan CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master password comes from `PASSMAN_PASSWORD` so nothing prompts,
//! and every test points `--data-dir` and `--config` into a temp dir.
//! Clipboard paths are not covered; `get --print` is used instead.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "correct horse battery";

/// Helper: get a Command pointing at the passman binary.
fn passman() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("passman").expect("binary should exist")
}

/// Helper: a temp dir with a config that keeps Argon2 cheap.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child("config.toml")
        .write_str(
            "argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n",
        )
        .unwrap();
    tmp
}

/// Helper: a passman command bound to the workspace's vault and config.
fn in_vault(tmp: &TempDir, password: &str) -> Command {
    let mut cmd = passman();
    cmd.arg("--data-dir")
        .arg(tmp.path().join("PassManData"))
        .arg("--config")
        .arg(tmp.path().join("config.toml"))
        .env("PASSMAN_PASSWORD", password);
    cmd
}

/// Helper: an initialized vault.
fn initialized() -> TempDir {
    let tmp = workspace();
    in_vault(&tmp, MASTER).arg("init").assert().success();
    tmp
}

// ---------------------------------------------------------------------------
// Help and argument parsing
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    passman()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local password manager"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn version_flag_shows_version() {
    passman()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passman"));
}

#[test]
fn no_args_shows_help() {
    passman()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_bash_mentions_subcommands() {
    passman()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passman"))
        .stdout(predicate::str::contains("generate"));
}

// ---------------------------------------------------------------------------
// Generate (no vault needed)
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_password_of_requested_length() {
    let tmp = workspace();
    let out = in_vault(&tmp, "")
        .args(["generate", "--length", "10"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let line = String::from_utf8(out).unwrap();
    assert_eq!(line.trim_end_matches('\n').chars().count(), 10);
}

#[test]
fn generate_digits_only() {
    let tmp = workspace();
    in_vault(&tmp, "")
        .args(["generate", "--no-letters", "--no-symbols", "-l", "16"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9]{16}\n$").unwrap());
}

#[test]
fn generate_without_character_classes_fails() {
    let tmp = workspace();
    in_vault(&tmp, "")
        .args(["generate", "--no-letters", "--no-digits", "--no-symbols"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("character class"));
}

#[test]
fn generate_rejects_zero_length() {
    let tmp = workspace();
    in_vault(&tmp, "")
        .args(["generate", "--length", "0"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_vault_and_record() {
    let tmp = initialized();

    tmp.child("PassManData").assert(predicate::path::is_dir());
    tmp.child("PassManData/savedpassword")
        .assert(predicate::path::is_file());
}

#[test]
fn init_twice_fails() {
    let tmp = initialized();

    in_vault(&tmp, MASTER)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn init_rejects_short_master_password() {
    let tmp = workspace();

    in_vault(&tmp, "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
    tmp.child("PassManData/savedpassword")
        .assert(predicate::path::missing());
}

#[test]
fn init_refuses_oversized_argon2_memory() {
    let tmp = TempDir::new().unwrap();
    tmp.child("config.toml")
        .write_str("argon2_memory_kib = 4294967295\n")
        .unwrap();

    in_vault(&tmp, MASTER)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key derivation failed"));
    tmp.child("PassManData/savedpassword")
        .assert(predicate::path::missing());
}

#[test]
fn commands_on_uninitialized_vault_fail() {
    let tmp = workspace();

    in_vault(&tmp, MASTER)
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("passman init"))
        .stderr(predicate::str::contains("No master password record"));
}

// ---------------------------------------------------------------------------
// Add / get / list / delete
// ---------------------------------------------------------------------------

#[test]
fn add_piped_secret_then_get_it_back() {
    let tmp = initialized();

    in_vault(&tmp, MASTER)
        .args(["add", "My Bank"])
        .write_stdin("s3cret value\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("My Bank"));

    in_vault(&tmp, MASTER)
        .args(["get", "My Bank", "--print"])
        .assert()
        .success()
        .stdout("s3cret value\n");
}

#[test]
fn add_reports_the_sanitized_name() {
    let tmp = initialized();

    in_vault(&tmp, MASTER)
        .args(["add", "My Site! #1"])
        .write_stdin("pw")
        .assert()
        .success()
        .stdout(predicate::str::contains("My Site 1"));

    tmp.child("PassManData/My Site 1")
        .assert(predicate::path::is_file());
}

#[test]
fn get_and_delete_sanitize_the_name_like_add() {
    let tmp = initialized();

    in_vault(&tmp, MASTER)
        .args(["add", "My Site! #1"])
        .write_stdin("pw")
        .assert()
        .success();

    in_vault(&tmp, MASTER)
        .args(["get", "My Site! #1", "--print"])
        .assert()
        .success()
        .stdout("pw\n");

    in_vault(&tmp, MASTER)
        .args(["delete", "My Site! #1", "--force"])
        .assert()
        .success();

    tmp.child("PassManData/My Site 1")
        .assert(predicate::path::missing());
}

#[test]
fn add_duplicate_fails_and_keeps_first_secret() {
    let tmp = initialized();

    in_vault(&tmp, MASTER)
        .args(["add", "site"])
        .write_stdin("secretA")
        .assert()
        .success();

    in_vault(&tmp, MASTER)
        .args(["add", "site"])
        .write_stdin("secretB")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    in_vault(&tmp, MASTER)
        .args(["get", "site", "--print"])
        .assert()
        .success()
        .stdout("secretA\n");
}

#[test]
fn add_empty_piped_secret_fails() {
    let tmp = initialized();

    in_vault(&tmp, MASTER)
        .args(["add", "blank"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn add_generated_secret() {
    let tmp = initialized();

    in_vault(&tmp, MASTER)
        .args(["add", "gen", "--generate", "--length", "20", "--no-symbols"])
        .write_stdin("")
        .assert()
        .success();

    in_vault(&tmp, MASTER)
        .args(["get", "gen", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9]{20}\n$").unwrap());
}

#[test]
fn wrong_master_password_is_rejected() {
    let tmp = initialized();

    in_vault(&tmp, "not the password")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect master password"));
}

#[test]
fn get_missing_entry_fails() {
    let tmp = initialized();

    in_vault(&tmp, MASTER)
        .args(["get", "ghost", "--print"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn list_shows_entries() {
    let tmp = initialized();
    for name in ["mail", "bank"] {
        in_vault(&tmp, MASTER)
            .args(["add", name])
            .write_stdin("pw")
            .assert()
            .success();
    }

    in_vault(&tmp, MASTER)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries"))
        .stdout(predicate::str::contains("bank"))
        .stdout(predicate::str::contains("mail"))
        .stdout(predicate::str::contains("savedpassword").not());
}

#[test]
fn delete_with_force_removes_entry() {
    let tmp = initialized();
    in_vault(&tmp, MASTER)
        .args(["add", "old"])
        .write_stdin("pw")
        .assert()
        .success();

    in_vault(&tmp, MASTER)
        .args(["delete", "old", "--force"])
        .assert()
        .success();

    tmp.child("PassManData/old")
        .assert(predicate::path::missing());
    in_vault(&tmp, MASTER)
        .args(["get", "old", "--print"])
        .assert()
        .failure();
}

#[test]
fn delete_missing_entry_fails() {
    let tmp = initialized();

    in_vault(&tmp, MASTER)
        .args(["delete", "ghost", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn data_dir_can_come_from_config() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("from-config");
    tmp.child("config.toml")
        .write_str(&format!(
            "data_dir = {:?}\nargon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n",
            data.display().to_string()
        ))
        .unwrap();

    passman()
        .arg("--config")
        .arg(tmp.path().join("config.toml"))
        .env("PASSMAN_PASSWORD", MASTER)
        .arg("init")
        .assert()
        .success();

    assert!(data.join("savedpassword").is_file());
}

#[test]
fn malformed_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    tmp.child("config.toml").write_str("password_length = [").unwrap();

    passman()
        .arg("--config")
        .arg(tmp.path().join("config.toml"))
        .args(["generate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file error"));
}
