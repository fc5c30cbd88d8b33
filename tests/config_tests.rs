//! --config and --seed handling through the binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_file_sizes_are_used() {
    let file = config_file(
        r#"
        [primes]
        limit = 100
        passes = 1
        "#,
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--config")
        .arg(file.path())
        .arg("--only")
        .arg("primes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculating primes up to 100..."))
        .stdout(predicate::str::contains("Found 25 primes"));
}

#[test]
fn test_config_seed_is_reported() {
    let file = config_file(
        r#"
        seed = 1234

        [sort]
        size = 50
        "#,
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--config")
        .arg(file.path())
        .arg("--only")
        .arg("sort")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed: 1234"));
}

#[test]
fn test_cli_seed_overrides_config_seed() {
    let file = config_file("seed = 1\n[sort]\nsize = 10\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--config")
        .arg(file.path())
        .arg("--seed")
        .arg("2")
        .arg("--only")
        .arg("sort")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed: 2"));
}

#[test]
fn test_invalid_config_value_fails() {
    let file = config_file("[fibonacci]\nstart = 10\nend = 100\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("fibonacci.end"));
}

#[test]
fn test_oversized_block_fails_before_running() {
    let file = config_file(
        "[memory]\niterations = 1\nmin_block_kb = 18014398509481984\nmax_block_kb = 18014398509481984\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--config")
        .arg(file.path())
        .args(["--only", "memory"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Memory allocation").not())
        .stderr(predicate::str::contains("memory.max_block_kb"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_malformed_config_fails() {
    let file = config_file("[matrix\nsize = ");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_missing_config_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--config")
        .arg("/nonexistent/profload.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/profload.toml"));
}
