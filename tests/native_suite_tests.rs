//! End-to-end runs of the default native suite
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;

#[test]
fn test_tiny_suite_succeeds() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--preset")
        .arg("tiny")
        .arg("--seed")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Native profiling workload suite"))
        .stdout(predicate::str::contains("All workloads completed!"));
}

#[test]
fn test_tiny_suite_prints_every_phase_header() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--preset")
        .arg("tiny")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Matrix multiplication (16x16)..."))
        .stdout(predicate::str::contains("2. Calculating primes up to 1000..."))
        .stdout(predicate::str::contains("3. Calculating Fibonacci numbers (recursive)..."))
        .stdout(predicate::str::contains("4. Bubble sort (200 elements)..."))
        .stdout(predicate::str::contains("5. String manipulation (100 iterations)..."))
        .stdout(predicate::str::contains("6. Memory allocation stress test (20 blocks)..."))
        .stdout(predicate::str::contains("7. Computing Mandelbrot set (32x32)..."))
        .stdout(predicate::str::contains("8. N-body simulation (8 bodies, 10 steps)..."));
}

#[test]
fn test_extra_phases_not_in_default_run() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--preset")
        .arg("tiny")
        .assert()
        .success()
        .stdout(predicate::str::contains("Accumulation loop").not())
        .stdout(predicate::str::contains("Mixed kernels").not());
}

#[test]
fn test_timing_line_per_phase() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    let output = cmd.arg("--preset").arg("tiny").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let timing = regex::Regex::new(r"(?m)^   Time: \d+\.\d{2} seconds$").unwrap();
    assert_eq!(timing.find_iter(&stdout).count(), 8);
}

#[test]
fn test_fibonacci_values() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--preset")
        .arg("tiny")
        .arg("--only")
        .arg("fibonacci")
        .assert()
        .success()
        .stdout(predicate::str::contains("fib(10) = 55"))
        .stdout(predicate::str::contains("fib(12) = 144"));
}

#[test]
fn test_summary_goes_to_stderr() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--preset")
        .arg("tiny")
        .arg("-c")
        .assert()
        .success()
        .stderr(predicate::str::contains("% time"))
        .stderr(predicate::str::contains("mandelbrot"))
        .stderr(predicate::str::contains("total"))
        .stdout(predicate::str::contains("% time").not());
}

#[test]
fn test_list_phases() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("matrix"))
        .stdout(predicate::str::contains("mixed"))
        .stdout(predicate::str::contains("not in default run"))
        .stdout(predicate::str::contains("Classes:"));
}

#[test]
fn test_debug_logs_to_stderr() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profload");
    cmd.arg("--preset")
        .arg("tiny")
        .arg("--only")
        .arg("sort")
        .arg("--debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("phase finished"))
        .stdout(predicate::str::contains("phase finished").not());
}
