//! End-to-end tests of the `hubbard` binary.

use std::io::Write;
use std::process::{Command, Output};

fn hubbard(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hubbard"))
        .args(args)
        .env_remove("HUBBARD_LOG")
        .env_remove("HUBBARD_QUBITS")
        .env_remove("HUBBARD_ELECTRONS")
        .env_remove("HUBBARD_AMPLITUDES")
        .env_remove("HUBBARD_TROTTER_MODE")
        .env_remove("HUBBARD_REPS")
        .env_remove("HUBBARD_TRANSFORM")
        .output()
        .expect("failed to run hubbard")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// paramsize
// ============================================================================

#[test]
fn test_paramsize() {
    let out = hubbard(&["paramsize", "--qubits", "8", "--electrons", "4"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("14"));
}

#[test]
fn test_paramsize_odd_qubits_fails() {
    let out = hubbard(&["paramsize", "-q", "7", "-e", "2"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
}

// ============================================================================
// evolve
// ============================================================================

#[test]
fn test_evolve_defaults() {
    let out = hubbard(&["evolve"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("4 qubits"));
}

#[test]
fn test_evolve_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "qubits: 6\nelectrons: 2\ntransform: bravyi-kitaev\ntrotter_mode: trotter\nreps: 1"
    )
    .unwrap();
    let path = file.path().to_str().unwrap();

    let out = hubbard(&["evolve", "--config", path]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = stdout(&out);
    assert!(text.contains("bravyi-kitaev"));
    assert!(text.contains("6 qubits"));
}

#[test]
fn test_evolve_flag_overrides_invalid_file_value() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "qubits: 5").unwrap();
    let path = file.path().to_str().unwrap();

    let out = hubbard(&["evolve", "--config", path, "--qubits", "4", "--electrons", "2"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("4 qubits"));

    let out = hubbard(&["evolve", "--config", path]);
    assert!(!out.status.success());
}

#[test]
fn test_evolve_flags_and_print() {
    let out = hubbard(&[
        "evolve",
        "-q",
        "4",
        "-e",
        "2",
        "--amplitudes",
        "0.1,-0.2",
        "--trotter-mode",
        "lie",
        "--print",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Amplitudes: 2"));
}

#[test]
fn test_evolve_bad_mode_fails() {
    let out = hubbard(&["evolve", "--trotter-mode", "magnus"]);
    assert!(!out.status.success());
}

#[test]
fn test_evolve_wrong_amplitude_count_fails() {
    let out = hubbard(&["evolve", "--amplitudes", "0.1,0.2,0.3"]);
    assert!(!out.status.success());
}

// ============================================================================
// diagonal
// ============================================================================

#[test]
fn test_diagonal() {
    let out = hubbard(&["diagonal", "-q", "2", "--angles", "0.0,0.3,-0.2,0.5", "--print"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Diagonal cost"));
}

#[test]
fn test_diagonal_wrong_angle_count_fails() {
    let out = hubbard(&["diagonal", "-q", "2", "--angles", "0.1,0.2"]);
    assert!(!out.status.success());
}

// ============================================================================
// version
// ============================================================================

#[test]
fn test_version() {
    let out = hubbard(&["version"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Hubbard"));
}
