//! CLI integration tests for the `vocalis` binary.
//!
//! These tests run the actual compiled binary via `std::process::Command`
//! to verify end-to-end CLI behavior. Artifacts are written to a temporary
//! directory and passed with `--model` / `--scaler`.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::json;

/// Build a `Command` pointing at the compiled `vocalis` binary.
fn vocalis_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vocalis"));
    // Suppress tracing output so test assertions only match program output.
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Write a linear classifier keyed on the first feature plus an identity
/// scaler. Returns `(model, scaler)` paths.
fn write_artifacts(dir: &Path) -> (PathBuf, PathBuf) {
    let model = dir.join("model.json");
    let scaler = dir.join("scaler.json");
    let mut coef = vec![0.0; 22];
    coef[0] = 1.0;
    std::fs::write(
        &model,
        json!({ "kind": "linear", "coef": coef, "intercept": 0.0 }).to_string(),
    )
    .unwrap();
    std::fs::write(
        &scaler,
        json!({ "mean": vec![0.0; 22], "scale": vec![1.0; 22] }).to_string(),
    )
    .unwrap();
    (model, scaler)
}

// ── 1. Version and help ─────────────────────────────────────────────────

#[test]
fn version_output() {
    let output = vocalis_bin()
        .arg("--version")
        .output()
        .expect("failed to run vocalis");

    assert!(output.status.success(), "exit code should be 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("vocalis") && stdout.contains(env!("CARGO_PKG_VERSION")),
        "version output should contain name and version, got: {stdout}"
    );
}

#[test]
fn help_output() {
    let output = vocalis_bin()
        .arg("--help")
        .output()
        .expect("failed to run vocalis");

    assert!(output.status.success(), "exit code should be 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("vocalis acoustic classifier service"),
        "help output should contain the CLI description, got: {stdout}"
    );
    for sub in ["serve", "check", "predict", "features"] {
        assert!(stdout.contains(sub), "help should list `{sub}`, got: {stdout}");
    }
}

#[test]
fn unknown_subcommand_fails() {
    let output = vocalis_bin()
        .arg("this-subcommand-does-not-exist")
        .output()
        .expect("failed to run vocalis");

    assert!(
        !output.status.success(),
        "unknown subcommand should return non-zero exit code"
    );
}

// ── 2. features ─────────────────────────────────────────────────────────

#[test]
fn features_lists_names() {
    let output = vocalis_bin()
        .arg("features")
        .output()
        .expect("failed to run vocalis");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MDVP:Fo(Hz)"), "got: {stdout}");
    assert!(stdout.contains("spread1"), "got: {stdout}");
}

// ── 3. check ────────────────────────────────────────────────────────────

#[test]
fn check_missing_artifacts_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = vocalis_bin()
        .args(["check", "--model"])
        .arg(dir.path().join("absent_model.json"))
        .arg("--scaler")
        .arg(dir.path().join("absent_scaler.json"))
        .output()
        .expect("failed to run vocalis");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not usable"), "got: {stderr}");
}

#[test]
fn check_valid_artifacts_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let (model, scaler) = write_artifacts(dir.path());
    let output = vocalis_bin()
        .args(["check", "--model"])
        .arg(&model)
        .arg("--scaler")
        .arg(&scaler)
        .output()
        .expect("failed to run vocalis");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("linear"), "got: {stdout}");
}

// ── 4. predict ──────────────────────────────────────────────────────────

#[test]
fn predict_healthy_from_flag() {
    let dir = tempfile::tempdir().unwrap();
    let (model, scaler) = write_artifacts(dir.path());
    let features = serde_json::to_string(&vec![0.0; 22]).unwrap();
    let output = vocalis_bin()
        .args(["predict", "--features", &features, "--model"])
        .arg(&model)
        .arg("--scaler")
        .arg(&scaler)
        .output()
        .expect("failed to run vocalis");

    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        body,
        json!({
            "prediction": 0,
            "message": "The model predicts a Healthy result based on the acoustic features."
        })
    );
}

#[test]
fn predict_wrong_length_fails_with_fixed_message() {
    let dir = tempfile::tempdir().unwrap();
    let (model, scaler) = write_artifacts(dir.path());
    let output = vocalis_bin()
        .args(["predict", "--features", "[1, 2, 3]", "--model"])
        .arg(&model)
        .arg("--scaler")
        .arg(&scaler)
        .output()
        .expect("failed to run vocalis");

    assert!(!output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        body["error"],
        "Input array must contain exactly 22 numerical features under the \"features\" key."
    );
}

#[test]
fn predict_without_model_reports_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let request = dir.path().join("request.json");
    std::fs::write(&request, json!({ "features": vec![0.0; 22] }).to_string()).unwrap();
    let output = vocalis_bin()
        .args(["predict", "--input"])
        .arg(&request)
        .arg("--model")
        .arg(dir.path().join("absent_model.json"))
        .arg("--scaler")
        .arg(dir.path().join("absent_scaler.json"))
        .output()
        .expect("failed to run vocalis");

    assert!(!output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        body["error"],
        "Model not loaded on server. Check server console for file errors."
    );
}

#[test]
fn predict_requires_features_or_input() {
    let output = vocalis_bin()
        .arg("predict")
        .output()
        .expect("failed to run vocalis");
    assert!(!output.status.success());
}

// ── 5. serve ────────────────────────────────────────────────────────────

#[test]
fn serve_fail_fast_exits_on_missing_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let output = vocalis_bin()
        .args(["serve", "--fail-fast", "--port", "0", "--model"])
        .arg(dir.path().join("absent_model.json"))
        .arg("--scaler")
        .arg(dir.path().join("absent_scaler.json"))
        .output()
        .expect("failed to run vocalis");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load"), "got: {stderr}");
}

#[test]
fn serve_missing_config_file_fails() {
    let output = vocalis_bin()
        .args(["serve", "--config", "/tmp/.vocalis-test-nonexistent-config.json"])
        .output()
        .expect("failed to run vocalis");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file not found"), "got: {stderr}");
}
