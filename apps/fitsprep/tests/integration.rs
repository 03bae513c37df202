//! Integration tests for fitsprep CLI

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_fits(path: &Path, width: u64, height: u64, exposure: f64, payload: &[u8]) {
    let cards = [
        format!("{:<8}= {:>20}", "SIMPLE", "T"),
        format!("{:<8}= {:>20}", "BITPIX", 16),
        format!("{:<8}= {:>20}", "NAXIS", 2),
        format!("{:<8}= {:>20}", "NAXIS1", width),
        format!("{:<8}= {:>20}", "NAXIS2", height),
        format!("{:<8}= {:>20.2}", "EXPTIME", exposure),
        "END".to_string(),
    ];
    let mut bytes: Vec<u8> = cards
        .iter()
        .flat_map(|c| format!("{c:<80}").into_bytes())
        .collect();
    bytes.resize(2880, b' ');
    bytes.extend_from_slice(payload);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

/// Run the binary with an empty config file and no FITSPREP_* overrides
fn fitsprep(temp: &TempDir, args: &[&str]) -> Output {
    let config = temp.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    Command::new(env!("CARGO_BIN_EXE_fitsprep"))
        .args(args)
        .arg("--config")
        .arg(&config)
        .arg("--color")
        .arg("never")
        .env_remove("FITSPREP_OUTPUT")
        .env_remove("FITSPREP_COLOR")
        .env_remove("FITSPREP_VALIDATE")
        .env_remove("FITSPREP_STRICT")
        .env_remove("FITSPREP_LAYOUT")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute fitsprep")
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_fitsprep"))
        .arg("--version")
        .output()
        .expect("Failed to execute fitsprep");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fitsprep"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_fitsprep"))
        .arg("--help")
        .output()
        .expect("Failed to execute fitsprep");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Siril"));
    assert!(stdout.contains("--no-validate"));
    assert!(stdout.contains("--flat-layout"));
}

#[test]
fn test_missing_directory_argument_exits_1() {
    let output = Command::new(env!("CARGO_BIN_EXE_fitsprep"))
        .output()
        .expect("Failed to execute fitsprep");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_root_aborts() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nowhere");
    let output = fitsprep(&temp, &[missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reorg.session_root_missing"));
}

#[test]
fn test_flat_copy_without_validation() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("session");
    write_fits(&root.join("lights_raw/a.fits"), 8, 8, 5.0, b"a");
    write_fits(&root.join("lights_raw/failed_b.fits"), 8, 8, 5.0, b"b");
    write_fits(&root.join("CALI_FRAME/dark/cam_01/d1.fits"), 8, 8, 5.0, b"d");
    write_fits(&root.join("CALI_FRAME/flat/cam_99/f1.fits"), 8, 8, 1.0, b"f");

    let output = fitsprep(
        &temp,
        &[root.to_str().unwrap(), "lights_raw", "--no-validate", "--flat-layout"],
    );

    assert_eq!(output.status.code(), Some(0), "{output:?}");
    assert!(root.join("lights/a.fits").exists());
    assert!(!root.join("lights/failed_b.fits").exists());
    assert!(root.join("darks/d1.fits").exists());
    assert_eq!(fs::read_dir(root.join("flats")).unwrap().count(), 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&root.display().to_string()));
}

#[test]
fn test_json_report_for_staged_run() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("m31");
    write_fits(&root.join("l1.fits"), 16, 8, 30.0, b"l");
    write_fits(&root.join("CALI_FRAME/dark/cam_0/d_ok.fits"), 16, 8, 30.0, b"");
    write_fits(&root.join("CALI_FRAME/dark/cam_0/d_bad.fits"), 16, 8, 60.0, b"");

    let output = fitsprep(&temp, &[root.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(2), "{output:?}");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "partially_completed");
    assert_eq!(report["session_name"], "m31");
    assert_eq!(report["validated"], true);
    assert_eq!(report["frames"].as_array().unwrap().len(), 3);

    let dest = root.join("siril-ready/m31");
    assert!(dest.join("lights/l1.fits").exists());
    assert!(dest.join("darks/d_ok.fits").exists());
    assert!(!dest.join("darks/d_bad.fits").exists());
}

#[test]
fn test_no_baseline_aborts_with_code() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("session");
    fs::create_dir_all(root.join("lights")).unwrap();
    fs::write(root.join("lights/junk.fits"), b"not fits").unwrap();

    let output = fitsprep(&temp, &[root.to_str().unwrap(), "lights", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["status"], "aborted");
    assert_eq!(body["error"]["code"], "reorg.no_baseline");
    assert!(!root.join("siril-ready").exists());
}

#[test]
fn test_invalid_session_name() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("session");
    fs::create_dir_all(&root).unwrap();

    let output = fitsprep(&temp, &[root.to_str().unwrap(), "--session-name", "a/b"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--session-name"));
}

#[test]
fn test_missing_lights_warns_and_continues_without_validation() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("session");
    write_fits(&root.join("CALI_FRAME/flat/cam_0/f.fits"), 8, 8, 1.0, b"f");
    let root_arg = root.to_str().unwrap();

    let output = fitsprep(&temp, &[root_arg, "absent", "--no-validate", "--flat-layout"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    assert!(root.join("flats/f.fits").exists());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Warning:"));

    let output = fitsprep(
        &temp,
        &[root_arg, "absent", "--no-validate", "--flat-layout", "--strict"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("reorg.lights_dir_missing"));
}
