//! Integration tests for the CLI application
//!
//! These tests run the built binary against temporary data files.

use std::io::Write;
use std::process::{Command, Output};
use svmprep::CsrExport;
use tempfile::{NamedTempFile, TempDir};

/// Three-class training data in LibSVM format
fn multiclass_file() -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::with_suffix(".libsvm")?;
    writeln!(file, "3 1:0.5 3:2.0")?;
    writeln!(file, "1 2:1.0")?;
    writeln!(file, "3 1:1.5")?;
    writeln!(file, "2 2:0.5 4:1.0")?;
    writeln!(file, "1 3:1.0 4:1.0")?;
    file.flush()?;
    Ok(file)
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_svmprep"))
        .args(args)
        .output()
        .expect("Failed to run CLI")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_groups_command() {
    let data = multiclass_file().expect("Failed to create test data");
    let output = run(&["groups", "--data", data.path().to_str().unwrap()]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("0\t3\t2\t0"));
    assert!(stdout.contains("1\t1\t2\t2"));
    assert!(stdout.contains("2\t2\t1\t4"));
}

#[test]
fn test_cli_pairs_command() {
    let data = multiclass_file().expect("Failed to create test data");

    for extra in [&[][..], &["--sequential"][..]] {
        let mut args = vec!["pairs", "--data", data.path().to_str().unwrap()];
        args.extend_from_slice(extra);
        let stdout = stdout_of(&run(&args));

        assert!(stdout.contains("0,1\t3,1\t2\t2"));
        assert!(stdout.contains("1,2\t1,2\t2\t1"));
        assert!(stdout.contains("Sub-problems: 3"));
    }
}

#[test]
fn test_cli_csr_export_and_info() {
    let data = multiclass_file().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let export_path = temp_dir.path().join("csr.json");

    let stdout = stdout_of(&run(&[
        "csr",
        "--data",
        data.path().to_str().unwrap(),
        "--output",
        export_path.to_str().unwrap(),
    ]));
    assert!(stdout.contains("Rows: 5"));
    assert!(stdout.contains("Non-zeros: 8"));
    assert!(stdout.contains("Max features per row: 2"));
    assert!(export_path.exists(), "Export file was not created");

    let export = CsrExport::load_from_file(&export_path).expect("Failed to load export");
    assert_eq!(export.row_ptr, vec![0, 2, 3, 4, 6, 8]);
    assert_eq!(export.col_ind, vec![0, 2, 1, 0, 1, 3, 2, 3]);

    let stdout = stdout_of(&run(&["info", export_path.to_str().unwrap()]));
    assert!(stdout.contains("Rows: 5"));
    assert!(stdout.contains("Non-zeros: 8"));
}

#[test]
fn test_cli_csr_for_pair() {
    let data = multiclass_file().expect("Failed to create test data");
    let stdout = stdout_of(&run(&[
        "csr",
        "--data",
        data.path().to_str().unwrap(),
        "--pair",
        "2,0",
    ]));

    assert!(stdout.contains("Rows: 3"));
    assert!(stdout.contains("Non-zeros: 5"));
}

#[test]
fn test_cli_invalid_pair_fails() {
    let data = multiclass_file().expect("Failed to create test data");
    let output = run(&[
        "csr",
        "--data",
        data.path().to_str().unwrap(),
        "--pair",
        "1,1",
    ]);
    assert!(!output.status.success());

    let output = run(&[
        "csr",
        "--data",
        data.path().to_str().unwrap(),
        "--pair",
        "zero,1",
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_missing_file_fails() {
    let output = run(&["groups", "--data", "/non/existent/file.libsvm"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_malformed_data_fails() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "1.5 1:1.0").expect("Failed to write");
    file.flush().expect("Failed to flush");

    let output = run(&["groups", "--data", file.path().to_str().unwrap()]);
    assert!(!output.status.success());
}
