//! CLI tests for `mcqgen init`.
//!
//! Spawns the binary and verifies the scaffolded layout, idempotence, and
//! the zero-overwrite guarantee.

use std::fs;
use std::process::Command;

use mcqgen::exit_codes;
use mcqgen::io::scaffold::default_plan;

fn run_init(root: &std::path::Path) -> std::process::ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_mcqgen"))
        .arg("init")
        .arg("--root")
        .arg(root)
        .status()
        .expect("mcqgen init")
}

#[test]
fn init_creates_workspace_skeleton() {
    let temp = tempfile::tempdir().expect("tempdir");

    let status = run_init(temp.path());

    assert_eq!(status.code(), Some(exit_codes::OK));
    for rel in &default_plan().files {
        let target = temp.path().join(rel);
        assert!(target.is_file(), "missing {}", target.display());
        assert_eq!(fs::metadata(&target).expect("stat").len(), 0);
    }
    assert!(temp.path().join("data").is_dir());
    assert!(temp.path().join("output").is_dir());
}

#[test]
fn init_rerun_preserves_user_content() {
    let temp = tempfile::tempdir().expect("tempdir");
    assert_eq!(run_init(temp.path()).code(), Some(exit_codes::OK));

    let template_path = temp.path().join("Response.json");
    fs::write(&template_path, "{\"1\": {\"mcq\": \"?\"}}").expect("fill template");

    assert_eq!(run_init(temp.path()).code(), Some(exit_codes::OK));

    let contents = fs::read_to_string(&template_path).expect("read");
    assert_eq!(contents, "{\"1\": {\"mcq\": \"?\"}}");
    // Files the user left empty are still there, still empty.
    let config = temp.path().join("config.toml");
    assert_eq!(fs::metadata(&config).expect("stat").len(), 0);
}
