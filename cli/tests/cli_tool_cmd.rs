use std::path::Path;
use std::process::Command;

fn run_aspen(workspace: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_aspen"))
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .env_remove("LOG_FILE")
        .env_remove("ASPEN_WORKSPACE_ROOT")
        .output()
        .expect("failed to run aspen binary")
}

#[test]
fn cli_help_succeeds() {
    let out = Command::new(env!("CARGO_BIN_EXE_aspen"))
        .arg("--help")
        .output()
        .expect("failed to run aspen binary");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Aspen"));
    assert!(stdout.contains("tool"));
}

#[test]
fn cli_tool_list_json_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_aspen(dir.path(), &["--json", "tool", "list"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.trim_start().starts_with('['));
    assert!(stdout.contains("\"edit_file\""));
}

#[test]
fn cli_tool_show_existing_json_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_aspen(dir.path(), &["tool", "show", "write_file", "--output", "json"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"name\""));
    assert!(stdout.contains("write_file"));
}

#[test]
fn cli_tool_show_missing_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_aspen(dir.path(), &["tool", "show", "no_such_tool"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("tool not found"));
}

#[test]
fn cli_tool_call_writes_then_edits() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_aspen(
        dir.path(),
        &[
            "tool",
            "call",
            "write_file",
            "--args",
            r#"{"file_path":"src/app.py","content":"a = 1\nb = 2\nc = 3\n"}"#,
        ],
    );
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "Successfully wrote content to src/app.py\n"
    );

    let out = run_aspen(
        dir.path(),
        &[
            "tool",
            "call",
            "edit_file",
            "--args",
            r##"{"file_path":"src/app.py","code_edit":"# ... existing code ...\n# ... existing code ...\nc = 3\nd = 4"}"##,
        ],
    );
    assert!(out.status.success());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("src/app.py")).unwrap(),
        "c = 3\nd = 4\n"
    );
}

#[test]
fn cli_tool_call_reports_denied_path_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_aspen(
        dir.path(),
        &["tool", "call", "read_file", "--args", r#"{"file_path":"../../etc/passwd"}"#],
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Error: Access denied"), "{}", stdout);
}

#[test]
fn cli_tool_call_invalid_json_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_aspen(dir.path(), &["tool", "call", "read_file", "--args", "{oops"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not valid JSON"), "{}", stderr);
}

#[test]
fn cli_missing_workspace_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_aspen(&dir.path().join("missing"), &["tool", "list"]);
    assert!(!out.status.success());
}
