//! End-to-end tests for the `hookwright` binary.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

use hookwright_test::test_chat_params;

/// Run the binary with an isolated user config dir and no `HOOKWRIGHT_*`
/// overrides from the caller's environment.
fn hookwright(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hookwright"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("HOOKWRIGHT_VERIFY_COMMAND")
        .env_remove("HOOKWRIGHT_OPTIMIZER_CONFIG")
        .env_remove("HOOKWRIGHT_SYSTEM_PROMPT")
        .env_remove("HOOKWRIGHT_LOG")
        .output()
        .unwrap()
}

fn worktree_with_config(toml: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".hookwright")).unwrap();
    std::fs::write(dir.path().join(".hookwright/config.toml"), toml).unwrap();
    dir
}

fn json_lines(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_verify_failure_exits_nonzero_and_sends_prompt() {
    let home = TempDir::new().unwrap();
    let worktree = worktree_with_config(
        r#"
        [verify]
        command = "sh"
        args = ["-c", "echo 'cargo test: 1 failed' >&2; exit 1"]
        "#,
    );
    let wt = worktree.path().to_str().unwrap();

    let output = hookwright(
        home.path(),
        &["verify", "--worktree", wt, "--session", "ses_cli"],
    );

    assert_eq!(output.status.code(), Some(1));
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["call"], "toast");
    assert_eq!(lines[1]["variant"], "error");
    assert_eq!(lines[2]["call"], "send_prompt");
    assert_eq!(lines[2]["session_id"], "ses_cli");
    let text = lines[2]["parts"][0]["text"].as_str().unwrap();
    assert!(text.contains("cargo test: 1 failed"));
}

#[test]
fn test_verify_success_quiet_mode() {
    let home = TempDir::new().unwrap();
    let worktree = worktree_with_config(
        r#"
        [verify]
        command = "true"
        notify = false
        "#,
    );

    let output = hookwright(
        home.path(),
        &["verify", "--worktree", worktree.path().to_str().unwrap()],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_optimize_first_line_from_file() {
    let home = TempDir::new().unwrap();
    let worktree = worktree_with_config(
        r#"
        [optimizer]
        strategy = "first_line"
        "#,
    );
    let input = worktree.path().join("params.json");
    std::fs::write(&input, serde_json::to_string(&test_chat_params()).unwrap()).unwrap();

    let output = hookwright(
        home.path(),
        &[
            "optimize",
            "--input",
            input.to_str().unwrap(),
            "--worktree",
            worktree.path().to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    let params: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        params["options"]["tools"][0]["function"]["description"],
        "Executes a bash command."
    );
}

#[test]
fn test_optimize_rejects_invalid_json() {
    let home = TempDir::new().unwrap();
    let worktree = TempDir::new().unwrap();
    let input = worktree.path().join("params.json");
    std::fs::write(&input, "not json").unwrap();

    let output = hookwright(
        home.path(),
        &[
            "optimize",
            "--input",
            input.to_str().unwrap(),
            "--worktree",
            worktree.path().to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("chat params"));
}

#[test]
fn test_config_show_reflects_workspace_layer() {
    let home = TempDir::new().unwrap();
    let worktree = worktree_with_config(
        r#"
        [verify]
        command = "make check"
        timeout_secs = 90
        "#,
    );

    let output = hookwright(
        home.path(),
        &["config", "show", "--worktree", worktree.path().to_str().unwrap()],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# loaded:"));
    assert!(stdout.contains("command = \"make check\""));
    assert!(stdout.contains("timeout_secs = 90"));
}
