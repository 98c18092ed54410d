//! Integration tests for the tool optimizer plugin driven through a `PluginSet`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hookwright_config::{DescriptionStrategy, OptimizerSection};
use hookwright_core::{ChatParams, PluginInput, PluginSet, Project};
use hookwright_optimizer::ToolOptimizerPlugin;
use hookwright_test::{MockHost, test_chat_params, test_worktree};

const LOOKUP: &str = r#"{
    "tools": {"bash": "Run a shell command."},
    "parameters": {"bash.command": "Shell command."},
    "systemPromptPrefix": "You are terse.\n"
}"#;

fn section(worktree: &Path, strategy: DescriptionStrategy) -> OptimizerSection {
    OptimizerSection {
        strategy,
        system_prompt_path: Some(worktree.join("system-prompt.md")),
        ..OptimizerSection::default()
    }
}

fn lookup_path(worktree: &Path) -> PathBuf {
    worktree.join(".hookwright/tool-descriptions.json")
}

fn write_lookup(worktree: &Path, body: &str) {
    let path = lookup_path(worktree);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

fn plugin(worktree: &Path, section: &OptimizerSection) -> ToolOptimizerPlugin {
    let input = PluginInput::new(MockHost::new().client(), Project::new(worktree));
    ToolOptimizerPlugin::new(&input, section)
}

async fn run(plugins: &PluginSet) -> ChatParams {
    let mut params = test_chat_params();
    let failures = plugins.dispatch_chat_params(&mut params).await;
    assert!(failures.is_empty());
    params
}

fn registered(plugin: ToolOptimizerPlugin) -> PluginSet {
    let mut plugins = PluginSet::new();
    plugins.register(Arc::new(plugin)).unwrap();
    plugins
}

/// Overrides from the worktree-relative lookup file reach the request.
#[tokio::test]
async fn test_overrides_from_worktree_file() {
    let dir = test_worktree();
    write_lookup(dir.path(), LOOKUP);
    std::fs::write(dir.path().join("system-prompt.md"), "Follow the house rules.").unwrap();

    let plugins = registered(plugin(
        dir.path(),
        &section(dir.path(), DescriptionStrategy::Overrides),
    ));
    let params = run(&plugins).await;

    let tools = params.tools().unwrap();
    assert_eq!(
        tools[0].function.description.as_deref(),
        Some("Run a shell command.")
    );
    assert_eq!(
        tools[0].function.parameter_description("command"),
        Some("Shell command.")
    );
    // No entry for `read`: untouched
    assert_eq!(
        tools[1].function.description.as_deref(),
        Some("Reads a file from the local filesystem.\nSupports line offsets.")
    );
    assert_eq!(
        params.messages()[0].text(),
        Some("You are terse.\nFollow the house rules.")
    );
}

/// A malformed lookup file behaves like an empty one on every call, even
/// after the file is repaired.
#[tokio::test]
async fn test_malformed_lookup_is_passthrough() {
    let dir = test_worktree();
    write_lookup(dir.path(), "{ not json");

    let plugins = registered(plugin(
        dir.path(),
        &section(dir.path(), DescriptionStrategy::Overrides),
    ));

    for call in 0..3 {
        assert_eq!(run(&plugins).await, test_chat_params(), "call {call}");
        if call == 0 {
            write_lookup(dir.path(), LOOKUP);
        }
    }
}

/// Missing lookup and markdown files are passthrough too.
#[tokio::test]
async fn test_missing_files_are_passthrough() {
    let dir = test_worktree();
    let plugins = registered(plugin(
        dir.path(),
        &section(dir.path(), DescriptionStrategy::Overrides),
    ));

    assert_eq!(run(&plugins).await, test_chat_params());
}

/// Both files are read once; later edits are not picked up.
#[tokio::test]
async fn test_lookup_and_prompt_are_loaded_once() {
    let dir = test_worktree();
    write_lookup(dir.path(), LOOKUP);
    std::fs::write(dir.path().join("system-prompt.md"), "v1").unwrap();

    let optimizer = Arc::new(plugin(
        dir.path(),
        &section(dir.path(), DescriptionStrategy::Overrides),
    ));
    let mut plugins = PluginSet::new();
    plugins.register(optimizer.clone()).unwrap();
    let first = run(&plugins).await;

    write_lookup(dir.path(), r#"{"tools": {"bash": "changed"}}"#);
    std::fs::write(dir.path().join("system-prompt.md"), "v2").unwrap();

    for _ in 0..3 {
        assert_eq!(run(&plugins).await, first);
    }
    assert_eq!(first.messages()[0].text(), Some("You are terse.\nv1"));
    assert_eq!(
        optimizer.config().tool_description("bash"),
        Some("Run a shell command.")
    );
    assert_eq!(optimizer.system_prompt(), "You are terse.\nv1");
}

/// The first-line strategy ignores the lookup file entirely.
#[tokio::test]
async fn test_first_line_strategy() {
    let dir = test_worktree();
    write_lookup(dir.path(), LOOKUP);

    let optimizer = plugin(
        dir.path(),
        &section(dir.path(), DescriptionStrategy::FirstLine),
    );
    let plugins = registered(optimizer);
    let params = run(&plugins).await;

    let tools = params.tools().unwrap();
    assert_eq!(
        tools[0].function.description.as_deref(),
        Some("Executes a bash command.")
    );
    assert_eq!(
        tools[0].function.parameter_description("command"),
        Some("The command to execute.")
    );
    assert_eq!(
        params.messages()[0].text(),
        Some("You are the host's default prompt.")
    );
}

/// The lookup file can live outside the worktree.
#[tokio::test]
async fn test_absolute_lookup_path() {
    let dir = test_worktree();
    let elsewhere = test_worktree();
    let lookup = elsewhere.path().join("descriptions.json");
    std::fs::write(&lookup, LOOKUP).unwrap();

    let mut section = section(dir.path(), DescriptionStrategy::Overrides);
    section.config_path = lookup;
    let optimizer = plugin(dir.path(), &section);

    assert_eq!(
        optimizer.config().tool_description("bash"),
        Some("Run a shell command.")
    );
}
