//! Hookwright CLI - drive the Hookwright plugins without a host runtime.
//!
//! Host calls the plugins make (toasts, prompts) are printed to stdout as
//! JSON lines; logs go to stderr.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod console_host;

/// Hookwright - verification and request-shaping plugins for agent runtimes
#[derive(Parser)]
#[command(name = "hookwright")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the verification command as if the session had gone idle
    Verify {
        /// Project worktree (defaults to current directory)
        #[arg(short, long)]
        worktree: Option<PathBuf>,

        /// Session ID passed to the command and used for prompts
        #[arg(short, long, default_value = "cli")]
        session: String,
    },

    /// Optimize a chat params JSON document
    Optimize {
        /// Read the document from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Project worktree (defaults to current directory)
        #[arg(short, long)]
        worktree: Option<PathBuf>,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// The `--worktree` the command was given, if any.
    fn worktree(&self) -> Option<&Path> {
        match self {
            Self::Verify { worktree, .. }
            | Self::Optimize { worktree, .. }
            | Self::Config {
                command: ConfigCommands::Show { worktree },
            } => worktree.as_deref(),
        }
    }
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the merged configuration
    Show {
        /// Project worktree (defaults to current directory)
        #[arg(short, long)]
        worktree: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_config = log_config(cli.command.worktree(), cli.verbose);
    let log_config = if std::io::stderr().is_terminal() {
        log_config
    } else {
        log_config.without_ansi()
    };
    if let Err(e) = hookwright_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Verify { worktree, session } => {
            commands::verify::run(worktree.as_deref(), &session).await
        },
        Commands::Optimize { input, worktree } => {
            commands::optimize::run(input.as_deref(), worktree.as_deref())?;
            Ok(ExitCode::SUCCESS)
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show { worktree } => {
                commands::config::show(worktree.as_deref())?;
                Ok(ExitCode::SUCCESS)
            },
        },
    }
}

/// Logging settings from the config layers of the worktree the command runs
/// against. A broken config falls back to defaults here; the command itself
/// reports it.
fn log_config(worktree: Option<&Path>, verbose: bool) -> hookwright_telemetry::LogConfig {
    let loaded = commands::resolve_worktree(worktree)
        .ok()
        .and_then(|dir| hookwright_config::Config::load(Some(&dir)).ok());
    let mut log_config = match loaded {
        Some(resolved) => hookwright_telemetry::LogConfig::from(&resolved.config.logging),
        None => hookwright_telemetry::LogConfig::new("info"),
    };
    if verbose {
        "debug".clone_into(&mut log_config.level);
    }
    log_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verify_defaults() {
        let cli = Cli::try_parse_from(["hookwright", "verify"]).unwrap();
        let Commands::Verify { worktree, session } = cli.command else {
            panic!("expected verify");
        };
        assert!(worktree.is_none());
        assert_eq!(session, "cli");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hookwright",
            "optimize",
            "--input",
            "params.json",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Optimize { input, .. } = cli.command else {
            panic!("expected optimize");
        };
        assert_eq!(input, Some(PathBuf::from("params.json")));
    }

    #[test]
    fn test_config_show_worktree() {
        let cli =
            Cli::try_parse_from(["hookwright", "config", "show", "--worktree", "/tmp/x"]).unwrap();
        let Commands::Config {
            command: ConfigCommands::Show { worktree },
        } = cli.command
        else {
            panic!("expected config show");
        };
        assert_eq!(worktree, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_log_config_follows_worktree() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".hookwright")).unwrap();
        std::fs::write(
            dir.path().join(".hookwright/config.toml"),
            "[logging]\nlevel = \"warn\"\nformat = \"json\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "hookwright",
            "verify",
            "--worktree",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        let config = log_config(cli.command.worktree(), false);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, hookwright_telemetry::LogFormat::Json);

        let config = log_config(cli.command.worktree(), true);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_log_config_missing_worktree_uses_defaults() {
        let config = log_config(Some(Path::new("/nonexistent/hookwright-worktree")), false);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["hookwright"]).is_err());
    }
}
