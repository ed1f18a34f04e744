//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, ShipgateConfig};
use crate::context::{ExecutionContext, GitCommitMessageSource};
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the command's result (stdout in the binary)
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Pick the project root: `--project` if given, else the working directory.
///
/// An unreadable working directory falls back to `.` with a warning.
pub fn resolve_project_root(project: Option<PathBuf>, cwd: io::Result<PathBuf>) -> PathBuf {
    if let Some(project) = project {
        return project;
    }
    cwd.unwrap_or_else(|e| {
        tracing::warn!("Cannot determine current directory, using '.': {}", e);
        PathBuf::from(".")
    })
}

fn runtime_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config_override: Option<PathBuf>) -> Self {
        Self {
            project_root,
            config_override,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load configuration, falling back to defaults on any problem.
    ///
    /// The resolver commands must always print a value, so a broken config
    /// file is reported as a warning rather than an error.
    pub fn config_or_default(&self) -> ShipgateConfig {
        match load_config(&self.project_root, self.config_override.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring configuration: {}", e);
                ShipgateConfig::default()
            }
        }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Commands::Environment(args) => {
                let config = args.apply_to(self.config_or_default().environment, runtime_var);
                let cmd = super::environment::EnvironmentCommand::new(
                    config,
                    ExecutionContext::from_runtime(),
                    args.step_output.clone(),
                );
                cmd.execute(out)
            }
            Commands::PrMerge(args) => {
                let config = args.apply_to(self.config_or_default().merge_detection, runtime_var);
                let cmd = super::pr_merge::PrMergeCommand::new(
                    config,
                    ExecutionContext::from_runtime(),
                    Box::new(GitCommitMessageSource::in_dir(&self.project_root)),
                    args.step_output.clone(),
                );
                cmd.execute(out)
            }
            Commands::StorageEvent(args) => {
                let cmd = super::storage_event::StorageEventCommand::new(args.clone());
                cmd.execute(out)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(out)
            }
        }
    }
}
