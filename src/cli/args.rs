//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::environment::EnvironmentConfig;
use crate::merge::MergeDetectionConfig;

/// Shipgate - Deployment pipeline context resolution.
#[derive(Debug, Parser)]
#[command(name = "shipgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides shipgate.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the deployment environment for this run
    Environment(EnvironmentArgs),

    /// Print whether this run is a pull-request merge to the main branch
    PrMerge(PrMergeArgs),

    /// Acknowledge a storage-change notification event
    StorageEvent(StorageEventArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where to record the result as a workflow step output.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StepOutputArgs {
    /// Also record the result as this step output
    #[arg(long, value_name = "NAME")]
    pub output: Option<String>,

    /// Step output file [default: $GITHUB_OUTPUT]
    #[arg(long, value_name = "PATH")]
    pub github_output: Option<PathBuf>,
}

/// Environment fallback for `--default-env`.
pub const DEFAULT_ENV_VAR: &str = "SHIPGATE_DEFAULT_ENV";
/// Environment fallback for `--main-branch-env`.
pub const MAIN_BRANCH_ENV_VAR: &str = "SHIPGATE_MAIN_BRANCH_ENV";
/// Environment fallback for `--input-name`.
pub const INPUT_NAME_VAR: &str = "SHIPGATE_INPUT_NAME";
/// Environment fallback for `--main-branch`.
pub const MAIN_BRANCH_VAR: &str = "SHIPGATE_MAIN_BRANCH";
/// Environment fallback for `--pattern`.
pub const MERGE_PATTERN_VAR: &str = "SHIPGATE_MERGE_PATTERN";

/// An explicit flag value, else a non-empty value of `var`.
///
/// Fallback variables are often exported empty by CI templates, so an
/// empty value counts as unset rather than as a usage error.
fn flag_or_env<F>(flag: &Option<String>, var: &str, env: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    flag.clone()
        .or_else(|| env(var).filter(|value| !value.trim().is_empty()))
}

/// Arguments for the `environment` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvironmentArgs {
    /// Environment used when nothing else matches [env: SHIPGATE_DEFAULT_ENV]
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub default_env: Option<String>,

    /// Environment used for pushes to the main branch [env: SHIPGATE_MAIN_BRANCH_ENV]
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub main_branch_env: Option<String>,

    /// Workflow input that overrides resolution [env: SHIPGATE_INPUT_NAME]
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub input_name: Option<String>,

    /// Main branch name [env: SHIPGATE_MAIN_BRANCH]
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub main_branch: Option<String>,

    #[command(flatten)]
    pub step_output: StepOutputArgs,
}

impl EnvironmentArgs {
    /// Apply flag overrides, then `SHIPGATE_*` fallbacks from `env`, on
    /// top of file configuration.
    pub fn apply_to<F>(&self, mut config: EnvironmentConfig, env: F) -> EnvironmentConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = flag_or_env(&self.default_env, DEFAULT_ENV_VAR, &env) {
            config.default_env = v;
        }
        if let Some(v) = flag_or_env(&self.main_branch_env, MAIN_BRANCH_ENV_VAR, &env) {
            config.main_branch_env = v;
        }
        if let Some(v) = flag_or_env(&self.input_name, INPUT_NAME_VAR, &env) {
            config.input_env_name = v;
        }
        if let Some(v) = flag_or_env(&self.main_branch, MAIN_BRANCH_VAR, &env) {
            config.main_branch = v;
        }
        config
    }
}

/// Arguments for the `pr-merge` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PrMergeArgs {
    /// Main branch name [env: SHIPGATE_MAIN_BRANCH]
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub main_branch: Option<String>,

    /// Commit message prefix of a pull-request merge [env: SHIPGATE_MERGE_PATTERN]
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub pattern: Option<String>,

    #[command(flatten)]
    pub step_output: StepOutputArgs,
}

impl PrMergeArgs {
    /// Apply flag overrides, then `SHIPGATE_*` fallbacks from `env`, on
    /// top of file configuration.
    pub fn apply_to<F>(&self, mut config: MergeDetectionConfig, env: F) -> MergeDetectionConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = flag_or_env(&self.main_branch, MAIN_BRANCH_VAR, &env) {
            config.main_branch = v;
        }
        if let Some(v) = flag_or_env(&self.pattern, MERGE_PATTERN_VAR, &env) {
            config.merge_commit_pattern = v;
        }
        config
    }
}

/// Arguments for the `storage-event` command.
#[derive(Debug, Clone, clap::Args)]
pub struct StorageEventArgs {
    /// Event JSON file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
