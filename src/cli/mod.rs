//! Command-line interface for Shipgate.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, EnvironmentArgs, PrMergeArgs, StepOutputArgs,
    StorageEventArgs,
};
pub use commands::{resolve_project_root, Command, CommandDispatcher, CommandResult};
