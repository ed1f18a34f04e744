//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and hands each one its
//! configuration and execution context.

pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod environment;
pub mod pr_merge;
pub mod storage_event;

pub use dispatcher::{resolve_project_root, Command, CommandDispatcher, CommandResult};
