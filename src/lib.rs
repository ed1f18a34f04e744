//! Shipgate - Deployment pipeline context resolution.
//!
//! Shipgate answers the two questions a deployment workflow asks before it
//! deploys: which environment does this run target, and is this push a
//! pull-request merge into the main branch.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`context`] - CI execution context snapshot and commit message lookup
//! - [`environment`] - Deployment environment resolution
//! - [`error`] - Error types and result aliases
//! - [`merge`] - Pull-request merge detection
//! - [`notification`] - Storage-change notification acknowledgment
//! - [`output`] - Workflow step outputs
//!
//! # Example
//!
//! ```
//! use shipgate::context::ExecutionContext;
//! use shipgate::environment::EnvironmentResolver;
//!
//! let ctx = ExecutionContext::new()
//!     .with_ref("refs/heads/main")
//!     .with_var("INPUT_ENVIRONMENT", "qa");
//! let resolved = EnvironmentResolver::default().resolve(&ctx);
//! assert_eq!(resolved.name, "qa");
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod merge;
pub mod notification;
pub mod output;

pub use error::{ContextReadError, Result, ShipgateError};
