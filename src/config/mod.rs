//! Configuration loading, parsing, and validation for Shipgate.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use shipgate::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("shipgate.yml"),
//!     "environment:\n  default_env: dev\n",
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.environment.default_env, "dev");
//! assert_eq!(config.environment.main_branch_env, "prod");
//! ```
//!
//! # Configuration File Locations
//!
//! The first file found wins:
//! 1. `--config <path>` (must exist)
//! 2. `shipgate.yml`
//! 3. `.github/shipgate.yml`
//!
//! Without a file, built-in defaults apply.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{discover_config, load_config, load_config_file, parse_config, CONFIG_CANDIDATES};
pub use schema::ShipgateConfig;
pub use validator::{validate, validate_config};
