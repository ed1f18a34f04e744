//! Configuration file schema.
//!
//! ```yaml
//! environment:
//!   default_env: stg
//!   main_branch_env: prod
//!   input_env_name: environment
//!   main_branch: main
//! merge_detection:
//!   main_branch: main
//!   merge_commit_pattern: "Merge pull request"
//! ```
//!
//! Every field is optional and falls back to the value shown above.

use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentConfig;
use crate::merge::MergeDetectionConfig;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShipgateConfig {
    /// Environment resolution settings.
    pub environment: EnvironmentConfig,
    /// Merge detection settings.
    pub merge_detection: MergeDetectionConfig,
}
