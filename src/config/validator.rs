//! Configuration validation rules.
//!
//! Every value the resolvers return or match against must be non-empty:
//! an empty environment name would hand the pipeline nothing to deploy to,
//! and an empty merge pattern would match every commit.

use crate::config::schema::ShipgateConfig;
use crate::error::{Result, ShipgateError};

/// Validate a configuration and return every problem found.
pub fn validate_config(config: &ShipgateConfig) -> Vec<String> {
    let env = &config.environment;
    let merge = &config.merge_detection;

    [
        ("environment.default_env", &env.default_env),
        ("environment.main_branch_env", &env.main_branch_env),
        ("environment.input_env_name", &env.input_env_name),
        ("environment.main_branch", &env.main_branch),
        ("merge_detection.main_branch", &merge.main_branch),
        ("merge_detection.merge_commit_pattern", &merge.merge_commit_pattern),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| format!("{} must not be empty", field))
    .collect()
}

/// Validate a configuration, failing on the first report.
pub fn validate(config: &ShipgateConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ShipgateError::ConfigValidationError {
            message: errors.join("; "),
        })
    }
}
