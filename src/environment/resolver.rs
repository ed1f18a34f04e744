//! Environment resolution.
//!
//! Resolves the deployment environment using the priority chain:
//! 1. Manual workflow input (`INPUT_<NAME>`)
//! 2. Main branch ref
//! 3. Fallback to the configured default

use serde::{Deserialize, Serialize};

use crate::context::{ExecutionContext, INPUT_PREFIX};
use crate::error::ContextReadError;

/// Settings for environment resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Environment used when nothing else matches.
    pub default_env: String,
    /// Environment used for pushes to the main branch.
    pub main_branch_env: String,
    /// Name of the workflow input that overrides resolution.
    pub input_env_name: String,
    /// Branch whose ref selects `main_branch_env`.
    pub main_branch: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            default_env: "stg".to_string(),
            main_branch_env: "prod".to_string(),
            input_env_name: "environment".to_string(),
            main_branch: "main".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Variable carrying the manual input, e.g. `INPUT_ENVIRONMENT`.
    ///
    /// Follows the workflow input convention: spaces become underscores
    /// and the name is uppercased.
    pub fn input_var(&self) -> String {
        format!(
            "{}{}",
            INPUT_PREFIX,
            self.input_env_name.replace(' ', "_").to_uppercase()
        )
    }

    /// Full ref of the main branch, e.g. `refs/heads/main`.
    pub fn main_ref(&self) -> String {
        format!("refs/heads/{}", self.main_branch)
    }
}

/// How the environment was determined.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvironmentSource {
    /// Manual workflow input, carrying the variable name.
    ManualInput(String),
    /// Push to the main branch, carrying the matched ref.
    MainBranch(String),
    /// Nothing matched.
    Default,
    /// The context could not be read; the default was used instead.
    Recovered(ContextReadError),
}

impl std::fmt::Display for EnvironmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ManualInput(var) => write!(f, "manual input {}", var),
            Self::MainBranch(git_ref) => write!(f, "main branch {}", git_ref),
            Self::Default => write!(f, "default"),
            Self::Recovered(err) => write!(f, "default after error: {}", err),
        }
    }
}

/// A resolved environment with its name and how it was determined.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEnvironment {
    /// The environment name (e.g., "stg", "prod").
    pub name: String,
    /// How this environment was determined.
    pub source: EnvironmentSource,
}

/// Resolves the deployment environment for a pipeline run.
///
/// # Example
///
/// ```
/// use shipgate::context::ExecutionContext;
/// use shipgate::environment::{EnvironmentResolver, EnvironmentSource};
///
/// let resolver = EnvironmentResolver::default();
/// let ctx = ExecutionContext::new().with_ref("refs/heads/feature-x");
/// let resolved = resolver.resolve(&ctx);
/// assert_eq!(resolved.name, "stg");
/// assert_eq!(resolved.source, EnvironmentSource::Default);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvironmentResolver {
    config: EnvironmentConfig,
}

impl EnvironmentResolver {
    /// Create a resolver with the given settings.
    pub fn new(config: EnvironmentConfig) -> Self {
        Self { config }
    }

    /// The settings this resolver uses.
    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Resolve the environment for `context`.
    pub fn resolve(&self, context: &ExecutionContext) -> ResolvedEnvironment {
        // 1. Manual input
        let input_var = self.config.input_var();
        if let Some(value) = context.var(&input_var).filter(|v| !v.is_empty()) {
            tracing::info!("Using manually specified environment: {}", value);
            return ResolvedEnvironment {
                name: value.to_string(),
                source: EnvironmentSource::ManualInput(input_var),
            };
        }

        // 2. Main branch
        let main_ref = self.config.main_ref();
        if context.ref_name() == Some(main_ref.as_str()) {
            tracing::info!(
                "Detected main branch, using environment: {}",
                self.config.main_branch_env
            );
            return ResolvedEnvironment {
                name: self.config.main_branch_env.clone(),
                source: EnvironmentSource::MainBranch(main_ref),
            };
        }

        // 3. Default
        tracing::info!("Using default environment: {}", self.config.default_env);
        ResolvedEnvironment {
            name: self.config.default_env.clone(),
            source: EnvironmentSource::Default,
        }
    }

    /// Resolve from a context capture that may have failed.
    ///
    /// A failed capture resolves to the default environment with the error
    /// kept as the source.
    pub fn resolve_captured(
        &self,
        captured: &Result<ExecutionContext, ContextReadError>,
    ) -> ResolvedEnvironment {
        match captured {
            Ok(context) => self.resolve(context),
            Err(err) => {
                tracing::warn!("Error determining environment: {}", err);
                tracing::info!(
                    "Falling back to default environment: {}",
                    self.config.default_env
                );
                ResolvedEnvironment {
                    name: self.config.default_env.clone(),
                    source: EnvironmentSource::Recovered(err.clone()),
                }
            }
        }
    }
}
