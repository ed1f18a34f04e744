//! Deployment environment resolution.
//!
//! Determines which environment (stg, prod, etc.) a pipeline run deploys
//! to. The priority chain is:
//!
//! 1. Manual workflow input (`INPUT_ENVIRONMENT` by default)
//! 2. Push to the main branch
//! 3. Fallback to the default environment

pub mod resolver;

pub use resolver::{
    EnvironmentConfig, EnvironmentResolver, EnvironmentSource, ResolvedEnvironment,
};
