//! Environment command implementation.
//!
//! The `shipgate environment` command prints the deployment environment
//! for the current run.

use std::io::Write;

use crate::cli::args::StepOutputArgs;
use crate::context::ExecutionContext;
use crate::environment::{EnvironmentConfig, EnvironmentResolver};
use crate::error::{ContextReadError, Result};

use super::dispatcher::{Command, CommandResult};
use super::display::emit_value;

/// The environment command implementation.
pub struct EnvironmentCommand {
    resolver: EnvironmentResolver,
    context: std::result::Result<ExecutionContext, ContextReadError>,
    step_output: StepOutputArgs,
}

impl EnvironmentCommand {
    /// Create a new environment command.
    pub fn new(
        config: EnvironmentConfig,
        context: std::result::Result<ExecutionContext, ContextReadError>,
        step_output: StepOutputArgs,
    ) -> Self {
        Self {
            resolver: EnvironmentResolver::new(config),
            context,
            step_output,
        }
    }
}

impl Command for EnvironmentCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let resolved = self.resolver.resolve_captured(&self.context);
        tracing::debug!("Resolved environment {} ({})", resolved.name, resolved.source);

        let runtime_file = self
            .context
            .as_ref()
            .ok()
            .and_then(ExecutionContext::step_output_file);
        emit_value(out, &resolved.name, &self.step_output, runtime_file);
        Ok(CommandResult::success())
    }
}
