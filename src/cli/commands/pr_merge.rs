//! PR merge command implementation.
//!
//! The `shipgate pr-merge` command prints `true` when the current run is a
//! pull-request merge landing on the main branch, `false` otherwise.

use std::io::Write;

use crate::cli::args::StepOutputArgs;
use crate::context::{CommitMessageSource, ExecutionContext};
use crate::error::{ContextReadError, Result};
use crate::merge::{MergeCommitDetector, MergeDetectionConfig};

use super::dispatcher::{Command, CommandResult};
use super::display::emit_value;

/// The pr-merge command implementation.
pub struct PrMergeCommand {
    detector: MergeCommitDetector,
    context: std::result::Result<ExecutionContext, ContextReadError>,
    source: Box<dyn CommitMessageSource>,
    step_output: StepOutputArgs,
}

impl PrMergeCommand {
    /// Create a new pr-merge command.
    pub fn new(
        config: MergeDetectionConfig,
        context: std::result::Result<ExecutionContext, ContextReadError>,
        source: Box<dyn CommitMessageSource>,
        step_output: StepOutputArgs,
    ) -> Self {
        Self {
            detector: MergeCommitDetector::new(config),
            context,
            source,
            step_output,
        }
    }
}

impl Command for PrMergeCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let detection = self
            .detector
            .detect_captured(&self.context, self.source.as_ref());
        tracing::debug!(
            "PR merge detection: {} ({})",
            detection.is_pr_merge,
            detection.reason
        );

        let runtime_file = self
            .context
            .as_ref()
            .ok()
            .and_then(ExecutionContext::step_output_file);
        emit_value(
            out,
            &detection.is_pr_merge.to_string(),
            &self.step_output,
            runtime_file,
        );
        Ok(CommandResult::success())
    }
}
