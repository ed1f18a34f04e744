//! Shared output helpers for the resolver commands.
//!
//! `environment` and `pr-merge` print exactly one value on stdout and may
//! also record it as a workflow step output.

use std::io::Write;
use std::path::Path;

use crate::cli::args::StepOutputArgs;
use crate::output::append_step_output;

/// Print `value` on its own line, then record it as a step output if asked.
///
/// `runtime_file` is the step output file the CI runtime provided; an
/// explicit `--github-output` wins over it. Write problems on either side
/// are logged and never fail the command.
pub fn emit_value(
    out: &mut dyn Write,
    value: &str,
    step_output: &StepOutputArgs,
    runtime_file: Option<&Path>,
) {
    if let Err(e) = writeln!(out, "{}", value).and_then(|_| out.flush()) {
        tracing::warn!("Failed to print '{}': {}", value, e);
    }

    let Some(name) = &step_output.output else {
        return;
    };
    match step_output.github_output.as_deref().or(runtime_file) {
        Some(path) => {
            if let Err(e) = append_step_output(path, name, value) {
                tracing::warn!("Failed to record step output '{}': {}", name, e);
            }
        }
        None => tracing::warn!("GITHUB_OUTPUT is not set; skipping step output '{}'", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    /// Writer whose reader has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn named(name: &str) -> StepOutputArgs {
        StepOutputArgs {
            output: Some(name.to_string()),
            github_output: None,
        }
    }

    #[test]
    fn prints_value_with_newline() {
        let mut buf = Vec::new();
        emit_value(&mut buf, "stg", &StepOutputArgs::default(), None);
        assert_eq!(String::from_utf8(buf).unwrap(), "stg\n");
    }

    #[test]
    fn records_step_output_in_runtime_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("github_output");

        let mut buf = Vec::new();
        emit_value(&mut buf, "prod", &named("environment"), Some(path.as_path()));
        assert_eq!(String::from_utf8(buf).unwrap(), "prod\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "environment=prod\n");
    }

    #[test]
    fn explicit_file_wins_over_runtime_file() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("explicit");
        let runtime = temp.path().join("runtime");
        let step_output = StepOutputArgs {
            output: Some("environment".to_string()),
            github_output: Some(explicit.clone()),
        };

        emit_value(&mut Vec::new(), "qa", &step_output, Some(runtime.as_path()));
        assert_eq!(fs::read_to_string(&explicit).unwrap(), "environment=qa\n");
        assert!(!runtime.exists());
    }

    #[test]
    fn missing_output_file_still_prints() {
        let mut buf = Vec::new();
        emit_value(&mut buf, "prod", &named("environment"), None);
        assert_eq!(String::from_utf8(buf).unwrap(), "prod\n");
    }

    #[test]
    fn unwritable_output_file_still_prints() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing-dir").join("out");
        let mut buf = Vec::new();
        emit_value(&mut buf, "stg", &named("environment"), Some(path.as_path()));
        assert_eq!(String::from_utf8(buf).unwrap(), "stg\n");
    }

    #[test]
    fn closed_stdout_still_records_step_output() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("github_output");
        emit_value(&mut ClosedPipe, "false", &named("pr_merge"), Some(path.as_path()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "pr_merge=false\n");
    }
}
