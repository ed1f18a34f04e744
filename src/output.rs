//! Workflow step outputs.
//!
//! Appends `name=value` lines to the file named by `GITHUB_OUTPUT` so later
//! steps can read the resolved value as `steps.<id>.outputs.<name>`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, ShipgateError};

/// Delimiter for multi-line values.
const MULTILINE_DELIMITER: &str = "SHIPGATE_EOF";

/// Format one step output entry.
///
/// Single-line values use `name=value`. Values containing a newline use the
/// heredoc form `name<<DELIM`.
pub fn format_step_output(name: &str, value: &str) -> Result<String> {
    if name.is_empty() || name.contains(['=', '\n', '<']) {
        return Err(ShipgateError::Other(anyhow::anyhow!(
            "invalid step output name '{}'",
            name
        )));
    }

    if !value.contains('\n') {
        return Ok(format!("{}={}\n", name, value));
    }

    if value.lines().any(|line| line == MULTILINE_DELIMITER) {
        return Err(ShipgateError::Other(anyhow::anyhow!(
            "value for '{}' contains the output delimiter",
            name
        )));
    }
    Ok(format!(
        "{name}<<{d}\n{value}\n{d}\n",
        d = MULTILINE_DELIMITER
    ))
}

/// Append a step output entry to `path`.
pub fn append_step_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let entry = format_step_output(name, value)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(entry.as_bytes())?;
    Ok(())
}
