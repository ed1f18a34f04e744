//! Storage event command implementation.
//!
//! The `shipgate storage-event` command acknowledges a storage-change
//! notification read from a file or stdin and prints the acknowledgment.

use std::io::{Read, Write};

use crate::cli::args::StorageEventArgs;
use crate::error::Result;
use crate::notification::acknowledge;

use super::dispatcher::{Command, CommandResult};

/// The storage-event command implementation.
pub struct StorageEventCommand {
    args: StorageEventArgs,
}

impl StorageEventCommand {
    /// Create a new storage-event command.
    pub fn new(args: StorageEventArgs) -> Self {
        Self { args }
    }

    fn read_event(&self) -> Result<String> {
        match &self.args.file {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                Ok(input)
            }
        }
    }
}

impl Command for StorageEventCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let input = self.read_event()?;
        let ack = acknowledge(&input)?;

        let rendered = serde_json::to_string_pretty(&ack).map_err(anyhow::Error::from)?;
        writeln!(out, "{}", rendered)?;
        Ok(CommandResult::success())
    }
}
