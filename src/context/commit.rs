//! Latest commit subject lookup.

use std::path::PathBuf;
use std::process::Command;

use crate::error::ContextReadError;

/// Supplies the subject line of the most recent commit.
///
/// Only consulted when the event payload carries no head commit message.
pub trait CommitMessageSource {
    /// Subject line of the latest commit.
    fn latest_commit_subject(&self) -> Result<String, ContextReadError>;
}

/// Reads the latest commit subject with `git log -1 --pretty=format:%s`.
///
/// The call blocks until git exits. No timeout is applied.
#[derive(Debug, Clone, Default)]
pub struct GitCommitMessageSource {
    working_dir: Option<PathBuf>,
}

impl GitCommitMessageSource {
    /// Run git in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git in `dir` instead of the current directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }
}

impl CommitMessageSource for GitCommitMessageSource {
    fn latest_commit_subject(&self) -> Result<String, ContextReadError> {
        let mut cmd = Command::new("git");
        cmd.args(["log", "-1", "--pretty=format:%s"]);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| ContextReadError::GitSpawn {
            message: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(ContextReadError::GitFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let subject = String::from_utf8(output.stdout).map_err(|_| ContextReadError::GitOutput)?;
        Ok(subject.trim().to_string())
    }
}
