//! Execution context snapshot.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::commit::CommitMessageSource;
use crate::error::ContextReadError;

/// Variable holding the ref that triggered the run.
pub const REF_VAR: &str = "GITHUB_REF";

/// Variable holding the path of the JSON event payload.
pub const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";

/// Prefix of workflow input variables (`INPUT_<NAME>`).
pub const INPUT_PREFIX: &str = "INPUT_";

/// Variable holding the path of the step output file.
pub const OUTPUT_VAR: &str = "GITHUB_OUTPUT";

/// Read-only snapshot of the CI state for a single resolution.
///
/// # Example
///
/// ```
/// use shipgate::context::ExecutionContext;
///
/// let ctx = ExecutionContext::new()
///     .with_ref("refs/heads/main")
///     .with_var("INPUT_ENVIRONMENT", "prod");
/// assert_eq!(ctx.ref_name(), Some("refs/heads/main"));
/// assert_eq!(ctx.var("INPUT_ENVIRONMENT"), Some("prod"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
    /// Branch or tag reference of the triggering event.
    pub git_ref: Option<String>,
    /// `head_commit.message` from the event payload, if any.
    pub head_commit_message: Option<String>,
    /// Why the event payload could not be read.
    ///
    /// Only the commit message depends on the payload, so a broken payload
    /// does not invalidate the rest of the snapshot.
    pub payload_error: Option<ContextReadError>,
    /// Environment variables visible to the run.
    pub env: BTreeMap<String, String>,
}

/// The slice of the event payload Shipgate reads.
#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    #[serde(default)]
    head_commit: Option<HeadCommit>,
}

#[derive(Debug, Default, Deserialize)]
struct HeadCommit {
    #[serde(default)]
    message: Option<String>,
}

impl ExecutionContext {
    /// Create an empty context: no ref, no payload, no variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the triggering ref.
    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    /// Set the payload head commit message.
    pub fn with_head_commit_message(mut self, message: impl Into<String>) -> Self {
        self.head_commit_message = Some(message.into());
        self
    }

    /// Record that the event payload could not be read.
    pub fn with_payload_error(mut self, err: ContextReadError) -> Self {
        self.payload_error = Some(err);
        self
    }

    /// Add an environment variable.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// The triggering ref, if the runtime provided one.
    pub fn ref_name(&self) -> Option<&str> {
        self.git_ref.as_deref()
    }

    /// Look up an environment variable.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// The step output file named by `GITHUB_OUTPUT`, if set and non-empty.
    pub fn step_output_file(&self) -> Option<&Path> {
        self.var(OUTPUT_VAR)
            .filter(|path| !path.is_empty())
            .map(Path::new)
    }

    /// Capture the context from the current process.
    pub fn from_runtime() -> Result<Self, ContextReadError> {
        Self::from_vars(std::env::vars_os())
    }

    /// Build a context from an explicit set of variables.
    ///
    /// `GITHUB_REF` becomes the ref and the JSON file named by
    /// `GITHUB_EVENT_PATH` supplies the head commit message. A payload path
    /// that does not exist is treated as an empty payload; one that cannot
    /// be read or parsed is kept as [`ExecutionContext::payload_error`].
    ///
    /// Variables Shipgate consults (`GITHUB_*`, `INPUT_*`) must be valid
    /// unicode; other non-unicode entries are skipped.
    pub fn from_vars<I>(vars: I) -> Result<Self, ContextReadError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = BTreeMap::new();
        for (key, value) in vars {
            let Some(key) = key.to_str().map(str::to_string) else {
                continue;
            };
            match value.into_string() {
                Ok(value) => {
                    env.insert(key, value);
                }
                Err(_) if is_consulted(&key) => {
                    return Err(ContextReadError::NotUnicode { var: key });
                }
                Err(_) => {
                    tracing::debug!("Skipping non-unicode variable {}", key);
                }
            }
        }

        let git_ref = env.get(REF_VAR).cloned();
        let payload = match env.get(EVENT_PATH_VAR) {
            Some(path) if !path.is_empty() => read_head_commit_message(Path::new(path)),
            _ => Ok(None),
        };
        let (head_commit_message, payload_error) = match payload {
            Ok(message) => (message, None),
            Err(err) => {
                tracing::debug!("Event payload unavailable: {}", err);
                (None, Some(err))
            }
        };

        tracing::debug!(
            "Captured context: ref={:?}, payload message present={}",
            git_ref,
            head_commit_message.is_some()
        );

        Ok(Self {
            git_ref,
            head_commit_message,
            payload_error,
            env,
        })
    }

    /// The commit message to inspect for this run.
    ///
    /// Prefers the payload's head commit message; falls back to `source`
    /// only when the payload has none (or an empty one). An unreadable
    /// payload is reported instead of falling back.
    pub fn commit_message(
        &self,
        source: &dyn CommitMessageSource,
    ) -> Result<String, ContextReadError> {
        match self.head_commit_message.as_deref() {
            Some(message) if !message.is_empty() => Ok(message.to_string()),
            _ => match &self.payload_error {
                Some(err) => Err(err.clone()),
                None => source.latest_commit_subject(),
            },
        }
    }
}

fn is_consulted(key: &str) -> bool {
    key.starts_with("GITHUB_") || key.starts_with(INPUT_PREFIX)
}

fn read_head_commit_message(path: &Path) -> Result<Option<String>, ContextReadError> {
    if !path.exists() {
        tracing::debug!("Event payload {} does not exist", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| ContextReadError::EventPayload {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let payload: EventPayload =
        serde_json::from_str(&content).map_err(|e| ContextReadError::InvalidPayload {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(payload.head_commit.and_then(|commit| commit.message))
}
