//! CI execution context.
//!
//! The resolvers never read process globals. The CLI captures an
//! [`ExecutionContext`] snapshot once (from `GITHUB_REF`, the event payload
//! at `GITHUB_EVENT_PATH`, and the process environment) and passes it in.
//! The latest commit subject is read lazily through a
//! [`CommitMessageSource`] so callers that never need it never pay for it.

pub mod commit;
pub mod execution;

pub use commit::{CommitMessageSource, GitCommitMessageSource};
pub use execution::{ExecutionContext, EVENT_PATH_VAR, INPUT_PREFIX, OUTPUT_VAR, REF_VAR};
