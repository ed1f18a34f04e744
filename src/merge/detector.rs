//! Pull-request merge commit detection.

use serde::{Deserialize, Serialize};

use crate::context::{CommitMessageSource, ExecutionContext};
use crate::error::ContextReadError;

/// Settings for merge detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeDetectionConfig {
    /// Branch that merges land on.
    pub main_branch: String,
    /// Prefix of a pull-request merge commit message.
    pub merge_commit_pattern: String,
}

impl Default for MergeDetectionConfig {
    fn default() -> Self {
        Self {
            main_branch: "main".to_string(),
            merge_commit_pattern: "Merge pull request".to_string(),
        }
    }
}

impl MergeDetectionConfig {
    /// Full ref of the main branch, e.g. `refs/heads/main`.
    pub fn main_ref(&self) -> String {
        format!("refs/heads/{}", self.main_branch)
    }
}

/// Why a detection came out the way it did.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeReason {
    /// The ref is not the main branch; the message was never read.
    NotOnMainBranch,
    /// The commit message starts with the merge pattern.
    PatternMatched,
    /// The commit message does not start with the merge pattern.
    PatternNotMatched,
    /// The commit message could not be read.
    MessageUnavailable(ContextReadError),
    /// The execution context could not be read.
    ContextUnavailable(ContextReadError),
}

impl std::fmt::Display for MergeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOnMainBranch => write!(f, "not on main branch"),
            Self::PatternMatched => write!(f, "merge pattern matched"),
            Self::PatternNotMatched => write!(f, "merge pattern not matched"),
            Self::MessageUnavailable(err) => write!(f, "commit message unavailable: {}", err),
            Self::ContextUnavailable(err) => write!(f, "context unavailable: {}", err),
        }
    }
}

/// Outcome of merge detection.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeDetection {
    /// Whether the commit is a pull-request merge on the main branch.
    pub is_pr_merge: bool,
    /// Why.
    pub reason: MergeReason,
}

impl MergeDetection {
    fn negative(reason: MergeReason) -> Self {
        Self {
            is_pr_merge: false,
            reason,
        }
    }
}

/// Detects pull-request merge commits landing on the main branch.
///
/// # Example
///
/// ```
/// use shipgate::context::{ExecutionContext, GitCommitMessageSource};
/// use shipgate::merge::MergeCommitDetector;
///
/// let detector = MergeCommitDetector::default();
/// let ctx = ExecutionContext::new()
///     .with_ref("refs/heads/main")
///     .with_head_commit_message("Merge pull request #42 from foo/bar");
/// let detection = detector.detect(&ctx, &GitCommitMessageSource::new());
/// assert!(detection.is_pr_merge);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MergeCommitDetector {
    config: MergeDetectionConfig,
}

impl MergeCommitDetector {
    /// Create a detector with the given settings.
    pub fn new(config: MergeDetectionConfig) -> Self {
        Self { config }
    }

    /// The settings this detector uses.
    pub fn config(&self) -> &MergeDetectionConfig {
        &self.config
    }

    /// Decide whether `context` describes a pull-request merge to main.
    ///
    /// `source` is only consulted when the ref is the main branch and the
    /// payload carries no commit message.
    pub fn detect(
        &self,
        context: &ExecutionContext,
        source: &dyn CommitMessageSource,
    ) -> MergeDetection {
        if context.ref_name() != Some(self.config.main_ref().as_str()) {
            tracing::info!("Not on main branch, skipping PR merge detection");
            return MergeDetection::negative(MergeReason::NotOnMainBranch);
        }

        let message = match context.commit_message(source) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!("Error getting commit message: {}", err);
                return MergeDetection::negative(MergeReason::MessageUnavailable(err));
            }
        };
        tracing::info!("Commit message: {}", message);

        if message.starts_with(&self.config.merge_commit_pattern) {
            tracing::info!("This is a PR merge commit");
            MergeDetection {
                is_pr_merge: true,
                reason: MergeReason::PatternMatched,
            }
        } else {
            tracing::info!("This is not a PR merge commit");
            MergeDetection::negative(MergeReason::PatternNotMatched)
        }
    }

    /// Detect from a context capture that may have failed.
    pub fn detect_captured(
        &self,
        captured: &Result<ExecutionContext, ContextReadError>,
        source: &dyn CommitMessageSource,
    ) -> MergeDetection {
        match captured {
            Ok(context) => self.detect(context, source),
            Err(err) => {
                tracing::warn!("Error detecting PR merge: {}", err);
                MergeDetection::negative(MergeReason::ContextUnavailable(err.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Commit message source that counts how often it is asked.
    struct CountingSource {
        result: Result<String, ContextReadError>,
        calls: Cell<usize>,
    }

    impl CountingSource {
        fn subject(subject: &str) -> Self {
            Self {
                result: Ok(subject.to_string()),
                calls: Cell::new(0),
            }
        }

        fn failing(err: ContextReadError) -> Self {
            Self {
                result: Err(err),
                calls: Cell::new(0),
            }
        }
    }

    impl CommitMessageSource for CountingSource {
        fn latest_commit_subject(&self) -> Result<String, ContextReadError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    fn main_ctx() -> ExecutionContext {
        ExecutionContext::new().with_ref("refs/heads/main")
    }

    #[test]
    fn merge_message_on_main_is_pr_merge() {
        let source = CountingSource::subject("unused");
        let ctx = main_ctx().with_head_commit_message("Merge pull request #42 from foo/bar");
        let detection = MergeCommitDetector::default().detect(&ctx, &source);
        assert!(detection.is_pr_merge);
        assert_eq!(detection.reason, MergeReason::PatternMatched);
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn ordinary_message_on_main_is_not_pr_merge() {
        let source = CountingSource::subject("unused");
        let ctx = main_ctx().with_head_commit_message("fix typo");
        let detection = MergeCommitDetector::default().detect(&ctx, &source);
        assert!(!detection.is_pr_merge);
        assert_eq!(detection.reason, MergeReason::PatternNotMatched);
    }

    #[test]
    fn other_branch_never_reads_message() {
        let source = CountingSource::subject("Merge pull request #1 from a/b");
        let detector = MergeCommitDetector::default();
        for git_ref in ["refs/heads/feature-x", "refs/tags/v1.0.0", "refs/heads/main2"] {
            let ctx = ExecutionContext::new().with_ref(git_ref);
            let detection = detector.detect(&ctx, &source);
            assert!(!detection.is_pr_merge);
            assert_eq!(detection.reason, MergeReason::NotOnMainBranch);
        }
        let detection = detector.detect(&ExecutionContext::new(), &source);
        assert_eq!(detection.reason, MergeReason::NotOnMainBranch);
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn falls_back_to_source_without_payload_message() {
        let source = CountingSource::subject("Merge pull request #9 from x/y");
        let detection = MergeCommitDetector::default().detect(&main_ctx(), &source);
        assert!(detection.is_pr_merge);
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn source_failure_is_not_pr_merge() {
        let err = ContextReadError::GitFailed {
            code: Some(128),
            stderr: "fatal: not a git repository".to_string(),
        };
        let source = CountingSource::failing(err.clone());
        let detection = MergeCommitDetector::default().detect(&main_ctx(), &source);
        assert!(!detection.is_pr_merge);
        assert_eq!(detection.reason, MergeReason::MessageUnavailable(err));
    }

    #[test]
    fn source_failure_is_not_pr_merge_even_with_empty_pattern() {
        let detector = MergeCommitDetector::new(MergeDetectionConfig {
            merge_commit_pattern: String::new(),
            ..MergeDetectionConfig::default()
        });
        let source = CountingSource::failing(ContextReadError::GitOutput);
        assert!(!detector.detect(&main_ctx(), &source).is_pr_merge);
    }

    #[test]
    fn unreadable_payload_is_not_pr_merge() {
        let err = ContextReadError::InvalidPayload {
            path: "event.json".into(),
            message: "expected value".to_string(),
        };
        let source = CountingSource::subject("Merge pull request #9 from x/y");
        let ctx = main_ctx().with_payload_error(err.clone());
        let detection = MergeCommitDetector::default().detect(&ctx, &source);
        assert!(!detection.is_pr_merge);
        assert_eq!(detection.reason, MergeReason::MessageUnavailable(err));
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn match_is_case_sensitive() {
        let source = CountingSource::subject("unused");
        let ctx = main_ctx().with_head_commit_message("merge pull request #42 from foo/bar");
        assert!(!MergeCommitDetector::default().detect(&ctx, &source).is_pr_merge);
    }

    #[test]
    fn match_is_anchored_at_start() {
        let source = CountingSource::subject("unused");
        let ctx = main_ctx().with_head_commit_message("Revert \"Merge pull request #42\"");
        assert!(!MergeCommitDetector::default().detect(&ctx, &source).is_pr_merge);
    }

    #[test]
    fn leading_whitespace_in_payload_is_not_trimmed() {
        let source = CountingSource::subject("unused");
        let ctx = main_ctx().with_head_commit_message("  Merge pull request #42");
        assert!(!MergeCommitDetector::default().detect(&ctx, &source).is_pr_merge);
    }

    #[test]
    fn custom_branch_and_pattern() {
        let detector = MergeCommitDetector::new(MergeDetectionConfig {
            main_branch: "release".to_string(),
            merge_commit_pattern: "Merged PR".to_string(),
        });
        let source = CountingSource::subject("unused");

        let release = ExecutionContext::new()
            .with_ref("refs/heads/release")
            .with_head_commit_message("Merged PR 17: bump deps");
        assert!(detector.detect(&release, &source).is_pr_merge);

        let main = main_ctx().with_head_commit_message("Merged PR 17: bump deps");
        assert_eq!(
            detector.detect(&main, &source).reason,
            MergeReason::NotOnMainBranch
        );
    }

    #[test]
    fn detection_is_idempotent() {
        let source = CountingSource::subject("Merge pull request #3 from a/b");
        let detector = MergeCommitDetector::default();
        let first = detector.detect(&main_ctx(), &source);
        let second = detector.detect(&main_ctx(), &source);
        assert_eq!(first, second);
    }

    #[test]
    fn failed_capture_is_not_pr_merge() {
        let err = ContextReadError::NotUnicode {
            var: "GITHUB_REF".to_string(),
        };
        let source = CountingSource::subject("Merge pull request #3 from a/b");
        let detection = MergeCommitDetector::default().detect_captured(&Err(err.clone()), &source);
        assert!(!detection.is_pr_merge);
        assert_eq!(detection.reason, MergeReason::ContextUnavailable(err));
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn reason_display() {
        assert_eq!(MergeReason::NotOnMainBranch.to_string(), "not on main branch");
        assert_eq!(MergeReason::PatternMatched.to_string(), "merge pattern matched");
        assert_eq!(
            MergeReason::MessageUnavailable(ContextReadError::GitOutput).to_string(),
            "commit message unavailable: git output is not valid UTF-8"
        );
    }
}
