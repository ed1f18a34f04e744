//! Library integration tests.

use shipgate::context::{CommitMessageSource, ExecutionContext};
use shipgate::environment::{EnvironmentConfig, EnvironmentResolver, EnvironmentSource};
use shipgate::merge::{MergeCommitDetector, MergeReason};
use shipgate::{ContextReadError, ShipgateError};
use std::cell::Cell;

struct CountingSource {
    calls: Cell<usize>,
}

impl CommitMessageSource for CountingSource {
    fn latest_commit_subject(&self) -> Result<String, ContextReadError> {
        self.calls.set(self.calls.get() + 1);
        Ok("Merge pull request #1 from org/branch".to_string())
    }
}

#[test]
fn error_types_are_public() {
    let err = ShipgateError::InvalidStorageEvent {
        message: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> shipgate::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use shipgate::cli::{Cli, Commands};

    let cli = Cli::parse_from(["shipgate", "environment", "--default-env", "dev"]);
    if let Commands::Environment(args) = cli.command {
        assert_eq!(args.default_env.as_deref(), Some("dev"));
    } else {
        panic!("Expected Environment command");
    }
}

#[test]
fn feature_branch_scenario() {
    let ctx = ExecutionContext::new().with_ref("refs/heads/feature-x");
    assert_eq!(EnvironmentResolver::default().resolve(&ctx).name, "stg");
}

#[test]
fn manual_input_scenario() {
    let ctx = ExecutionContext::new()
        .with_ref("refs/heads/main")
        .with_var("INPUT_ENVIRONMENT", "prod");
    let resolved = EnvironmentResolver::default().resolve(&ctx);
    assert_eq!(resolved.name, "prod");
    assert_eq!(
        resolved.source,
        EnvironmentSource::ManualInput("INPUT_ENVIRONMENT".to_string())
    );
}

#[test]
fn manual_input_wins_for_every_ref() {
    let resolver = EnvironmentResolver::new(EnvironmentConfig::default());
    for git_ref in [None, Some("refs/heads/main"), Some("refs/tags/v2"), Some("")] {
        let mut ctx = ExecutionContext::new().with_var("INPUT_ENVIRONMENT", "sandbox");
        ctx.git_ref = git_ref.map(str::to_string);
        assert_eq!(resolver.resolve(&ctx).name, "sandbox");
    }
}

#[test]
fn detector_skips_message_lookup_off_main() {
    let source = CountingSource {
        calls: Cell::new(0),
    };
    let detector = MergeCommitDetector::default();

    let off_main = ExecutionContext::new().with_ref("refs/heads/feature-x");
    let detection = detector.detect(&off_main, &source);
    assert!(!detection.is_pr_merge);
    assert_eq!(detection.reason, MergeReason::NotOnMainBranch);
    assert_eq!(source.calls.get(), 0);

    let on_main = ExecutionContext::new().with_ref("refs/heads/main");
    assert!(detector.detect(&on_main, &source).is_pr_merge);
    assert_eq!(source.calls.get(), 1);
}
