//! Pull-request merge detection.
//!
//! Used to run deployment steps only when a pull request is merged into
//! the main branch, not on every push.

pub mod detector;

pub use detector::{MergeCommitDetector, MergeDetection, MergeDetectionConfig, MergeReason};
