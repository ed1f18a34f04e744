//! Storage-change notification handling.
//!
//! Acknowledges object-storage change events (e.g. a Terraform state file
//! written to a bucket). The handler logs which object changed and returns
//! a fixed `200` acknowledgment. Nothing is forwarded downstream.

pub mod event;
pub mod handler;

pub use event::{StorageEvent, StorageObject, StorageRecord};
pub use handler::{acknowledge, Acknowledgment};
