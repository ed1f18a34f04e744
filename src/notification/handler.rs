//! Storage event acknowledgment.

use serde::Serialize;
use serde_json::json;

use super::event::StorageEvent;
use crate::error::{Result, ShipgateError};

/// Body used when the event carries no records.
const EMPTY_EVENT_BODY: &str = "Successfully processed storage event";

/// Response returned to the notification trigger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    /// Always 200.
    pub status_code: u16,
    /// JSON-encoded body.
    pub body: String,
}

impl Acknowledgment {
    fn ok(body: String) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }
}

/// Log a storage event and acknowledge it.
///
/// The first record's bucket and decoded key are logged and echoed in the
/// body. Events without records are acknowledged with a plain message.
///
/// # Errors
///
/// Returns `InvalidStorageEvent` if `input` is not JSON, a record is
/// missing its bucket or key, or the key does not decode to UTF-8.
///
/// # Example
///
/// ```
/// use shipgate::notification::acknowledge;
///
/// let ack = acknowledge(r#"{"Records":[{"s3":{"bucket":{"name":"tf"},"object":{"key":"prod.tfstate"}}}]}"#)
///     .unwrap();
/// assert_eq!(ack.status_code, 200);
/// assert!(ack.body.contains("prod.tfstate"));
/// ```
pub fn acknowledge(input: &str) -> Result<Acknowledgment> {
    let value: serde_json::Value = serde_json::from_str(input).map_err(invalid)?;
    tracing::info!(
        "Received storage event: {}",
        serde_json::to_string_pretty(&value).map_err(invalid)?
    );

    let event: StorageEvent = serde_json::from_value(value).map_err(invalid)?;
    let Some(record) = event.records.first() else {
        return Ok(Acknowledgment::ok(json!(EMPTY_EVENT_BODY).to_string()));
    };

    let bucket = record.bucket();
    let key = record
        .decoded_key()
        .ok_or_else(|| ShipgateError::InvalidStorageEvent {
            message: format!("object key '{}' is not valid UTF-8", record.s3.object.key),
        })?;
    tracing::info!("State file changed: s3://{}/{}", bucket, key);

    let body = json!({
        "message": "Successfully processed state file change",
        "bucket": bucket,
        "key": key,
    });
    Ok(Acknowledgment::ok(body.to_string()))
}

fn invalid(err: serde_json::Error) -> ShipgateError {
    ShipgateError::InvalidStorageEvent {
        message: err.to_string(),
    }
}
