//! S3-style storage event shape.

use serde::Deserialize;

/// A storage notification carrying one or more records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StorageEvent {
    /// Change records, newest last.
    #[serde(rename = "Records", default)]
    pub records: Vec<StorageRecord>,
}

/// One change record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageRecord {
    /// Bucket and object of the change.
    pub s3: StorageObject,
}

/// Location of the changed object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageObject {
    pub bucket: Bucket,
    pub object: Object,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bucket {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Object {
    /// URL-form encoded key (spaces arrive as `+`).
    pub key: String,
}

impl StorageRecord {
    /// Bucket name.
    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    /// Object key with the URL-form encoding removed.
    ///
    /// Returns `None` if the decoded bytes are not UTF-8.
    pub fn decoded_key(&self) -> Option<String> {
        let spaced = self.s3.object.key.replace('+', " ");
        urlencoding::decode(&spaced).ok().map(|key| key.into_owned())
    }
}
