//! Record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// A submission to be stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Submitter name.
    pub name: String,
    /// Submitter identifier, e.g. a student number.
    pub external_id: String,
    /// Free-form category chosen on the form.
    pub category: String,
    /// Transform that produced `output`.
    pub cipher: String,
    /// Cipher text as shown to the submitter.
    pub output: String,
}

impl NewRecord {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidRecord("name must not be empty".into()));
        }
        if self.cipher.trim().is_empty() {
            return Err(StoreError::InvalidRecord("cipher label must not be empty".into()));
        }
        Ok(())
    }
}

/// A record as returned by a store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Store-assigned id, increasing with insertion order.
    pub row_id: i64,
    /// Time the record was stored.
    pub created_at: DateTime<Utc>,
    /// The submitted fields.
    #[serde(flatten)]
    pub record: NewRecord,
}
