//! Persistence for cipher submissions.
//!
//! The cipher transforms never touch storage. Callers that want to keep a
//! submission hand a [`NewRecord`] to whichever [`RecordStore`] they were given.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod memory;
mod record;
mod sqlite;

pub use crate::error::{Result, StoreError};
pub use crate::memory::MemoryStore;
pub use crate::record::{NewRecord, StoredRecord};
pub use crate::sqlite::SqliteStore;

/// Capability to persist and list submissions.
pub trait RecordStore {
    /// Stores a record and returns its assigned row id.
    fn insert(&mut self, record: NewRecord) -> Result<i64>;

    /// Returns every stored record in insertion order.
    fn list_all(&self) -> Result<Vec<StoredRecord>>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn insert(&mut self, record: NewRecord) -> Result<i64> {
        (**self).insert(record)
    }

    fn list_all(&self) -> Result<Vec<StoredRecord>> {
        (**self).list_all()
    }
}
