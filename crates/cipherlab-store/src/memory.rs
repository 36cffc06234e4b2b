//! Volatile store.

use chrono::Utc;

use crate::error::Result;
use crate::record::{NewRecord, StoredRecord};
use crate::RecordStore;

/// Keeps records in a `Vec` for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<StoredRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, record: NewRecord) -> Result<i64> {
        record.validate()?;
        let row_id = self.records.last().map_or(1, |last| last.row_id + 1);
        self.records.push(StoredRecord {
            row_id,
            created_at: Utc::now(),
            record,
        });
        Ok(row_id)
    }

    fn list_all(&self) -> Result<Vec<StoredRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> NewRecord {
        NewRecord {
            name: name.into(),
            external_id: "2201".into(),
            category: "L".into(),
            cipher: "rail-fence".into(),
            output: "HOREL OLLWD".into(),
        }
    }

    #[test]
    fn assigns_increasing_ids() {
        let mut store = MemoryStore::new();
        assert_eq!(store.insert(record("Ayu")).unwrap(), 1);
        assert_eq!(store.insert(record("Budi")).unwrap(), 2);
        let names: Vec<_> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| r.record.name)
            .collect();
        assert_eq!(names, ["Ayu", "Budi"]);
    }

    #[test]
    fn rejects_nameless_record() {
        let mut store = MemoryStore::new();
        assert!(store.insert(record("  ")).is_err());
        assert!(store.list_all().unwrap().is_empty());
    }
}
