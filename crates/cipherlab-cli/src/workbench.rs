//! Glue between a selected transform and the injected record store.

use anyhow::Result;
use cipherlab_core::{Mode, TextCipher};
use cipherlab_store::{NewRecord, RecordStore, StoredRecord};
use log::debug;

/// Who submitted an encryption request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submitter {
    pub name: String,
    pub external_id: String,
    pub category: String,
}

/// Result of one transform invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    /// Row id when the submission was persisted.
    pub stored_as: Option<i64>,
}

pub struct Workbench<S> {
    store: S,
}

impl<S: RecordStore> Workbench<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Runs `cipher` once. Encrypt submissions with a submitter are stored;
    /// decrypt submissions never are.
    pub fn run(
        &mut self,
        cipher: &dyn TextCipher,
        mode: Mode,
        text: &str,
        submitter: Option<Submitter>,
    ) -> Result<Outcome> {
        let output = cipher.apply(mode, text)?;

        let stored_as = match (mode, submitter) {
            (Mode::Encrypt, Some(who)) => {
                let row_id = self.store.insert(NewRecord {
                    name: who.name,
                    external_id: who.external_id,
                    category: who.category,
                    cipher: cipher.name().to_string(),
                    output: output.clone(),
                })?;
                debug!("stored {} submission as row {row_id}", cipher.name());
                Some(row_id)
            }
            (Mode::Decrypt, Some(_)) => {
                debug!("decrypt submissions are not stored");
                None
            }
            (_, None) => None,
        };

        Ok(Outcome { output, stored_as })
    }

    pub fn records(&self) -> Result<Vec<StoredRecord>> {
        Ok(self.store.list_all()?)
    }
}
