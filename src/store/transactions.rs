use std::fs::OpenOptions;
use std::path::PathBuf;

use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::error::StoreError;
use crate::transaction::TransactionRecord;

/// Append-only transaction log. The header is written once when the file is
/// created; rows are never edited or compacted afterwards.
#[derive(Debug)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, record: &TransactionRecord) -> Result<(), StoreError> {
        let file_exists = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = WriterBuilder::new()
            .has_headers(!file_exists)
            .from_writer(file);
        wtr.serialize(record)?;
        wtr.flush()?;
        Ok(())
    }

    /// Every record, in append order
    pub fn read_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_path(&self.path)?;
        let mut records = Vec::new();
        for result in rdr.deserialize() {
            records.push(result?);
        }
        Ok(records)
    }

    /// Append-order history, optionally restricted to one account id by
    /// exact match
    pub fn history(&self, account_id: Option<&str>) -> Result<Vec<TransactionRecord>, StoreError> {
        let records = self.read_all()?;
        Ok(match account_id {
            Some(id) => records.into_iter().filter(|r| r.account_id == id).collect(),
            None => records,
        })
    }
}
