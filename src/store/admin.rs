use std::path::PathBuf;

use csv::{ReaderBuilder, Trim, Writer};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::DEFAULT_ADMIN_PASSWORD;
use crate::error::StoreError;

#[derive(Debug, Serialize, Deserialize)]
struct AdminRow {
    password: String,
}

/// Single-row credential table for the admin portal, rewritten wholesale on
/// every password change.
#[derive(Debug)]
pub struct AdminStore {
    path: PathBuf,
}

impl AdminStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Stored password, or the well-known default when the file is absent or
    /// unreadable.
    pub fn load_password(&self) -> String {
        match self.read_first_row() {
            Ok(Some(password)) => password,
            Ok(None) => DEFAULT_ADMIN_PASSWORD.to_string(),
            Err(e) => {
                warn!("failed to read admin store: {e}");
                DEFAULT_ADMIN_PASSWORD.to_string()
            }
        }
    }

    fn read_first_row(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_path(&self.path)?;
        for result in rdr.deserialize() {
            let row: AdminRow = result?;
            return Ok(Some(row.password));
        }
        Ok(None)
    }

    pub fn save_password(&self, password: &str) -> Result<(), StoreError> {
        let mut wtr = Writer::from_path(&self.path)?;
        wtr.serialize(AdminRow {
            password: password.to_string(),
        })?;
        wtr.flush()?;
        Ok(())
    }

    /// Seeds the default credential row when the store does not exist yet
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        self.save_password(DEFAULT_ADMIN_PASSWORD)
    }
}
