use std::fs::OpenOptions;
use std::path::PathBuf;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::error::StoreError;

/// One customer registry row; accounts are kept in their own store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRow {
    pub customer_id: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

impl CustomerRow {
    fn from_customer(customer: &Customer) -> Self {
        Self {
            customer_id: customer.id.clone(),
            password: customer.password.clone(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            address: customer.address.clone(),
        }
    }
}

/// Append-only customer registry. There is no update path: a row is written
/// once at registration and only ever compared against at login.
#[derive(Debug)]
pub struct CustomerStore {
    path: PathBuf,
}

impl CustomerStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, customer: &Customer) -> Result<(), StoreError> {
        let file_exists = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = WriterBuilder::new()
            .has_headers(!file_exists)
            .from_writer(file);
        wtr.serialize(CustomerRow::from_customer(customer))?;
        wtr.flush()?;
        Ok(())
    }

    /// All registered customers, in registration order
    pub fn read_rows(&self) -> Result<Vec<CustomerRow>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_path(&self.path)?;
        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            rows.push(result?);
        }
        Ok(rows)
    }
}
