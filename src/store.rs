use std::path::Path;

mod accounts;
mod admin;
mod customers;
mod transactions;

pub use accounts::AccountStore;
pub use admin::AdminStore;
pub use customers::{CustomerRow, CustomerStore};
pub use transactions::TransactionLog;

use crate::constants::{ACCOUNTS_FILE, ADMIN_FILE, CUSTOMERS_FILE, TRANSACTIONS_FILE};

/// The four on-disk stores, rooted at one data directory. Every store is a
/// plain csv file with a header row; there is no locking and no atomic
/// rename anywhere in this layer.
#[derive(Debug)]
pub struct Stores {
    pub accounts: AccountStore,
    pub transactions: TransactionLog,
    pub customers: CustomerStore,
    pub admin: AdminStore,
}

impl Stores {
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            accounts: AccountStore::new(dir.join(ACCOUNTS_FILE)),
            transactions: TransactionLog::new(dir.join(TRANSACTIONS_FILE)),
            customers: CustomerStore::new(dir.join(CUSTOMERS_FILE)),
            admin: AdminStore::new(dir.join(ADMIN_FILE)),
        }
    }
}
