use crate::customer::Customer;
use crate::store::Stores;

mod accounts;
mod auth;
mod queries;
mod transfers;

/// Top-level registry for one process session. The customer list is not
/// itself persisted; it is rebuilt from the customer and account stores on
/// every login.
#[derive(Debug)]
pub struct BankingSystem {
    /// Customers rehydrated for the current session, in store order
    pub customers: Vec<Customer>,
    pub stores: Stores,
    admin_password: String,
}

impl BankingSystem {
    pub fn new(stores: Stores) -> Self {
        let admin_password = stores.admin.load_password();
        Self {
            customers: Vec::new(),
            stores,
            admin_password,
        }
    }
}
