use rand::Rng;
use tracing::warn;

use super::BankingSystem;
use crate::customer::Customer;
use crate::error::BankError;

impl BankingSystem {
    /// Rebuilds the in-memory customer list from the customer store and
    /// re-attaches each customer's accounts from the snapshot store.
    pub fn load_customers_from_file(&mut self) {
        self.customers.clear();
        let rows = match self.stores.customers.read_rows() {
            Ok(rows) => rows,
            Err(e) => {
                warn!("failed to load customers: {e}");
                return;
            }
        };
        for row in rows {
            let mut customer = Customer::new(
                &row.customer_id,
                &row.password,
                &row.first_name,
                &row.last_name,
                &row.address,
            );
            match self.stores.accounts.accounts_for(&customer.id) {
                Ok(accounts) => customer.accounts = accounts,
                Err(e) => warn!(customer_id = %customer.id, "failed to load accounts: {e}"),
            }
            self.customers.push(customer);
        }
    }

    /// Reloads the stores, then scans for an exact id and password match.
    /// Returns the customer's index into `customers`.
    pub fn customer_login(&mut self, customer_id: &str, password: &str) -> Option<usize> {
        self.load_customers_from_file();
        self.customers
            .iter()
            .position(|c| c.id == customer_id && c.password == password)
    }

    pub fn admin_login(&self, password: &str) -> bool {
        password == self.admin_password
    }

    /// Registers a customer and returns the generated numeric id. Passwords
    /// must be at least 6 characters long and contain a digit.
    pub fn create_customer(
        &mut self,
        password: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
    ) -> Result<String, BankError> {
        if password.len() < 6 || !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(BankError::WeakPassword);
        }
        let customer_id = generate_customer_id();
        let customer = Customer::new(&customer_id, password, first_name, last_name, address);
        if let Err(e) = self.stores.customers.append(&customer) {
            warn!(customer_id = %customer_id, "failed to save customer: {e}");
        }
        self.customers.push(customer);
        Ok(customer_id)
    }

    /// Verifies the current password, rewrites the admin store and updates
    /// the in-memory copy. The in-memory copy is left untouched when the
    /// store write fails.
    pub fn change_admin_password(&mut self, current: &str, new: &str) -> Result<(), BankError> {
        if current != self.admin_password {
            return Err(BankError::InvalidAdminPassword);
        }
        self.stores
            .admin
            .save_password(new)
            .map_err(|e| BankError::Storage(e.to_string()))?;
        self.admin_password = new.to_string();
        Ok(())
    }
}

/// Numeric id in the shape the registration flow hands out: the sum of three
/// random ranges, between 1001100 and 10010997.
fn generate_customer_id() -> String {
    let mut rng = rand::thread_rng();
    let id: u32 = rng.gen_range(100..=999)
        + rng.gen_range(1000..=9999)
        + rng.gen_range(1_000_000..=9_999_999);
    id.to_string()
}
