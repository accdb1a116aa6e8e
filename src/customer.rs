use rust_decimal::Decimal;

use crate::account::Account;

/// A registered customer and the accounts attached to them, at most one per
/// account type by convention (not enforced).
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    /// Stored and compared in plaintext, like the rest of this toy system
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub accounts: Vec<Account>,
}

impl Customer {
    pub fn new(
        id: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            password: password.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address: address.to_string(),
            accounts: Vec::new(),
        }
    }

    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// First account matching the type name, if any
    pub fn account_by_type(&self, type_name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.type_name() == type_name)
    }

    pub fn account_balance(&self, type_name: &str) -> Option<Decimal> {
        self.account_by_type(type_name).map(|a| a.balance())
    }
}
