use tracing::warn;

use super::BankingSystem;
use crate::account::Account;
use crate::error::BankError;

impl BankingSystem {
    /// Attaches a freshly constructed account to the customer and saves its
    /// first snapshot. Opening balances do not produce a transaction record.
    pub fn open_account(&mut self, customer_idx: usize, account: Account) -> Result<(), BankError> {
        let customer = self
            .customers
            .get_mut(customer_idx)
            .ok_or(BankError::UnknownCustomer)?;
        if let Err(e) = self.stores.accounts.save(&account) {
            warn!(account_id = account.id(), "failed to save new account: {e}");
        }
        customer.add_account(account);
        Ok(())
    }
}
