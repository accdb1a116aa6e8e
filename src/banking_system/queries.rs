use super::BankingSystem;
use crate::error::StoreError;
use crate::transaction::TransactionRecord;

impl BankingSystem {
    /// Ledger-wide scan by exact customer id
    pub fn customer_position(&self, customer_id: &str) -> Option<usize> {
        self.customers.iter().position(|c| c.id == customer_id)
    }

    /// Log records in append order, optionally filtered to one account id
    pub fn transaction_history(
        &self,
        account_id: Option<&str>,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        self.stores.transactions.history(account_id)
    }
}
