use rust_decimal::Decimal;

use super::BankingSystem;
use crate::error::BankError;
use crate::transaction::TransactionRecord;

impl BankingSystem {
    /// Transfer between two accounts addressed by (customer index, account
    /// index); the two may belong to the same customer. Debit and credit are
    /// persisted as two independent writes per side, not one commit.
    pub fn transfer_funds(
        &mut self,
        sender: (usize, usize),
        recipient: (usize, usize),
        amount: Decimal,
    ) -> Result<(TransactionRecord, TransactionRecord), BankError> {
        if sender == recipient {
            return Err(BankError::SameAccount);
        }
        let (sender_cust, sender_acct) = sender;
        let (recip_cust, recip_acct) = recipient;

        if sender_cust == recip_cust {
            let customer = self
                .customers
                .get_mut(sender_cust)
                .ok_or(BankError::UnknownCustomer)?;
            if sender_acct >= customer.accounts.len() || recip_acct >= customer.accounts.len() {
                return Err(BankError::UnknownAccount);
            }
            let (from, to) = split_two(&mut customer.accounts, sender_acct, recip_acct);
            from.transfer_funds(to, amount, &self.stores)
        } else {
            if sender_cust >= self.customers.len() || recip_cust >= self.customers.len() {
                return Err(BankError::UnknownCustomer);
            }
            let (sender_customer, recip_customer) =
                split_two(&mut self.customers, sender_cust, recip_cust);
            let from = sender_customer
                .accounts
                .get_mut(sender_acct)
                .ok_or(BankError::UnknownAccount)?;
            let to = recip_customer
                .accounts
                .get_mut(recip_acct)
                .ok_or(BankError::UnknownAccount)?;
            from.transfer_funds(to, amount, &self.stores)
        }
    }
}

/// Disjoint mutable references to two distinct slice elements
fn split_two<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
