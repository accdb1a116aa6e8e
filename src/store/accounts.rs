use std::path::PathBuf;

use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::{Account, CheckingAccount, LoanAccount, SavingsAccount};
use crate::error::StoreError;

/// One snapshot row. The column set is the fixed superset across all account
/// types; fields a type does not carry are written as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AccountRow {
    account_id: String,
    account_type: String,
    balance: Decimal,
    #[serde(deserialize_with = "csv::invalid_option")]
    interest_rate: Option<Decimal>,
    #[serde(deserialize_with = "csv::invalid_option")]
    credit_limit: Option<Decimal>,
    #[serde(deserialize_with = "csv::invalid_option")]
    overdraft_fee: Option<Decimal>,
}

impl AccountRow {
    fn from_account(account: &Account) -> Self {
        let mut row = AccountRow {
            account_id: account.id().to_string(),
            account_type: account.type_name().to_string(),
            balance: account.balance(),
            interest_rate: None,
            credit_limit: None,
            overdraft_fee: None,
        };
        match account {
            Account::Checking(acc) => {
                row.credit_limit = Some(acc.credit_limit);
                row.overdraft_fee = Some(acc.overdraft_fee);
            }
            Account::Savings(acc) => row.interest_rate = Some(acc.interest_rate),
            Account::Loan(acc) => row.interest_rate = Some(acc.interest_rate),
        }
        row
    }

    /// Rebuilds the account. Any type-specific cell left empty falls back to
    /// the constructor's value, which re-derives it from the row's current
    /// balance rather than the original opening balance.
    fn into_account(self) -> Result<Account, StoreError> {
        match self.account_type.as_str() {
            "Checking" => {
                let mut acc = CheckingAccount::new(&self.account_id, self.balance);
                if let Some(credit_limit) = self.credit_limit {
                    acc.credit_limit = credit_limit;
                }
                if let Some(overdraft_fee) = self.overdraft_fee {
                    acc.overdraft_fee = overdraft_fee;
                }
                Ok(Account::Checking(acc))
            }
            "Savings" => {
                let mut acc = SavingsAccount::new(&self.account_id, self.balance);
                if let Some(interest_rate) = self.interest_rate {
                    acc.interest_rate = interest_rate;
                }
                Ok(Account::Savings(acc))
            }
            "Loan" => {
                let mut acc = LoanAccount::new(&self.account_id, self.balance);
                if let Some(interest_rate) = self.interest_rate {
                    acc.interest_rate = interest_rate;
                }
                Ok(Account::Loan(acc))
            }
            other => Err(StoreError::UnknownAccountType(other.to_string())),
        }
    }
}

/// Keyed snapshot store of current account state, one row per
/// (account_id, account_type). Every save reads the whole file, updates or
/// inserts the matching row and rewrites the file from scratch.
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_rows(&self) -> Result<Vec<AccountRow>, StoreError> {
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

    /// Updates the matching (id, type) row in place or appends a new one,
    /// then rewrites the entire store.
    pub fn save(&self, account: &Account) -> Result<(), StoreError> {
        let mut rows = self.read_rows()?;
        let new_row = AccountRow::from_account(account);
        match rows.iter_mut().find(|r| {
            r.account_id == new_row.account_id && r.account_type == new_row.account_type
        }) {
            Some(row) => *row = new_row,
            None => rows.push(new_row),
        }

        let mut wtr = Writer::from_path(&self.path)?;
        for row in rows.iter() {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// All accounts attached to the customer id, in store order
    pub fn accounts_for(&self, customer_id: &str) -> Result<Vec<Account>, StoreError> {
        let mut accounts = Vec::new();
        for row in self.read_rows()? {
            if row.account_id == customer_id {
                accounts.push(row.into_account()?);
            }
        }
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::AccountStore;
    use crate::account::{Account, CheckingAccount, SavingsAccount};
    use crate::constants::ACCOUNTS_FILE;

    fn temp_store() -> (tempfile::TempDir, AccountStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::new(dir.path().join(ACCOUNTS_FILE));
        (dir, store)
    }

    #[test]
    fn tst_repeated_saves_keep_one_row_per_key() {
        let (_dir, store) = temp_store();
        let mut account = Account::Savings(SavingsAccount::new("1", dec!(100)));
        store.save(&account).unwrap();
        if let Account::Savings(acc) = &mut account {
            acc.balance = dec!(250);
        }
        store.save(&account).unwrap();
        store.save(&account).unwrap();

        let accounts = store.accounts_for("1").unwrap();
        assert_eq!(accounts.len(), 1, "same (id, type) key updates in place");
        assert_eq!(accounts[0].balance(), dec!(250), "last save wins");
    }

    #[test]
    fn tst_same_id_different_type_gets_its_own_row() {
        let (_dir, store) = temp_store();
        store
            .save(&Account::Checking(CheckingAccount::new("1", dec!(100))))
            .unwrap();
        store
            .save(&Account::Savings(SavingsAccount::new("1", dec!(200))))
            .unwrap();

        let accounts = store.accounts_for("1").unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].type_name(), "Checking");
        assert_eq!(accounts[1].type_name(), "Savings");
    }

    #[test]
    fn tst_rows_carry_the_fixed_column_superset() {
        let (dir, store) = temp_store();
        store
            .save(&Account::Checking(CheckingAccount::new("5", dec!(1000))))
            .unwrap();

        let data = std::fs::read_to_string(dir.path().join(ACCOUNTS_FILE)).unwrap();
        let mut lines = data.lines();
        assert_eq!(
            lines.next().unwrap(),
            "account_id,account_type,balance,interest_rate,credit_limit,overdraft_fee"
        );
        // checking rows leave interest_rate empty
        assert_eq!(lines.next().unwrap(), "5,Checking,1000,,-500.0,20.00");
    }

    #[test]
    fn tst_rehydration_restores_persisted_fields() {
        let (_dir, store) = temp_store();
        let mut account = Account::Checking(CheckingAccount::new("7", dec!(1000)));
        store.save(&account).unwrap();
        // balance drops, but the limit and fee stay what they were at opening
        if let Account::Checking(acc) = &mut account {
            acc.balance = dec!(100);
        }
        store.save(&account).unwrap();

        let restored = store.accounts_for("7").unwrap();
        match &restored[0] {
            Account::Checking(acc) => {
                assert_eq!(acc.balance, dec!(100));
                assert_eq!(acc.credit_limit, dec!(-500), "restored, not re-derived");
                assert_eq!(acc.overdraft_fee, dec!(20));
            }
            other => panic!("expected a checking account, got {other:?}"),
        }
    }

    #[test]
    fn tst_rehydration_with_empty_cells_rederives_from_balance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ACCOUNTS_FILE);
        std::fs::write(
            &path,
            "account_id,account_type,balance,interest_rate,credit_limit,overdraft_fee\n\
             7,Checking,200,,,\n",
        )
        .unwrap();
        let store = AccountStore::new(path);

        let accounts = store.accounts_for("7").unwrap();
        match &accounts[0] {
            Account::Checking(acc) => {
                assert_eq!(acc.credit_limit, dec!(-100), "derived from current balance");
                assert_eq!(acc.overdraft_fee, dec!(4));
            }
            other => panic!("expected a checking account, got {other:?}"),
        }
    }

    #[test]
    fn tst_unknown_account_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ACCOUNTS_FILE);
        std::fs::write(
            &path,
            "account_id,account_type,balance,interest_rate,credit_limit,overdraft_fee\n\
             7,Brokerage,200,,,\n",
        )
        .unwrap();
        let store = AccountStore::new(path);
        assert!(store.accounts_for("7").is_err());
    }

    #[test]
    fn tst_missing_file_reads_as_empty() {
        let (_dir, store) = temp_store();
        assert!(store.accounts_for("1").unwrap().is_empty());
    }
}
