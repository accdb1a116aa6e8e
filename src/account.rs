use rust_decimal::Decimal;
use tracing::warn;

use crate::constants::{
    CREDIT_LIMIT_RATIO, LOAN_INTEREST_RATE, OVERDRAFT_FEE_RATIO, SAVINGS_INTEREST_RATE,
};
use crate::error::BankError;
use crate::store::Stores;
use crate::transaction::{TransactionKind, TransactionRecord};

/// Checking accounts may go negative down to a credit limit. Both the limit
/// and the overdraft fee are derived from the opening balance and fixed
/// thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckingAccount {
    pub id: String,
    pub balance: Decimal,
    pub credit_limit: Decimal,
    pub overdraft_fee: Decimal,
}

impl CheckingAccount {
    pub fn new(id: &str, balance: Decimal) -> Self {
        Self {
            id: id.to_string(),
            balance,
            credit_limit: -(balance * CREDIT_LIMIT_RATIO),
            overdraft_fee: balance.abs() * OVERDRAFT_FEE_RATIO,
        }
    }

    fn apply_withdrawal(&mut self, amount: Decimal) -> Result<TransactionRecord, BankError> {
        if self.balance - amount < self.credit_limit {
            return Err(BankError::ExceedsCreditLimit);
        }
        if self.balance - amount >= Decimal::ZERO {
            self.balance -= amount;
            Ok(TransactionRecord::new(
                &self.id,
                TransactionKind::Withdrawal,
                amount,
                self.balance,
            ))
        } else {
            // Overdraft case: the fee is deducted on top of the amount
            self.balance -= amount + self.overdraft_fee;
            let mut record = TransactionRecord::new(
                &self.id,
                TransactionKind::WithdrawalOverdraft,
                amount,
                self.balance,
            );
            record.overdraft_fee = Some(self.overdraft_fee);
            Ok(record)
        }
    }
}

/// Savings accounts credit interest on every deposit
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsAccount {
    pub id: String,
    pub balance: Decimal,
    pub interest_rate: Decimal,
}

impl SavingsAccount {
    pub fn new(id: &str, balance: Decimal) -> Self {
        Self {
            id: id.to_string(),
            balance,
            interest_rate: SAVINGS_INTEREST_RATE,
        }
    }

    fn apply_withdrawal(&mut self, amount: Decimal) -> Result<TransactionRecord, BankError> {
        if self.balance < amount {
            return Err(BankError::InsufficientBalance);
        }
        self.balance -= amount;
        Ok(TransactionRecord::new(
            &self.id,
            TransactionKind::Withdrawal,
            amount,
            self.balance,
        ))
    }
}

/// Loan accounts disburse against a pre-funded balance; a withdrawal deducts
/// the principal plus the interest for the whole duration up front.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanAccount {
    pub id: String,
    pub balance: Decimal,
    pub interest_rate: Decimal,
}

impl LoanAccount {
    pub fn new(id: &str, balance: Decimal) -> Self {
        Self {
            id: id.to_string(),
            balance,
            interest_rate: LOAN_INTEREST_RATE,
        }
    }

    fn apply_disbursement(
        &mut self,
        amount: Decimal,
        duration: Option<u32>,
    ) -> Result<TransactionRecord, BankError> {
        if self.balance < amount {
            return Err(BankError::InsufficientBalance);
        }
        let months = duration.ok_or(BankError::LoanDurationRequired)?;
        if months == 0 {
            return Err(BankError::InvalidLoanDuration);
        }
        // interest_rate is annual; charge the monthly rate over the term
        let total_interest =
            amount * self.interest_rate * Decimal::from(months) / Decimal::from(12);
        let total_amount = amount + total_interest;
        if self.balance < total_amount {
            return Err(BankError::InsufficientForLoan);
        }
        self.balance -= total_amount;
        let mut record = TransactionRecord::new(
            &self.id,
            TransactionKind::LoanDisbursement,
            amount,
            self.balance,
        );
        record.interest_earned = Some(total_interest);
        record.loan_duration = Some(months);
        Ok(record)
    }
}

/// An account owned by a customer. The id is the owning customer's id and is
/// shared by all of that customer's accounts; persisted snapshots are keyed
/// by (id, account type) instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Account {
    Checking(CheckingAccount),
    Savings(SavingsAccount),
    Loan(LoanAccount),
}

impl Account {
    pub fn id(&self) -> &str {
        match self {
            Account::Checking(acc) => &acc.id,
            Account::Savings(acc) => &acc.id,
            Account::Loan(acc) => &acc.id,
        }
    }

    pub fn balance(&self) -> Decimal {
        match self {
            Account::Checking(acc) => acc.balance,
            Account::Savings(acc) => acc.balance,
            Account::Loan(acc) => acc.balance,
        }
    }

    fn balance_mut(&mut self) -> &mut Decimal {
        match self {
            Account::Checking(acc) => &mut acc.balance,
            Account::Savings(acc) => &mut acc.balance,
            Account::Loan(acc) => &mut acc.balance,
        }
    }

    /// Type name as persisted in the account_type column
    pub fn type_name(&self) -> &'static str {
        match self {
            Account::Checking(_) => "Checking",
            Account::Savings(_) => "Savings",
            Account::Loan(_) => "Loan",
        }
    }

    /// Reports type and balance; no persistence side effect
    pub fn balance_enquiry(&self) -> (&'static str, Decimal) {
        (self.type_name(), self.balance())
    }

    /// Credits the amount. Savings accounts additionally credit interest on
    /// the deposited amount and record it. Base behavior performs no
    /// negativity check on the amount.
    pub fn deposit(
        &mut self,
        amount: Decimal,
        stores: &Stores,
    ) -> Result<TransactionRecord, BankError> {
        let record = match self {
            Account::Savings(acc) => {
                let interest_earned = amount * acc.interest_rate;
                acc.balance += amount + interest_earned;
                let mut record = TransactionRecord::new(
                    &acc.id,
                    TransactionKind::DepositWithInterest,
                    amount,
                    acc.balance,
                );
                record.interest_earned = Some(interest_earned);
                record
            }
            Account::Checking(_) | Account::Loan(_) => {
                *self.balance_mut() += amount;
                TransactionRecord::new(self.id(), TransactionKind::Deposit, amount, self.balance())
            }
        };
        self.persist(&record, stores);
        Ok(record)
    }

    /// Applies the variant's withdrawal policy. `loan_duration` is the term
    /// in months and is only read by loan accounts. Refusals short-circuit
    /// before any mutation or persistence.
    pub fn withdraw(
        &mut self,
        amount: Decimal,
        loan_duration: Option<u32>,
        stores: &Stores,
    ) -> Result<TransactionRecord, BankError> {
        let record = match self {
            Account::Checking(acc) => acc.apply_withdrawal(amount)?,
            Account::Savings(acc) => acc.apply_withdrawal(amount)?,
            Account::Loan(acc) => acc.apply_disbursement(amount, loan_duration)?,
        };
        self.persist(&record, stores);
        Ok(record)
    }

    /// Moves the amount directly between the two balances; per-type
    /// withdrawal rules do not apply to transfers. Each side gets its own
    /// snapshot save and log append, so the two stores can diverge if the
    /// process dies in between.
    pub fn transfer_funds(
        &mut self,
        recipient: &mut Account,
        amount: Decimal,
        stores: &Stores,
    ) -> Result<(TransactionRecord, TransactionRecord), BankError> {
        if self.balance() < amount {
            return Err(BankError::InsufficientBalance);
        }
        *self.balance_mut() -= amount;
        *recipient.balance_mut() += amount;

        let mut outgoing = TransactionRecord::new(
            self.id(),
            TransactionKind::TransferOut,
            amount,
            self.balance(),
        );
        outgoing.related_account = Some(recipient.id().to_string());
        let mut incoming = TransactionRecord::new(
            recipient.id(),
            TransactionKind::TransferIn,
            amount,
            recipient.balance(),
        );
        incoming.related_account = Some(self.id().to_string());

        self.persist(&outgoing, stores);
        recipient.persist(&incoming, stores);
        Ok((outgoing, incoming))
    }

    /// Snapshot save followed by one log append. A failed write is logged
    /// and the in-memory mutation is kept, so memory and disk can diverge on
    /// I/O failure.
    fn persist(&self, record: &TransactionRecord, stores: &Stores) {
        if let Err(e) = stores.accounts.save(self) {
            warn!(account_id = self.id(), "failed to save account snapshot: {e}");
        }
        if let Err(e) = stores.transactions.append(record) {
            warn!(account_id = self.id(), "failed to append transaction: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::{Account, CheckingAccount, LoanAccount, SavingsAccount};
    use crate::error::BankError;
    use crate::test::utils::temp_stores;
    use crate::transaction::TransactionKind;

    #[test]
    fn tst_checking_creation_derives_limit_and_fee() {
        let acc = CheckingAccount::new("1", dec!(1000));
        assert_eq!(acc.credit_limit, dec!(-500));
        assert_eq!(acc.overdraft_fee, dec!(20));
    }

    #[test]
    fn tst_deposit_adds_amount() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Checking(CheckingAccount::new("1", dec!(100)));
        let record = account.deposit(dec!(50), &stores).unwrap();
        assert_eq!(account.balance(), dec!(150));
        assert_eq!(record.transaction_type, TransactionKind::Deposit);
        assert_eq!(record.balance_after, dec!(150));
        assert_eq!(record.interest_earned, None);
    }

    #[test]
    fn tst_deposit_accepts_negative_amounts() {
        // No negativity check on the base deposit path
        let (_dir, stores) = temp_stores();
        let mut account = Account::Loan(LoanAccount::new("1", dec!(100)));
        account.deposit(dec!(-40), &stores).unwrap();
        assert_eq!(account.balance(), dec!(60));
    }

    #[test]
    fn tst_savings_deposit_credits_interest() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Savings(SavingsAccount::new("1", dec!(500)));
        let record = account.deposit(dec!(100), &stores).unwrap();
        assert_eq!(account.balance(), dec!(602), "2% interest on the deposit");
        assert_eq!(record.transaction_type, TransactionKind::DepositWithInterest);
        assert_eq!(record.interest_earned, Some(dec!(2)));
    }

    #[test]
    fn tst_mutation_persists_snapshot_and_one_record() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Savings(SavingsAccount::new("9", dec!(10)));
        account.deposit(dec!(100), &stores).unwrap();

        let persisted = stores.accounts.accounts_for("9").unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].balance(), dec!(112));
        let log = stores.transactions.read_all().unwrap();
        assert_eq!(log.len(), 1, "one log row per successful mutation");
    }

    #[test]
    fn tst_checking_withdrawal_within_balance() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Checking(CheckingAccount::new("1", dec!(100)));
        let record = account.withdraw(dec!(40), None, &stores).unwrap();
        assert_eq!(account.balance(), dec!(60));
        assert_eq!(record.transaction_type, TransactionKind::Withdrawal);
        assert_eq!(record.overdraft_fee, None, "no fee when staying positive");
    }

    #[test]
    fn tst_checking_withdrawal_into_overdraft_charges_fee() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Checking(CheckingAccount::new("1", dec!(1000)));
        let record = account.withdraw(dec!(1200), None, &stores).unwrap();
        assert_eq!(
            account.balance(),
            dec!(-220),
            "1000 - 1200 - fee 20, still within the -500 limit"
        );
        assert_eq!(record.transaction_type, TransactionKind::WithdrawalOverdraft);
        assert_eq!(record.overdraft_fee, Some(dec!(20)));
    }

    #[test]
    fn tst_checking_withdrawal_past_credit_limit_is_refused() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Checking(CheckingAccount::new("1", dec!(1000)));
        let res = account.withdraw(dec!(1600), None, &stores);
        assert_eq!(res.unwrap_err(), BankError::ExceedsCreditLimit);
        assert_eq!(account.balance(), dec!(1000), "refusal leaves balance unchanged");
        assert_eq!(stores.transactions.read_all().unwrap().len(), 0);
    }

    #[test]
    fn tst_savings_withdrawal_requires_sufficient_balance() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Savings(SavingsAccount::new("1", dec!(50)));
        let res = account.withdraw(dec!(51), None, &stores);
        assert_eq!(res.unwrap_err(), BankError::InsufficientBalance);

        account.withdraw(dec!(50), None, &stores).unwrap();
        assert_eq!(account.balance(), dec!(0));
    }

    #[test]
    fn tst_loan_disbursement_deducts_principal_plus_interest() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Loan(LoanAccount::new("1", dec!(10000)));
        let record = account.withdraw(dec!(5000), Some(12), &stores).unwrap();
        assert_eq!(account.balance(), dec!(4600), "5000 + 400 interest deducted");
        assert_eq!(record.transaction_type, TransactionKind::LoanDisbursement);
        assert_eq!(record.interest_earned, Some(dec!(400)));
        assert_eq!(record.loan_duration, Some(12));
    }

    #[test]
    fn tst_loan_disbursement_needs_a_positive_duration() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Loan(LoanAccount::new("1", dec!(10000)));
        assert_eq!(
            account.withdraw(dec!(5000), None, &stores).unwrap_err(),
            BankError::LoanDurationRequired
        );
        assert_eq!(
            account.withdraw(dec!(5000), Some(0), &stores).unwrap_err(),
            BankError::InvalidLoanDuration
        );
        assert_eq!(account.balance(), dec!(10000));
    }

    #[test]
    fn tst_loan_disbursement_refused_when_interest_exceeds_balance() {
        let (_dir, stores) = temp_stores();
        let mut account = Account::Loan(LoanAccount::new("1", dec!(5100)));
        // 5000 principal passes, but 5000 + 400 interest does not
        let res = account.withdraw(dec!(5000), Some(12), &stores);
        assert_eq!(res.unwrap_err(), BankError::InsufficientForLoan);
        assert_eq!(account.balance(), dec!(5100));

        let mut account = Account::Loan(LoanAccount::new("1", dec!(5100)));
        assert_eq!(
            account.withdraw(dec!(6000), Some(12), &stores).unwrap_err(),
            BankError::InsufficientBalance,
            "principal check comes first"
        );
    }

    #[test]
    fn tst_balance_enquiry_reads_without_side_effects() {
        let account = Account::Savings(SavingsAccount::new("1", dec!(500)));
        assert_eq!(account.balance_enquiry(), ("Savings", dec!(500)));
    }

    #[test]
    fn tst_transfer_moves_funds_and_logs_both_sides() {
        let (_dir, stores) = temp_stores();
        let mut sender = Account::Checking(CheckingAccount::new("1", dec!(300)));
        let mut recipient = Account::Savings(SavingsAccount::new("2", dec!(50)));
        let (outgoing, incoming) = sender
            .transfer_funds(&mut recipient, dec!(120), &stores)
            .unwrap();

        assert_eq!(sender.balance(), dec!(180));
        assert_eq!(
            recipient.balance(),
            dec!(170),
            "transfers credit directly, no savings interest"
        );
        assert_eq!(outgoing.transaction_type, TransactionKind::TransferOut);
        assert_eq!(outgoing.related_account.as_deref(), Some("2"));
        assert_eq!(incoming.transaction_type, TransactionKind::TransferIn);
        assert_eq!(incoming.related_account.as_deref(), Some("1"));

        let log = stores.transactions.read_all().unwrap();
        assert_eq!(log.len(), 2, "one record per side");
        assert_eq!(stores.accounts.accounts_for("1").unwrap()[0].balance(), dec!(180));
        assert_eq!(stores.accounts.accounts_for("2").unwrap()[0].balance(), dec!(170));
    }

    #[test]
    fn tst_transfer_refused_on_insufficient_balance() {
        let (_dir, stores) = temp_stores();
        let mut sender = Account::Savings(SavingsAccount::new("1", dec!(10)));
        let mut recipient = Account::Savings(SavingsAccount::new("2", dec!(0)));
        let res = sender.transfer_funds(&mut recipient, dec!(11), &stores);
        assert_eq!(res.unwrap_err(), BankError::InsufficientBalance);
        assert_eq!(sender.balance(), dec!(10));
        assert_eq!(recipient.balance(), dec!(0));
        assert_eq!(stores.transactions.read_all().unwrap().len(), 0);
    }
}
