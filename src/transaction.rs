use std::fmt;

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::TIMESTAMP_FORMAT;

/// Balance-affecting events recorded in the transaction log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    DepositWithInterest,
    Withdrawal,
    WithdrawalOverdraft,
    TransferOut,
    TransferIn,
    LoanDisbursement,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::DepositWithInterest => "deposit_with_interest",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::WithdrawalOverdraft => "withdrawal_overdraft",
            TransactionKind::TransferOut => "transfer_out",
            TransactionKind::TransferIn => "transfer_in",
            TransactionKind::LoanDisbursement => "loan_disbursement",
        };
        f.write_str(name)
    }
}

/// One row of the append-only transaction log, immutable once appended.
/// The column set is the fixed superset across all kinds; optional columns
/// are only populated for the kinds that need them and serialize as empty
/// cells otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub account_id: String,
    pub transaction_type: TransactionKind,
    pub amount: Decimal,
    pub timestamp: String,
    pub balance_after: Decimal,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub interest_earned: Option<Decimal>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub overdraft_fee: Option<Decimal>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub loan_duration: Option<u32>,
    pub related_account: Option<String>,
}

impl TransactionRecord {
    /// Record with the optional columns left empty, timestamped now
    pub fn new(
        account_id: &str,
        transaction_type: TransactionKind,
        amount: Decimal,
        balance_after: Decimal,
    ) -> Self {
        Self {
            account_id: account_id.to_string(),
            transaction_type,
            amount,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            balance_after,
            interest_earned: None,
            overdraft_fee: None,
            loan_duration: None,
            related_account: None,
        }
    }
}
