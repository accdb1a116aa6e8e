use thiserror::Error;

/// Input validation failures and business-rule refusals. None of these leave
/// any account or store state changed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("insufficient funds - exceeds credit limit")]
    ExceedsCreditLimit,
    #[error("loan withdrawals need a duration")]
    LoanDurationRequired,
    #[error("loan duration must be a positive number of months")]
    InvalidLoanDuration,
    #[error("insufficient balance for loan with interest")]
    InsufficientForLoan,
    #[error("password must be at least 6 characters long and contain a digit")]
    WeakPassword,
    #[error("invalid current password")]
    InvalidAdminPassword,
    #[error("customer not found")]
    UnknownCustomer,
    #[error("account not found")]
    UnknownAccount,
    #[error("cannot transfer to the same account")]
    SameAccount,
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Failures reading or writing one of the csv stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown account type: {0}")]
    UnknownAccountType(String),
}
