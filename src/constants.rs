use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Store file names, relative to the data directory given on the cli
pub const ACCOUNTS_FILE: &str = "accounts.csv";
pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const ADMIN_FILE: &str = "admin.csv";

/// Timestamp format used in the transaction log
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Annual interest credited on savings deposits
pub const SAVINGS_INTEREST_RATE: Decimal = dec!(0.02);

/// Annual interest charged on loan disbursements
pub const LOAN_INTEREST_RATE: Decimal = dec!(0.08);

/// Fraction of the opening balance a checking account may go negative by
pub const CREDIT_LIMIT_RATIO: Decimal = dec!(0.5);

/// Fraction of the opening balance charged as the overdraft fee
pub const OVERDRAFT_FEE_RATIO: Decimal = dec!(0.02);

/// Admin password assumed when admin.csv is absent or unreadable
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
