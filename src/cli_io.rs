use std::io::{self, Write};

use rust_decimal::Decimal;

use crate::account::{Account, CheckingAccount, LoanAccount, SavingsAccount};
use crate::banking_system::BankingSystem;
use crate::customer::Customer;
use crate::transaction::{TransactionKind, TransactionRecord};

/// Data directory for the csv stores; first cli argument, defaulting to the
/// working directory.
pub fn parse_cli() -> String {
    std::env::args().nth(1).unwrap_or_else(|| ".".to_string())
}

fn prompt(label: &str) -> String {
    print!("{label}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

/// Amounts must parse as decimals; anything else is reported and the
/// operation is abandoned before it reaches the core.
fn prompt_amount(label: &str) -> Option<Decimal> {
    match prompt(label).parse::<Decimal>() {
        Ok(amount) => Some(amount),
        Err(_) => {
            println!("Please enter amount in digits");
            None
        }
    }
}

pub fn run_main_menu(banking_system: &mut BankingSystem) {
    println!("╔═══════════════════════════════════════════╗");
    println!("║           ONLINE BANKING SYSTEM           ║");
    println!("╚═══════════════════════════════════════════╝");

    loop {
        println!("\nMAIN MENU");
        println!("1. Customer Login");
        println!("2. Customer Registration");
        println!("3. Admin Login");
        println!("4. Exit");

        match prompt("Enter your choice (1-4): ").as_str() {
            "1" => customer_login_menu(banking_system),
            "2" => registration_menu(banking_system),
            "3" => admin_menu(banking_system),
            "4" => {
                println!("Thank you for using our banking system! Goodbye!");
                break;
            }
            _ => println!("Invalid choice! Please try again."),
        }
    }
}

fn customer_login_menu(banking_system: &mut BankingSystem) {
    println!("\n--- CUSTOMER LOGIN ---");
    let customer_id = prompt("Enter Customer ID: ");
    let password = prompt("Enter Password: ");
    match banking_system.customer_login(&customer_id, &password) {
        Some(customer_idx) => customer_menu(banking_system, customer_idx),
        None => println!("Invalid Customer ID or Password!"),
    }
}

fn registration_menu(banking_system: &mut BankingSystem) {
    println!("\n--- CUSTOMER REGISTRATION ---");
    println!("Password must be at least 6 characters long and contain a digit");
    let password = prompt("Set your password: ");
    let first_name = prompt("Enter first name: ");
    let last_name = prompt("Enter last name: ");
    let address = prompt("Enter address: ");
    match banking_system.create_customer(&password, &first_name, &last_name, &address) {
        Ok(customer_id) => {
            println!("Your Customer ID is: {customer_id}");
            println!("Registration successful! You can now login.");
        }
        Err(e) => println!("Registration failed: {e}"),
    }
}

fn customer_menu(banking_system: &mut BankingSystem, customer_idx: usize) {
    println!("╔═══════════════════════════════════════════╗");
    println!("║             CUSTOMER PORTAL               ║");
    println!("╚═══════════════════════════════════════════╝");
    {
        let customer = &banking_system.customers[customer_idx];
        println!("Welcome, {} {}!", customer.first_name, customer.last_name);
    }

    loop {
        println!("\nCUSTOMER MENU");
        println!("1. Create New Account");
        println!("2. Deposit Money");
        println!("3. Withdraw Money");
        println!("4. Check Balance");
        println!("5. Transfer Funds");
        println!("6. View My Transactions");
        println!("7. Logout");

        match prompt("Enter your choice (1-7): ").as_str() {
            "1" => open_account_menu(banking_system, customer_idx),
            "2" => deposit_menu(banking_system, customer_idx),
            "3" => withdraw_menu(banking_system, customer_idx),
            "4" => balance_menu(banking_system, customer_idx),
            "5" => transfer_menu(banking_system, customer_idx),
            "6" => {
                let customer_id = banking_system.customers[customer_idx].id.clone();
                match banking_system.transaction_history(Some(&customer_id)) {
                    Ok(records) => print_history(&records),
                    Err(e) => println!("Error viewing transactions: {e}"),
                }
            }
            "7" => {
                println!("Logged out successfully!");
                break;
            }
            _ => println!("Invalid choice!"),
        }
    }
}

fn open_account_menu(banking_system: &mut BankingSystem, customer_idx: usize) {
    println!("\nSelect account type:");
    println!("1. Checking Account");
    println!("2. Savings Account");
    println!("3. Loan Account");
    let make: fn(&str, Decimal) -> Account = match prompt("Enter your choice (1-3): ").as_str() {
        "1" => |id, balance| Account::Checking(CheckingAccount::new(id, balance)),
        "2" => |id, balance| Account::Savings(SavingsAccount::new(id, balance)),
        "3" => |id, balance| Account::Loan(LoanAccount::new(id, balance)),
        _ => {
            println!("Invalid choice!");
            return;
        }
    };
    let balance = match prompt_amount("Enter initial balance: ") {
        Some(balance) => balance,
        None => return,
    };
    let customer_id = banking_system.customers[customer_idx].id.clone();
    let account = make(&customer_id, balance);
    let type_name = account.type_name();
    match banking_system.open_account(customer_idx, account) {
        Ok(()) => println!("{type_name} account created successfully!"),
        Err(e) => println!("Error creating account: {e}"),
    }
}

fn deposit_menu(banking_system: &mut BankingSystem, customer_idx: usize) {
    let account_idx = match select_account(&banking_system.customers[customer_idx]) {
        Some(i) => i,
        None => return,
    };
    let amount = match prompt_amount("Enter deposit amount: ") {
        Some(amount) => amount,
        None => return,
    };
    let account = &mut banking_system.customers[customer_idx].accounts[account_idx];
    match account.deposit(amount, &banking_system.stores) {
        Ok(record) => match record.transaction_type {
            TransactionKind::DepositWithInterest => println!(
                "Deposited {} with interest {}. New balance: {}",
                record.amount,
                record.interest_earned.unwrap_or_default(),
                record.balance_after
            ),
            _ => println!(
                "Deposited {} successfully. New balance: {}",
                record.amount, record.balance_after
            ),
        },
        Err(e) => println!("{e}"),
    }
}

fn withdraw_menu(banking_system: &mut BankingSystem, customer_idx: usize) {
    let account_idx = match select_account(&banking_system.customers[customer_idx]) {
        Some(i) => i,
        None => return,
    };
    let amount = match prompt_amount("Enter withdrawal amount: ") {
        Some(amount) => amount,
        None => return,
    };
    let is_loan = matches!(
        banking_system.customers[customer_idx].accounts[account_idx],
        Account::Loan(_)
    );
    let loan_duration = if is_loan {
        match prompt("Enter loan duration in months: ").parse::<u32>() {
            Ok(months) => Some(months),
            Err(_) => {
                println!("Please enter valid number for loan duration.");
                return;
            }
        }
    } else {
        None
    };
    let account = &mut banking_system.customers[customer_idx].accounts[account_idx];
    match account.withdraw(amount, loan_duration, &banking_system.stores) {
        Ok(record) => print_withdrawal(&record),
        Err(e) => println!("{e}"),
    }
}

fn print_withdrawal(record: &TransactionRecord) {
    match record.transaction_type {
        TransactionKind::WithdrawalOverdraft => println!(
            "Withdrew {} with overdraft fee {}",
            record.amount,
            record.overdraft_fee.unwrap_or_default()
        ),
        TransactionKind::LoanDisbursement => println!(
            "Loan of {} disbursed! Total with interest: {}",
            record.amount,
            record.amount + record.interest_earned.unwrap_or_default()
        ),
        _ => println!("Withdrew {} successfully!", record.amount),
    }
}

fn balance_menu(banking_system: &BankingSystem, customer_idx: usize) {
    let customer = &banking_system.customers[customer_idx];
    if let Some(account_idx) = select_account(customer) {
        let (account_type, balance) = customer.accounts[account_idx].balance_enquiry();
        println!("Account Type: {account_type}");
        println!("Balance: {balance}");
    }
}

fn transfer_menu(banking_system: &mut BankingSystem, customer_idx: usize) {
    let sender_acct = match select_account(&banking_system.customers[customer_idx]) {
        Some(i) => i,
        None => return,
    };
    let recipient_id = prompt("Enter recipient Customer ID: ");
    let recip_cust = match banking_system.customer_position(&recipient_id) {
        Some(i) => i,
        None => {
            println!("Recipient not found!");
            return;
        }
    };
    let recip_acct = match select_account(&banking_system.customers[recip_cust]) {
        Some(i) => i,
        None => return,
    };
    let amount = match prompt_amount("Enter transfer amount: ") {
        Some(amount) => amount,
        None => return,
    };
    match banking_system.transfer_funds((customer_idx, sender_acct), (recip_cust, recip_acct), amount)
    {
        Ok((outgoing, _)) => println!(
            "Transferred {} to {} successfully!",
            outgoing.amount,
            outgoing.related_account.as_deref().unwrap_or("")
        ),
        Err(e) => println!("{e}"),
    }
}

/// Numbered account picker; returns the index into the customer's accounts
fn select_account(customer: &Customer) -> Option<usize> {
    if customer.accounts.is_empty() {
        println!("No accounts found for this customer!");
        return None;
    }
    println!("\nSelect an account:");
    for (i, account) in customer.accounts.iter().enumerate() {
        println!(
            "{}. {} Account - Balance: {}",
            i + 1,
            account.type_name(),
            account.balance()
        );
    }
    match prompt("Enter account number: ").parse::<usize>() {
        Ok(n) if n >= 1 && n <= customer.accounts.len() => Some(n - 1),
        _ => {
            println!("Invalid account number!");
            None
        }
    }
}

fn admin_menu(banking_system: &mut BankingSystem) {
    println!("╔═══════════════════════════════════════════╗");
    println!("║               ADMIN PORTAL                ║");
    println!("╚═══════════════════════════════════════════╝");
    let password = prompt("Enter admin password: ");
    if !banking_system.admin_login(&password) {
        println!("Invalid admin password!");
        return;
    }
    println!("Admin login successful!");

    loop {
        println!("\nADMIN MENU");
        println!("1. View All Customers");
        println!("2. Create New Customer");
        println!("3. View Transaction History");
        println!("4. Change Admin Password");
        println!("5. Logout");

        match prompt("Enter your choice (1-5): ").as_str() {
            "1" => {
                banking_system.load_customers_from_file();
                print_all_customers(&banking_system.customers);
            }
            "2" => registration_menu(banking_system),
            "3" => history_menu(banking_system),
            "4" => {
                let current = prompt("\nEnter current admin password: ");
                let new = prompt("Enter new admin password: ");
                match banking_system.change_admin_password(&current, &new) {
                    Ok(()) => println!("Admin password changed successfully!"),
                    Err(e) => println!("{e}"),
                }
            }
            "5" => {
                println!("Admin logged out!");
                break;
            }
            _ => println!("Invalid choice!"),
        }
    }
}

fn history_menu(banking_system: &BankingSystem) {
    println!("\n1. View All Transactions");
    println!("2. View Specific Customer Transactions");
    let records = match prompt("Enter choice (1-2): ").as_str() {
        "1" => banking_system.transaction_history(None),
        "2" => {
            let customer_id = prompt("Enter Customer ID: ");
            banking_system.transaction_history(Some(&customer_id))
        }
        _ => {
            println!("Invalid choice!");
            return;
        }
    };
    match records {
        Ok(records) => print_history(&records),
        Err(e) => println!("Error viewing transactions: {e}"),
    }
}

fn print_all_customers(customers: &[Customer]) {
    println!("\n{}", "=".repeat(60));
    println!("ALL CUSTOMERS INFORMATION");
    println!("{}", "=".repeat(60));
    if customers.is_empty() {
        println!("No customers found!");
        return;
    }
    for customer in customers {
        println!("\nCustomer ID: {}", customer.id);
        println!("Name: {} {}", customer.first_name, customer.last_name);
        println!("Address: {}", customer.address);
        println!("Accounts:");
        if customer.accounts.is_empty() {
            println!("  No accounts");
        }
        for account in &customer.accounts {
            match account {
                Account::Checking(acc) => println!(
                    "  - Checking Account: Balance: {}, Credit Limit: {}",
                    acc.balance, acc.credit_limit
                ),
                Account::Savings(acc) => println!(
                    "  - Savings Account: Balance: {}, Interest Rate: {}%",
                    acc.balance,
                    acc.interest_rate * Decimal::ONE_HUNDRED
                ),
                Account::Loan(acc) => println!(
                    "  - Loan Account: Balance: {}, Interest Rate: {}%",
                    acc.balance,
                    acc.interest_rate * Decimal::ONE_HUNDRED
                ),
            }
        }
        println!("{}", "-".repeat(40));
    }
}

fn print_history(records: &[TransactionRecord]) {
    if records.is_empty() {
        println!("No transactions found!");
        return;
    }
    println!("\n{}", "=".repeat(80));
    println!("TRANSACTION HISTORY");
    println!("{}", "=".repeat(80));
    for record in records {
        println!(
            "Account: {} | Type: {} | Amount: {} | Time: {}",
            record.account_id, record.transaction_type, record.amount, record.timestamp
        );
        if let Some(interest) = record.interest_earned {
            println!("  Interest Earned: {interest}");
        }
        if let Some(fee) = record.overdraft_fee {
            println!("  Overdraft Fee: {fee}");
        }
        if let Some(months) = record.loan_duration {
            println!("  Loan Duration: {months} months");
        }
        if let Some(related) = &record.related_account {
            println!("  Related Account: {related}");
        }
        println!("{}", "-".repeat(50));
    }
}
