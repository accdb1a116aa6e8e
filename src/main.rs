mod account;
mod banking_system;
mod cli_io;
mod constants;
mod customer;
mod error;
mod store;
#[cfg(test)]
mod test;
mod transaction;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::banking_system::BankingSystem;
use crate::store::Stores;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data_dir = cli_io::parse_cli();
    let stores = Stores::open(&data_dir);
    if let Err(e) = stores.admin.ensure_exists() {
        warn!("failed to seed admin store: {e}");
    }

    let mut banking_system = BankingSystem::new(stores);
    cli_io::run_main_menu(&mut banking_system);
}
