use std::fs::File;

use anyhow::{Context, Result};
use bank_ledger::{
    bin_utils::{
        OperationError, Service,
        csv_parser::{parse_accounts, parse_usernames},
    },
    registry::in_memory_registry::InMemoryAccountRegistry,
};
use tracing_subscriber::EnvFilter;

fn open(filename: &str) -> Result<File> {
    File::open(filename).with_context(|| format!("Failed to open `{filename}`"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let operations = args
        .next()
        .context("Expected an operations file name as the first argument")?;
    let accounts = match args.next() {
        Some(filename) => parse_accounts(open(&filename)?)
            .with_context(|| format!("Failed to load accounts from `{filename}`"))?,
        None => Vec::new(),
    };
    let usernames = match args.next() {
        Some(filename) => parse_usernames(open(&filename)?)
            .with_context(|| format!("Failed to load usernames from `{filename}`"))?,
        None => Vec::new(),
    };

    let service = Service {
        registry: InMemoryAccountRegistry::new(accounts, usernames),
        input: open(&operations)?,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| {
            match err {
                OperationError::RegistryErr(err) => {
                    // rejected by business rules, the input itself is fine
                    tracing::info!(line, %err, "Operation rejected");
                }
                err => eprintln!("Error at line {line}: {err}"),
            }
        }),
    };
    service.run()
}
