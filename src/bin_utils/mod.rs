//! Runs a CSV operation feed against an [`InMemoryAccountRegistry`] and
//! reports every rejected row by line number.

use std::io::{Read, Write};

use crate::{
    command::{BalanceAction, CommandError, LedgerCommand},
    registry::{AccountRegistry, RegistryError, in_memory_registry::InMemoryAccountRegistry},
};
use anyhow::Result;
use csv_parser::{CsvOperationParser, Operation};
use csv_printer::{AccountRecord, print_accounts};
use thiserror::Error;
use tracing::info;
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed row: {0}")]
    ParseErr(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    RegistryErr(#[from] RegistryError),
}

pub struct Service<'w, R, W: 'w> {
    pub registry: InMemoryAccountRegistry,
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    /// Applies every operation from `input`, then writes the account
    /// snapshot sorted by account number.
    pub fn run(self) -> Result<()> {
        let Self {
            mut registry,
            input,
            output,
            mut error_printer,
        } = self;

        for (line, row) in CsvOperationParser::new(input) {
            let result = row
                .map_err(OperationError::from)
                .and_then(|row| process_operation(&mut registry, row));
            if let Err(err) = result {
                error_printer(line, err);
            }
        }

        let mut accounts: Vec<AccountRecord> = registry.accounts().map(Into::into).collect();
        accounts.sort_by_key(|acc| acc.account);
        print_accounts(output, accounts.into_iter())
    }
}

pub fn process_operation<T>(registry: &mut T, operation: Operation) -> Result<(), OperationError>
where
    T: AccountRegistry,
{
    let command = LedgerCommand::parse_command(
        operation.kind,
        operation.account,
        operation.username,
        operation.age,
        operation.amount,
    )?;
    match command {
        LedgerCommand::Open {
            username,
            age,
            account_id,
        } => {
            let acc = registry.create_account(&username, age, account_id)?;
            info!(%acc, "Opened account");
        }
        LedgerCommand::ChangeBalance(command) => {
            let balance = match command.action {
                BalanceAction::Deposit => registry.deposit(command.account_id, command.amount)?,
                BalanceAction::Withdraw => registry.withdraw(command.account_id, command.amount)?,
            };
            info!(
                account_id = command.account_id,
                action = %command.action,
                amount = %command.amount,
                %balance,
                "Balance changed"
            );
        }
        LedgerCommand::Inquiry { account_id } => {
            let balance = registry.check_balance(account_id)?;
            info!(account_id, %balance, "Balance inquiry");
        }
    }
    Ok(())
}
