use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountId},
    command::OpenAccountError,
};

pub mod in_memory_registry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid account ID {account_id}")]
    AccountNotFound { account_id: AccountId },
    #[error(transparent)]
    OpenErr(#[from] OpenAccountError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Every operation either applies completely or fails without touching
/// any account.
pub trait AccountRegistry {
    /// Opens an empty account for a verified adult user.
    fn create_account(
        &mut self,
        username: &str,
        age: i64,
        account_number: AccountId,
    ) -> Result<Account, RegistryError>;

    /// Returns the balance after the deposit.
    fn deposit(&mut self, account_id: AccountId, amount: Decimal) -> Result<Decimal, RegistryError>;

    /// Returns the balance after the withdrawal.
    fn withdraw(
        &mut self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<Decimal, RegistryError>;

    fn check_balance(&self, account_id: AccountId) -> Result<Decimal, RegistryError>;
}
