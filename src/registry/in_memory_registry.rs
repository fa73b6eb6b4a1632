use std::collections::{HashMap, HashSet, hash_map::Entry};

use rust_decimal::{Decimal, prelude::Zero};
use tracing::{debug, warn};

use crate::{
    account::{Account, AccountId},
    command::{BalanceAction, BalanceCommand, OpenAccountCommand},
};

use super::{AccountRegistry, RegistryError};

#[derive(Debug, Default)]
pub struct InMemoryAccountRegistry {
    usernames: HashSet<String>,
    accounts: HashMap<AccountId, Account>,
}

impl InMemoryAccountRegistry {
    /// Builds a registry from pre-existing state.
    ///
    /// Seed ids are trusted. A seed with a negative balance is dropped, and
    /// when the same id appears more than once the first account wins.
    pub fn new<A, U>(accounts: A, usernames: U) -> Self
    where
        A: IntoIterator<Item = Account>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        let mut registry = Self {
            usernames: usernames.into_iter().map(Into::into).collect(),
            accounts: HashMap::new(),
        };
        for account in accounts {
            if account.balance() < Decimal::zero() {
                warn!(
                    account_id = account.id(),
                    balance = %account.balance(),
                    "Dropping seed account with negative balance"
                );
                continue;
            }
            match registry.accounts.entry(account.id()) {
                Entry::Vacant(entry) => {
                    entry.insert(account);
                }
                Entry::Occupied(_) => {
                    warn!(account_id = account.id(), "Dropping duplicate seed account");
                }
            }
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, account_id: AccountId) -> Option<Account> {
        self.accounts.get(&account_id).copied()
    }

    /// Copies of all accounts, in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = Account> + '_ {
        self.accounts.values().copied()
    }

    fn change_balance(&mut self, command: BalanceCommand) -> Result<Decimal, RegistryError> {
        let acc = self
            .accounts
            .get_mut(&command.account_id)
            .ok_or(RegistryError::AccountNotFound {
                account_id: command.account_id,
            })?;
        let evt = acc.handle_command(&command)?;
        acc.apply(&evt);
        debug!(
            account_id = command.account_id,
            action = %command.action,
            amount = %command.amount,
            balance = %acc.balance(),
            "Balance changed"
        );
        Ok(acc.balance())
    }
}

impl AccountRegistry for InMemoryAccountRegistry {
    fn create_account(
        &mut self,
        username: &str,
        age: i64,
        account_number: AccountId,
    ) -> Result<Account, RegistryError> {
        let entry = self.accounts.entry(account_number);
        let command = OpenAccountCommand::parse(&self.usernames, &entry, username, age)?;
        let account = Account::new(command.account_id);
        // insert only when every check passed
        entry.insert_entry(account);
        debug!(account_id = command.account_id, "Account created");
        Ok(account)
    }

    fn deposit(
        &mut self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<Decimal, RegistryError> {
        self.change_balance(BalanceCommand {
            account_id,
            action: BalanceAction::Deposit,
            amount,
        })
    }

    fn withdraw(
        &mut self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<Decimal, RegistryError> {
        self.change_balance(BalanceCommand {
            account_id,
            action: BalanceAction::Withdraw,
            amount,
        })
    }

    fn check_balance(&self, account_id: AccountId) -> Result<Decimal, RegistryError> {
        self.accounts
            .get(&account_id)
            .map(Account::balance)
            .ok_or(RegistryError::AccountNotFound { account_id })
    }
}
