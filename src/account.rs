use std::fmt;

use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

use crate::command::{BalanceAction, BalanceCommand};

pub type AccountId = u64;

#[derive(Debug, PartialEq, Eq)]
pub enum AccountEventKind {
    Deposited,
    Withdrawn,
}

#[derive(Debug)]
pub struct AccountEvent {
    balance: Decimal,
    kind: AccountEventKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid {action} amount")]
    InvalidAmount { action: BalanceAction },
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Balance overflow")]
    BalanceOverflow,
    #[error("Amount {amount} cannot be applied to the balance without rounding")]
    PrecisionLoss { amount: Decimal },
}

/// A single ledger account.
///
/// Accounts are handed out by value, so a copy held by a caller never
/// aliases the registry's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    balance: Decimal,
}

impl Account {
    pub fn new(id: AccountId) -> Self {
        Self::with_balance(id, Decimal::zero())
    }

    /// Pre-existing account, e.g. loaded from a seed file. The registry
    /// refuses seeds with a negative balance.
    pub fn with_balance(id: AccountId, balance: Decimal) -> Self {
        Self { id, balance }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Deposited | AccountEventKind::Withdrawn => {
                self.balance = event.balance;
            }
        }
    }

    pub fn handle_command(&self, command: &BalanceCommand) -> Result<AccountEvent, AccountError> {
        let amount = command.amount;
        if amount <= Decimal::zero() {
            return Err(AccountError::InvalidAmount {
                action: command.action,
            });
        }

        match command.action {
            BalanceAction::Deposit => {
                let balance = self
                    .balance
                    .checked_add(amount)
                    .ok_or(AccountError::BalanceOverflow)?;
                // rust_decimal rounds silently when the scales don't fit
                if balance - self.balance != amount || balance - amount != self.balance {
                    return Err(AccountError::PrecisionLoss { amount });
                }
                Ok(AccountEvent {
                    balance,
                    kind: AccountEventKind::Deposited,
                })
            }
            BalanceAction::Withdraw => {
                if self.balance < amount {
                    return Err(AccountError::InsufficientBalance);
                }
                let balance = self.balance - amount;
                if self.balance - balance != amount || balance + amount != self.balance {
                    return Err(AccountError::PrecisionLoss { amount });
                }
                Ok(AccountEvent {
                    balance,
                    kind: AccountEventKind::Withdrawn,
                })
            }
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.balance)
    }
}
