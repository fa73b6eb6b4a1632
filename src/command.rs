use std::{
    collections::{HashSet, hash_map::Entry},
    fmt,
};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;
use thiserror::Error;

use crate::account::{Account, AccountId};

pub const MINIMUM_AGE: i64 = 18;
pub const ACCOUNT_NUMBER_DIGITS: u32 = 10;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Open,
    Deposit,
    Withdraw,
    Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAction {
    Deposit,
    Withdraw,
}

impl fmt::Display for BalanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceAction::Deposit => f.write_str("deposit"),
            BalanceAction::Withdraw => f.write_str("withdrawal"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BalanceCommand {
    pub account_id: AccountId,
    pub action: BalanceAction,
    pub amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct OpenAccountCommand {
    pub account_id: AccountId,
}

/// Reasons an account cannot be opened, in the order they are checked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpenAccountError {
    #[error("Invalid username")]
    InvalidUsername,
    #[error("User is under 18")]
    UnderageUser,
    #[error("Invalid account number")]
    InvalidAccountNumber,
    #[error("Account already exists")]
    DuplicateAccount,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Field `{field}` is required for {kind:?}")]
    FieldRequired {
        field: &'static str,
        kind: OperationKind,
    },
}

/// Number of decimal digits in `number`, `0` counts as one digit.
pub fn digit_count(number: u64) -> u32 {
    number.checked_ilog10().map_or(1, |log| log + 1)
}

/// Floors a feed age to whole years. `age >= MINIMUM_AGE` holds for the
/// floored value exactly when it holds for the original one.
pub fn whole_years(age: Decimal) -> i64 {
    age.floor().to_i64().unwrap_or(if age.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

impl OpenAccountCommand {
    pub fn parse(
        usernames: &HashSet<String>,
        entry: &Entry<'_, AccountId, Account>,
        username: &str,
        age: i64,
    ) -> Result<Self, OpenAccountError> {
        if !usernames.contains(username) {
            return Err(OpenAccountError::InvalidUsername);
        }
        if age < MINIMUM_AGE {
            return Err(OpenAccountError::UnderageUser);
        }
        if digit_count(*entry.key()) != ACCOUNT_NUMBER_DIGITS {
            return Err(OpenAccountError::InvalidAccountNumber);
        }
        let Entry::Vacant(entry) = entry else {
            return Err(OpenAccountError::DuplicateAccount);
        };
        Ok(Self {
            account_id: *entry.key(),
        })
    }
}

/// Operation read from an external feed, with its required fields present.
#[derive(Debug, Clone)]
pub enum LedgerCommand {
    Open {
        username: String,
        age: i64,
        account_id: AccountId,
    },
    ChangeBalance(BalanceCommand),
    Inquiry {
        account_id: AccountId,
    },
}

impl LedgerCommand {
    pub fn parse_command(
        kind: OperationKind,
        account_id: AccountId,
        username: Option<String>,
        age: Option<Decimal>,
        amount: Option<Decimal>,
    ) -> Result<Self, CommandError> {
        let required = |field| CommandError::FieldRequired { field, kind };
        match kind {
            OperationKind::Open => Ok(Self::Open {
                username: username.ok_or_else(|| required("username"))?,
                age: whole_years(age.ok_or_else(|| required("age"))?),
                account_id,
            }),
            OperationKind::Deposit => Ok(Self::ChangeBalance(BalanceCommand {
                account_id,
                action: BalanceAction::Deposit,
                amount: amount.ok_or_else(|| required("amount"))?,
            })),
            OperationKind::Withdraw => Ok(Self::ChangeBalance(BalanceCommand {
                account_id,
                action: BalanceAction::Withdraw,
                amount: amount.ok_or_else(|| required("amount"))?,
            })),
            OperationKind::Balance => Ok(Self::Inquiry { account_id }),
        }
    }
}
