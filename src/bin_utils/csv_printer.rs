use std::io::Write;

use crate::account::{Account, AccountId};
use csv::Writer;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One `account,balance` row, shared by the snapshot output and the seed input.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account: AccountId,
    pub balance: Decimal,
}

impl From<Account> for AccountRecord {
    fn from(acc: Account) -> Self {
        Self {
            account: acc.id(),
            balance: acc.balance(),
        }
    }
}

pub fn print_accounts<W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRecord>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        if let Err(err) = writer.serialize(acc) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
