use std::io::Read;

use crate::{
    account::{Account, AccountId},
    command::OperationKind,
};
use anyhow::Context;
use csv::{Position, StringRecord, StringRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::csv_printer::AccountRecord;

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub account: AccountId,
    pub username: Option<String>,
    pub age: Option<Decimal>,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct UsernameRecord {
    username: String,
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source)
}

/// Parses an operation list in CSV format.
///
/// Rows that fail to deserialize are yielded as errors, so the caller can
/// report them and keep going.
pub struct CsvOperationParser<R> {
    headers: Option<StringRecord>,
    records: StringRecordsIntoIter<R>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let mut reader = reader(source);
        let headers = reader.headers().ok().cloned();
        Self {
            headers,
            records: reader.into_records(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, Result<Operation, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.records.next()?;
        let position = match &row {
            Ok(record) => record.position(),
            Err(err) => err.position(),
        };
        let line = position.map_or(0, Position::line);
        Some((
            line,
            row.and_then(|record| record.deserialize(self.headers.as_ref())),
        ))
    }
}

/// Reads seed accounts with an `account,balance` header.
pub fn parse_accounts<R: Read>(source: R) -> anyhow::Result<Vec<Account>> {
    reader(source)
        .into_deserialize::<AccountRecord>()
        .map(|row| -> anyhow::Result<Account> {
            let rec = row.context("Failed to parse seed account")?;
            anyhow::ensure!(
                rec.balance >= Decimal::ZERO,
                "Seed account {} has a negative balance {}",
                rec.account,
                rec.balance
            );
            Ok(Account::with_balance(rec.account, rec.balance))
        })
        .collect()
}

/// Reads verified usernames with a `username` header.
pub fn parse_usernames<R: Read>(source: R) -> anyhow::Result<Vec<String>> {
    reader(source)
        .into_deserialize::<UsernameRecord>()
        .map(|row| {
            row.map(|rec| rec.username)
                .context("Failed to parse verified username")
        })
        .collect()
}
