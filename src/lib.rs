/// A single account and its balance rules.
/// Balance is modified using events, which are created by handling commands
pub mod account;

/// Commands validated before they reach an account, plus the rules for
/// opening one.
pub mod command;

/// Account registry interface, plus "in memory" implementation.
/// Owns accounts and verified usernames, and is the only way to mutate them.
///
/// NOTE: the trait leaves room for a registry backed by real storage; the
/// in memory one is all this crate needs.
pub mod registry;

/// CSV plumbing around the registry: operation feed, seed files and the
/// account snapshot. The `bank-ledger` binary and the integration tests
/// both drive the registry through it.
pub mod bin_utils;
