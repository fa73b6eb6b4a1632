use bank_ledger::{
    account::{Account, AccountError},
    command::{OpenAccountError, digit_count},
    registry::{AccountRegistry, RegistryError, in_memory_registry::InMemoryAccountRegistry},
};
use proptest::prelude::*;
use rust_decimal::Decimal;

const SEEDED: u64 = 1234567890;
const USERNAME: &str = "user1";

fn registry_with_balance(balance: u64) -> InMemoryAccountRegistry {
    InMemoryAccountRegistry::new(
        [Account::with_balance(SEEDED, Decimal::from(balance))],
        [USERNAME],
    )
}

fn valid_account_number() -> impl Strategy<Value = u64> {
    (1_000_000_000u64..=9_999_999_999).prop_filter("not seeded", |number| *number != SEEDED)
}

fn invalid_account_number() -> impl Strategy<Value = u64> {
    prop_oneof![0u64..=999_999_999, 10_000_000_000u64..=u64::MAX]
}

proptest! {
    #[test]
    fn created_accounts_are_empty(number in valid_account_number(), age in 18i64..=i64::MAX) {
        let mut registry = registry_with_balance(0);
        let acc = registry.create_account(USERNAME, age, number).unwrap();
        prop_assert_eq!(acc.id(), number);
        prop_assert_eq!(acc.balance(), Decimal::ZERO);
        prop_assert_eq!(digit_count(acc.id()), 10);
        prop_assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_username_always_rejected(
        username in "[a-z0-9_]{0,12}",
        age in any::<i64>(),
        number in any::<u64>(),
    ) {
        prop_assume!(username != USERNAME);
        let mut registry = registry_with_balance(0);
        let err = registry.create_account(&username, age, number).unwrap_err();
        prop_assert_eq!(err, RegistryError::OpenErr(OpenAccountError::InvalidUsername));
        prop_assert_eq!(registry.len(), 1);
    }

    #[test]
    fn underage_rejected(age in i64::MIN..18, number in valid_account_number()) {
        let mut registry = registry_with_balance(0);
        let err = registry.create_account(USERNAME, age, number).unwrap_err();
        prop_assert_eq!(err, RegistryError::OpenErr(OpenAccountError::UnderageUser));
        prop_assert_eq!(registry.len(), 1);
    }

    #[test]
    fn wrong_digit_count_rejected(number in invalid_account_number()) {
        let mut registry = registry_with_balance(0);
        let err = registry.create_account(USERNAME, 30, number).unwrap_err();
        prop_assert_eq!(err, RegistryError::OpenErr(OpenAccountError::InvalidAccountNumber));
    }

    #[test]
    fn second_creation_is_duplicate(number in valid_account_number()) {
        let mut registry = registry_with_balance(0);
        registry.create_account(USERNAME, 30, number).unwrap();
        let err = registry.create_account(USERNAME, 30, number).unwrap_err();
        prop_assert_eq!(err, RegistryError::OpenErr(OpenAccountError::DuplicateAccount));
        prop_assert_eq!(registry.len(), 2);
    }

    #[test]
    fn deposit_adds_amount(balance in 0u64..1_000_000_000_000, amount in 1u64..1_000_000_000_000) {
        let mut registry = registry_with_balance(balance);
        let new_balance = registry.deposit(SEEDED, Decimal::from(amount)).unwrap();
        prop_assert_eq!(new_balance, Decimal::from(balance + amount));
        prop_assert_eq!(registry.check_balance(SEEDED).unwrap(), new_balance);
    }

    #[test]
    fn withdraw_subtracts_amount(balance in 1u64..1_000_000_000_000, seed in any::<u64>()) {
        let amount = 1 + seed % balance;
        let mut registry = registry_with_balance(balance);
        let new_balance = registry.withdraw(SEEDED, Decimal::from(amount)).unwrap();
        prop_assert_eq!(new_balance, Decimal::from(balance - amount));
        prop_assert!(new_balance >= Decimal::ZERO);
    }

    #[test]
    fn overdraw_leaves_balance(balance in 0u64..1_000_000_000_000, extra in 1u64..1_000_000) {
        let mut registry = registry_with_balance(balance);
        let err = registry.withdraw(SEEDED, Decimal::from(balance + extra)).unwrap_err();
        prop_assert_eq!(err, RegistryError::AccountErr(AccountError::InsufficientBalance));
        prop_assert_eq!(registry.check_balance(SEEDED).unwrap(), Decimal::from(balance));
    }

    #[test]
    fn missing_account_mutates_nothing(account_id in any::<u64>(), amount in 1u64..1_000_000) {
        prop_assume!(account_id != SEEDED);
        let mut registry = registry_with_balance(100);
        let not_found = || -> Result<Decimal, RegistryError> {
            Err(RegistryError::AccountNotFound { account_id })
        };
        prop_assert_eq!(registry.deposit(account_id, Decimal::from(amount)), not_found());
        prop_assert_eq!(registry.withdraw(account_id, Decimal::from(amount)), not_found());
        prop_assert_eq!(registry.check_balance(account_id), not_found());
        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(registry.check_balance(SEEDED).unwrap(), Decimal::from(100u64));
    }
}
