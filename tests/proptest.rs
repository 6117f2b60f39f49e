// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Property-based tests for the account.
//!
//! These tests verify invariants that should hold for any sequence of
//! operations on a single thread.

use bank_account_rs::{Account, Amount, MemorySink, RecordKind, TransactionError};
use proptest::prelude::*;
use std::sync::Arc;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate a positive amount.
fn arb_amount() -> impl Strategy<Value = Amount> {
    1i64..=100_000i64
}

/// Generate any amount, including zero and negatives.
fn arb_signed_amount() -> impl Strategy<Value = Amount> {
    -100_000i64..=100_000i64
}

#[derive(Debug, Clone)]
enum Op {
    Deposit(Amount),
    Withdraw(Amount),
    Transfer(Amount),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_amount().prop_map(Op::Deposit),
        arb_amount().prop_map(Op::Withdraw),
        arb_amount().prop_map(Op::Transfer),
    ]
}

fn quiet_account() -> Account {
    Account::with_sink(Arc::new(MemorySink::new()))
}

// =============================================================================
// Deposit Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Final balance is the sum of deposits, with one record per deposit in call order.
    #[test]
    fn deposits_sum_to_balance(
        amounts in prop::collection::vec(arb_signed_amount(), 1..30),
    ) {
        let account = quiet_account();
        let expected: Amount = amounts.iter().sum();

        for amount in &amounts {
            account.deposit(*amount).unwrap();
        }

        prop_assert_eq!(account.balance(), expected);
        let history = account.history();
        prop_assert_eq!(history.len(), amounts.len());
        for (record, amount) in history.iter().zip(&amounts) {
            prop_assert_eq!(record.kind(), RecordKind::Deposited);
            prop_assert_eq!(record.amount(), *amount);
        }
    }
}

// =============================================================================
// Withdrawal Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A covered withdrawal debits exactly its amount and appends one record.
    #[test]
    fn covered_withdrawal_debits_exactly(
        deposit in arb_amount(),
        fraction in 0.0f64..=1.0,
    ) {
        let account = quiet_account();
        account.deposit(deposit).unwrap();
        let amount = ((deposit as f64) * fraction) as Amount;

        prop_assert_eq!(account.withdraw(amount), Ok(deposit - amount));
        prop_assert_eq!(account.balance(), deposit - amount);
        prop_assert_eq!(account.history_len(), 2);
    }

    /// An uncovered withdrawal leaves balance and history unchanged.
    #[test]
    fn uncovered_withdrawal_is_noop(
        deposit in arb_amount(),
        excess in arb_amount(),
    ) {
        let account = quiet_account();
        account.deposit(deposit).unwrap();

        let result = account.withdraw(deposit + excess);

        prop_assert_eq!(
            result,
            Err(TransactionError::InsufficientFunds {
                requested: deposit + excess,
                available: deposit,
            })
        );
        prop_assert_eq!(account.balance(), deposit);
        prop_assert_eq!(account.history_len(), 1);
    }

    /// A funded blocking withdrawal behaves like a plain withdrawal.
    #[test]
    fn funded_withdraw_wait_matches_withdraw(
        deposit in arb_amount(),
        fraction in 0.0f64..=1.0,
    ) {
        let amount = ((deposit as f64) * fraction) as Amount;

        let plain = quiet_account();
        plain.deposit(deposit).unwrap();
        let plain_balance = plain.withdraw(amount).unwrap();

        let waited = quiet_account();
        waited.deposit(deposit).unwrap();
        let waited_balance = waited.withdraw_wait(amount).unwrap();

        prop_assert_eq!(plain_balance, waited_balance);
        prop_assert_eq!(plain.history_len(), waited.history_len());
        let last = waited.history().pop().unwrap();
        prop_assert_eq!(last.kind(), RecordKind::WithdrawnWaited);
        prop_assert_eq!(last.amount(), amount);
    }
}

// =============================================================================
// Sequence Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// With positive amounts the balance never goes negative, transfers
    /// conserve the pair's total, and failed operations record nothing.
    #[test]
    fn operation_sequences_keep_invariants(
        ops in prop::collection::vec(arb_op(), 1..50),
    ) {
        let account = quiet_account();
        let peer = quiet_account();
        let mut deposited: Amount = 0;
        let mut withdrawn: Amount = 0;
        let mut records = 0;

        for op in ops {
            let before = account.balance();
            match op {
                Op::Deposit(amount) => {
                    account.deposit(amount).unwrap();
                    deposited += amount;
                    records += 1;
                }
                Op::Withdraw(amount) => match account.withdraw(amount) {
                    Ok(_) => {
                        withdrawn += amount;
                        records += 1;
                    }
                    Err(_) => {
                        prop_assert_eq!(account.balance(), before);
                    }
                },
                Op::Transfer(amount) => {
                    if account.transfer(&peer, amount).is_ok() {
                        records += 1;
                    } else {
                        prop_assert_eq!(account.balance(), before);
                    }
                }
            }
            prop_assert!(account.balance() >= 0);
            prop_assert_eq!(account.balance() + peer.balance(), deposited - withdrawn);
            prop_assert_eq!(account.history_len(), records);
        }
    }
}
