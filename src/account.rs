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

//! Account management.
//!
//! An [`Account`] owns a balance and an append-only history, both guarded by a
//! single [`Mutex`]. A [`Condvar`] tied to that mutex lets
//! [`Account::withdraw_wait`] park until a deposit makes the balance large
//! enough.
//!
//! # Locking
//!
//! - Every read or write of the balance or history happens under the lock.
//! - Each operation emits its output line while still holding the lock, so
//!   the emitted lines of one account appear in commit order.
//! - [`Account::transfer`] releases its own lock before crediting the peer and
//!   re-acquires it afterwards. No thread ever holds two account locks, which
//!   keeps opposite-direction transfers from deadlocking. Between the debit
//!   and the peer's credit, the two balances sum to less than the pre-transfer
//!   total.
//!
//! # Overflow
//!
//! Amounts are not validated, but balance arithmetic is checked. An operation
//! whose result would not fit in an [`Amount`] fails with
//! [`TransactionError::AmountOverflow`] and leaves the account untouched.
//!
//! # Example
//!
//! ```
//! use bank_account_rs::{Account, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let account = Account::with_sink(sink.clone());
//! account.deposit(500).unwrap();
//! assert!(account.withdraw(700).is_err());
//! assert_eq!(account.withdraw(200), Ok(300));
//! assert_eq!(account.balance(), 300);
//! ```

use crate::base::{Amount, timestamp};
use crate::record::{Record, RecordKind};
use crate::sink::{OutputSink, StdoutSink};
use crate::TransactionError;
use parking_lot::{Condvar, Mutex, MutexGuard};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct AccountData {
    balance: Amount,
    history: Vec<Record>,
}

impl AccountData {
    fn new() -> Self {
        Self {
            balance: 0,
            history: Vec::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= 0,
            "Invariant violated: balance went negative after a debit: {}",
            self.balance
        );
    }

    /// Increases the balance unless the sum overflows.
    fn credit(&mut self, amount: Amount) -> Result<(), TransactionError> {
        self.balance = self.balance.checked_add(amount).ok_or(
            TransactionError::AmountOverflow {
                balance: self.balance,
                amount,
            },
        )?;
        Ok(())
    }

    /// Decreases the balance unless the difference overflows.
    fn debit(&mut self, amount: Amount) -> Result<(), TransactionError> {
        self.balance = self.balance.checked_sub(amount).ok_or(
            TransactionError::AmountOverflow {
                balance: self.balance,
                amount,
            },
        )?;
        self.assert_invariants();
        Ok(())
    }

    /// Decreases the balance if it covers `amount`.
    fn take(&mut self, amount: Amount) -> Result<(), TransactionError> {
        if amount > self.balance {
            return Err(TransactionError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.debit(amount)
    }

    /// Appends a record stamped with the current balance.
    fn append(&mut self, kind: RecordKind, amount: Amount) -> Record {
        let record = Record::new(kind, amount, self.balance);
        self.history.push(record.clone());
        record
    }
}

/// Ledger account.
pub struct Account {
    inner: Mutex<AccountData>,
    /// Signalled after every deposit.
    funds_available: Condvar,
    sink: Arc<dyn OutputSink>,
}

impl Account {
    /// Creates an empty account that reports to standard output.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(StdoutSink))
    }

    /// Creates an empty account that reports to `sink`.
    pub fn with_sink(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            inner: Mutex::new(AccountData::new()),
            funds_available: Condvar::new(),
            sink,
        }
    }

    /// Credits `amount` and wakes every blocked [`withdraw_wait`](Self::withdraw_wait).
    ///
    /// Amounts are not validated: a negative deposit lowers the balance.
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// [`TransactionError::AmountOverflow`] if the new balance does not fit.
    /// The account is left untouched and a failure line is emitted.
    pub fn deposit(&self, amount: Amount) -> Result<Amount, TransactionError> {
        let mut data = self.inner.lock();
        if let Err(e) = data.credit(amount) {
            self.reject("Deposit failed!", e);
            return Err(e);
        }
        let balance = self.commit(&mut data, RecordKind::Deposited, amount);
        self.funds_available.notify_all();
        Ok(balance)
    }

    /// Debits `amount` if the balance covers it.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InsufficientFunds`] if `amount` exceeds the balance.
    /// - [`TransactionError::AmountOverflow`] if the new balance does not fit.
    ///
    /// Either way the account is left untouched and a failure line is emitted.
    pub fn withdraw(&self, amount: Amount) -> Result<Amount, TransactionError> {
        let mut data = self.inner.lock();
        if let Err(e) = data.take(amount) {
            self.reject("Withdrawal failed!", e);
            return Err(e);
        }
        Ok(self.commit(&mut data, RecordKind::Withdrawn, amount))
    }

    /// Blocks until the balance covers `amount`, then debits it.
    ///
    /// The lock is released while parked. The predicate is re-checked after
    /// every wake-up, spurious or not. Never returns if the balance stays
    /// below `amount`.
    ///
    /// # Errors
    ///
    /// [`TransactionError::AmountOverflow`] if the debit does not fit, which
    /// only a large negative `amount` can cause. Nothing is debited.
    pub fn withdraw_wait(&self, amount: Amount) -> Result<Amount, TransactionError> {
        let mut data = self.inner.lock();
        while data.balance < amount {
            self.funds_available.wait(&mut data);
        }
        self.commit_waited(&mut data, amount)
    }

    /// Like [`withdraw_wait`](Self::withdraw_wait), but gives up after `timeout`.
    ///
    /// # Errors
    ///
    /// [`TransactionError::WaitTimedOut`] if the balance still does not cover
    /// `amount` when the timeout elapses.
    pub fn withdraw_wait_timeout(
        &self,
        amount: Amount,
        timeout: Duration,
    ) -> Result<Amount, TransactionError> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.withdraw_wait_until(amount, deadline),
            // Unrepresentable deadline.
            None => self.withdraw_wait(amount),
        }
    }

    /// Like [`withdraw_wait`](Self::withdraw_wait), but gives up at `deadline`.
    ///
    /// # Errors
    ///
    /// [`TransactionError::WaitTimedOut`] if the balance still does not cover
    /// `amount` at `deadline`. Nothing is debited or recorded.
    pub fn withdraw_wait_until(
        &self,
        amount: Amount,
        deadline: Instant,
    ) -> Result<Amount, TransactionError> {
        let mut data = self.inner.lock();
        let mut timed_out = false;
        while data.balance < amount {
            if timed_out {
                let e = TransactionError::WaitTimedOut {
                    requested: amount,
                    available: data.balance,
                };
                self.reject("Withdrawal timed out!", e);
                return Err(e);
            }
            timed_out = self
                .funds_available
                .wait_until(&mut data, deadline)
                .timed_out();
        }
        self.commit_waited(&mut data, amount)
    }

    /// Moves `amount` from this account to `other`.
    ///
    /// The debit happens under this account's lock, which is then released
    /// while `other` is credited through its own [`deposit`](Self::deposit),
    /// and re-acquired to record the transfer. The recorded balance is the
    /// one observed on re-acquire. If `other` refuses the credit, the amount
    /// is returned to this account and nothing is recorded here.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InsufficientFunds`] if `amount` exceeds the balance.
    /// - [`TransactionError::AmountOverflow`] if either balance would not fit.
    pub fn transfer(&self, other: &Account, amount: Amount) -> Result<Amount, TransactionError> {
        let mut data = self.inner.lock();
        if let Err(e) = data.take(amount) {
            self.reject("Transfer failed!", e);
            return Err(e);
        }
        let credited = MutexGuard::unlocked(&mut data, || other.deposit(amount));
        if let Err(e) = credited {
            // The debit fit, so returning it only overflows if deposits
            // landed while the lock was released.
            data.balance = data.balance.saturating_add(amount);
            self.reject("Transfer failed!", e);
            return Err(e);
        }
        Ok(self.commit(&mut data, RecordKind::Transferred, amount))
    }

    /// Emits and returns the current balance.
    pub fn check_balance(&self) -> Amount {
        let data = self.inner.lock();
        self.sink
            .emit(&format!("[{}] Current Balance: {}", timestamp(), data.balance));
        data.balance
    }

    /// Emits every record in commit order.
    pub fn print_history(&self) {
        let data = self.inner.lock();
        self.sink.emit("--- Transaction History ---");
        if data.history.is_empty() {
            self.sink.emit("No transactions recorded yet.");
            return;
        }
        for record in &data.history {
            self.sink.emit(&record.to_string());
        }
    }

    /// Current balance, without emitting anything.
    pub fn balance(&self) -> Amount {
        self.inner.lock().balance
    }

    /// Copy of the history in commit order.
    pub fn history(&self) -> Vec<Record> {
        self.inner.lock().history.clone()
    }

    pub fn history_len(&self) -> usize {
        self.inner.lock().history.len()
    }

    fn commit_waited(
        &self,
        data: &mut AccountData,
        amount: Amount,
    ) -> Result<Amount, TransactionError> {
        if let Err(e) = data.debit(amount) {
            self.reject("Withdrawal failed!", e);
            return Err(e);
        }
        Ok(self.commit(data, RecordKind::WithdrawnWaited, amount))
    }

    /// Appends a record for an already applied mutation and emits it.
    fn commit(&self, data: &mut AccountData, kind: RecordKind, amount: Amount) -> Amount {
        let record = data.append(kind, amount);
        self.sink.emit(&record.to_string());
        tracing::debug!(
            kind = %kind,
            amount,
            balance = record.balance(),
            "transaction committed"
        );
        record.balance()
    }

    fn reject(&self, action: &str, error: TransactionError) {
        let reason = match error {
            TransactionError::InsufficientFunds { .. } | TransactionError::WaitTimedOut { .. } => {
                "Insufficient funds."
            }
            TransactionError::AmountOverflow { .. } => "Balance overflow.",
        };
        self.sink
            .emit(&format!("[{}] {} {}", timestamp(), action, reason));
        tracing::warn!(%error, "transaction rejected");
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.lock();
        f.debug_struct("Account")
            .field("balance", &data.balance)
            .field("history_len", &data.history.len())
            .finish_non_exhaustive()
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("Account", 2)?;
        state.serialize_field("balance", &data.balance)?;
        state.serialize_field("history", &data.history)?;
        state.end()
    }
}
