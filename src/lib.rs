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

//! # Bank Account
//!
//! This library provides an in-memory bank account whose balance and history
//! are guarded by one mutex, with a condition variable that lets withdrawals
//! block until enough funds arrive.
//!
//! ## Core Components
//!
//! - [`Account`]: Balance plus append-only history, safe to share across threads
//! - [`Record`]: One timestamped, immutable history entry
//! - [`OutputSink`]: Where accounts report each operation as a line of text
//! - [`TransactionError`]: Typed failures of account operations
//! - [`simulation`]: Four worker threads exercising one shared account
//! - [`menu`]: Single-threaded text menu over two peer accounts
//!
//! ## Example
//!
//! ```
//! use bank_account_rs::{Account, MemorySink, TransactionError};
//! use std::sync::Arc;
//!
//! let account = Account::with_sink(Arc::new(MemorySink::new()));
//! let peer = Account::with_sink(Arc::new(MemorySink::new()));
//!
//! account.deposit(500).unwrap();
//! assert_eq!(
//!     account.withdraw(700),
//!     Err(TransactionError::InsufficientFunds { requested: 700, available: 500 })
//! );
//! account.withdraw(200).unwrap();
//! account.transfer(&peer, 100).unwrap();
//!
//! assert_eq!(account.balance(), 200);
//! assert_eq!(peer.balance(), 100);
//! assert_eq!(account.history()[0].body(), "Deposited: 500 | New Balance: 500");
//! ```
//!
//! ## Thread Safety
//!
//! All operations take `&self`. Share an account by reference (scoped
//! threads) or through an `Arc`; the account's own lock is the only
//! synchronization needed.

pub mod account;
mod base;
pub mod error;
pub mod menu;
mod record;
pub mod simulation;
mod sink;

pub use account::Account;
pub use base::{Amount, timestamp};
pub use error::{SimulationError, TransactionError};
pub use record::{Record, RecordKind};
pub use sink::{MemorySink, OutputSink, StdoutSink};
