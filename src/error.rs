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

//! Error types for account operations and drivers.

use crate::base::Amount;
use thiserror::Error;

/// Account operation errors.
///
/// A failed operation never mutates the account: the balance and history are
/// exactly as they were before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionError {
    /// Debit would exceed the current balance
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    /// Deadline passed before the balance covered a blocking withdrawal
    #[error("timed out waiting for funds: requested {requested}, available {available}")]
    WaitTimedOut { requested: Amount, available: Amount },

    /// Resulting balance does not fit in an `Amount`
    #[error("balance overflow: balance {balance}, amount {amount}")]
    AmountOverflow { balance: Amount, amount: Amount },
}

/// Failures of the concurrent simulation driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// A worker task panicked before finishing its loop
    #[error("simulation task '{0}' panicked")]
    TaskPanicked(&'static str),

    /// An amount range in the config has no values to draw from
    #[error("empty {0} amount range")]
    EmptyAmountRange(&'static str),
}
