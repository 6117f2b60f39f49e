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

//! History records.
//!
//! Every committed mutation of an account appends exactly one [`Record`].
//! Records are immutable once created and render as
//! `[HH:MM:SS] <label>: <amount> | New Balance: <balance>`.

use crate::base::{Amount, timestamp};
use serde::Serialize;
use std::fmt;

/// Kind of mutation a record describes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RecordKind {
    Deposited,
    Withdrawn,
    WithdrawnWaited,
    Transferred,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deposited => "Deposited",
            Self::Withdrawn => "Withdrawn",
            Self::WithdrawnWaited => "Withdrawn (Waited)",
            Self::Transferred => "Transferred",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One committed mutation, stamped with the local time it was recorded.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Record {
    time: String,
    kind: RecordKind,
    amount: Amount,
    balance: Amount,
}

impl Record {
    /// Creates a record stamped with the current local time.
    pub fn new(kind: RecordKind, amount: Amount, balance: Amount) -> Self {
        Self::at(timestamp(), kind, amount, balance)
    }

    /// Creates a record with an explicit `HH:MM:SS` time.
    pub fn at(time: impl Into<String>, kind: RecordKind, amount: Amount, balance: Amount) -> Self {
        Self {
            time: time.into(),
            kind,
            amount,
            balance,
        }
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Balance right after the mutation committed.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// The record text without its time prefix.
    pub fn body(&self) -> String {
        format!(
            "{}: {} | New Balance: {}",
            self.kind, self.amount, self.balance
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time, self.body())
    }
}
