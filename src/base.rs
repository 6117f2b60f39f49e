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

//! Core value types shared by the account and its drivers.

use chrono::Local;

/// Currency amount in whole, unit-less integer units.
///
/// Signed on purpose: amounts are not validated, so a negative deposit
/// lowers the balance instead of being rejected.
pub type Amount = i64;

/// Format string for ledger timestamps (24-hour, zero-padded).
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Returns the current local wall-clock time as `HH:MM:SS`.
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
