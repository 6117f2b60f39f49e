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

//! Output sinks for the human-readable ledger lines.
//!
//! Accounts report every operation, including failures, as one line of text.
//! [`StdoutSink`] is what the binary uses; [`MemorySink`] keeps lines in
//! memory so callers can inspect them.

use parking_lot::Mutex;
use std::io::Write;

/// Destination for ledger output lines.
pub trait OutputSink: Send + Sync {
    /// Emits one line. The sink appends the line terminator.
    fn emit(&self, line: &str);
}

/// Writes lines to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&self, line: &str) {
        write_line(&mut std::io::stdout().lock(), line);
    }
}

/// Writes one terminated line. Failures are logged, never propagated, since
/// the caller holds an account lock.
fn write_line<W: Write>(out: &mut W, line: &str) {
    if let Err(e) = writeln!(out, "{line}") {
        tracing::warn!(error = %e, "failed to write ledger line");
    }
}

/// Captures lines in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl OutputSink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines.lock().push(line.to_owned());
    }
}
