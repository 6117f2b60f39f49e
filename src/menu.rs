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

//! Interactive text-menu driver.
//!
//! Reads choices and amounts line by line and dispatches them to a primary
//! account; transfers go from the primary account to its peer. Prompts are
//! written to the driver's own output, while the accounts report through
//! their sinks. End of input behaves like choosing Exit.

use crate::Account;
use crate::base::Amount;
use clap::ValueEnum;
use std::io::{self, BufRead, Write};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Top-level run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Single-threaded text menu
    Interactive,
    /// Multi-threaded simulation against one account
    Simulate,
}

impl Mode {
    fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Interactive),
            "2" => Some(Self::Simulate),
            _ => None,
        }
    }
}

/// Menu entries, numbered as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Deposit,
    Withdraw,
    Transfer,
    CheckBalance,
    PrintHistory,
    ClearScreen,
    Exit,
}

impl MenuChoice {
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim().parse::<u8>().ok()? {
            1 => Some(Self::Deposit),
            2 => Some(Self::Withdraw),
            3 => Some(Self::Transfer),
            4 => Some(Self::CheckBalance),
            5 => Some(Self::PrintHistory),
            6 => Some(Self::ClearScreen),
            7 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Asks for the run mode.
///
/// Returns `None` (after printing a notice) for anything but `1` or `2`.
pub fn select_mode<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<Option<Mode>> {
    write!(
        output,
        "Choose mode:\n1. Single-threaded\n2. Multi-threaded Simulation\nEnter choice: "
    )?;
    output.flush()?;

    let mode = read_line(&mut input)?.as_deref().and_then(Mode::from_choice);
    if mode.is_none() {
        writeln!(output, "Invalid choice!")?;
    }
    Ok(mode)
}

/// Runs the menu loop until Exit or end of input.
///
/// # Errors
///
/// Propagates I/O errors from `input` or `output`.
pub fn run<R: BufRead, W: Write>(
    primary: &Account,
    peer: &Account,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    tracing::info!("interactive menu started");
    loop {
        write_menu(&mut output)?;
        let Some(line) = read_line(&mut input)? else {
            break;
        };

        // Failed operations are already reported by the account.
        match MenuChoice::parse(&line) {
            Some(MenuChoice::Deposit) => {
                if let Some(amount) = prompt_amount(&mut input, &mut output, "deposit")? {
                    let _ = primary.deposit(amount);
                }
            }
            Some(MenuChoice::Withdraw) => {
                if let Some(amount) = prompt_amount(&mut input, &mut output, "withdraw")? {
                    let _ = primary.withdraw(amount);
                }
            }
            Some(MenuChoice::Transfer) => {
                if let Some(amount) = prompt_amount(&mut input, &mut output, "transfer")? {
                    let _ = primary.transfer(peer, amount);
                }
            }
            Some(MenuChoice::CheckBalance) => {
                primary.check_balance();
            }
            Some(MenuChoice::PrintHistory) => primary.print_history(),
            Some(MenuChoice::ClearScreen) => {
                write!(output, "{CLEAR_SCREEN}")?;
                output.flush()?;
            }
            Some(MenuChoice::Exit) => break,
            None => writeln!(output, "Invalid option! Try again.")?,
        }
    }

    writeln!(output, "Exiting...")?;
    output.flush()?;
    tracing::info!("interactive menu finished");
    Ok(())
}

fn write_menu<W: Write>(output: &mut W) -> io::Result<()> {
    write!(
        output,
        "\n--- Menu ---\n\
         1. Deposit\n\
         2. Withdraw\n\
         3. Transfer\n\
         4. Check Balance\n\
         5. Print Transaction History\n\
         6. Clear Screen\n\
         7. Exit\n\
         Choose an option: "
    )?;
    output.flush()
}

/// Prompts for an amount. `None` on end of input or an unparsable amount.
fn prompt_amount<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    action: &str,
) -> io::Result<Option<Amount>> {
    write!(output, "Enter amount to {action}: ")?;
    output.flush()?;

    let Some(line) = read_line(input)? else {
        return Ok(None);
    };
    match line.trim().parse::<Amount>() {
        Ok(amount) => Ok(Some(amount)),
        Err(_) => {
            writeln!(output, "Invalid amount!")?;
            Ok(None)
        }
    }
}

/// Reads one line. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
