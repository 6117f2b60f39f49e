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

use bank_account_rs::menu::{self, Mode};
use bank_account_rs::simulation::{self, SimulationConfig};
use bank_account_rs::{Account, SimulationError};
use clap::Parser;
use std::io;
use std::process;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Bank Account - Mutex and condition variable demo
///
/// Runs either an interactive menu over two accounts or a multi-threaded
/// simulation against one account. Ledger lines go to stdout; diagnostics go
/// to stderr and are filtered with RUST_LOG.
#[derive(Parser, Debug)]
#[command(name = "bank-account-rs")]
#[command(about = "An in-memory bank account with blocking withdrawals", long_about = None)]
struct Args {
    /// Run mode. Prompts on stdin when omitted.
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Seed for the simulation's random amounts
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a blocking simulation withdrawal after this many milliseconds
    #[arg(long, value_name = "MS")]
    wait_timeout_ms: Option<u64>,
}

#[derive(Error, Debug)]
enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mode = match args.mode {
        Some(mode) => mode,
        None => match menu::select_mode(io::stdin().lock(), io::stdout())? {
            Some(mode) => mode,
            None => return Ok(()),
        },
    };

    match mode {
        Mode::Interactive => {
            let primary = Account::new();
            let peer = Account::new();
            menu::run(&primary, &peer, io::stdin().lock(), io::stdout())?;
        }
        Mode::Simulate => {
            let account = Account::new();
            let config = SimulationConfig {
                seed: args.seed,
                wait_timeout: args.wait_timeout_ms.map(Duration::from_millis),
                ..SimulationConfig::default()
            };
            println!("\nRunning Multi-Threaded Simulation...");
            let report = simulation::run(&account, &config)?;
            if report.timed_out_withdrawals > 0 {
                eprintln!(
                    "{} withdrawal(s) timed out waiting for funds",
                    report.timed_out_withdrawals
                );
            }
        }
    }

    Ok(())
}
