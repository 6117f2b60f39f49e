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

//! Multi-threaded simulation driver.
//!
//! Runs four worker tasks against one shared [`Account`]:
//!
//! | Task | Default behavior |
//! |------|------------------|
//! | deposit | 3 deposits of 100..=599, one every 500 ms |
//! | withdrawal | 3 blocking withdrawals of 50..=349, one every 500 ms |
//! | balance check | 3 balance checks, one every 700 ms |
//! | history | one history dump after 1000 ms |
//!
//! The tasks borrow the account through scoped threads, so the account's own
//! lock is the only synchronization between them. With the default
//! configuration the blocking withdrawals may exceed the total deposited and
//! never return; set [`SimulationConfig::wait_timeout`] to bound them.

use crate::base::Amount;
use crate::error::SimulationError;
use crate::Account;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::thread;
use std::time::Duration;

/// Parameters of a simulation run.
///
/// Amount ranges must be non-empty; [`run`] rejects the config otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub deposit_count: usize,
    pub deposit_interval: Duration,
    pub deposit_range: RangeInclusive<Amount>,
    pub withdrawal_count: usize,
    pub withdrawal_interval: Duration,
    pub withdrawal_range: RangeInclusive<Amount>,
    pub balance_check_count: usize,
    pub balance_check_interval: Duration,
    pub history_delay: Duration,
    /// Seed for the amount generators. Drawn from entropy when `None`.
    pub seed: Option<u64>,
    /// Bounds each blocking withdrawal. Unbounded when `None`.
    pub wait_timeout: Option<Duration>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            deposit_count: 3,
            deposit_interval: Duration::from_millis(500),
            deposit_range: 100..=599,
            withdrawal_count: 3,
            withdrawal_interval: Duration::from_millis(500),
            withdrawal_range: 50..=349,
            balance_check_count: 3,
            balance_check_interval: Duration::from_millis(700),
            history_delay: Duration::from_millis(1000),
            seed: None,
            wait_timeout: None,
        }
    }
}

/// What the worker tasks completed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulationReport {
    pub deposits: usize,
    pub withdrawals: usize,
    pub timed_out_withdrawals: usize,
    pub balance_checks: usize,
}

/// Runs the four worker tasks against `account` and waits for all of them.
///
/// # Errors
///
/// - [`SimulationError::EmptyAmountRange`] if an amount range is empty.
///   No task is started.
/// - [`SimulationError::TaskPanicked`] if any worker panicked.
pub fn run(
    account: &Account,
    config: &SimulationConfig,
) -> Result<SimulationReport, SimulationError> {
    if config.deposit_range.is_empty() {
        return Err(SimulationError::EmptyAmountRange("deposit"));
    }
    if config.withdrawal_range.is_empty() {
        return Err(SimulationError::EmptyAmountRange("withdrawal"));
    }
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting simulation");

    let report = crossbeam::scope(|s| -> Result<SimulationReport, SimulationError> {
        let deposits = s.spawn(move |_| {
            deposit_task(account, config, StdRng::seed_from_u64(seed))
        });
        let withdrawals = s.spawn(move |_| {
            withdrawal_task(account, config, StdRng::seed_from_u64(seed.wrapping_add(1)))
        });
        let balance_checks = s.spawn(move |_| balance_check_task(account, config));
        let history = s.spawn(move |_| history_task(account, config));

        let deposits = deposits
            .join()
            .map_err(|_| SimulationError::TaskPanicked("deposit"))?;
        let (withdrawals, timed_out_withdrawals) = withdrawals
            .join()
            .map_err(|_| SimulationError::TaskPanicked("withdrawal"))?;
        let balance_checks = balance_checks
            .join()
            .map_err(|_| SimulationError::TaskPanicked("balance check"))?;
        history
            .join()
            .map_err(|_| SimulationError::TaskPanicked("history"))?;

        Ok(SimulationReport {
            deposits,
            withdrawals,
            timed_out_withdrawals,
            balance_checks,
        })
    })
    .map_err(|_| SimulationError::TaskPanicked("scope"))??;

    tracing::info!(?report, "simulation finished");
    Ok(report)
}

fn deposit_task(account: &Account, config: &SimulationConfig, mut rng: StdRng) -> usize {
    let mut deposited = 0;
    for _ in 0..config.deposit_count {
        thread::sleep(config.deposit_interval);
        // Failures are already reported by the account.
        if account.deposit(rng.gen_range(config.deposit_range.clone())).is_ok() {
            deposited += 1;
        }
    }
    deposited
}

/// Returns `(completed, timed_out)`.
fn withdrawal_task(
    account: &Account,
    config: &SimulationConfig,
    mut rng: StdRng,
) -> (usize, usize) {
    let mut completed = 0;
    let mut timed_out = 0;
    for _ in 0..config.withdrawal_count {
        thread::sleep(config.withdrawal_interval);
        let amount = rng.gen_range(config.withdrawal_range.clone());
        match config.wait_timeout {
            None => {
                if account.withdraw_wait(amount).is_ok() {
                    completed += 1;
                }
            }
            Some(timeout) => match account.withdraw_wait_timeout(amount, timeout) {
                Ok(_) => completed += 1,
                // Already reported by the account.
                Err(_) => timed_out += 1,
            },
        }
    }
    (completed, timed_out)
}

fn balance_check_task(account: &Account, config: &SimulationConfig) -> usize {
    for _ in 0..config.balance_check_count {
        thread::sleep(config.balance_check_interval);
        account.check_balance();
    }
    config.balance_check_count
}

fn history_task(account: &Account, config: &SimulationConfig) {
    thread::sleep(config.history_delay);
    account.print_history();
}
