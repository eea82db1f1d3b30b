//! Headless driver for the dicebet engine.
//!
//! Stands in for the presentation layer: owns the pacing clock the engine
//! deliberately does not, issues manual rolls or auto-bet ticks against a
//! [`DiceTable`], and reduces a run to a summary.

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use dicebet_engine::{AutoError, DiceTable, PlayError, TickOutcome};
use dicebet_types::{
    AutoBetSettings, BetConfigError, Direction, StopReason, DEFAULT_BET, DEFAULT_CHANCE,
    STARTING_BALANCE,
};

/// Delay between rolls unless overridden; mirrors the default roll speed of
/// the interactive table.
pub const DEFAULT_ROLL_DELAY_MS: u64 = 200;

/// One run's parameters.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// RNG seed; `None` seeds from the OS for a non-reproducible run.
    pub seed: Option<u64>,
    pub starting_balance: f64,
    pub chance: f64,
    pub direction: Direction,
    pub bet: f64,
    /// Upper bound on rolls for the run.
    pub max_rolls: u64,
    /// Run the auto-bet controller with these settings; manual rolls when
    /// `None`.
    pub auto: Option<AutoBetSettings>,
    /// Delay between rolls. Zero for batch runs.
    pub roll_delay: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starting_balance: STARTING_BALANCE,
            chance: DEFAULT_CHANCE,
            direction: Direction::Under,
            bet: DEFAULT_BET,
            max_rolls: 100,
            auto: None,
            roll_delay: Duration::from_millis(DEFAULT_ROLL_DELAY_MS),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] BetConfigError),
    #[error(transparent)]
    Auto(#[from] AutoError),
    #[error(transparent)]
    Play(#[from] PlayError),
}

/// Why the run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEnd {
    /// The configured roll budget was used up.
    RollBudget,
    ProfitTarget,
    LossLimit,
    OutOfFunds,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub rolls: u64,
    pub wins: u64,
    pub losses: u64,
    pub total_wagered: f64,
    pub profit_loss: f64,
    pub final_balance: f64,
    pub end: RunEnd,
}

pub struct Simulator {
    table: DiceTable,
    rng: StdRng,
    config: SimulatorConfig,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Result<Self, BetConfigError> {
        let mut table = DiceTable::new(config.starting_balance);
        table.set_chance(config.chance)?;
        table.set_direction(config.direction);
        table.set_bet_amount(config.bet)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self { table, rng, config })
    }

    /// Drive the table until the roll budget, a stop rule, or the balance
    /// runs out.
    pub async fn run(&mut self) -> Result<RunSummary, RunError> {
        let mut wins = 0u64;
        let mut losses = 0u64;
        let mut end = RunEnd::RollBudget;

        if let Some(settings) = self.config.auto {
            self.table.start_auto(settings)?;
        }

        for _ in 0..self.config.max_rolls {
            let outcome = if self.config.auto.is_some() {
                match self.table.tick_auto(&mut self.rng)? {
                    TickOutcome::Rolled(outcome) => outcome,
                    TickOutcome::Halted => {
                        end = RunEnd::OutOfFunds;
                        break;
                    }
                    TickOutcome::Stopped(StopReason::ProfitTarget) => {
                        end = RunEnd::ProfitTarget;
                        break;
                    }
                    TickOutcome::Stopped(StopReason::LossLimit) => {
                        end = RunEnd::LossLimit;
                        break;
                    }
                }
            } else {
                if self.table.config().amount > self.table.balance() {
                    end = RunEnd::OutOfFunds;
                    break;
                }
                self.table.roll(&mut self.rng)?
            };

            if outcome.won {
                wins += 1;
            } else {
                losses += 1;
            }
            tracing::debug!(
                roll = outcome.roll,
                won = outcome.won,
                bet = outcome.bet,
                balance = self.table.balance(),
                "roll resolved"
            );

            if !self.config.roll_delay.is_zero() {
                tokio::time::sleep(self.config.roll_delay).await;
            }
        }

        let stats = self.table.stats();
        Ok(RunSummary {
            rolls: stats.total_rolls,
            wins,
            losses,
            total_wagered: stats.total_wagered,
            profit_loss: stats.session_profit_loss,
            final_balance: self.table.balance(),
            end,
        })
    }

    pub fn table(&self) -> &DiceTable {
        &self.table
    }
}
