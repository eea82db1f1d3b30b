//! Auto-bet control loop.
//!
//! The controller owns no clock: the caller invokes [`AutoBetController::tick`]
//! once per pacing interval and the controller decides whether that tick
//! rolls, halts, or stops. Stop rules measure against the session snapshot
//! taken when the controller was armed.
//!
//! State machine: `Idle -> Running -> {Stopped, Idle}`. `Idle` is both the
//! initial state and the result of a user cancel or an unfunded wager;
//! `Stopped` only ever means a profit/loss rule fired and stays until the
//! user re-arms with [`AutoBetController::start`].

use rand::Rng;
use thiserror::Error;

use dicebet_types::{
    AutoBetSettings, AutoSettingsError, AutoState, BetConfig, RollOutcome, StopReason,
};

use crate::ledger::SessionLedger;
use crate::roll::{self, PlayError};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum AutoError {
    #[error("auto betting is already running")]
    AlreadyRunning,
    #[error("auto betting is not running")]
    NotRunning,
    #[error(transparent)]
    Settings(#[from] AutoSettingsError),
    #[error(transparent)]
    Play(#[from] PlayError),
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A bet was placed and settled; the controller stays running.
    Rolled(RollOutcome),
    /// The wager can no longer be funded; the controller went back to idle.
    /// Not a rule stop: the user can lower the bet and start again.
    Halted,
    /// A stop rule fired before another bet was placed.
    Stopped(StopReason),
}

#[derive(Debug, Default)]
pub struct AutoBetController {
    state: AutoState,
    settings: AutoBetSettings,
}

impl AutoBetController {
    pub fn state(&self) -> AutoState {
        self.state
    }

    pub fn settings(&self) -> &AutoBetSettings {
        &self.settings
    }

    /// Arm the controller. Valid from `Idle` and from `Stopped` (a rule stop
    /// requires exactly this explicit re-arm). Snapshots the session so the
    /// stop rules and progression measure from here.
    pub fn start(
        &mut self,
        settings: AutoBetSettings,
        ledger: &mut SessionLedger,
        base_bet: f64,
    ) -> Result<(), AutoError> {
        if self.state == AutoState::Running {
            return Err(AutoError::AlreadyRunning);
        }
        settings.validate()?;

        ledger.snapshot_session(base_bet);
        self.settings = settings;
        self.state = AutoState::Running;
        tracing::info!(
            start_balance = ledger.start_balance(),
            base_bet,
            stop_on_profit = settings.stop_on_profit,
            stop_on_loss = settings.stop_on_loss,
            "auto betting started"
        );
        Ok(())
    }

    /// User cancel. Always wins over rule state.
    pub fn stop(&mut self) {
        if self.state != AutoState::Idle {
            tracing::info!("auto betting stopped by user");
        }
        self.state = AutoState::Idle;
    }

    /// Run one pacing tick: check funds and stop rules in order, then roll
    /// once and apply progression.
    pub fn tick(
        &mut self,
        config: &mut BetConfig,
        ledger: &mut SessionLedger,
        rng: &mut impl Rng,
    ) -> Result<TickOutcome, AutoError> {
        if self.state != AutoState::Running {
            return Err(AutoError::NotRunning);
        }

        if ledger.balance() < config.amount || config.amount <= 0.0 {
            self.state = AutoState::Idle;
            tracing::info!(
                balance = ledger.balance(),
                bet = config.amount,
                "auto betting halted: wager no longer funded"
            );
            return Ok(TickOutcome::Halted);
        }

        let profit = ledger.balance() - ledger.start_balance();
        if self.settings.stop_on_profit > 0.0 && profit >= self.settings.stop_on_profit {
            self.state = AutoState::Stopped;
            tracing::info!(
                profit,
                target = self.settings.stop_on_profit,
                "auto betting stopped: profit target reached"
            );
            return Ok(TickOutcome::Stopped(StopReason::ProfitTarget));
        }

        let loss = ledger.start_balance() - ledger.balance();
        if self.settings.stop_on_loss > 0.0 && loss >= self.settings.stop_on_loss {
            self.state = AutoState::Stopped;
            tracing::info!(
                loss,
                limit = self.settings.stop_on_loss,
                "auto betting stopped: loss limit reached"
            );
            return Ok(TickOutcome::Stopped(StopReason::LossLimit));
        }

        let outcome = match roll::play_round(config, ledger, rng) {
            Ok(outcome) => outcome,
            Err(err) => {
                // A refused roll leaves the ledger refunded; halt rather
                // than spin on a configuration that can never resolve.
                self.state = AutoState::Idle;
                return Err(err.into());
            }
        };
        self.apply_progression(&outcome, config, ledger.base_bet());
        Ok(TickOutcome::Rolled(outcome))
    }

    /// Adjust the next wager from the last result. Reset takes priority over
    /// increase on each side; the two never combine.
    fn apply_progression(&self, outcome: &RollOutcome, config: &mut BetConfig, base_bet: f64) {
        let (reset, increase_pct) = if outcome.won {
            (self.settings.reset_on_win, self.settings.increase_on_win_pct)
        } else {
            (self.settings.reset_on_loss, self.settings.increase_on_loss_pct)
        };
        if reset {
            config.amount = base_bet;
        } else if increase_pct > 0.0 {
            config.amount *= 1.0 + increase_pct / 100.0;
        }
    }
}
