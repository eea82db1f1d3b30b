//! The dice table: the single mutation entrypoint the presentation layer
//! drives, plus the read-only projections it renders.
//!
//! The table owns the bet configuration, the session ledger, and the
//! auto-bet controller, and wires mode changes to session snapshots:
//! entering a non-manual mode re-bases the session, switching back to
//! manual leaves it alone.

use rand::Rng;

use dicebet_types::{
    validate_amount, validate_chance, AutoBetSettings, AutoState, BetConfig, BetConfigError,
    ChartWindow, Direction, RollOutcome, SessionStats, STARTING_BALANCE,
};

use crate::auto::{AutoBetController, AutoError, TickOutcome};
use crate::ledger::SessionLedger;
use crate::odds::{self, Quote};
use crate::roll::{self, PlayError};

/// How rolls are being issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameMode {
    #[default]
    Manual,
    Auto,
    Flash,
}

#[derive(Debug)]
pub struct DiceTable {
    config: BetConfig,
    ledger: SessionLedger,
    auto: AutoBetController,
    mode: GameMode,
}

impl Default for DiceTable {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl DiceTable {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            config: BetConfig::default(),
            ledger: SessionLedger::new(starting_balance),
            auto: AutoBetController::default(),
            mode: GameMode::Manual,
        }
    }

    /// Set the win chance. The input layer clamps the slider into range;
    /// anything else is rejected here without touching the configuration.
    pub fn set_chance(&mut self, chance: f64) -> Result<(), BetConfigError> {
        validate_chance(chance)?;
        self.config.chance = chance;
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.config.direction = direction;
    }

    pub fn set_bet_amount(&mut self, amount: f64) -> Result<(), BetConfigError> {
        validate_amount(amount)?;
        self.config.amount = amount;
        Ok(())
    }

    /// One manual roll with the current configuration.
    pub fn roll(&mut self, rng: &mut impl Rng) -> Result<RollOutcome, PlayError> {
        roll::play_round(&self.config, &mut self.ledger, rng)
    }

    /// Enter auto mode and arm the controller.
    pub fn start_auto(&mut self, settings: AutoBetSettings) -> Result<(), AutoError> {
        self.auto.start(settings, &mut self.ledger, self.config.amount)?;
        self.mode = GameMode::Auto;
        Ok(())
    }

    /// Cancel auto betting. The table stays in auto mode so the settings
    /// stay in view; only the controller returns to idle.
    pub fn stop_auto(&mut self) {
        self.auto.stop();
    }

    /// One pacing tick while auto betting runs. The inter-tick delay is the
    /// caller's scheduler, not the table's.
    pub fn tick_auto(&mut self, rng: &mut impl Rng) -> Result<TickOutcome, AutoError> {
        self.auto.tick(&mut self.config, &mut self.ledger, rng)
    }

    /// Enter flash mode and fire one immediate roll. Same bet contract as a
    /// manual roll; the reduced reveal delay is the caller's pacing.
    pub fn start_flash(&mut self, rng: &mut impl Rng) -> Result<RollOutcome, PlayError> {
        self.ledger.snapshot_session(self.config.amount);
        self.mode = GameMode::Flash;
        roll::play_round(&self.config, &mut self.ledger, rng)
    }

    /// Back to manual rolling. Cancels any running auto bet and keeps the
    /// session counters as they are.
    pub fn enter_manual(&mut self) {
        self.auto.stop();
        self.mode = GameMode::Manual;
    }

    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    /// Multiplier/payout/profit for the current configuration.
    pub fn quote(&self) -> Result<Quote, BetConfigError> {
        odds::quote(self.config.chance, self.config.amount)
    }

    pub fn last_outcome(&self) -> Option<&RollOutcome> {
        self.ledger.last_outcome()
    }

    /// Most recent rolls, newest first, at most `RECENT_ROLLS_CAP`.
    pub fn recent_rolls(&self) -> impl Iterator<Item = &RollOutcome> {
        self.ledger.recent_rolls()
    }

    pub fn windowed_balance_history(&self, window: ChartWindow) -> Vec<f64> {
        self.ledger.windowed_history(window)
    }

    pub fn stats(&self) -> SessionStats {
        self.ledger.stats()
    }

    pub fn auto_state(&self) -> AutoState {
        self.auto.state()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &BetConfig {
        &self.config
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }
}
