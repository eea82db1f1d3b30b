//! Roll resolution.
//!
//! One bet, one draw: the resolver pulls a roll from the injected RNG,
//! applies the direction's win zone, and returns an immutable outcome
//! record. Applying the outcome to a balance is the ledger's job, which
//! keeps the resolver pure and independently testable.

use rand::Rng;
use thiserror::Error;

use dicebet_types::{BetConfig, BetConfigError, Direction, RollOutcome, ROLL_STEPS};

use crate::ledger::{BetRejected, SessionLedger};
use crate::odds;

/// Draw a roll value uniformly over `[0, 100)` at two-decimal resolution.
pub fn draw_roll(rng: &mut impl Rng) -> f64 {
    rng.gen_range(0..ROLL_STEPS) as f64 / 100.0
}

/// Win predicate: `Under` wins at or below the chance, `Over` wins at or
/// above `100 - chance`. The two zones mirror each other and cover the same
/// share of the roll range.
pub fn wins(direction: Direction, chance: f64, roll: f64) -> bool {
    match direction {
        Direction::Under => roll <= chance,
        Direction::Over => roll >= 100.0 - chance,
    }
}

/// Resolve one bet against a fresh draw.
///
/// Pure: no balance is touched here. A win carries the quoted payout and net
/// profit; a loss carries `payout = 0` and the stake as negative profit.
pub fn resolve(config: &BetConfig, rng: &mut impl Rng) -> Result<RollOutcome, BetConfigError> {
    let quote = odds::quote(config.chance, config.amount)?;
    let roll = draw_roll(rng);
    let won = wins(config.direction, config.chance, roll);

    let (payout, profit) = if won {
        (quote.payout, quote.net_profit)
    } else {
        (0.0, -config.amount)
    };

    Ok(RollOutcome {
        roll,
        won,
        payout,
        profit,
        bet: config.amount,
        chance: config.chance,
        direction: config.direction,
    })
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PlayError {
    #[error(transparent)]
    Rejected(#[from] BetRejected),
    #[error(transparent)]
    Config(#[from] BetConfigError),
}

/// Run one bet end to end: reserve the wager, resolve, settle.
///
/// If the resolver refuses the configuration the reservation is voided and
/// the wager refunded, leaving the ledger exactly as it was.
pub fn play_round(
    config: &BetConfig,
    ledger: &mut SessionLedger,
    rng: &mut impl Rng,
) -> Result<RollOutcome, PlayError> {
    let reservation = ledger.place_bet(config.amount)?;
    let outcome = match resolve(config, rng) {
        Ok(outcome) => outcome,
        Err(err) => {
            ledger.void(reservation);
            return Err(err.into());
        }
    };
    ledger.settle(reservation, &outcome);
    Ok(outcome)
}
