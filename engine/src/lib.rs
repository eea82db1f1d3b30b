//! Dicebet wager resolution engine.
//!
//! Pure odds and roll resolution ([`odds`], [`roll`]), the mutable session
//! ledger ([`ledger`]), the auto-bet state machine ([`auto`]), and the
//! [`DiceTable`] facade the presentation layer drives.
//!
//! ## Determinism requirements
//! - No wall-clock time inside the engine; pacing belongs to the caller.
//! - All randomness comes through the injected [`rand::Rng`], exactly one
//!   draw per bet.
//! - At most one bet is in flight at a time; ledger mutation is synchronous
//!   and totally ordered over resolved rolls.

pub mod auto;
pub mod ledger;
pub mod odds;
pub mod roll;
pub mod table;

pub use auto::{AutoBetController, AutoError, TickOutcome};
pub use ledger::{BetRejected, Reservation, SessionLedger};
pub use odds::{quote, Quote};
pub use roll::{draw_roll, play_round, resolve, wins, PlayError};
pub use table::{DiceTable, GameMode};

#[cfg(test)]
mod integration_tests;
