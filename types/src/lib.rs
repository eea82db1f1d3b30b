//! Common types used throughout dicebet.
//!
//! Pure data model for the dice table: bet configuration, roll outcome
//! records, auto-bet settings, session counters, and the constants shared by
//! the engine and its callers. No game logic lives here.

mod auto;
mod bet;
mod constants;
mod outcome;

pub use auto::*;
pub use bet::*;
pub use constants::*;
pub use outcome::*;
