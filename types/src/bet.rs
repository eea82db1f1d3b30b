use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DEFAULT_BET, DEFAULT_CHANCE, MAX_CHANCE};

/// Which side of the roll range counts as a win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Win when the roll lands at or below the chance.
    Under,
    /// Win when the roll lands at or above `100 - chance`.
    Over,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Under => Self::Over,
            Self::Over => Self::Under,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BetConfigError {
    #[error("win chance {chance} outside (0, {max}]")]
    ChanceOutOfRange { chance: f64, max: f64 },
    #[error("bet amount {amount} is not a usable wager")]
    InvalidAmount { amount: f64 },
}

/// A single bet as configured by the caller. Passed by value into the
/// resolver per roll; auto-bet progression mutates `amount` between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BetConfig {
    /// Win probability in percent, `(0, MAX_CHANCE]`.
    pub chance: f64,
    pub direction: Direction,
    /// Wager debited when the bet is placed.
    pub amount: f64,
}

impl Default for BetConfig {
    fn default() -> Self {
        Self {
            chance: DEFAULT_CHANCE,
            direction: Direction::Under,
            amount: DEFAULT_BET,
        }
    }
}

impl BetConfig {
    /// The input layer clamps values before they reach the engine; this is
    /// the engine-side check that rejects anything out of range instead of
    /// rolling with it.
    pub fn validate(&self) -> Result<(), BetConfigError> {
        validate_chance(self.chance)?;
        validate_amount(self.amount)?;
        Ok(())
    }
}

/// Check a chance value against the `(0, MAX_CHANCE]` domain.
pub fn validate_chance(chance: f64) -> Result<(), BetConfigError> {
    if !chance.is_finite() || chance <= 0.0 || chance > MAX_CHANCE {
        return Err(BetConfigError::ChanceOutOfRange {
            chance,
            max: MAX_CHANCE,
        });
    }
    Ok(())
}

/// Check a configured wager. Zero is a valid configuration (it is rejected
/// at placement, not here); negative and non-finite values are not.
pub fn validate_amount(amount: f64) -> Result<(), BetConfigError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(BetConfigError::InvalidAmount { amount });
    }
    Ok(())
}
