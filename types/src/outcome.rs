use serde::{Deserialize, Serialize};

use crate::Direction;

/// Record of one resolved bet. Created by the roll resolver and never
/// mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Roll value in `[0, 100)`, two-decimal resolution.
    pub roll: f64,
    pub won: bool,
    /// Amount credited on a win (stake included); 0 on a loss.
    pub payout: f64,
    /// Net balance change: payout minus stake on a win, minus the stake on a
    /// loss.
    pub profit: f64,
    /// Wager this roll was resolved against.
    pub bet: f64,
    /// Chance in effect when the roll was made.
    pub chance: f64,
    /// Direction in effect when the roll was made.
    pub direction: Direction,
}

/// Running session counters, zeroed with each session snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_rolls: u64,
    pub total_wagered: f64,
    pub session_profit_loss: f64,
}

/// Balance-chart window selectable by the caller.
///
/// Retention is capped at [`crate::BALANCE_HISTORY_CAP`] snapshots, so the
/// larger windows degrade to "all retained history".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartWindow {
    /// Everything retained this session.
    Session,
    Last100,
    Last1000,
}

impl ChartWindow {
    /// Upper bound on returned points, `None` for the whole session.
    pub fn point_cap(self) -> Option<usize> {
        match self {
            Self::Session => None,
            Self::Last100 => Some(100),
            Self::Last1000 => Some(1000),
        }
    }
}
