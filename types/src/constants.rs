/// Payout numerator over the 0-100 roll range. Sitting 0.95 below the full
/// range leaves the house a 0.95% edge on every quote.
pub const PAYOUT_NUMERATOR: f64 = 99.05;

/// Largest selectable win chance, percent. The chance domain is
/// `(0, MAX_CHANCE]`.
pub const MAX_CHANCE: f64 = 97.0;

/// Balance a fresh table starts with.
pub const STARTING_BALANCE: f64 = 1_000.0;

/// Default win chance, percent.
pub const DEFAULT_CHANCE: f64 = 50.0;

/// Default bet amount.
pub const DEFAULT_BET: f64 = 10.0;

/// Retained balance snapshots (oldest evicted on overflow).
pub const BALANCE_HISTORY_CAP: usize = 50;

/// Retained roll records, newest first.
pub const RECENT_ROLLS_CAP: usize = 10;

/// Roll values are drawn on a uniform grid of hundredths over `[0, 100)`.
pub const ROLL_STEPS: u32 = 10_000;
