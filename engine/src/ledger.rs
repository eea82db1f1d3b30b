//! Session ledger: balance, the in-flight reservation, bounded histories,
//! and running counters.
//!
//! The wager is debited when the bet is placed and the payout credited at
//! settlement, so the balance always reflects money actually at risk. The
//! ledger is the only mutable state in the engine and every mutation happens
//! through a resolved roll (or an explicit session snapshot).

use std::collections::VecDeque;

use thiserror::Error;

use dicebet_types::{
    ChartWindow, RollOutcome, SessionStats, BALANCE_HISTORY_CAP, RECENT_ROLLS_CAP,
    STARTING_BALANCE,
};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BetRejected {
    #[error("bet amount {amount} must be a positive finite value")]
    NonPositive { amount: f64 },
    #[error("bet of {amount} exceeds balance of {balance}")]
    InsufficientFunds { amount: f64, balance: f64 },
    #[error("a bet is already in flight")]
    AlreadyInFlight,
}

/// The debited-but-unsettled wager between placement and outcome.
///
/// Only the ledger mints these, and settling or voiding consumes the token,
/// so a second bet cannot start while the first is unresolved.
#[derive(Debug)]
pub struct Reservation {
    amount: f64,
}

impl Reservation {
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// Mutable session state. Lives for the process; [`Self::snapshot_session`]
/// re-bases it when a new non-manual session starts.
#[derive(Debug)]
pub struct SessionLedger {
    balance: f64,
    start_balance: f64,
    base_bet: f64,
    balance_history: VecDeque<f64>,
    recent_rolls: VecDeque<RollOutcome>,
    stats: SessionStats,
    in_flight: bool,
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl SessionLedger {
    /// Fresh ledger. The starting balance doubles as the first chart point.
    pub fn new(starting_balance: f64) -> Self {
        let mut balance_history = VecDeque::with_capacity(BALANCE_HISTORY_CAP);
        balance_history.push_back(starting_balance);
        Self {
            balance: starting_balance,
            start_balance: starting_balance,
            base_bet: 0.0,
            balance_history,
            recent_rolls: VecDeque::with_capacity(RECENT_ROLLS_CAP),
            stats: SessionStats::default(),
            in_flight: false,
        }
    }

    /// Lock a wager before its outcome is known. Debits the balance
    /// immediately; rejections leave the ledger untouched.
    pub fn place_bet(&mut self, amount: f64) -> Result<Reservation, BetRejected> {
        if self.in_flight {
            return Err(BetRejected::AlreadyInFlight);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(BetRejected::NonPositive { amount });
        }
        if amount > self.balance {
            return Err(BetRejected::InsufficientFunds {
                amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        self.in_flight = true;
        Ok(Reservation { amount })
    }

    /// Apply a resolved outcome to the reserved wager.
    ///
    /// The stake was debited at placement, so a loss credits nothing and a
    /// win credits the full payout (stake included).
    pub fn settle(&mut self, reservation: Reservation, outcome: &RollOutcome) {
        if outcome.won {
            self.balance += outcome.payout;
        }

        if self.balance_history.len() == BALANCE_HISTORY_CAP {
            self.balance_history.pop_front();
        }
        self.balance_history.push_back(self.balance);

        if self.recent_rolls.len() == RECENT_ROLLS_CAP {
            self.recent_rolls.pop_back();
        }
        self.recent_rolls.push_front(*outcome);

        self.stats.total_rolls += 1;
        self.stats.total_wagered += reservation.amount;
        self.stats.session_profit_loss += outcome.profit;
        self.in_flight = false;

        tracing::debug!(
            roll = outcome.roll,
            won = outcome.won,
            bet = reservation.amount,
            profit = outcome.profit,
            balance = self.balance,
            "bet settled"
        );
    }

    /// Refund a reservation without recording an outcome.
    pub fn void(&mut self, reservation: Reservation) {
        self.balance += reservation.amount;
        self.in_flight = false;
    }

    /// Re-base the session: capture the reference points the stop rules and
    /// progression measure against, and zero the running counters. Called on
    /// non-manual mode entry, never on manual rolls.
    pub fn snapshot_session(&mut self, base_bet: f64) {
        self.start_balance = self.balance;
        self.base_bet = base_bet;
        self.stats = SessionStats::default();
    }

    /// Balance snapshots for the requested window, oldest first.
    ///
    /// The window is an upper bound: retention never exceeds
    /// [`BALANCE_HISTORY_CAP`] points, so the larger windows return all
    /// retained history.
    pub fn windowed_history(&self, window: ChartWindow) -> Vec<f64> {
        let len = self.balance_history.len();
        let take = window.point_cap().map_or(len, |cap| cap.min(len));
        self.balance_history.iter().skip(len - take).copied().collect()
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn start_balance(&self) -> f64 {
        self.start_balance
    }

    pub fn base_bet(&self) -> f64 {
        self.base_bet
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn recent_rolls(&self) -> impl Iterator<Item = &RollOutcome> {
        self.recent_rolls.iter()
    }

    /// Most recently settled roll, if any.
    pub fn last_outcome(&self) -> Option<&RollOutcome> {
        self.recent_rolls.front()
    }

    pub fn bet_in_flight(&self) -> bool {
        self.in_flight
    }
}
