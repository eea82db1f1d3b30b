//! Odds and payout quoting.
//!
//! A chance of `c` percent pays `PAYOUT_NUMERATOR / c` per unit wagered.
//! The quote is stateless and recomputed whenever chance or amount changes.

use dicebet_types::{validate_amount, validate_chance, BetConfigError, PAYOUT_NUMERATOR};

/// Multiplier, payout, and net profit for a (chance, amount) pair.
///
/// Values carry display rounding (multiplier to 4 decimal places, amounts to
/// 2) and the rounded payout is exactly what a win credits, so the ledger
/// never drifts from what the player was shown. Balances themselves are not
/// re-rounded between rolls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quote {
    pub multiplier: f64,
    pub payout: f64,
    pub net_profit: f64,
}

/// Quote a bet. Refuses chances outside `(0, MAX_CHANCE]` and unusable
/// amounts rather than producing a garbage quote.
pub fn quote(chance: f64, amount: f64) -> Result<Quote, BetConfigError> {
    validate_chance(chance)?;
    validate_amount(amount)?;

    let multiplier = round_dp(PAYOUT_NUMERATOR / chance, 4);
    let payout = round_dp(amount * multiplier, 2);
    let net_profit = round_dp(payout - amount, 2);

    Ok(Quote {
        multiplier,
        payout,
        net_profit,
    })
}

/// Round half away from zero to `places` decimal places.
pub(crate) fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
