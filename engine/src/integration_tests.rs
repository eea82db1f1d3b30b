//! Whole-flow tests: manual, flash, and auto sessions driven end to end
//! against a seeded RNG, plus property laws over the odds and the ledger.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use dicebet_types::{
    AutoBetSettings, AutoState, BetConfig, ChartWindow, Direction, StopReason,
    BALANCE_HISTORY_CAP, PAYOUT_NUMERATOR, RECENT_ROLLS_CAP, ROLL_STEPS,
};

use crate::auto::{AutoBetController, TickOutcome};
use crate::ledger::SessionLedger;
use crate::odds::quote;
use crate::roll::wins;
use crate::table::DiceTable;

#[test]
fn test_even_chance_scenario() {
    let quote = quote(50.0, 10.0).expect("valid quote");
    assert_eq!(quote.multiplier, 1.9810);
    assert_eq!(quote.payout, 19.81);
    assert_eq!(quote.net_profit, 9.81);
}

#[test]
fn test_long_shot_scenario() {
    // chance 2, bet 100, roll 1.5 under: a win at 49.525x.
    assert!(wins(Direction::Under, 2.0, 1.5));
    let quote = quote(2.0, 100.0).expect("valid quote");
    assert_eq!(quote.multiplier, 49.525);
    assert_eq!(quote.payout, 4952.50);
}

#[test]
fn test_loss_limit_scenario() {
    // Start at 1000 with a 50 loss limit; once losses bring the balance to
    // 950 the next tick stops before placing another bet.
    let mut ledger = SessionLedger::new(1_000.0);
    let mut controller = AutoBetController::default();
    controller
        .start(
            AutoBetSettings {
                stop_on_loss: 50.0,
                ..AutoBetSettings::default()
            },
            &mut ledger,
            10.0,
        )
        .expect("controller arms");

    let mut drained = 0.0;
    while drained < 50.0 {
        let reservation = ledger.place_bet(10.0).expect("bet reserves");
        let outcome = dicebet_types::RollOutcome {
            roll: 99.0,
            won: false,
            payout: 0.0,
            profit: -10.0,
            bet: 10.0,
            chance: 50.0,
            direction: Direction::Under,
        };
        ledger.settle(reservation, &outcome);
        drained += 10.0;
    }
    assert_eq!(ledger.balance(), 950.0);

    let mut config = BetConfig::default();
    let mut rng = StdRng::seed_from_u64(0x5eed_c001);
    let tick = controller
        .tick(&mut config, &mut ledger, &mut rng)
        .expect("tick runs");
    assert_eq!(tick, TickOutcome::Stopped(StopReason::LossLimit));
    assert_eq!(controller.state(), AutoState::Stopped);
    assert_eq!(ledger.balance(), 950.0);
    assert_eq!(ledger.stats().total_rolls, 5);
}

#[test]
fn test_rejected_bet_scenario() {
    let mut ledger = SessionLedger::new(5.0);
    assert!(ledger.place_bet(10.0).is_err());
    assert_eq!(ledger.balance(), 5.0);
}

#[test]
fn test_long_auto_run_respects_caps_and_funds() {
    let mut table = DiceTable::default();
    let mut rng = StdRng::seed_from_u64(0x5eed_c002);
    table.set_chance(40.0).expect("in-range chance");
    table.set_bet_amount(2.0).expect("valid bet");
    table
        .start_auto(AutoBetSettings::default())
        .expect("auto starts");

    let mut rolled = 0;
    for _ in 0..500 {
        match table.tick_auto(&mut rng).expect("tick runs") {
            TickOutcome::Rolled(outcome) => {
                rolled += 1;
                assert!((0.0..100.0).contains(&outcome.roll));
            }
            TickOutcome::Halted => break,
            TickOutcome::Stopped(_) => unreachable!("no stop rules configured"),
        }
        assert!(table.balance() >= 0.0);
    }

    assert_eq!(table.stats().total_rolls, rolled);
    assert!(table.windowed_balance_history(ChartWindow::Session).len() <= BALANCE_HISTORY_CAP);
    assert!(table.recent_rolls().count() <= RECENT_ROLLS_CAP);
}

#[test]
fn test_martingale_progression_over_a_run() {
    // Double on loss, reset on win: after every settled roll the wager is
    // either back at the base bet or exactly double what it was.
    let mut table = DiceTable::default();
    let mut rng = StdRng::seed_from_u64(0x5eed_c003);
    table.set_bet_amount(1.0).expect("valid bet");
    table
        .start_auto(AutoBetSettings {
            increase_on_loss_pct: 100.0,
            reset_on_win: true,
            ..AutoBetSettings::default()
        })
        .expect("auto starts");

    let mut previous_bet = 1.0;
    for _ in 0..100 {
        match table.tick_auto(&mut rng).expect("tick runs") {
            TickOutcome::Rolled(outcome) => {
                assert_eq!(outcome.bet, previous_bet);
                if outcome.won {
                    assert_eq!(table.config().amount, 1.0);
                } else {
                    assert_eq!(table.config().amount, previous_bet * 2.0);
                }
                previous_bet = table.config().amount;
            }
            TickOutcome::Halted => break,
            TickOutcome::Stopped(_) => unreachable!("no stop rules configured"),
        }
    }
}

#[test]
fn test_session_totals_reconcile_with_balance() {
    let mut table = DiceTable::default();
    let mut rng = StdRng::seed_from_u64(0x5eed_c004);

    for _ in 0..50 {
        table.roll(&mut rng).expect("manual roll plays");
    }

    let stats = table.stats();
    assert_eq!(stats.total_rolls, 50);
    assert_eq!(stats.total_wagered, 500.0);
    let drift = (table.balance() - (1_000.0 + stats.session_profit_loss)).abs();
    assert!(drift < 1e-6, "balance drifted {drift} from the session P/L");
}

proptest! {
    #[test]
    fn prop_multiplier_strictly_decreasing(step_a in 1u32..=9_699, delta in 1u32..=500) {
        let step_b = (step_a + delta).min(9_700);
        let chance_a = step_a as f64 / 100.0;
        let chance_b = step_b as f64 / 100.0;
        let quote_a = quote(chance_a, 10.0).expect("valid quote");
        let quote_b = quote(chance_b, 10.0).expect("valid quote");
        prop_assert!(quote_a.multiplier > quote_b.multiplier);
    }

    #[test]
    fn prop_multiplier_law(step in 1u32..=9_700) {
        let chance = step as f64 / 100.0;
        let quote = quote(chance, 1.0).expect("valid quote");
        let exact = PAYOUT_NUMERATOR / chance;
        prop_assert!((quote.multiplier - exact).abs() <= 5.1e-5);
    }

    #[test]
    fn prop_net_profit_is_payout_minus_stake(step in 1u32..=9_700, cents in 1u64..=100_000) {
        let chance = step as f64 / 100.0;
        let amount = cents as f64 / 100.0;
        let quote = quote(chance, amount).expect("valid quote");
        prop_assert!((quote.net_profit - (quote.payout - amount)).abs() < 1e-6);
    }

    #[test]
    fn prop_win_zone_measures_match(step in 1u32..=9_700) {
        let chance = step as f64 / 100.0;
        let count = |direction: Direction| {
            (0..ROLL_STEPS)
                .filter(|s| wins(direction, chance, *s as f64 / 100.0))
                .count() as f64
        };
        let under_pct = count(Direction::Under) / ROLL_STEPS as f64 * 100.0;
        let over_pct = count(Direction::Over) / ROLL_STEPS as f64 * 100.0;
        // Both zones cover the configured chance, up to grid resolution.
        prop_assert!((under_pct - chance).abs() <= 0.0101);
        prop_assert!((over_pct - chance).abs() <= 0.0101);
    }

    #[test]
    fn prop_balance_never_negative(seed in any::<u64>(), bets in prop::collection::vec(1u64..=2_000, 1..60)) {
        let mut ledger = SessionLedger::new(100.0);
        let mut rng = StdRng::seed_from_u64(seed);
        for cents in bets {
            let config = BetConfig {
                chance: 49.5,
                direction: Direction::Under,
                amount: cents as f64 / 100.0,
            };
            let _ = crate::roll::play_round(&config, &mut ledger, &mut rng);
            prop_assert!(ledger.balance() >= 0.0);
        }
        prop_assert!(ledger.windowed_history(ChartWindow::Session).len() <= BALANCE_HISTORY_CAP);
        prop_assert!(ledger.recent_rolls().count() <= RECENT_ROLLS_CAP);
    }
}
