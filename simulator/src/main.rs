use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use dicebet_simulator::{RunSummary, Simulator, SimulatorConfig, DEFAULT_ROLL_DELAY_MS};
use dicebet_types::{
    validate_chance, AutoBetSettings, Direction, DEFAULT_BET, DEFAULT_CHANCE, STARTING_BALANCE,
};

#[derive(Parser, Debug)]
#[command(name = "dicebet-simulator", about = "Headless dice session driver")]
struct Args {
    /// Seed for a reproducible run; omit to seed from the OS.
    #[arg(long)]
    seed: Option<u64>,

    /// Win chance in percent, (0, 97].
    #[arg(long, default_value_t = DEFAULT_CHANCE)]
    chance: f64,

    /// Win when the roll lands at or above 100 - chance instead of at or
    /// below chance.
    #[arg(long)]
    over: bool,

    /// Wager per roll.
    #[arg(long, default_value_t = DEFAULT_BET)]
    bet: f64,

    /// Starting balance.
    #[arg(long, default_value_t = STARTING_BALANCE)]
    balance: f64,

    /// Maximum rolls for the run.
    #[arg(long, default_value_t = 100)]
    rolls: u64,

    /// Delay between rolls in milliseconds; 0 runs the batch flat out.
    #[arg(long, default_value_t = DEFAULT_ROLL_DELAY_MS)]
    roll_delay_ms: u64,

    /// Run the auto-bet controller instead of manual rolls.
    #[arg(long)]
    auto: bool,

    /// Percent added to the wager after a win (auto mode).
    #[arg(long, default_value_t = 0.0)]
    increase_on_win: f64,

    /// Percent added to the wager after a loss (auto mode).
    #[arg(long, default_value_t = 0.0)]
    increase_on_loss: f64,

    /// Reset the wager to the base bet after a win (auto mode).
    #[arg(long)]
    reset_on_win: bool,

    /// Reset the wager to the base bet after a loss (auto mode).
    #[arg(long)]
    reset_on_loss: bool,

    /// Stop once the session is up this much (auto mode, 0 disables).
    #[arg(long, default_value_t = 0.0)]
    stop_on_profit: f64,

    /// Stop once the session is down this much (auto mode, 0 disables).
    #[arg(long, default_value_t = 0.0)]
    stop_on_loss: f64,

    /// Emit the summary as JSON instead of a log line.
    #[arg(long)]
    json: bool,
}

fn build_config(args: &Args) -> Result<SimulatorConfig> {
    if let Err(err) = validate_chance(args.chance) {
        bail!("--chance: {err}");
    }
    if !args.bet.is_finite() || args.bet <= 0.0 {
        bail!("--bet must be a positive amount (got {})", args.bet);
    }
    if !args.balance.is_finite() || args.balance <= 0.0 {
        bail!("--balance must be a positive amount (got {})", args.balance);
    }
    if args.rolls == 0 {
        bail!("--rolls must be at least 1");
    }

    let auto = args.auto.then_some(AutoBetSettings {
        increase_on_win_pct: args.increase_on_win,
        increase_on_loss_pct: args.increase_on_loss,
        reset_on_win: args.reset_on_win,
        reset_on_loss: args.reset_on_loss,
        stop_on_profit: args.stop_on_profit,
        stop_on_loss: args.stop_on_loss,
    });
    if let Some(settings) = &auto {
        if let Err(err) = settings.validate() {
            bail!("auto settings: {err}");
        }
    }

    Ok(SimulatorConfig {
        seed: args.seed,
        starting_balance: args.balance,
        chance: args.chance,
        direction: if args.over {
            Direction::Over
        } else {
            Direction::Under
        },
        bet: args.bet,
        max_rolls: args.rolls,
        auto,
        roll_delay: Duration::from_millis(args.roll_delay_ms),
    })
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
}

fn report(summary: &RunSummary) {
    info!(
        rolls = summary.rolls,
        wins = summary.wins,
        losses = summary.losses,
        total_wagered = summary.total_wagered,
        profit_loss = summary.profit_loss,
        final_balance = summary.final_balance,
        end = ?summary.end,
        "run complete"
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = build_config(&args)?;

    let mut simulator = Simulator::new(config)?;
    let summary = simulator.run().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        report(&summary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_deterministic_run_fields() {
        let args = Args::parse_from([
            "dicebet-simulator",
            "--seed",
            "7",
            "--chance",
            "2",
            "--over",
            "--bet",
            "100",
            "--rolls",
            "25",
        ]);
        let config = build_config(&args).expect("config should parse");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.chance, 2.0);
        assert_eq!(config.direction, Direction::Over);
        assert_eq!(config.bet, 100.0);
        assert_eq!(config.max_rolls, 25);
        assert!(config.auto.is_none());
    }

    #[test]
    fn builds_auto_settings() {
        let args = Args::parse_from([
            "dicebet-simulator",
            "--auto",
            "--increase-on-loss",
            "100",
            "--reset-on-win",
            "--stop-on-loss",
            "50",
        ]);
        let config = build_config(&args).expect("config should parse");
        let settings = config.auto.expect("auto settings present");
        assert_eq!(settings.increase_on_loss_pct, 100.0);
        assert!(settings.reset_on_win);
        assert_eq!(settings.stop_on_loss, 50.0);
    }

    #[test]
    fn rejects_out_of_range_chance() {
        let args = Args::parse_from(["dicebet-simulator", "--chance", "98"]);
        let err = build_config(&args).unwrap_err();
        assert!(err.to_string().contains("--chance"), "unexpected error: {err}");
    }

    #[test]
    fn rejects_zero_rolls() {
        let args = Args::parse_from(["dicebet-simulator", "--rolls", "0"]);
        let err = build_config(&args).unwrap_err();
        assert!(err.to_string().contains("--rolls"), "unexpected error: {err}");
    }
}
