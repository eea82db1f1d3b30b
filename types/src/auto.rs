use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Auto-bet progression and stop rules. Owned by the caller and read-only to
/// the controller. Numeric fields use 0 to mean "disabled".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoBetSettings {
    /// Percent added to the wager after a win.
    pub increase_on_win_pct: f64,
    /// Percent added to the wager after a loss.
    pub increase_on_loss_pct: f64,
    /// Reset the wager to the session base bet after a win. Takes priority
    /// over `increase_on_win_pct`.
    pub reset_on_win: bool,
    /// Reset the wager to the session base bet after a loss. Takes priority
    /// over `increase_on_loss_pct`.
    pub reset_on_loss: bool,
    /// Stop once the session is up this much.
    pub stop_on_profit: f64,
    /// Stop once the session is down this much.
    pub stop_on_loss: f64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("auto-bet setting {field} must be a finite value >= 0 (got {value})")]
pub struct AutoSettingsError {
    pub field: &'static str,
    pub value: f64,
}

impl AutoBetSettings {
    pub fn validate(&self) -> Result<(), AutoSettingsError> {
        for (field, value) in [
            ("increase_on_win_pct", self.increase_on_win_pct),
            ("increase_on_loss_pct", self.increase_on_loss_pct),
            ("stop_on_profit", self.stop_on_profit),
            ("stop_on_loss", self.stop_on_loss),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AutoSettingsError { field, value });
            }
        }
        Ok(())
    }
}

/// Auto-bet controller state.
///
/// `Stopped` marks a rule-triggered halt and is distinct from user-initiated
/// idling; it suppresses auto-restart until the user re-arms the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Which rule halted an auto-bet run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    ProfitTarget,
    LossLimit,
}
