//! Tunable constants of the hunger model.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Longest accepted period for any of the seconds fields: one year.
pub const MAX_PERIOD_SECS: u64 = 365 * 24 * 60 * 60;

/// Numbers that drive decay, feeding and alerting.
///
/// The foreground tick and the background catch-up are independent clocks:
/// `tick_interval_secs` paces live decay, `background_step_secs` is the
/// length of one catch-up step while the app was away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HungerRules {
    #[serde(default = "default_max_level")]
    pub max_level: u8,
    #[serde(default = "default_max_level")]
    pub initial_level: u8,
    #[serde(default = "default_feed_amount")]
    pub feed_amount: u8,
    #[serde(default = "default_tick_decay")]
    pub tick_decay: u8,
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
    #[serde(default = "default_low_threshold")]
    pub low_threshold: u8,
    #[serde(default = "default_alert_cooldown_secs")]
    pub alert_cooldown_secs: u64,
    #[serde(default = "default_background_step_secs")]
    pub background_step_secs: u64,
    #[serde(default = "default_background_decay_per_step")]
    pub background_decay_per_step: u8,
    #[serde(default = "default_immediate_alert_delay_secs")]
    pub immediate_alert_delay_secs: u64,
}

fn default_max_level() -> u8 {
    100
}
fn default_feed_amount() -> u8 {
    10
}
fn default_tick_decay() -> u8 {
    5
}
fn default_tick_interval_secs() -> u64 {
    10
}
fn default_low_threshold() -> u8 {
    20
}
fn default_alert_cooldown_secs() -> u64 {
    60
}
fn default_background_step_secs() -> u64 {
    5
}
fn default_background_decay_per_step() -> u8 {
    10
}
fn default_immediate_alert_delay_secs() -> u64 {
    1
}

impl Default for HungerRules {
    fn default() -> Self {
        Self {
            max_level: default_max_level(),
            initial_level: default_max_level(),
            feed_amount: default_feed_amount(),
            tick_decay: default_tick_decay(),
            tick_interval_secs: default_tick_interval_secs(),
            low_threshold: default_low_threshold(),
            alert_cooldown_secs: default_alert_cooldown_secs(),
            background_step_secs: default_background_step_secs(),
            background_decay_per_step: default_background_decay_per_step(),
            immediate_alert_delay_secs: default_immediate_alert_delay_secs(),
        }
    }
}

impl HungerRules {
    /// Reject combinations the engine cannot work with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_level == 0 {
            return Err(ValidationError::invalid("hunger.max_level", "must be positive"));
        }
        if self.initial_level > self.max_level {
            return Err(ValidationError::invalid(
                "hunger.initial_level",
                format!("must not exceed max_level ({})", self.max_level),
            ));
        }
        if self.low_threshold >= self.max_level {
            return Err(ValidationError::invalid(
                "hunger.low_threshold",
                format!("must be below max_level ({})", self.max_level),
            ));
        }
        if self.tick_interval_secs == 0 {
            return Err(ValidationError::invalid("hunger.tick_interval_secs", "must be positive"));
        }
        if self.background_step_secs == 0 {
            return Err(ValidationError::invalid("hunger.background_step_secs", "must be positive"));
        }
        if self.background_decay_per_step == 0 {
            return Err(ValidationError::invalid(
                "hunger.background_decay_per_step",
                "must be positive",
            ));
        }
        for (field, secs) in [
            ("hunger.tick_interval_secs", self.tick_interval_secs),
            ("hunger.alert_cooldown_secs", self.alert_cooldown_secs),
            ("hunger.background_step_secs", self.background_step_secs),
            ("hunger.immediate_alert_delay_secs", self.immediate_alert_delay_secs),
        ] {
            if secs > MAX_PERIOD_SECS {
                return Err(ValidationError::invalid(
                    field,
                    format!("must not exceed {MAX_PERIOD_SECS} seconds"),
                ));
            }
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    pub fn immediate_alert_delay(&self) -> Duration {
        Duration::from_secs(self.immediate_alert_delay_secs)
    }

    pub fn is_hungry(&self, level: u8) -> bool {
        level <= self.low_threshold
    }

    /// Delay after which background decay would bring `level` down to the
    /// alert threshold, counted in whole catch-up steps.
    ///
    /// `None` when the pet is already hungry or less than one step remains.
    pub fn threshold_alert_delay(&self, level: u8) -> Option<Duration> {
        if self.is_hungry(level) {
            return None;
        }
        let steps = u64::from((level - self.low_threshold) / self.background_decay_per_step.max(1));
        let secs = steps.saturating_mul(self.background_step_secs);
        (secs > 0).then(|| Duration::from_secs(secs))
    }

    /// Level after `elapsed_secs` of background decay from `level`.
    pub fn decay_after(&self, level: u8, elapsed_secs: u64) -> (u64, u8) {
        let steps = elapsed_secs / self.background_step_secs.max(1);
        let loss = steps.saturating_mul(u64::from(self.background_decay_per_step));
        let remaining = u64::from(level).saturating_sub(loss);
        (steps, remaining.min(u64::from(self.max_level)) as u8)
    }
}
