//! Runtime configuration with environment overrides.
//!
//! Every key is optional; missing keys keep their defaults. Values that are
//! present but fail to parse are rejected rather than silently ignored.
use std::str::FromStr;
use std::time::Duration;

use aim_core::AimConfig;

use crate::error::{Result, RuntimeError};

pub const ENV_SENSITIVITY_FLOOR: &str = "AIM_SENSITIVITY_FLOOR";
pub const ENV_LINEAR_DIVISOR: &str = "AIM_LINEAR_DIVISOR";
pub const ENV_EASE_OUT_DIVISOR: &str = "AIM_EASE_OUT_DIVISOR";
pub const ENV_EASE_IN_DIVISOR: &str = "AIM_EASE_IN_DIVISOR";
pub const ENV_TICK_RATE_HZ: &str = "AIM_TICK_RATE_HZ";
pub const ENV_TICK_ORDER: &str = "AIM_TICK_ORDER";

/// Whether producers see the queue before or after the scheduler advances.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TickOrder {
    /// Producers refill the queue, then the head is processed in the same tick.
    #[default]
    ProducersFirst,
    /// The head is processed first; producers react to the result.
    SchedulerFirst,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub aim: AimConfig,
    pub tick_rate_hz: u32,
    pub order: TickOrder,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_RATE_HZ: u32 = 20;

    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = parse(&lookup, ENV_SENSITIVITY_FLOOR)? {
            config.aim.sensitivity_floor = value;
        }
        if let Some(value) = parse(&lookup, ENV_LINEAR_DIVISOR)? {
            config.aim.linear_divisor = value;
        }
        if let Some(value) = parse(&lookup, ENV_EASE_OUT_DIVISOR)? {
            config.aim.ease_out_divisor = value;
        }
        if let Some(value) = parse(&lookup, ENV_EASE_IN_DIVISOR)? {
            config.aim.ease_in_divisor = value;
        }
        if let Some(value) = parse(&lookup, ENV_TICK_RATE_HZ)? {
            config.tick_rate_hz = value;
        }
        if let Some(value) = parse(&lookup, ENV_TICK_ORDER)? {
            config.order = value;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=1000).contains(&self.tick_rate_hz) {
            return Err(RuntimeError::InvalidTickRate(self.tick_rate_hz));
        }
        self.aim.validate()?;
        Ok(())
    }

    /// Interval between ticks at the configured rate.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.tick_rate_hz.max(1)))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            aim: AimConfig::default(),
            tick_rate_hz: Self::DEFAULT_TICK_RATE_HZ,
            order: TickOrder::default(),
        }
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| RuntimeError::InvalidEnv { key, value: raw })
}
