//! Sandbox configuration loaded from the environment.
use std::path::PathBuf;

use aim_core::CalculationMethod;
use aim_runtime::RuntimeConfig;
use aim_targeting::StrategyKind;
use anyhow::{Context, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct SandboxConfig {
    pub ticks: u64,
    pub scenario: Option<PathBuf>,
    pub strategy: StrategyKind,
    pub method: CalculationMethod,
    /// Fixed seed for counter-attack jitter; entropy when unset.
    pub seed: Option<u64>,
    pub runtime: RuntimeConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            ticks: 200,
            scenario: None,
            strategy: StrategyKind::Direction,
            method: CalculationMethod::Linear,
            seed: None,
            runtime: RuntimeConfig::default(),
        }
    }
}

impl SandboxConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SANDBOX_TICKS` - Number of ticks to simulate (default: 200)
    /// - `SANDBOX_SCENARIO` - Path to a JSON scenario (default: built-in arena)
    /// - `SANDBOX_STRATEGY` - `direction`, `distance` or `balanced` (default: direction)
    /// - `SANDBOX_METHOD` - Calculation method for assist and lock-on (default: linear)
    /// - `SANDBOX_SEED` - Seed for counter-attack jitter (default: random)
    /// - `AIM_*` - Solver and tick settings, see [`RuntimeConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self {
            runtime: RuntimeConfig::from_lookup(&lookup)
                .context("invalid runtime configuration")?,
            ..Self::default()
        };

        if let Some(raw) = lookup("SANDBOX_TICKS") {
            config.ticks = raw
                .trim()
                .parse()
                .with_context(|| format!("SANDBOX_TICKS must be a tick count, got '{raw}'"))?;
        }
        config.scenario = lookup("SANDBOX_SCENARIO")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        if let Some(raw) = lookup("SANDBOX_STRATEGY") {
            config.strategy = raw
                .trim()
                .parse()
                .with_context(|| format!("unknown targeting strategy '{raw}'"))?;
        }
        if let Some(raw) = lookup("SANDBOX_METHOD") {
            config.method = CalculationMethod::from_name(raw.trim())?;
        }
        if let Some(raw) = lookup("SANDBOX_SEED") {
            config.seed = Some(
                raw.trim()
                    .parse()
                    .with_context(|| format!("SANDBOX_SEED must be an integer, got '{raw}'"))?,
            );
        }

        Ok(config)
    }
}
