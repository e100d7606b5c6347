//! Construction and configuration errors.
//!
//! Normal engine operation never fails with an error: lost targets and
//! timeouts surface as task results. These errors are only returned while
//! building tasks, conditions, or configuration.

/// Errors raised while constructing engine values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AimError {
    #[error("speed multiplier must be finite and positive (got {0})")]
    InvalidMultiplier(f64),

    #[error("reaction window {reaction} exceeds total window {total}")]
    InvalidFrameWindow { reaction: u32, total: u32 },

    #[error("config value `{field}` must be finite and positive (got {value})")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("unknown calculation method '{0}'")]
    UnknownMethod(String),

    #[error("unknown aim priority '{0}'")]
    UnknownPriority(String),
}
