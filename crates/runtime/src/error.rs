//! Errors surfaced while configuring the runtime.
use thiserror::Error;

use aim_core::AimError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    #[error("environment variable {key} has invalid value '{value}'")]
    InvalidEnv { key: &'static str, value: String },

    #[error("tick rate must be between 1 and 1000 Hz (got {0})")]
    InvalidTickRate(u32),

    #[error(transparent)]
    Aim(#[from] AimError),
}
