use aim_core::AimError;

/// Errors raised while configuring targeting policies.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TargetingError {
    #[error("unknown targeting strategy '{0}'")]
    UnknownStrategy(String),

    #[error("setting `{name}` must be finite and positive (got {value})")]
    InvalidSetting { name: &'static str, value: f64 },

    #[error(transparent)]
    Aim(#[from] AimError),
}

pub type Result<T> = std::result::Result<T, TargetingError>;

/// Rejects non-finite or non-positive values for the named setting.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TargetingError::InvalidSetting { name, value })
    }
}
