use crate::error::AimError;

/// Solver constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AimConfig {
    /// Lower bound applied to the viewer's base sensitivity before the task
    /// multiplier, so a zero setting never stalls rotation.
    pub sensitivity_floor: f64,
    /// Linear: per-tick cap is `elapsed_ms * sensitivity / linear_divisor`.
    pub linear_divisor: f64,
    /// EaseOut: per-tick fraction is `elapsed_ms * sensitivity / ease_out_divisor`.
    pub ease_out_divisor: f64,
    /// EaseIn: per-tick acceleration is `sensitivity / ease_in_divisor`.
    pub ease_in_divisor: f64,
}

impl AimConfig {
    pub const DEFAULT_SENSITIVITY_FLOOR: f64 = 0.1;
    pub const DEFAULT_LINEAR_DIVISOR: f64 = 10.0;
    pub const DEFAULT_EASE_OUT_DIVISOR: f64 = 200.0;
    pub const DEFAULT_EASE_IN_DIVISOR: f64 = 2.0;

    pub const fn new() -> Self {
        Self {
            sensitivity_floor: Self::DEFAULT_SENSITIVITY_FLOOR,
            linear_divisor: Self::DEFAULT_LINEAR_DIVISOR,
            ease_out_divisor: Self::DEFAULT_EASE_OUT_DIVISOR,
            ease_in_divisor: Self::DEFAULT_EASE_IN_DIVISOR,
        }
    }

    /// Checks that every field is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`AimError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), AimError> {
        let fields = [
            ("sensitivity_floor", self.sensitivity_floor),
            ("linear_divisor", self.linear_divisor),
            ("ease_out_divisor", self.ease_out_divisor),
            ("ease_in_divisor", self.ease_in_divisor),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(AimError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }

    /// Base sensitivity floored at [`Self::sensitivity_floor`], times `multiplier`.
    pub fn scaled_sensitivity(&self, base: f64, multiplier: f64) -> f64 {
        base.max(self.sensitivity_floor) * multiplier
    }
}

impl Default for AimConfig {
    fn default() -> Self {
        Self::new()
    }
}
