//! Rotation solver: maps a remaining delta and elapsed time to this tick's step.
//!
//! All methods finish by re-wrapping their result with
//! [`Rotation::diff_normalize`], so a step never turns the long way around.

use crate::config::AimConfig;
use crate::error::AimError;
use crate::rotation::Rotation;

/// Interpolation curve used while a task is executing.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CalculationMethod {
    /// Constant angular velocity, clipped by the remaining delta.
    #[default]
    Linear,
    /// Accelerates from the previous tick's velocity.
    EaseIn,
    /// Covers a time-proportional fraction of the remaining delta.
    EaseOut,
    /// The slower of `EaseIn` and `EaseOut`.
    EaseInOut,
    /// The whole remaining delta in one step.
    Immediate,
}

/// Inputs for one solver step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverInput {
    /// Remaining delta, already wrapped.
    pub delta: Rotation,
    /// Milliseconds since the task's previous tick.
    pub elapsed_ms: f64,
    /// Base sensitivity after flooring and the task multiplier.
    pub sensitivity: f64,
    /// Step applied on the previous executing tick.
    pub previous_velocity: Rotation,
}

impl CalculationMethod {
    /// Parses a case-insensitive snake_case method name.
    pub fn from_name(name: &str) -> Result<Self, AimError> {
        name.parse().map_err(|_| AimError::UnknownMethod(name.to_string()))
    }

    /// Computes the rotation to add to the current orientation this tick.
    pub fn step(self, input: &SolverInput, config: &AimConfig) -> Rotation {
        self.raw_step(input, config).diff_normalize()
    }

    fn raw_step(self, input: &SolverInput, config: &AimConfig) -> Rotation {
        let delta = input.delta;
        match self {
            CalculationMethod::Linear => {
                let max_speed = input.elapsed_ms * input.sensitivity / config.linear_divisor;
                delta.limited_by_speed(max_speed)
            }
            CalculationMethod::EaseOut => {
                let fraction =
                    (input.elapsed_ms * input.sensitivity / config.ease_out_divisor).min(1.0);
                delta * fraction
            }
            CalculationMethod::EaseIn => {
                let current = input.previous_velocity.magnitude();
                let target = delta.magnitude();
                let acceleration = input.sensitivity / config.ease_in_divisor;
                if current < target {
                    delta.limited_by_speed(current + acceleration)
                } else {
                    // Caught up: hand over the full remaining delta.
                    delta
                }
            }
            CalculationMethod::EaseInOut => {
                let ease_in = CalculationMethod::EaseIn.step(input, config);
                let ease_out = CalculationMethod::EaseOut.step(input, config);
                if ease_out.magnitude() > ease_in.magnitude() {
                    ease_in
                } else {
                    ease_out
                }
            }
            CalculationMethod::Immediate => delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    const EPS: f64 = 1e-9;

    fn input(delta: Rotation, elapsed_ms: f64) -> SolverInput {
        SolverInput {
            delta,
            elapsed_ms,
            sensitivity: 0.5,
            previous_velocity: Rotation::ZERO,
        }
    }

    #[test]
    fn linear_caps_step_by_elapsed_time() {
        let config = AimConfig::default();
        // 50ms * 0.5 / 10 = 2.5 degrees.
        let step = CalculationMethod::Linear.step(&input(Rotation::new(90.0, 0.0), 50.0), &config);
        assert!((step.yaw - 2.5).abs() < EPS);
        assert_eq!(step.pitch, 0.0);

        let small = CalculationMethod::Linear.step(&input(Rotation::new(1.0, -1.0), 50.0), &config);
        assert_eq!(small, Rotation::new(1.0, -1.0));
    }

    #[test]
    fn linear_never_overshoots_a_stationary_target() {
        let config = AimConfig::default();
        let target = Rotation::new(170.0, -35.0);
        let mut current = Rotation::new(-150.0, 20.0);
        let initial = (target - current).diff_normalize();
        let mut previous_magnitude = initial.magnitude();

        for _ in 0..500 {
            let delta = (target - current).diff_normalize();
            let step = CalculationMethod::Linear.step(&input(delta, 16.0), &config);
            current = current + step;

            let remaining = (target - current).diff_normalize();
            assert!(remaining.magnitude() <= previous_magnitude + EPS);
            assert!(remaining.yaw * initial.yaw >= -EPS, "yaw flipped sign");
            assert!(remaining.pitch * initial.pitch >= -EPS, "pitch flipped sign");
            previous_magnitude = remaining.magnitude();
        }
        assert!(previous_magnitude < 1e-6);
    }

    #[test]
    fn linear_goes_across_the_wrap() {
        let config = AimConfig::default();
        // From 170 to -170 is +20, not -340.
        let delta = (Rotation::new(-170.0, 0.0) - Rotation::new(170.0, 0.0)).diff_normalize();
        let step = CalculationMethod::Linear.step(&input(delta, 50.0), &config);
        assert!(step.yaw > 0.0);
    }

    #[test]
    fn ease_out_takes_time_proportional_fraction() {
        let config = AimConfig::default();
        // 100ms * 0.5 / 200 = 0.25 of the delta.
        let step = CalculationMethod::EaseOut.step(&input(Rotation::new(40.0, 8.0), 100.0), &config);
        assert!((step.yaw - 10.0).abs() < EPS);
        assert!((step.pitch - 2.0).abs() < EPS);

        // The fraction is capped at the whole delta.
        let capped =
            CalculationMethod::EaseOut.step(&input(Rotation::new(40.0, 8.0), 10_000.0), &config);
        assert_eq!(capped, Rotation::new(40.0, 8.0));
    }

    #[test]
    fn ease_in_accelerates_from_previous_velocity() {
        let config = AimConfig::default();
        let mut step_input = input(Rotation::new(60.0, 0.0), 16.0);

        // Acceleration is 0.5 / 2 = 0.25 per tick.
        let first = CalculationMethod::EaseIn.step(&step_input, &config);
        assert!((first.magnitude() - 0.25).abs() < EPS);

        step_input.previous_velocity = first;
        let second = CalculationMethod::EaseIn.step(&step_input, &config);
        assert!((second.magnitude() - 0.5).abs() < EPS);
    }

    #[test]
    fn ease_in_hands_over_full_delta_once_caught_up() {
        let config = AimConfig::default();
        let step_input = SolverInput {
            previous_velocity: Rotation::new(5.0, 0.0),
            ..input(Rotation::new(3.0, 1.0), 16.0)
        };
        let step = CalculationMethod::EaseIn.step(&step_input, &config);
        assert_eq!(step, Rotation::new(3.0, 1.0));
    }

    #[test]
    fn ease_in_out_picks_the_slower_curve() {
        let config = AimConfig::default();
        let step_input = input(Rotation::new(80.0, 0.0), 100.0);

        let ease_in = CalculationMethod::EaseIn.step(&step_input, &config);
        let ease_out = CalculationMethod::EaseOut.step(&step_input, &config);
        let blended = CalculationMethod::EaseInOut.step(&step_input, &config);

        let slower = ease_in.magnitude().min(ease_out.magnitude());
        assert!((blended.magnitude() - slower).abs() < EPS);
    }

    #[test]
    fn immediate_returns_whole_delta() {
        let config = AimConfig::default();
        let delta = Rotation::new(-120.0, 45.0);
        assert_eq!(CalculationMethod::Immediate.step(&input(delta, 0.0), &config), delta);
    }

    #[test]
    fn zero_elapsed_time_yields_zero_time_based_step() {
        let config = AimConfig::default();
        let delta = Rotation::new(30.0, 10.0);
        for method in [CalculationMethod::Linear, CalculationMethod::EaseOut] {
            assert_eq!(method.step(&input(delta, 0.0), &config).magnitude(), 0.0);
        }
    }

    #[test]
    fn every_method_returns_wrapped_steps() {
        let config = AimConfig::default();
        let delta = Rotation::new(179.0, -179.0);
        for method in CalculationMethod::iter() {
            let step = method.step(&input(delta, 5_000.0), &config);
            assert!(step.yaw > -180.0 && step.yaw <= 180.0, "{method}");
            assert!(step.pitch > -180.0 && step.pitch <= 180.0, "{method}");
        }
    }

    #[test]
    fn method_names_round_trip_through_strings() {
        assert_eq!("ease_in_out".parse::<CalculationMethod>(), Ok(CalculationMethod::EaseInOut));
        assert_eq!("LINEAR".parse::<CalculationMethod>(), Ok(CalculationMethod::Linear));
        assert_eq!(CalculationMethod::EaseOut.to_string(), "ease_out");
        assert_eq!(
            CalculationMethod::from_name("bogus"),
            Err(AimError::UnknownMethod("bogus".into()))
        );
    }
}
