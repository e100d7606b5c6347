//! Weighted blend of normalized angle and normalized distance.
//!
//! Both terms are normalized against the filter's limits (half the field of
//! view, the range) and clamped to `[0, 1]`, so the score itself lies in
//! `[0, 1]` whatever the configuration.

use crate::filter::{Candidate, TargetFilter};
use crate::strategy::TargetingStrategy;

/// Divisor floor that keeps degenerate limits from dividing by zero.
const MIN_LIMIT: f64 = 0.001;

#[derive(Debug, Clone, Copy)]
pub struct BalancedStrategy {
    pub angle_weight: f64,
    pub distance_weight: f64,
}

impl BalancedStrategy {
    pub const DEFAULT_ANGLE_WEIGHT: f64 = 0.6;
    pub const DEFAULT_DISTANCE_WEIGHT: f64 = 0.4;
}

impl Default for BalancedStrategy {
    fn default() -> Self {
        Self {
            angle_weight: Self::DEFAULT_ANGLE_WEIGHT,
            distance_weight: Self::DEFAULT_DISTANCE_WEIGHT,
        }
    }
}

impl TargetingStrategy for BalancedStrategy {
    fn score(&self, candidate: &Candidate, filter: &TargetFilter) -> f64 {
        let max_angle = (filter.fov / 2.0).max(MIN_LIMIT);
        let max_range = filter.range.max(MIN_LIMIT);
        let angle = (candidate.angle / max_angle).clamp(0.0, 1.0);
        let distance = (candidate.distance / max_range).clamp(0.0, 1.0);
        self.angle_weight * angle + self.distance_weight * distance
    }

    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn description(&self) -> &'static str {
        "Weighs closeness to the crosshair against distance"
    }
}
