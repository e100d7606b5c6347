//! Nearest candidate, ignoring where the viewer is looking.

use crate::filter::{Candidate, TargetFilter};
use crate::strategy::TargetingStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceStrategy;

impl TargetingStrategy for DistanceStrategy {
    fn score(&self, candidate: &Candidate, _filter: &TargetFilter) -> f64 {
        candidate.distance
    }

    fn name(&self) -> &'static str {
        "Distance"
    }

    fn description(&self) -> &'static str {
        "Targets the nearest entity"
    }
}
