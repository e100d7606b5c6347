//! Smallest angular offset from the current look direction.

use crate::filter::{Candidate, TargetFilter};
use crate::strategy::TargetingStrategy;

/// Targets whatever the viewer is already looking closest to.
///
/// Ties are broken by world order (first found).
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionStrategy;

impl TargetingStrategy for DirectionStrategy {
    fn score(&self, candidate: &Candidate, _filter: &TargetFilter) -> f64 {
        candidate.angle
    }

    fn name(&self) -> &'static str {
        "Direction"
    }

    fn description(&self) -> &'static str {
        "Targets the entity closest to the crosshair"
    }
}
