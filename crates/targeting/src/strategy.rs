//! Ordering rule applied to filtered candidates.

use crate::filter::{Candidate, TargetFilter};

/// Scores candidates for selection. Lower scores win.
///
/// Implementations must be deterministic and thread-safe.
pub trait TargetingStrategy: Send + Sync {
    fn score(&self, candidate: &Candidate, filter: &TargetFilter) -> f64;

    /// Returns the strategy name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Returns an optional description of the strategy's behavior.
    fn description(&self) -> &'static str {
        "No description available"
    }
}

/// Built-in strategies, addressable by name from configuration.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StrategyKind {
    Direction,
    Distance,
    #[default]
    Balanced,
}
