//! Target selector managing strategy selection and execution.
//!
//! Acts as a facade for the strategies: producers hold a selector, feed it the
//! filtered candidates and get back the winner.

use aim_core::{ViewerOracle, WorldOracle};

use crate::error::{Result, TargetingError};
use crate::filter::{Candidate, TargetFilter};
use crate::strategies::{BalancedStrategy, DirectionStrategy, DistanceStrategy};
use crate::strategy::{StrategyKind, TargetingStrategy};

/// Holds the active [`TargetingStrategy`] and applies it to candidates.
///
/// ```ignore
/// let selector = TargetSelector::with_strategy_name("distance")?;
/// let best = selector.acquire(&filter, world, viewer);
/// ```
pub struct TargetSelector {
    strategy: Box<dyn TargetingStrategy>,
}

impl TargetSelector {
    pub fn new(strategy: Box<dyn TargetingStrategy>) -> Self {
        Self { strategy }
    }

    /// Create with the default strategy (Balanced).
    pub fn with_default() -> Self {
        Self::with_kind(StrategyKind::default())
    }

    pub fn with_kind(kind: StrategyKind) -> Self {
        Self::new(built_in(kind))
    }

    /// Create with a named built-in strategy: `direction`, `distance` or
    /// `balanced` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`TargetingError::UnknownStrategy`] for any other name.
    pub fn with_strategy_name(name: &str) -> Result<Self> {
        let kind = name
            .parse::<StrategyKind>()
            .map_err(|_| TargetingError::UnknownStrategy(name.to_string()))?;
        Ok(Self::with_kind(kind))
    }

    /// Replace the current strategy.
    pub fn set_strategy(&mut self, strategy: Box<dyn TargetingStrategy>) {
        tracing::debug!(
            from = self.strategy.name(),
            to = strategy.name(),
            "targeting strategy changed"
        );
        self.strategy = strategy;
    }

    /// Replace the current strategy with a built-in one.
    pub fn set_kind(&mut self, kind: StrategyKind) {
        self.set_strategy(built_in(kind));
    }

    /// Lowest-scoring candidate; the first one wins ties.
    pub fn select(&self, candidates: &[Candidate], filter: &TargetFilter) -> Option<Candidate> {
        candidates.iter().copied().min_by(|a, b| {
            self.strategy
                .score(a, filter)
                .total_cmp(&self.strategy.score(b, filter))
        })
    }

    /// Filters the world and selects in one step.
    pub fn acquire(
        &self,
        filter: &TargetFilter,
        world: &dyn WorldOracle,
        viewer: &dyn ViewerOracle,
    ) -> Option<Candidate> {
        let candidates = filter.candidates(world, viewer);
        let best = self.select(&candidates, filter);
        tracing::trace!(
            strategy = self.strategy.name(),
            candidates = candidates.len(),
            best = ?best.map(|c| c.view.id),
            "target acquisition"
        );
        best
    }

    pub fn current_strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn current_strategy_description(&self) -> &'static str {
        self.strategy.description()
    }
}

fn built_in(kind: StrategyKind) -> Box<dyn TargetingStrategy> {
    match kind {
        StrategyKind::Direction => Box::new(DirectionStrategy),
        StrategyKind::Distance => Box::new(DistanceStrategy),
        StrategyKind::Balanced => Box::new(BalancedStrategy::default()),
    }
}

impl Default for TargetSelector {
    fn default() -> Self {
        Self::with_default()
    }
}
