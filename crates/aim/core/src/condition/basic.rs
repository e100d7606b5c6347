//! Stateless and closure-backed conditions.

use crate::condition::{AimCondition, ConditionContext, ConditionStatus};

/// Always returns `Force`: the task snaps to its target on the first tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Immediate;

impl AimCondition for Immediate {
    fn check(&mut self, _ctx: &ConditionContext<'_>) -> ConditionStatus {
        ConditionStatus::Force
    }
}

/// Always returns `Execute`.
///
/// A task with this condition only ends when its target disappears or the
/// queue is cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Always;

impl AimCondition for Always {
    fn check(&mut self, _ctx: &ConditionContext<'_>) -> ConditionStatus {
        ConditionStatus::Execute
    }
}

/// Delegates to an arbitrary closure.
///
/// The closure sees the world and viewer read-only and may keep its own state.
pub struct Predicate<F> {
    check: F,
}

impl<F> Predicate<F>
where
    F: FnMut(&ConditionContext<'_>) -> ConditionStatus + Send,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> AimCondition for Predicate<F>
where
    F: FnMut(&ConditionContext<'_>) -> ConditionStatus + Send,
{
    fn check(&mut self, ctx: &ConditionContext<'_>) -> ConditionStatus {
        (self.check)(ctx)
    }
}
