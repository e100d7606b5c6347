//! Activation conditions.
//!
//! Every task owns exactly one condition and checks it exactly once per tick.
//! The condition decides whether the task waits, rotates, snaps, or ends:
//!
//! - [`AimCondition`]: the shared contract
//! - [`ConditionStatus`]: Suspend / Execute / Force / Success / Failure
//! - [`FrameWindow`]: frame-counted reaction and process window
//! - [`Immediate`], [`Always`], [`Predicate`]: fixed and closure-backed forms
mod basic;
pub mod builder;
mod frame;
mod status;

pub use basic::{Always, Immediate, Predicate};
pub use frame::FrameWindow;
pub use status::ConditionStatus;

use crate::env::{ViewerOracle, WorldOracle};

/// Read-only view of the environment handed to conditions.
pub struct ConditionContext<'a> {
    pub world: &'a dyn WorldOracle,
    pub viewer: &'a dyn ViewerOracle,
    pub now_ms: u64,
}

impl<'a> ConditionContext<'a> {
    pub fn new(world: &'a dyn WorldOracle, viewer: &'a dyn ViewerOracle, now_ms: u64) -> Self {
        Self {
            world,
            viewer,
            now_ms,
        }
    }
}

/// Per-task state machine consulted once per tick.
///
/// Implementations must not block. Any counter they keep must only move
/// forward across calls.
pub trait AimCondition: Send {
    fn check(&mut self, ctx: &ConditionContext<'_>) -> ConditionStatus;
}

impl AimCondition for Box<dyn AimCondition> {
    #[inline]
    fn check(&mut self, ctx: &ConditionContext<'_>) -> ConditionStatus {
        (**self).check(ctx)
    }
}
