//! Shorthands for constructing boxed conditions.
//!
//! Instead of `Box::new(FrameWindow::new(4, 8, true)?)` you can write
//! `frames(4, 8, true)?`.

use crate::condition::{
    AimCondition, Always, ConditionContext, ConditionStatus, FrameWindow, Immediate, Predicate,
};
use crate::error::AimError;

/// Creates a frame-counted window condition.
///
/// # Errors
///
/// Returns [`AimError::InvalidFrameWindow`] if `reaction > total`.
#[inline]
pub fn frames(reaction: u32, total: u32, force: bool) -> Result<Box<dyn AimCondition>, AimError> {
    Ok(Box::new(FrameWindow::new(reaction, total, force)?))
}

/// Creates a condition that snaps on the first tick.
#[inline]
pub fn immediate() -> Box<dyn AimCondition> {
    Box::new(Immediate)
}

/// Creates a condition that executes forever.
#[inline]
pub fn always() -> Box<dyn AimCondition> {
    Box::new(Always)
}

/// Creates a closure-backed condition.
#[inline]
pub fn predicate<F>(check: F) -> Box<dyn AimCondition>
where
    F: FnMut(&ConditionContext<'_>) -> ConditionStatus + Send + 'static,
{
    Box::new(Predicate::new(check))
}
