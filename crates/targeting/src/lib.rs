//! Target acquisition policies for the aim engine.
//!
//! Producers look at the world, pick a candidate and enqueue aim tasks whose
//! conditions keep re-validating that choice:
//! - [`filter`] narrows the world down to reachable, visible candidates
//! - [`strategy`] and [`strategies`] order them; [`TargetSelector`] applies one
//! - [`producers`] holds the aim assist, lock-on and counter-attack policies
pub mod error;
pub mod filter;
pub mod producers;
pub mod selector;
pub mod strategies;
pub mod strategy;

pub use error::{Result, TargetingError};
pub use filter::{Candidate, TargetCategories, TargetFilter};
pub use producers::{
    AimAssist, AimAssistSettings, CounterAttack, CounterAttackSettings, DamageNotifier, LockOn,
    LockOnSettings, StrikeHook,
};
pub use selector::TargetSelector;
pub use strategies::{BalancedStrategy, DirectionStrategy, DistanceStrategy};
pub use strategy::{StrategyKind, TargetingStrategy};
