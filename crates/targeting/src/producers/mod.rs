//! Concrete producers: aim assist, lock-on and counter-attack.
//!
//! Each producer keeps its mutable state behind an `Arc<Mutex<..>>` shared
//! with the conditions and completion hooks of the tasks it enqueues, so a
//! hook can re-run selection the moment its task ends.

pub mod aim_assist;
pub mod counter_attack;
pub mod lock_on;

pub use aim_assist::{AimAssist, AimAssistSettings};
pub use counter_attack::{CounterAttack, CounterAttackSettings, DamageNotifier, StrikeHook};
pub use lock_on::{LockOn, LockOnSettings};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks producer state, recovering the data if a holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
