//! Tick-driven aim orchestration.
//!
//! The engine queues "point the view at X" operations and advances exactly one
//! of them per tick. Each [`AimTask`] binds a target, an activation condition
//! and a rotation solver method; the [`AimScheduler`] orders tasks in three
//! priority bands and runs a task's completion hook when it terminates.
//!
//! Modules are organized leaf-first:
//! - [`rotation`] and [`geometry`] hold the value types
//! - [`target`] resolves logical targets against the world each tick
//! - [`condition`] decides whether a task waits, rotates, snaps, or ends
//! - [`solver`] turns a remaining delta and elapsed time into a step
//! - [`task`] and [`scheduler`] tie it together
//! - [`env`] declares what the engine needs from its host, plus in-memory
//!   implementations for tests and simulation
//!
//! The engine performs no I/O and never blocks. Lost targets and timeouts are
//! reported as task results, never as errors; [`AimError`] only covers
//! construction and configuration.
pub mod clock;
pub mod condition;
pub mod config;
pub mod env;
pub mod error;
pub mod geometry;
pub mod producer;
pub mod rotation;
pub mod scheduler;
pub mod solver;
pub mod target;
pub mod task;

pub use clock::{Clock, ManualClock, SystemClock};
pub use condition::{
    AimCondition, Always, ConditionContext, ConditionStatus, FrameWindow, Immediate, Predicate,
};
pub use config::AimConfig;
pub use env::{
    AimEnv, EntityCategory, EntityId, EntityView, InMemoryViewer, InMemoryWorld, ViewerOracle,
    WorldOracle,
};
pub use error::AimError;
pub use geometry::{BlockPos, Vec3};
pub use producer::AimProducer;
pub use rotation::{Rotation, wrap_degrees};
pub use scheduler::{AimScheduler, TickOutcome};
pub use solver::{CalculationMethod, SolverInput};
pub use target::{AimTarget, BlockFace, ResolvedTarget};
pub use task::{
    AimPriority, AimTask, AimTaskBuilder, Completion, CompletionHook, ProcessResult, TaskId,
};
