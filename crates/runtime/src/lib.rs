//! Tick orchestration for the aim engine.
//!
//! Consumers embed [`AimRuntime`] in their game loop and call
//! [`AimRuntime::tick`] once per tick. Modules are organized by
//! responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`shared`] wraps the scheduler in the single mutex foreign threads use
//! - [`config`] loads solver constants and tick settings from the environment
pub mod config;
pub mod error;
pub mod runtime;
pub mod shared;

pub use config::{RuntimeConfig, TickOrder};
pub use error::{Result, RuntimeError};
pub use runtime::{AimRuntime, AimRuntimeBuilder};
pub use shared::SharedScheduler;
