//! Traits describing the engine's environment.
//!
//! Oracles expose the world (entities and blocks) and the viewer (orientation,
//! eye position, sensitivity). [`AimEnv`] bundles them with the wall-clock
//! timestamp of the current tick so a task can be processed without any
//! ambient global state.
//!
//! Callers are expected to skip ticking entirely when no world is available;
//! the engine assumes a valid environment whenever it is invoked.
mod memory;
mod viewer;
mod world;

pub use memory::{InMemoryViewer, InMemoryWorld};
pub use viewer::ViewerOracle;
pub use world::{EntityCategory, EntityId, EntityView, WorldOracle};

/// Everything a task needs for one tick.
pub struct AimEnv<'a> {
    pub world: &'a dyn WorldOracle,
    pub viewer: &'a mut dyn ViewerOracle,
    /// Wall-clock milliseconds supplied by the tick source.
    pub now_ms: u64,
}

impl<'a> AimEnv<'a> {
    pub fn new(world: &'a dyn WorldOracle, viewer: &'a mut dyn ViewerOracle, now_ms: u64) -> Self {
        Self {
            world,
            viewer,
            now_ms,
        }
    }
}
