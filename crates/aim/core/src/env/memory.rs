//! In-memory oracle implementations for tests and local simulation.

use std::collections::{BTreeMap, BTreeSet};

use crate::env::{EntityCategory, EntityId, EntityView, ViewerOracle, WorldOracle};
use crate::geometry::{BlockPos, Vec3};
use crate::rotation::Rotation;

/// Mutable world backed by ordered maps, so iteration is deterministic.
#[derive(Clone, Debug, Default)]
pub struct InMemoryWorld {
    entities: BTreeMap<EntityId, EntityView>,
    blocks: BTreeSet<BlockPos>,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entity.
    pub fn insert(&mut self, view: EntityView) {
        self.entities.insert(view.id, view);
    }

    /// Spawns a living entity with humanoid proportions at `position`.
    pub fn spawn(&mut self, id: EntityId, category: EntityCategory, position: Vec3) {
        self.insert(EntityView {
            id,
            category,
            position,
            eye_height: 1.62,
            height: 1.8,
            alive: true,
        });
    }

    /// Moves an entity's feet to `position`. Returns false if it does not exist.
    pub fn move_to(&mut self, id: EntityId, position: Vec3) -> bool {
        match self.entities.get_mut(&id) {
            Some(view) => {
                view.position = position;
                true
            }
            None => false,
        }
    }

    /// Marks an entity dead without removing it.
    pub fn kill(&mut self, id: EntityId) -> bool {
        match self.entities.get_mut(&id) {
            Some(view) => {
                view.alive = false;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<EntityView> {
        self.entities.remove(&id)
    }

    pub fn place_block(&mut self, pos: BlockPos) {
        self.blocks.insert(pos);
    }

    pub fn break_block(&mut self, pos: BlockPos) -> bool {
        self.blocks.remove(&pos)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl WorldOracle for InMemoryWorld {
    fn entity(&self, id: EntityId) -> Option<EntityView> {
        self.entities.get(&id).copied()
    }

    fn entities(&self) -> Vec<EntityView> {
        self.entities.values().copied().collect()
    }

    fn block_present(&self, pos: BlockPos) -> bool {
        self.blocks.contains(&pos)
    }
}

/// Viewer with plain fields; counts orientation writes.
#[derive(Clone, Debug, PartialEq)]
pub struct InMemoryViewer {
    pub orientation: Rotation,
    pub eye_position: Vec3,
    pub sensitivity: f64,
    pub entity_id: Option<EntityId>,
    pub writes: u64,
}

impl InMemoryViewer {
    pub const DEFAULT_SENSITIVITY: f64 = 0.5;

    pub fn new(eye_position: Vec3, orientation: Rotation) -> Self {
        Self {
            orientation,
            eye_position,
            sensitivity: Self::DEFAULT_SENSITIVITY,
            entity_id: None,
            writes: 0,
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_entity(mut self, id: EntityId) -> Self {
        self.entity_id = Some(id);
        self
    }
}

impl Default for InMemoryViewer {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Rotation::ZERO)
    }
}

impl ViewerOracle for InMemoryViewer {
    fn orientation(&self) -> Rotation {
        self.orientation
    }

    fn eye_position(&self) -> Vec3 {
        self.eye_position
    }

    fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    fn entity_id(&self) -> Option<EntityId> {
        self.entity_id
    }

    fn set_orientation(&mut self, rotation: Rotation) {
        self.orientation = rotation;
        self.writes += 1;
    }
}
