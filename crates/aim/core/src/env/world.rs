use std::fmt;

use crate::geometry::{BlockPos, Vec3};

/// Stable identity of a world object tracked across ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse classification used by producers to include or exclude candidates.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityCategory {
    /// Another player-controlled character.
    Player,
    /// Any non-player creature.
    #[default]
    Mob,
}

/// Read-only snapshot of a living world object.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityView {
    pub id: EntityId,
    pub category: EntityCategory,
    /// Feet position.
    pub position: Vec3,
    /// Eye height above the feet.
    pub eye_height: f64,
    /// Full bounding height.
    pub height: f64,
    pub alive: bool,
}

impl EntityView {
    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.eye_height, 0.0)
    }

    /// Centre of the bounding box.
    pub fn center(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.height / 2.0, 0.0)
    }
}

/// Read access to the entities and blocks the engine can aim at.
///
/// Implementations must be non-blocking reads of already available state;
/// they are called from inside the tick.
pub trait WorldOracle {
    /// Looks up an entity by identity. `None` once it has left the world.
    fn entity(&self, id: EntityId) -> Option<EntityView>;

    /// All entities currently known to the world, in no particular order.
    fn entities(&self) -> Vec<EntityView>;

    /// Whether a block still occupies `pos`.
    fn block_present(&self, pos: BlockPos) -> bool;
}
