//! Logical aim targets and their per-tick resolution.

use std::fmt;

use crate::env::{EntityId, WorldOracle};
use crate::geometry::{BlockPos, Vec3};
use crate::rotation::Rotation;

/// Which face of a block to aim at.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BlockFace {
    #[default]
    Center,
    /// +Y
    Top,
    /// -Y
    Bottom,
    /// -Z
    North,
    /// +X
    East,
    /// +Z
    South,
    /// -X
    West,
}

impl BlockFace {
    /// Offset from the block centre to the middle of this face.
    pub fn offset(self) -> Vec3 {
        match self {
            BlockFace::Center => Vec3::ZERO,
            BlockFace::Top => Vec3::new(0.0, 0.5, 0.0),
            BlockFace::Bottom => Vec3::new(0.0, -0.5, 0.0),
            BlockFace::North => Vec3::new(0.0, 0.0, -0.5),
            BlockFace::East => Vec3::new(0.5, 0.0, 0.0),
            BlockFace::South => Vec3::new(0.0, 0.0, 0.5),
            BlockFace::West => Vec3::new(-0.5, 0.0, 0.0),
        }
    }
}

/// What a task points the view at.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AimTarget {
    /// A live entity, tracked by identity. Aims at its eyes.
    Entity(EntityId),
    /// A block face. Fails once the block is gone.
    Block { pos: BlockPos, face: BlockFace },
    /// A fixed world position.
    Waypoint(Vec3),
    /// A fixed absolute orientation.
    Rotation(Rotation),
}

/// A target evaluated for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResolvedTarget {
    Position(Vec3),
    Rotation(Rotation),
}

impl ResolvedTarget {
    /// Absolute orientation that faces this target from `eye`.
    pub fn orientation_from(self, eye: Vec3) -> Rotation {
        match self {
            ResolvedTarget::Position(pos) => Rotation::look_at(eye, pos),
            ResolvedTarget::Rotation(rotation) => rotation,
        }
    }
}

impl AimTarget {
    pub fn block(pos: BlockPos) -> Self {
        AimTarget::Block {
            pos,
            face: BlockFace::Center,
        }
    }

    /// Evaluates the target against the current world.
    ///
    /// Returns `None` when the referenced entity has disappeared or died, or
    /// when the referenced block no longer exists.
    pub fn resolve(&self, world: &dyn WorldOracle) -> Option<ResolvedTarget> {
        match *self {
            AimTarget::Entity(id) => world
                .entity(id)
                .filter(|view| view.alive)
                .map(|view| ResolvedTarget::Position(view.eye_position())),
            AimTarget::Block { pos, face } => world
                .block_present(pos)
                .then(|| ResolvedTarget::Position(pos.center() + face.offset())),
            AimTarget::Waypoint(pos) => Some(ResolvedTarget::Position(pos)),
            AimTarget::Rotation(rotation) => Some(ResolvedTarget::Rotation(rotation)),
        }
    }

    /// The tracked entity, if this is an entity target.
    pub fn entity_id(&self) -> Option<EntityId> {
        match self {
            AimTarget::Entity(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for AimTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AimTarget::Entity(id) => write!(f, "entity {id}"),
            AimTarget::Block { pos, face } => write!(f, "block {pos} ({face})"),
            AimTarget::Waypoint(pos) => write!(f, "waypoint {pos}"),
            AimTarget::Rotation(rotation) => write!(f, "rotation {rotation}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::env::{EntityCategory, InMemoryWorld};

    #[test]
    fn entity_resolves_to_eye_position() {
        let mut world = InMemoryWorld::new();
        world.spawn(EntityId(1), EntityCategory::Mob, Vec3::new(4.0, 10.0, 0.0));

        let Some(ResolvedTarget::Position(eye)) = AimTarget::Entity(EntityId(1)).resolve(&world)
        else {
            panic!("entity target should resolve to a position");
        };
        assert!(eye.distance(Vec3::new(4.0, 11.62, 0.0)) < 1e-9);
    }

    #[test]
    fn dead_or_missing_entity_does_not_resolve() {
        let mut world = InMemoryWorld::new();
        world.spawn(EntityId(1), EntityCategory::Mob, Vec3::ZERO);
        world.kill(EntityId(1));

        assert_eq!(AimTarget::Entity(EntityId(1)).resolve(&world), None);
        assert_eq!(AimTarget::Entity(EntityId(2)).resolve(&world), None);
    }

    #[test]
    fn block_faces_sit_half_a_block_from_center() {
        let mut world = InMemoryWorld::new();
        let pos = BlockPos::new(2, 3, 4);
        world.place_block(pos);

        for face in BlockFace::iter() {
            let target = AimTarget::Block { pos, face };
            let Some(ResolvedTarget::Position(point)) = target.resolve(&world) else {
                panic!("block target should resolve to a position");
            };
            let expected = if face == BlockFace::Center { 0.0 } else { 0.5 };
            assert!((point.distance(pos.center()) - expected).abs() < 1e-12);
        }

        world.break_block(pos);
        assert_eq!(AimTarget::block(pos).resolve(&world), None);
    }

    #[test]
    fn rotation_target_resolves_directly() {
        let world = InMemoryWorld::new();
        let rotation = Rotation::new(45.0, -10.0);
        let resolved = AimTarget::Rotation(rotation).resolve(&world);
        assert_eq!(resolved, Some(ResolvedTarget::Rotation(rotation)));
        assert_eq!(
            resolved.map(|r| r.orientation_from(Vec3::new(9.0, 9.0, 9.0))),
            Some(rotation)
        );
    }

    #[test]
    fn face_names_parse_case_insensitively() {
        assert_eq!("TOP".parse::<BlockFace>(), Ok(BlockFace::Top));
        assert_eq!(BlockFace::West.to_string(), "west");
    }
}
