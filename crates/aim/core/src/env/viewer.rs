use crate::env::EntityId;
use crate::geometry::Vec3;
use crate::rotation::Rotation;

/// The controllable viewpoint the engine rotates.
pub trait ViewerOracle {
    /// Current absolute orientation. Yaw is not required to be wrapped.
    fn orientation(&self) -> Rotation;

    fn eye_position(&self) -> Vec3;

    /// Base sensitivity scalar from the user's settings.
    fn sensitivity(&self) -> f64;

    /// Entity backing the viewer, if any, so producers can skip it.
    fn entity_id(&self) -> Option<EntityId> {
        None
    }

    /// Overwrites the orientation. Called by Execute steps and Force snaps.
    fn set_orientation(&mut self, rotation: Rotation);
}
