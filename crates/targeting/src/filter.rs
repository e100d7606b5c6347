//! Candidate filtering shared by every producer.

use aim_core::{EntityCategory, EntityView, ViewerOracle, WorldOracle};
use bitflags::bitflags;

use crate::error::{Result, ensure_positive};

bitflags! {
    /// Entity categories a producer may target.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TargetCategories: u8 {
        const PLAYERS = 1 << 0;
        const MOBS    = 1 << 1;
    }
}

impl TargetCategories {
    pub fn contains_category(self, category: EntityCategory) -> bool {
        match category {
            EntityCategory::Player => self.contains(Self::PLAYERS),
            EntityCategory::Mob => self.contains(Self::MOBS),
        }
    }
}

impl Default for TargetCategories {
    fn default() -> Self {
        Self::all()
    }
}

/// An entity that passed filtering, with the measurements strategies score on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub view: EntityView,
    /// Distance from the viewer's eyes to the entity's centre.
    pub distance: f64,
    /// Degrees between the look direction and the entity's centre.
    pub angle: f64,
}

/// Range, field-of-view and category limits for candidate selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetFilter {
    pub range: f64,
    /// Full field of view in degrees; candidates must lie within half of it.
    pub fov: f64,
    pub categories: TargetCategories,
}

impl TargetFilter {
    pub const DEFAULT_RANGE: f64 = 7.0;
    pub const DEFAULT_FOV: f64 = 90.0;

    pub fn new(range: f64, fov: f64, categories: TargetCategories) -> Self {
        Self {
            range,
            fov,
            categories,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("range", self.range)?;
        ensure_positive("fov", self.fov)
    }

    /// Measures `view` from the viewer and returns it if every limit holds.
    pub fn evaluate(&self, view: &EntityView, viewer: &dyn ViewerOracle) -> Option<Candidate> {
        if !view.alive || Some(view.id) == viewer.entity_id() {
            return None;
        }
        if !self.categories.contains_category(view.category) {
            return None;
        }

        let eye = viewer.eye_position();
        let distance = eye.distance(view.center());
        if distance > self.range {
            return None;
        }
        let angle = viewer.orientation().angle_to(eye, view.center());
        if angle > self.fov / 2.0 {
            return None;
        }

        Some(Candidate {
            view: *view,
            distance,
            angle,
        })
    }

    /// All entities in the world that pass the filter, in world order.
    pub fn candidates(&self, world: &dyn WorldOracle, viewer: &dyn ViewerOracle) -> Vec<Candidate> {
        world
            .entities()
            .iter()
            .filter_map(|view| self.evaluate(view, viewer))
            .collect()
    }
}

impl Default for TargetFilter {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_RANGE,
            Self::DEFAULT_FOV,
            TargetCategories::default(),
        )
    }
}
