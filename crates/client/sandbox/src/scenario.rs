//! Arena scenarios: who stands where, how they move, and what happens when.
use std::f64::consts::TAU;
use std::path::Path;

use aim_core::{
    EntityCategory, EntityId, InMemoryViewer, InMemoryWorld, Rotation, Vec3, WorldOracle,
};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub viewer: ViewerSpec,
    pub entities: Vec<EntitySpec>,
    pub events: Vec<ScenarioEvent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSpec {
    pub id: u32,
    pub eye: Vec3,
    pub orientation: Rotation,
    pub sensitivity: f64,
}

impl Default for ViewerSpec {
    fn default() -> Self {
        Self {
            id: 0,
            eye: Vec3::new(0.0, 1.62, 0.0),
            orientation: Rotation::ZERO,
            sensitivity: InMemoryViewer::DEFAULT_SENSITIVITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub id: u32,
    #[serde(default)]
    pub category: EntityCategory,
    #[serde(default)]
    pub orbit: Orbit,
}

/// Circular path on the horizontal plane. A zero period stands still at
/// `center + radius` along the starting phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orbit {
    pub center: Vec3,
    pub radius: f64,
    pub period_ticks: u32,
    pub phase_deg: f64,
}

impl Orbit {
    pub fn position_at(&self, tick: u64) -> Vec3 {
        let turns = if self.period_ticks == 0 {
            0.0
        } else {
            (tick % u64::from(self.period_ticks)) as f64 / f64::from(self.period_ticks)
        };
        let angle = self.phase_deg.to_radians() + turns * TAU;
        self.center + Vec3::new(self.radius * angle.cos(), 0.0, self.radius * angle.sin())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEvent {
    pub at: u64,
    #[serde(flatten)]
    pub action: EventAction,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EventAction {
    Damage { attacker: u32 },
    Kill { entity: u32 },
    EnableAssist,
    DisableAssist,
    EnableLockOn,
    DisableLockOn,
}

impl Default for Scenario {
    /// Three movers around a viewer at the origin: assist from the start,
    /// a hit from the player at tick 10 and a lock-on at tick 60.
    fn default() -> Self {
        let entity = |id, category, center, radius, period_ticks, phase_deg| EntitySpec {
            id,
            category,
            orbit: Orbit {
                center,
                radius,
                period_ticks,
                phase_deg,
            },
        };
        Self {
            viewer: ViewerSpec::default(),
            entities: vec![
                entity(1, EntityCategory::Mob, Vec3::new(0.0, 0.0, 6.0), 2.0, 80, 0.0),
                entity(2, EntityCategory::Player, Vec3::new(3.0, 0.0, 4.0), 0.0, 0, 0.0),
                entity(3, EntityCategory::Mob, Vec3::new(-4.0, 0.0, 8.0), 1.5, 40, 90.0),
            ],
            events: vec![
                ScenarioEvent {
                    at: 0,
                    action: EventAction::EnableAssist,
                },
                ScenarioEvent {
                    at: 10,
                    action: EventAction::Damage { attacker: 2 },
                },
                ScenarioEvent {
                    at: 60,
                    action: EventAction::EnableLockOn,
                },
            ],
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let scenario: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;
        scenario.validate()?;
        tracing::info!(
            path = %path.display(),
            entities = scenario.entities.len(),
            events = scenario.events.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        let mut ids: Vec<u32> = self.entities.iter().map(|e| e.id).collect();
        ids.push(self.viewer.id);
        ids.sort_unstable();
        let unique = ids.len();
        ids.dedup();
        ensure!(ids.len() == unique, "scenario entity ids must be unique");
        ensure!(
            self.viewer.sensitivity.is_finite() && self.viewer.sensitivity >= 0.0,
            "viewer sensitivity must be a non-negative number"
        );
        Ok(())
    }

    pub fn build_world(&self) -> InMemoryWorld {
        let mut world = InMemoryWorld::new();
        for spec in &self.entities {
            world.spawn(EntityId(spec.id), spec.category, spec.orbit.position_at(0));
        }
        world
    }

    pub fn build_viewer(&self) -> InMemoryViewer {
        InMemoryViewer::new(self.viewer.eye, self.viewer.orientation)
            .with_sensitivity(self.viewer.sensitivity)
            .with_entity(EntityId(self.viewer.id))
    }

    /// Moves every living entity to its orbit position for `tick`.
    pub fn move_entities(&self, world: &mut InMemoryWorld, tick: u64) {
        for spec in &self.entities {
            let id = EntityId(spec.id);
            if world.entity(id).is_some_and(|view| view.alive) {
                world.move_to(id, spec.orbit.position_at(tick));
            }
        }
    }

    pub fn events_at(&self, tick: u64) -> impl Iterator<Item = &EventAction> {
        self.events
            .iter()
            .filter(move |event| event.at == tick)
            .map(|event| &event.action)
    }
}
