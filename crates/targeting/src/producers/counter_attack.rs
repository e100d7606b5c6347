//! Counter-attack: turn toward whoever just hit the viewer, then strike.
//!
//! Damage notifications usually arrive from outside the tick (a network or
//! event callback), so they are queued through a cloneable [`DamageNotifier`]
//! and drained on the next tick.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use aim_core::{
    AimPriority, AimProducer, AimScheduler, AimTarget, AimTask, CalculationMethod, EntityId,
    FrameWindow, ViewerOracle, WorldOracle,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, ensure_positive};
use crate::producers::lock;

/// Called with the attacker's id once the view has snapped onto it.
pub type StrikeHook = Arc<dyn Fn(EntityId) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterAttackSettings {
    /// Ticks before the view starts moving.
    pub reaction_ticks: u32,
    /// Ticks spent rotating before the forced snap.
    pub process_ticks: u32,
    /// Upper bound of the random jitter added to each window.
    pub randomizer: u32,
    pub method: CalculationMethod,
    pub speed: f64,
}

impl CounterAttackSettings {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("speed", self.speed)
    }
}

impl Default for CounterAttackSettings {
    fn default() -> Self {
        Self {
            reaction_ticks: 4,
            process_ticks: 4,
            randomizer: 2,
            method: CalculationMethod::Linear,
            speed: 5.0,
        }
    }
}

/// Thread-safe handle for reporting who damaged the viewer.
#[derive(Clone, Debug, Default)]
pub struct DamageNotifier {
    pending: Arc<Mutex<VecDeque<EntityId>>>,
}

impl DamageNotifier {
    pub fn notify(&self, attacker: EntityId) {
        lock(&self.pending).push_back(attacker);
    }

    fn drain(&self) -> Vec<EntityId> {
        lock(&self.pending).drain(..).collect()
    }
}

/// Preferential-priority producer reacting to damage notifications.
///
/// Unlike the other producers it does not wait for an idle scheduler: every
/// valid notification enqueues a task.
pub struct CounterAttack {
    settings: CounterAttackSettings,
    notifier: DamageNotifier,
    strike: Option<StrikeHook>,
    rng: StdRng,
    enabled: bool,
}

impl CounterAttack {
    /// Creates an enabled counter-attack producer seeded from entropy.
    pub fn new(settings: CounterAttackSettings) -> Result<Self> {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Creates a producer with a fixed seed, for reproducible jitter.
    pub fn with_seed(settings: CounterAttackSettings, seed: u64) -> Result<Self> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: CounterAttackSettings, rng: StdRng) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            notifier: DamageNotifier::default(),
            strike: None,
            rng,
            enabled: true,
        })
    }

    pub fn with_strike<F>(mut self, strike: F) -> Self
    where
        F: Fn(EntityId) + Send + Sync + 'static,
    {
        self.strike = Some(Arc::new(strike));
        self
    }

    pub fn notifier(&self) -> DamageNotifier {
        self.notifier.clone()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn settings(&self) -> &CounterAttackSettings {
        &self.settings
    }

    fn jitter(&mut self) -> u32 {
        self.rng.gen_range(0..=self.settings.randomizer)
    }

    /// Builds the task that faces `attacker` and strikes once snapped.
    pub fn counter_task(&mut self, attacker: EntityId) -> Result<AimTask> {
        let react = self.settings.reaction_ticks.saturating_add(self.jitter());
        let process = self.settings.process_ticks.saturating_add(self.jitter());
        let window = FrameWindow::new(react, react.saturating_add(process), true)?;

        let mut builder = AimTask::builder(AimTarget::Entity(attacker))
            .priority(AimPriority::Preferential)
            .condition(Box::new(window))
            .method(self.settings.method)
            .multiplier(self.settings.speed)
            .label("counter_attack");
        if let Some(strike) = self.strike.clone() {
            builder = builder.on_success(move |_| strike(attacker));
        }
        Ok(builder.build()?)
    }
}

impl AimProducer for CounterAttack {
    fn name(&self) -> &str {
        "counter_attack"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn tick(
        &mut self,
        scheduler: &mut AimScheduler,
        world: &dyn WorldOracle,
        viewer: &dyn ViewerOracle,
    ) {
        for attacker in self.notifier.drain() {
            if Some(attacker) == viewer.entity_id() {
                continue;
            }
            if !world.entity(attacker).is_some_and(|view| view.alive) {
                tracing::debug!(entity = %attacker, "ignoring damage from unknown attacker");
                continue;
            }
            match self.counter_task(attacker) {
                Ok(task) => {
                    tracing::debug!(entity = %attacker, "counter-attacking");
                    scheduler.enqueue(task);
                }
                Err(error) => tracing::warn!(%error, "counter-attack could not build task"),
            }
        }
    }
}
