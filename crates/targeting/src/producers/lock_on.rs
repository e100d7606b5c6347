//! Lock-on: pick one target when enabled and stay on it until it is lost.

use std::sync::{Arc, Mutex};

use aim_core::condition::builder::predicate;
use aim_core::{
    AimPriority, AimProducer, AimScheduler, AimTarget, AimTask, CalculationMethod, Completion,
    ConditionStatus, EntityId, ViewerOracle, WorldOracle,
};

use crate::error::{Result, ensure_positive};
use crate::filter::{TargetCategories, TargetFilter};
use crate::producers::lock;
use crate::selector::TargetSelector;
use crate::strategy::StrategyKind;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LockOnSettings {
    pub filter: TargetFilter,
    pub speed: f64,
    pub method: CalculationMethod,
    pub strategy: StrategyKind,
}

impl LockOnSettings {
    pub const DEFAULT_RANGE: f64 = 16.0;

    pub fn validate(&self) -> Result<()> {
        self.filter.validate()?;
        ensure_positive("speed", self.speed)
    }
}

impl Default for LockOnSettings {
    fn default() -> Self {
        Self {
            filter: TargetFilter::new(
                Self::DEFAULT_RANGE,
                TargetFilter::DEFAULT_FOV,
                TargetCategories::all(),
            ),
            speed: 1.0,
            method: CalculationMethod::Linear,
            strategy: StrategyKind::Balanced,
        }
    }
}

struct LockState {
    settings: LockOnSettings,
    selector: TargetSelector,
    enabled: bool,
    /// Set by `enable`, consumed by the next tick.
    acquire_pending: bool,
    locked: Option<EntityId>,
}

/// Preferential-priority producer that tracks a single locked entity.
///
/// Once the locked entity dies, leaves the world or moves out of range the
/// lock is released and the producer disables itself.
#[derive(Clone)]
pub struct LockOn {
    state: Arc<Mutex<LockState>>,
}

impl LockOn {
    /// Creates a disabled lock-on.
    pub fn new(settings: LockOnSettings) -> Result<Self> {
        settings.validate()?;
        let state = LockState {
            settings,
            selector: TargetSelector::with_kind(settings.strategy),
            enabled: false,
            acquire_pending: false,
            locked: None,
        };
        tracing::debug!(
            strategy = state.selector.current_strategy_name(),
            description = state.selector.current_strategy_description(),
            "lock-on created"
        );
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
        })
    }

    /// Enables the producer; the target is chosen on the next tick.
    pub fn enable(&self) {
        let mut state = lock(&self.state);
        state.enabled = true;
        state.acquire_pending = true;
        state.locked = None;
    }

    pub fn disable(&self) {
        let mut state = lock(&self.state);
        state.enabled = false;
        state.acquire_pending = false;
        state.locked = None;
    }

    /// Swaps the targeting strategy; the next selection uses it.
    pub fn set_strategy(&self, kind: StrategyKind) {
        let mut state = lock(&self.state);
        state.settings.strategy = kind;
        state.selector.set_kind(kind);
    }

    pub fn is_enabled(&self) -> bool {
        lock(&self.state).enabled
    }

    pub fn locked_target(&self) -> Option<EntityId> {
        lock(&self.state).locked
    }

    fn exec(
        shared: &Arc<Mutex<LockState>>,
        idle: bool,
        scheduler: &mut AimScheduler,
        world: &dyn WorldOracle,
        viewer: &dyn ViewerOracle,
    ) {
        let mut state = lock(shared);
        if !state.enabled {
            return;
        }

        if state.acquire_pending {
            state.acquire_pending = false;
            state.locked = state
                .selector
                .acquire(&state.settings.filter, world, viewer)
                .map(|candidate| candidate.view.id);
            tracing::debug!(entity = ?state.locked, "lock-on acquired");
        }

        let range = state.settings.filter.range;
        let eye = viewer.eye_position();
        let held = state
            .locked
            .and_then(|id| world.entity(id))
            .filter(|view| view.alive && eye.distance(view.center()) <= range)
            .map(|view| view.id);
        let Some(target) = held else {
            tracing::debug!(entity = ?state.locked, "lock-on released");
            state.locked = None;
            state.enabled = false;
            return;
        };

        if !idle {
            return;
        }

        let condition_state = Arc::clone(shared);
        let task = AimTask::builder(AimTarget::Entity(target))
            .priority(AimPriority::Preferential)
            .condition(predicate(move |_| {
                if lock(&condition_state).enabled {
                    ConditionStatus::Execute
                } else {
                    ConditionStatus::Success
                }
            }))
            .method(state.settings.method)
            .multiplier(state.settings.speed)
            .label("lock_on")
            .on_success(rerun(shared))
            .on_failure(rerun(shared))
            .build();

        match task {
            Ok(task) => {
                scheduler.enqueue(task);
            }
            Err(error) => tracing::warn!(%error, "lock-on could not build task"),
        }
    }
}

fn rerun(shared: &Arc<Mutex<LockState>>) -> impl FnOnce(&mut Completion<'_>) + Send + 'static {
    let shared = Arc::clone(shared);
    move |completion: &mut Completion<'_>| {
        let idle = completion.is_idle();
        LockOn::exec(&shared, idle, completion.scheduler, completion.world, completion.viewer);
    }
}

impl AimProducer for LockOn {
    fn name(&self) -> &str {
        "lock_on"
    }

    fn enabled(&self) -> bool {
        self.is_enabled()
    }

    fn tick(
        &mut self,
        scheduler: &mut AimScheduler,
        world: &dyn WorldOracle,
        viewer: &dyn ViewerOracle,
    ) {
        let idle = scheduler.is_empty();
        Self::exec(&self.state, idle, scheduler, world, viewer);
    }
}
