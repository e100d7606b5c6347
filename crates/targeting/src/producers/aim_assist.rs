//! Aim assist: keep easing toward the best candidate while it stays the best.

use std::sync::{Arc, Mutex};

use aim_core::condition::builder::predicate;
use aim_core::{
    AimPriority, AimProducer, AimScheduler, AimTarget, AimTask, CalculationMethod, Completion,
    ConditionStatus, EntityId, ViewerOracle, WorldOracle,
};

use crate::error::{Result, ensure_positive};
use crate::filter::TargetFilter;
use crate::producers::lock;
use crate::selector::TargetSelector;
use crate::strategy::StrategyKind;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimAssistSettings {
    pub filter: TargetFilter,
    /// Speed multiplier handed to each task.
    pub speed: f64,
    pub method: CalculationMethod,
    pub strategy: StrategyKind,
}

impl AimAssistSettings {
    pub fn validate(&self) -> Result<()> {
        self.filter.validate()?;
        ensure_positive("speed", self.speed)
    }
}

impl Default for AimAssistSettings {
    fn default() -> Self {
        Self {
            filter: TargetFilter::default(),
            speed: 1.0,
            method: CalculationMethod::Linear,
            strategy: StrategyKind::Direction,
        }
    }
}

struct AssistState {
    settings: AimAssistSettings,
    selector: TargetSelector,
    enabled: bool,
    current: Option<EntityId>,
}

impl AssistState {
    fn best(&self, world: &dyn WorldOracle, viewer: &dyn ViewerOracle) -> Option<EntityId> {
        self.selector
            .acquire(&self.settings.filter, world, viewer)
            .map(|candidate| candidate.view.id)
    }
}

/// Normal-priority producer that follows the best candidate.
///
/// The task it enqueues fails as soon as a different candidate becomes the
/// best, and both hooks immediately select again.
#[derive(Clone)]
pub struct AimAssist {
    state: Arc<Mutex<AssistState>>,
}

impl AimAssist {
    /// Creates a disabled aim assist.
    pub fn new(settings: AimAssistSettings) -> Result<Self> {
        settings.validate()?;
        let state = AssistState {
            settings,
            selector: TargetSelector::with_kind(settings.strategy),
            enabled: false,
            current: None,
        };
        tracing::debug!(
            strategy = state.selector.current_strategy_name(),
            description = state.selector.current_strategy_description(),
            "aim assist created"
        );
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
        })
    }

    pub fn enable(&self) {
        lock(&self.state).enabled = true;
    }

    /// Pending tasks see the change on their next condition check and finish
    /// successfully.
    pub fn disable(&self) {
        let mut state = lock(&self.state);
        state.enabled = false;
        state.current = None;
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

    pub fn current_target(&self) -> Option<EntityId> {
        lock(&self.state).current
    }

    pub fn settings(&self) -> AimAssistSettings {
        lock(&self.state).settings
    }

    /// Selects a target and enqueues a task if the scheduler is idle.
    ///
    /// From a hook the finishing task still sits at the head, so `idle` is
    /// decided by the caller rather than by `scheduler.is_empty()`.
    fn summon(
        shared: &Arc<Mutex<AssistState>>,
        idle: bool,
        scheduler: &mut AimScheduler,
        world: &dyn WorldOracle,
        viewer: &dyn ViewerOracle,
    ) {
        let mut state = lock(shared);
        if !state.enabled || !idle {
            return;
        }

        state.current = state.best(world, viewer);
        let Some(target) = state.current else {
            return;
        };

        let condition_state = Arc::clone(shared);
        let task = AimTask::builder(AimTarget::Entity(target))
            .priority(AimPriority::Normal)
            .condition(predicate(move |ctx| {
                let state = lock(&condition_state);
                if !state.enabled {
                    ConditionStatus::Success
                } else if state.best(ctx.world, ctx.viewer) != state.current {
                    ConditionStatus::Failure
                } else {
                    ConditionStatus::Execute
                }
            }))
            .method(state.settings.method)
            .multiplier(state.settings.speed)
            .label("aim_assist")
            .on_success(resummon(shared))
            .on_failure(resummon(shared))
            .build();

        match task {
            Ok(task) => {
                tracing::debug!(entity = %target, "aim assist acquired target");
                scheduler.enqueue(task);
            }
            Err(error) => tracing::warn!(%error, "aim assist could not build task"),
        }
    }
}

fn resummon(
    shared: &Arc<Mutex<AssistState>>,
) -> impl FnOnce(&mut Completion<'_>) + Send + 'static {
    let shared = Arc::clone(shared);
    move |completion: &mut Completion<'_>| {
        let idle = completion.is_idle();
        AimAssist::summon(&shared, idle, completion.scheduler, completion.world, completion.viewer);
    }
}

impl AimProducer for AimAssist {
    fn name(&self) -> &str {
        "aim_assist"
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
        Self::summon(&self.state, idle, scheduler, world, viewer);
    }
}
