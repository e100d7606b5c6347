//! Aim tasks: one target, one condition, one solver method.
//!
//! A task is created by a producer, owned by the scheduler while pending and
//! dropped once it reports a terminal [`ProcessResult`]. Its only mutable state
//! is the previous step (for EaseIn continuity) and the timestamp of its
//! previous tick.

use std::fmt;

use crate::condition::{AimCondition, Always, ConditionContext, ConditionStatus};
use crate::config::AimConfig;
use crate::env::{AimEnv, ViewerOracle, WorldOracle};
use crate::error::AimError;
use crate::rotation::Rotation;
use crate::scheduler::AimScheduler;
use crate::solver::{CalculationMethod, SolverInput};
use crate::target::AimTarget;

/// Sequential identifier assigned by the scheduler at enqueue time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskId(pub u64);

impl TaskId {
    /// Placeholder carried by tasks that were never enqueued.
    pub const UNASSIGNED: Self = Self(0);
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// Queue insertion band.
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
pub enum AimPriority {
    /// Inserted at the very front.
    Immediate,
    /// Inserted before the first Normal task.
    Preferential,
    /// Appended at the end.
    #[default]
    Normal,
}

impl AimPriority {
    /// Parses a case-insensitive snake_case priority name.
    pub fn from_name(name: &str) -> Result<Self, AimError> {
        name.parse().map_err(|_| AimError::UnknownPriority(name.to_string()))
    }
}

/// Outcome of processing a task for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ProcessResult {
    Progress,
    Success,
    Failure,
}

impl ProcessResult {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, ProcessResult::Progress)
    }
}

/// Context handed to a completion hook.
///
/// The hook runs while the finished task is still queued at the head; the
/// scheduler removes it by id once the hook returns. Tasks enqueued from the
/// hook keep their place, whatever their priority.
pub struct Completion<'a> {
    pub task_id: TaskId,
    pub result: ProcessResult,
    pub scheduler: &'a mut AimScheduler,
    pub world: &'a dyn WorldOracle,
    pub viewer: &'a dyn ViewerOracle,
}

impl Completion<'_> {
    /// The finished task, in its final state.
    pub fn task(&self) -> Option<&AimTask> {
        self.scheduler.get(self.task_id)
    }

    /// Whether the finished task is the only one left in the queue.
    ///
    /// Producers that keep one task live check this instead of
    /// [`AimScheduler::is_empty`] when re-running from a hook.
    pub fn is_idle(&self) -> bool {
        self.scheduler.iter().all(|task| task.id() == self.task_id)
    }

    /// Shorthand for `completion.scheduler.enqueue(task)`.
    pub fn enqueue(&mut self, task: AimTask) -> TaskId {
        self.scheduler.enqueue(task)
    }
}

/// Callback invoked at most once, when the task terminates naturally.
pub type CompletionHook = Box<dyn FnOnce(&mut Completion<'_>) + Send>;

/// A pending "point the view at X" operation.
pub struct AimTask {
    id: TaskId,
    priority: AimPriority,
    target: AimTarget,
    condition: Box<dyn AimCondition>,
    method: CalculationMethod,
    multiplier: f64,
    label: Option<String>,
    on_success: Option<CompletionHook>,
    on_failure: Option<CompletionHook>,

    velocity: Rotation,
    last_tick_ms: Option<u64>,
    elapsed_ms: f64,
    ticks: u32,
}

impl AimTask {
    pub fn builder(target: AimTarget) -> AimTaskBuilder {
        AimTaskBuilder::new(target)
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: TaskId) {
        self.id = id;
    }

    pub fn priority(&self) -> AimPriority {
        self.priority
    }

    pub fn target(&self) -> &AimTarget {
        &self.target
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Step applied on the most recent Execute tick.
    pub fn velocity(&self) -> Rotation {
        self.velocity
    }

    /// Milliseconds measured on the most recent tick.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Number of times [`AimTask::process`] has run.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Advances the task by one tick.
    ///
    /// Checks the condition, resolves the target, then waits, rotates, or
    /// snaps depending on the condition's verdict. A target that can no longer
    /// be resolved fails the task whatever the condition says.
    pub fn process(&mut self, env: &mut AimEnv<'_>, config: &AimConfig) -> ProcessResult {
        let elapsed_ms = match self.last_tick_ms.replace(env.now_ms) {
            Some(previous) => env.now_ms.saturating_sub(previous) as f64,
            None => 0.0,
        };
        self.elapsed_ms = elapsed_ms;
        self.ticks = self.ticks.saturating_add(1);

        let status = {
            let ctx = ConditionContext::new(env.world, &*env.viewer, env.now_ms);
            self.condition.check(&ctx)
        };

        let Some(resolved) = self.target.resolve(env.world) else {
            tracing::debug!(task = %self.id, aim = %self.target, "target lost");
            return ProcessResult::Failure;
        };

        tracing::trace!(task = %self.id, %status, elapsed_ms, "processing");

        match status {
            ConditionStatus::Suspend => ProcessResult::Progress,
            ConditionStatus::Execute => {
                let current = env.viewer.orientation();
                let desired = resolved.orientation_from(env.viewer.eye_position());
                let input = SolverInput {
                    delta: (desired - current).diff_normalize(),
                    elapsed_ms,
                    sensitivity: config
                        .scaled_sensitivity(env.viewer.sensitivity(), self.multiplier),
                    previous_velocity: self.velocity,
                };
                let step = self.method.step(&input, config);
                env.viewer.set_orientation(current + step);
                self.velocity = step;
                ProcessResult::Progress
            }
            ConditionStatus::Force => {
                let desired = resolved.orientation_from(env.viewer.eye_position());
                env.viewer.set_orientation(desired);
                self.velocity = Rotation::ZERO;
                ProcessResult::Success
            }
            ConditionStatus::Success => ProcessResult::Success,
            ConditionStatus::Failure => ProcessResult::Failure,
        }
    }

    /// Removes the hook matching `result`. Both hooks are dropped so neither
    /// can run a second time.
    pub(crate) fn take_hook(&mut self, result: ProcessResult) -> Option<CompletionHook> {
        let success = self.on_success.take();
        let failure = self.on_failure.take();
        match result {
            ProcessResult::Success => success,
            ProcessResult::Failure => failure,
            ProcessResult::Progress => None,
        }
    }
}

impl fmt::Debug for AimTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AimTask")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("target", &self.target)
            .field("method", &self.method)
            .field("multiplier", &self.multiplier)
            .field("label", &self.label)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AimTask`].
///
/// Defaults: Normal priority, an [`Always`] condition, Linear method,
/// multiplier 1.0, no hooks.
pub struct AimTaskBuilder {
    priority: AimPriority,
    target: AimTarget,
    condition: Box<dyn AimCondition>,
    method: CalculationMethod,
    multiplier: f64,
    label: Option<String>,
    on_success: Option<CompletionHook>,
    on_failure: Option<CompletionHook>,
}

impl AimTaskBuilder {
    pub fn new(target: AimTarget) -> Self {
        Self {
            priority: AimPriority::default(),
            target,
            condition: Box::new(Always),
            method: CalculationMethod::default(),
            multiplier: 1.0,
            label: None,
            on_success: None,
            on_failure: None,
        }
    }

    pub fn priority(mut self, priority: AimPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn condition(mut self, condition: Box<dyn AimCondition>) -> Self {
        self.condition = condition;
        self
    }

    pub fn method(mut self, method: CalculationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn on_success<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&mut Completion<'_>) + Send + 'static,
    {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_failure<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&mut Completion<'_>) + Send + 'static,
    {
        self.on_failure = Some(Box::new(hook));
        self
    }

    /// Validates the multiplier and produces the task.
    pub fn build(self) -> Result<AimTask, AimError> {
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(AimError::InvalidMultiplier(self.multiplier));
        }

        Ok(AimTask {
            id: TaskId::UNASSIGNED,
            priority: self.priority,
            target: self.target,
            condition: self.condition,
            method: self.method,
            multiplier: self.multiplier,
            label: self.label,
            on_success: self.on_success,
            on_failure: self.on_failure,
            velocity: Rotation::ZERO,
            last_tick_ms: None,
            elapsed_ms: 0.0,
            ticks: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::builder::{frames, immediate, predicate};
    use crate::env::{EntityCategory, EntityId, InMemoryViewer, InMemoryWorld};
    use crate::geometry::{BlockPos, Vec3};

    fn viewer() -> InMemoryViewer {
        InMemoryViewer::new(Vec3::ZERO, Rotation::ZERO)
    }

    fn waypoint_task(condition: Box<dyn AimCondition>) -> AimTask {
        AimTask::builder(AimTarget::Waypoint(Vec3::new(10.0, 0.0, 0.0)))
            .condition(condition)
            .build()
            .unwrap()
    }

    #[test]
    fn builder_rejects_bad_multipliers() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = AimTask::builder(AimTarget::Waypoint(Vec3::ZERO))
                .multiplier(bad)
                .build()
                .unwrap_err();
            assert!(matches!(err, AimError::InvalidMultiplier(_)));
        }
    }

    #[test]
    fn first_tick_establishes_time_baseline() {
        let world = InMemoryWorld::new();
        let mut viewer = viewer();
        let mut task = waypoint_task(Box::new(Always));

        let mut env = AimEnv::new(&world, &mut viewer, 1_000);
        assert_eq!(task.process(&mut env, &AimConfig::default()), ProcessResult::Progress);
        assert_eq!(task.elapsed_ms(), 0.0);
        assert_eq!(viewer.orientation, Rotation::ZERO);

        let mut env = AimEnv::new(&world, &mut viewer, 1_050);
        task.process(&mut env, &AimConfig::default());
        assert_eq!(task.elapsed_ms(), 50.0);
        // 50ms * 0.5 / 10 = 2.5 degrees toward +x, which is negative yaw.
        assert!((viewer.orientation.yaw + 2.5).abs() < 1e-9);
    }

    #[test]
    fn suspend_leaves_view_untouched() {
        let world = InMemoryWorld::new();
        let mut viewer = viewer();
        let mut task = waypoint_task(frames(3, 6, false).unwrap());

        for now in [0, 50, 100] {
            let mut env = AimEnv::new(&world, &mut viewer, now);
            assert_eq!(task.process(&mut env, &AimConfig::default()), ProcessResult::Progress);
        }
        assert_eq!(viewer.writes, 0);
    }

    #[test]
    fn suspended_ticks_keep_advancing_the_clock() {
        let world = InMemoryWorld::new();
        let mut viewer = viewer();
        let mut task = waypoint_task(frames(4, 8, false).unwrap());
        let config = AimConfig::default();

        for now in [0, 50, 100, 150] {
            let mut env = AimEnv::new(&world, &mut viewer, now);
            task.process(&mut env, &config);
        }
        assert_eq!(viewer.writes, 0);

        // The first Execute tick only sees the 50ms since the last suspended tick.
        let mut env = AimEnv::new(&world, &mut viewer, 200);
        assert_eq!(task.process(&mut env, &config), ProcessResult::Progress);
        assert_eq!(task.elapsed_ms(), 50.0);
        assert!((viewer.orientation.yaw + 2.5).abs() < 1e-9);

        let mut env = AimEnv::new(&world, &mut viewer, 250);
        task.process(&mut env, &config);
        assert!((viewer.orientation.yaw + 5.0).abs() < 1e-9);
    }

    #[test]
    fn force_snaps_and_succeeds() {
        let world = InMemoryWorld::new();
        let mut viewer = viewer();
        let mut task = waypoint_task(immediate());

        let mut env = AimEnv::new(&world, &mut viewer, 0);
        assert_eq!(task.process(&mut env, &AimConfig::default()), ProcessResult::Success);
        assert!((viewer.orientation.yaw + 90.0).abs() < 1e-9);
        assert!(viewer.orientation.pitch.abs() < 1e-9);
    }

    #[test]
    fn lost_target_fails_regardless_of_condition() {
        let mut world = InMemoryWorld::new();
        world.spawn(EntityId(7), EntityCategory::Mob, Vec3::new(0.0, 0.0, 5.0));
        let mut viewer = viewer();
        let mut task = AimTask::builder(AimTarget::Entity(EntityId(7))).build().unwrap();

        let mut env = AimEnv::new(&world, &mut viewer, 0);
        assert_eq!(task.process(&mut env, &AimConfig::default()), ProcessResult::Progress);

        world.kill(EntityId(7));
        let mut env = AimEnv::new(&world, &mut viewer, 50);
        assert_eq!(task.process(&mut env, &AimConfig::default()), ProcessResult::Failure);
    }

    #[test]
    fn broken_block_fails() {
        let mut world = InMemoryWorld::new();
        let pos = BlockPos::new(0, 0, 3);
        let mut viewer = viewer();
        let mut task = AimTask::builder(AimTarget::block(pos)).build().unwrap();

        let mut env = AimEnv::new(&world, &mut viewer, 0);
        assert_eq!(task.process(&mut env, &AimConfig::default()), ProcessResult::Failure);

        world.place_block(pos);
        let mut env = AimEnv::new(&world, &mut viewer, 10);
        assert_eq!(task.process(&mut env, &AimConfig::default()), ProcessResult::Progress);
    }

    #[test]
    fn condition_verdicts_pass_through() {
        let world = InMemoryWorld::new();
        let mut viewer = viewer();

        let mut done = waypoint_task(predicate(|_| ConditionStatus::Success));
        let mut env = AimEnv::new(&world, &mut viewer, 0);
        assert_eq!(done.process(&mut env, &AimConfig::default()), ProcessResult::Success);

        let mut rejected = waypoint_task(predicate(|_| ConditionStatus::Failure));
        let mut env = AimEnv::new(&world, &mut viewer, 0);
        assert_eq!(rejected.process(&mut env, &AimConfig::default()), ProcessResult::Failure);
        assert_eq!(viewer.writes, 0);
    }

    #[test]
    fn rotation_target_rotates_directly() {
        let world = InMemoryWorld::new();
        let mut viewer = viewer();
        let mut task = AimTask::builder(AimTarget::Rotation(Rotation::new(30.0, -10.0)))
            .method(CalculationMethod::Immediate)
            .build()
            .unwrap();

        let mut env = AimEnv::new(&world, &mut viewer, 0);
        task.process(&mut env, &AimConfig::default());
        assert_eq!(viewer.orientation, Rotation::new(30.0, -10.0));
    }

    #[test]
    fn hooks_are_taken_once() {
        let mut task = AimTask::builder(AimTarget::Waypoint(Vec3::ZERO))
            .on_success(|_| {})
            .on_failure(|_| {})
            .build()
            .unwrap();
        assert!(task.take_hook(ProcessResult::Success).is_some());
        assert!(task.take_hook(ProcessResult::Failure).is_none());
    }

    #[test]
    fn priority_names_parse() {
        assert_eq!(AimPriority::from_name("Preferential"), Ok(AimPriority::Preferential));
        assert_eq!(
            AimPriority::from_name("urgent"),
            Err(AimError::UnknownPriority("urgent".into()))
        );
    }
}
