//! The aim scheduler: a three-band task queue advanced one head per tick.
//!
//! # Ordering
//!
//! The queue is only ever reordered at insertion time:
//!
//! - [`AimPriority::Immediate`] goes to the very front
//! - [`AimPriority::Preferential`] goes before the first Normal task
//! - [`AimPriority::Normal`] goes to the back
//!
//! which keeps FIFO order inside the Preferential and Normal bands.
//!
//! # Threading
//!
//! The scheduler is a plain owned value with no interior locking. A host that
//! enqueues from more than one thread must wrap the whole scheduler in a single
//! mutex, as `aim-runtime` does.

use std::collections::VecDeque;

use crate::config::AimConfig;
use crate::env::AimEnv;
use crate::task::{AimPriority, AimTask, Completion, ProcessResult, TaskId};

/// What a call to [`AimScheduler::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub task: TaskId,
    pub result: ProcessResult,
}

/// Ordered queue of pending aim tasks.
#[derive(Debug)]
pub struct AimScheduler {
    tasks: VecDeque<AimTask>,
    config: AimConfig,
    next_id: u64,
}

impl AimScheduler {
    pub fn new() -> Self {
        Self::with_config(AimConfig::default())
    }

    pub fn with_config(config: AimConfig) -> Self {
        Self {
            tasks: VecDeque::new(),
            config,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AimConfig) {
        self.config = config;
    }

    /// Inserts a task according to its priority band and returns its id.
    pub fn enqueue(&mut self, mut task: AimTask) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        task.assign_id(id);

        let priority = task.priority();
        match priority {
            AimPriority::Immediate => self.tasks.push_front(task),
            AimPriority::Preferential => {
                let index = self
                    .tasks
                    .iter()
                    .position(|queued| queued.priority() == AimPriority::Normal)
                    .unwrap_or(self.tasks.len());
                self.tasks.insert(index, task);
            }
            AimPriority::Normal => self.tasks.push_back(task),
        }

        tracing::debug!(task = %id, %priority, queued = self.tasks.len(), "enqueued aim task");
        id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The task that the next tick will process.
    pub fn head(&self) -> Option<&AimTask> {
        self.tasks.front()
    }

    /// Pending tasks in processing order.
    pub fn iter(&self) -> impl Iterator<Item = &AimTask> {
        self.tasks.iter()
    }

    /// Drops every pending task without running any completion hook.
    ///
    /// Returns how many tasks were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.tasks.len();
        self.tasks.clear();
        if discarded > 0 {
            tracing::debug!(discarded, "cleared aim queue");
        }
        discarded
    }

    /// Processes the head task once.
    ///
    /// Returns `None` when the queue is empty. On a terminal result the task's
    /// matching hook runs while the task is still queued, then the task is
    /// removed by id, so a follow-up the hook enqueued ahead of it stays.
    pub fn tick(&mut self, env: &mut AimEnv<'_>) -> Option<TickOutcome> {
        let (task_id, result, hook) = {
            let head = self.tasks.front_mut()?;
            let result = head.process(env, &self.config);
            let hook = if result.is_terminal() {
                tracing::debug!(
                    task = %head.id(),
                    label = head.label().unwrap_or("-"),
                    %result,
                    ticks = head.ticks(),
                    "aim task finished"
                );
                head.take_hook(result)
            } else {
                None
            };
            (head.id(), result, hook)
        };
        let outcome = TickOutcome {
            task: task_id,
            result,
        };
        if !result.is_terminal() {
            return Some(outcome);
        }

        if let Some(hook) = hook {
            let mut completion = Completion {
                task_id,
                result,
                scheduler: self,
                world: env.world,
                viewer: &*env.viewer,
            };
            hook(&mut completion);
        }
        self.remove(task_id);

        Some(outcome)
    }

    /// Looks up a pending task by id.
    pub fn get(&self, id: TaskId) -> Option<&AimTask> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn remove(&mut self, id: TaskId) -> Option<AimTask> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        self.tasks.remove(index)
    }
}

impl Default for AimScheduler {
    fn default() -> Self {
        Self::new()
    }
}
