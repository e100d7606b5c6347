//! Cloneable handle around the single scheduler mutex.
//!
//! Producers and completion hooks run under the tick's lock and receive the
//! scheduler directly. Everything else enqueues through an unbounded inbox
//! that never takes the lock, so a hook or a foreign thread can call
//! [`SharedScheduler::enqueue`] while a tick is in progress. The inbox is
//! drained into the queue, in send order, whenever the lock is next taken.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use aim_core::{AimScheduler, AimTask};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Clone, Debug)]
pub struct SharedScheduler {
    scheduler: Arc<Mutex<AimScheduler>>,
    inbox: UnboundedSender<AimTask>,
    pending: Arc<Mutex<UnboundedReceiver<AimTask>>>,
}

impl SharedScheduler {
    pub fn new(scheduler: AimScheduler) -> Self {
        let (inbox, pending) = mpsc::unbounded_channel();
        Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            inbox,
            pending: Arc::new(Mutex::new(pending)),
        }
    }

    /// Queues `task` for insertion without blocking.
    ///
    /// The task id is assigned when the inbox is drained, at the latest by the
    /// next tick.
    pub fn enqueue(&self, task: AimTask) {
        if let Err(error) = self.inbox.send(task) {
            tracing::warn!(priority = %error.0.priority(), "aim inbox closed; task dropped");
        }
    }

    /// Pending tasks, including ones still in the inbox.
    ///
    /// This and the other locking accessors below must not be called from
    /// inside a completion hook or producer.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards every pending task without running hooks.
    pub fn clear(&self) -> usize {
        self.lock().clear()
    }

    /// Runs `f` with exclusive access to the scheduler.
    pub fn with<R>(&self, f: impl FnOnce(&mut AimScheduler) -> R) -> R {
        f(&mut self.lock())
    }

    /// Locks the queue and moves everything waiting in the inbox into it.
    pub(crate) fn lock(&self) -> MutexGuard<'_, AimScheduler> {
        let mut scheduler = recover(self.scheduler.lock());
        let mut pending = recover(self.pending.lock());
        while let Ok(task) = pending.try_recv() {
            scheduler.enqueue(task);
        }
        scheduler
    }
}

impl Default for SharedScheduler {
    fn default() -> Self {
        Self::new(AimScheduler::default())
    }
}

fn recover<'a, T>(
    result: Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    result.unwrap_or_else(|poisoned| {
        tracing::warn!("aim scheduler lock was poisoned; recovering");
        PoisonError::into_inner(poisoned)
    })
}
