//! Contract for policies that feed the scheduler.

use crate::env::{ViewerOracle, WorldOracle};
use crate::scheduler::AimScheduler;

/// A policy that selects targets and enqueues tasks.
///
/// Producers run once per tick before the scheduler advances. By convention
/// they only enqueue while the scheduler is empty, which keeps at most one
/// aim operation live at a time. Completion hooks installed by a producer
/// usually re-run its selection so the loop closes without waiting a tick.
pub trait AimProducer: Send {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    /// Disabled producers are skipped by the tick driver.
    fn enabled(&self) -> bool {
        true
    }

    fn tick(
        &mut self,
        scheduler: &mut AimScheduler,
        world: &dyn WorldOracle,
        viewer: &dyn ViewerOracle,
    );
}
