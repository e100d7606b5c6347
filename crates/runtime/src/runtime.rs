//! High-level tick orchestrator.
//!
//! The runtime owns the shared scheduler, the registered producers and the
//! clock. Hosts call [`AimRuntime::tick`] once per game tick with the current
//! world and viewer; other threads enqueue through [`AimRuntime::handle`].

use aim_core::{
    AimEnv, AimProducer, AimScheduler, Clock, SystemClock, TickOutcome, ViewerOracle, WorldOracle,
};

use crate::config::{RuntimeConfig, TickOrder};
use crate::error::Result;
use crate::shared::SharedScheduler;

/// Drives producers and the scheduler once per tick.
pub struct AimRuntime {
    scheduler: SharedScheduler,
    producers: Vec<Box<dyn AimProducer>>,
    clock: Box<dyn Clock>,
    config: RuntimeConfig,
    active: bool,
    ticks: u64,
}

impl AimRuntime {
    /// Create a new runtime builder
    pub fn builder() -> AimRuntimeBuilder {
        AimRuntimeBuilder::new()
    }

    /// Cloneable handle for enqueueing from other threads or completion hooks.
    pub fn handle(&self) -> SharedScheduler {
        self.scheduler.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of ticks processed while active.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn producer_names(&self) -> Vec<&str> {
        self.producers.iter().map(|p| p.name()).collect()
    }

    pub fn register(&mut self, producer: impl AimProducer + 'static) {
        tracing::debug!(producer = producer.name(), "registered aim producer");
        self.producers.push(Box::new(producer));
    }

    /// Stops ticking and drops every pending task without running hooks.
    pub fn disable(&mut self) -> usize {
        self.active = false;
        let discarded = self.scheduler.clear();
        tracing::debug!(discarded, "aim runtime disabled");
        discarded
    }

    pub fn enable(&mut self) {
        self.active = true;
    }

    /// Runs one tick: producers and one scheduler step, ordered per
    /// [`RuntimeConfig::order`].
    ///
    /// Returns what the scheduler did, or `None` when the runtime is disabled
    /// or the queue stayed empty.
    pub fn tick(
        &mut self,
        world: &dyn WorldOracle,
        viewer: &mut dyn ViewerOracle,
    ) -> Option<TickOutcome> {
        if !self.active {
            return None;
        }
        self.ticks += 1;
        let now_ms = self.clock.now_ms();
        let mut scheduler = self.scheduler.lock();

        let outcome = match self.config.order {
            TickOrder::ProducersFirst => {
                run_producers(&mut self.producers, &mut scheduler, world, &*viewer);
                advance(&mut scheduler, world, viewer, now_ms)
            }
            TickOrder::SchedulerFirst => {
                let outcome = advance(&mut scheduler, world, viewer, now_ms);
                run_producers(&mut self.producers, &mut scheduler, world, &*viewer);
                outcome
            }
        };

        tracing::trace!(
            tick = self.ticks,
            now_ms,
            queued = scheduler.len(),
            outcome = ?outcome,
            "aim tick"
        );
        outcome
    }
}

fn run_producers(
    producers: &mut [Box<dyn AimProducer>],
    scheduler: &mut AimScheduler,
    world: &dyn WorldOracle,
    viewer: &dyn ViewerOracle,
) {
    for producer in producers.iter_mut().filter(|p| p.enabled()) {
        producer.tick(scheduler, world, viewer);
    }
}

fn advance(
    scheduler: &mut AimScheduler,
    world: &dyn WorldOracle,
    viewer: &mut dyn ViewerOracle,
    now_ms: u64,
) -> Option<TickOutcome> {
    let mut env = AimEnv::new(world, viewer, now_ms);
    scheduler.tick(&mut env)
}

/// Builder for [`AimRuntime`].
pub struct AimRuntimeBuilder {
    config: RuntimeConfig,
    clock: Option<Box<dyn Clock>>,
    producers: Vec<Box<dyn AimProducer>>,
    scheduler: Option<SharedScheduler>,
}

impl AimRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            clock: None,
            producers: Vec::new(),
            scheduler: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Defaults to a [`SystemClock`] started at build time.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn producer(mut self, producer: impl AimProducer + 'static) -> Self {
        self.producers.push(Box::new(producer));
        self
    }

    /// Reuses an existing handle instead of creating a fresh queue.
    ///
    /// The handle's scheduler takes this builder's solver configuration.
    pub fn scheduler(mut self, scheduler: SharedScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<AimRuntime> {
        self.config.validate()?;

        let scheduler = match self.scheduler {
            Some(shared) => {
                shared.with(|s| s.set_config(self.config.aim.clone()));
                shared
            }
            None => SharedScheduler::new(AimScheduler::with_config(self.config.aim.clone())),
        };

        tracing::debug!(
            producers = self.producers.len(),
            tick_rate_hz = self.config.tick_rate_hz,
            order = %self.config.order,
            "aim runtime built"
        );

        Ok(AimRuntime {
            scheduler,
            producers: self.producers,
            clock: self
                .clock
                .unwrap_or_else(|| Box::new(SystemClock::new())),
            config: self.config,
            active: true,
            ticks: 0,
        })
    }
}

impl Default for AimRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
