//! Fixed-rate loop that moves the arena and ticks the aim runtime.
//!
//! Time inside the arena is simulated: every step advances a [`ManualClock`]
//! by exactly one tick interval, so results do not depend on how promptly the
//! async interval fires.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use aim_core::{EntityId, InMemoryViewer, InMemoryWorld, ManualClock, ProcessResult};
use aim_runtime::AimRuntime;
use aim_targeting::{
    AimAssist, AimAssistSettings, CounterAttack, CounterAttackSettings, DamageNotifier, LockOn,
    LockOnSettings,
};
use anyhow::{Context, Result};
use tokio::time::{self, MissedTickBehavior};

use crate::config::SandboxConfig;
use crate::scenario::{EventAction, Scenario};

/// Tallies of what the scheduler did over a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub ticks: u64,
    pub idle: u64,
    pub progress: u64,
    pub successes: u64,
    pub failures: u64,
    pub strikes: u64,
}

pub struct Sandbox {
    runtime: AimRuntime,
    clock: ManualClock,
    interval: Duration,
    world: InMemoryWorld,
    viewer: InMemoryViewer,
    scenario: Scenario,
    assist: AimAssist,
    lock_on: LockOn,
    notifier: DamageNotifier,
    strikes: Arc<AtomicU64>,
    tick: u64,
    summary: Summary,
}

impl Sandbox {
    pub fn new(config: &SandboxConfig, scenario: Scenario) -> Result<Self> {
        scenario.validate()?;

        let assist = AimAssist::new(AimAssistSettings {
            method: config.method,
            strategy: config.strategy,
            ..AimAssistSettings::default()
        })?;
        let lock_on = LockOn::new(LockOnSettings {
            method: config.method,
            ..LockOnSettings::default()
        })?;

        let strikes = Arc::new(AtomicU64::new(0));
        let counter = match config.seed {
            Some(seed) => CounterAttack::with_seed(CounterAttackSettings::default(), seed)?,
            None => CounterAttack::new(CounterAttackSettings::default())?,
        };
        let strike_count = strikes.clone();
        let counter = counter.with_strike(move |attacker: EntityId| {
            strike_count.fetch_add(1, Ordering::Relaxed);
            tracing::info!(entity = %attacker, "strike");
        });
        let notifier = counter.notifier();

        let clock = ManualClock::new(0);
        let runtime = AimRuntime::builder()
            .config(config.runtime.clone())
            .clock(clock.clone())
            .producer(assist.clone())
            .producer(lock_on.clone())
            .producer(counter)
            .build()
            .context("failed to build aim runtime")?;

        Ok(Self {
            runtime,
            clock,
            interval: config.runtime.tick_interval(),
            world: scenario.build_world(),
            viewer: scenario.build_viewer(),
            scenario,
            assist,
            lock_on,
            notifier,
            strikes,
            tick: 0,
            summary: Summary::default(),
        })
    }

    /// Applies this tick's events, moves the arena, then ticks the runtime.
    pub fn step(&mut self) {
        let actions: Vec<EventAction> = self.scenario.events_at(self.tick).copied().collect();
        for action in actions {
            self.apply(action);
        }
        self.scenario.move_entities(&mut self.world, self.tick);

        let outcome = self.runtime.tick(&self.world, &mut self.viewer);
        match outcome.map(|o| o.result) {
            None => self.summary.idle += 1,
            Some(ProcessResult::Progress) => self.summary.progress += 1,
            Some(ProcessResult::Success) => self.summary.successes += 1,
            Some(ProcessResult::Failure) => self.summary.failures += 1,
        }
        if let Some(outcome) = outcome.filter(|o| o.result.is_terminal()) {
            tracing::info!(
                tick = self.tick,
                task = %outcome.task,
                result = %outcome.result,
                orientation = %self.viewer.orientation,
                "task finished"
            );
        }

        self.tick += 1;
        self.summary.ticks = self.tick;
        self.clock.advance(duration_ms(self.interval));
    }

    fn apply(&mut self, action: EventAction) {
        tracing::info!(tick = self.tick, ?action, "scenario event");
        match action {
            EventAction::Damage { attacker } => self.notifier.notify(EntityId(attacker)),
            EventAction::Kill { entity } => {
                self.world.kill(EntityId(entity));
            }
            EventAction::EnableAssist => self.assist.enable(),
            EventAction::DisableAssist => self.assist.disable(),
            EventAction::EnableLockOn => self.lock_on.enable(),
            EventAction::DisableLockOn => self.lock_on.disable(),
        }
    }

    /// Runs `ticks` steps paced by a tokio interval at the configured rate.
    pub async fn run(mut self, ticks: u64) -> Summary {
        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for _ in 0..ticks {
            interval.tick().await;
            self.step();
        }
        self.summary()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            strikes: self.strikes.load(Ordering::Relaxed),
            ..self.summary.clone()
        }
    }
}

fn duration_ms(interval: Duration) -> u64 {
    u64::try_from(interval.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use aim_core::{EntityCategory, Vec3};
    use aim_runtime::RuntimeConfig;

    use super::*;
    use crate::scenario::{EntitySpec, Orbit, ScenarioEvent};

    fn fast_config() -> SandboxConfig {
        SandboxConfig {
            seed: Some(11),
            runtime: RuntimeConfig {
                tick_rate_hz: 1000,
                ..RuntimeConfig::default()
            },
            ..SandboxConfig::default()
        }
    }

    #[tokio::test]
    async fn default_arena_counter_attacks_the_player() {
        let sandbox = Sandbox::new(&fast_config(), Scenario::default()).unwrap();
        let summary = sandbox.run(60).await;

        assert_eq!(summary.ticks, 60);
        assert_eq!(
            summary.idle + summary.progress + summary.successes + summary.failures,
            60
        );
        assert!(summary.strikes >= 1, "{summary:?}");
        assert!(summary.successes >= summary.strikes);
    }

    #[tokio::test]
    async fn lock_on_releases_a_killed_target() {
        let scenario = Scenario {
            entities: vec![EntitySpec {
                id: 5,
                category: EntityCategory::Mob,
                orbit: Orbit {
                    center: Vec3::new(0.0, 0.0, 6.0),
                    ..Orbit::default()
                },
            }],
            events: vec![
                ScenarioEvent {
                    at: 0,
                    action: EventAction::EnableLockOn,
                },
                ScenarioEvent {
                    at: 5,
                    action: EventAction::Kill { entity: 5 },
                },
            ],
            ..Scenario::default()
        };
        let mut sandbox = Sandbox::new(&fast_config(), scenario).unwrap();

        for _ in 0..3 {
            sandbox.step();
        }
        assert_eq!(sandbox.lock_on.locked_target(), Some(EntityId(5)));
        assert!(sandbox.viewer.orientation.yaw.abs() < 1e-9);

        for _ in 0..4 {
            sandbox.step();
        }
        assert!(!sandbox.lock_on.is_enabled());
        assert_eq!(sandbox.lock_on.locked_target(), None);
        assert_eq!(sandbox.summary().failures, 1);
        assert_eq!(sandbox.world.len(), 1);
    }

    #[test]
    fn idle_arena_counts_idle_ticks() {
        let scenario = Scenario {
            events: Vec::new(),
            ..Scenario::default()
        };
        let mut sandbox = Sandbox::new(&fast_config(), scenario).unwrap();
        for _ in 0..5 {
            sandbox.step();
        }
        assert_eq!(
            sandbox.summary(),
            Summary {
                ticks: 5,
                idle: 5,
                ..Summary::default()
            }
        );
    }
}
