//! End-to-end scheduler scenarios against the in-memory oracles.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use aim_core::condition::builder::{always, frames};
use aim_core::{
    AimEnv, AimPriority, AimProducer, AimScheduler, AimTarget, AimTask, CalculationMethod, Clock,
    EntityCategory, EntityId, InMemoryViewer, InMemoryWorld, ManualClock, ProcessResult, Rotation,
    Vec3, ViewerOracle, WorldOracle,
};

const TICK_MS: u64 = 50;

/// Ticks the scheduler `n` times, advancing the clock before each tick.
fn run(
    scheduler: &mut AimScheduler,
    world: &InMemoryWorld,
    viewer: &mut InMemoryViewer,
    clock: &ManualClock,
    n: usize,
) -> Vec<ProcessResult> {
    let mut results = Vec::new();
    for _ in 0..n {
        clock.advance(TICK_MS);
        let mut env = AimEnv::new(world, &mut *viewer, clock.now_ms());
        if let Some(outcome) = scheduler.tick(&mut env) {
            results.push(outcome.result);
        }
    }
    results
}

#[test]
fn linear_converges_on_waypoint_ninety_degrees_right() {
    let world = InMemoryWorld::new();
    let mut viewer = InMemoryViewer::new(Vec3::ZERO, Rotation::ZERO);
    let clock = ManualClock::new(0);
    let mut scheduler = AimScheduler::new();

    // From yaw 0 (facing +z), the waypoint at -x sits at yaw 90.
    scheduler.enqueue(
        AimTask::builder(AimTarget::Waypoint(Vec3::new(-10.0, 0.0, 0.0)))
            .condition(always())
            .method(CalculationMethod::Linear)
            .multiplier(1.0)
            .build()
            .unwrap(),
    );

    let mut converged_at = None;
    for tick in 0..200 {
        clock.advance(TICK_MS);
        let mut env = AimEnv::new(&world, &mut viewer, clock.now_ms());
        let outcome = scheduler.tick(&mut env).unwrap();
        assert_ne!(outcome.result, ProcessResult::Failure);

        if (viewer.orientation.yaw - 90.0).abs() < 0.01 {
            converged_at = Some(tick);
            break;
        }
        assert!(viewer.orientation.yaw < 90.0 + 1e-9, "overshot at tick {tick}");
    }

    // 2.5 degrees per 50ms tick after the baseline tick.
    assert_eq!(converged_at, Some(36));
    assert!(viewer.orientation.pitch.abs() < 1e-9);
}

#[test]
fn ease_out_crosses_the_wrap_the_short_way() {
    let world = InMemoryWorld::new();
    // Facing yaw 170; the target at yaw -170 is 20 degrees further right.
    let mut viewer = InMemoryViewer::new(Vec3::ZERO, Rotation::new(170.0, 0.0));
    let clock = ManualClock::new(0);
    let mut scheduler = AimScheduler::new();
    scheduler.enqueue(
        AimTask::builder(AimTarget::Rotation(Rotation::new(-170.0, 0.0)))
            .method(CalculationMethod::EaseOut)
            .multiplier(4.0)
            .build()
            .unwrap(),
    );

    let mut previous = viewer.orientation.yaw;
    for _ in 0..100 {
        run(&mut scheduler, &world, &mut viewer, &clock, 1);
        assert!(viewer.orientation.yaw >= previous - 1e-9, "turned the long way");
        previous = viewer.orientation.yaw;
    }
    let remaining = (Rotation::new(-170.0, 0.0) - viewer.orientation).diff_normalize();
    assert!(remaining.magnitude() < 0.01);
}

#[test]
fn immediate_task_preempts_pending_normal_task() {
    let world = InMemoryWorld::new();
    let mut viewer = InMemoryViewer::default();
    let clock = ManualClock::new(0);
    let mut scheduler = AimScheduler::new();

    let normal = scheduler.enqueue(
        AimTask::builder(AimTarget::Waypoint(Vec3::new(0.0, 0.0, 10.0)))
            .build()
            .unwrap(),
    );
    run(&mut scheduler, &world, &mut viewer, &clock, 1);
    assert_eq!(scheduler.head().map(AimTask::id), Some(normal));

    let urgent = scheduler.enqueue(
        AimTask::builder(AimTarget::Waypoint(Vec3::new(10.0, 0.0, 0.0)))
            .priority(AimPriority::Immediate)
            .build()
            .unwrap(),
    );

    clock.advance(TICK_MS);
    let mut env = AimEnv::new(&world, &mut viewer, clock.now_ms());
    let outcome = scheduler.tick(&mut env).unwrap();
    assert_eq!(outcome.task, urgent);
    assert_eq!(scheduler.len(), 2);

    // The preempted task was frozen: it has only been processed once.
    let frozen = scheduler.iter().find(|task| task.id() == normal).unwrap();
    assert_eq!(frozen.ticks(), 1);
}

#[test]
fn removed_entity_fails_task_once() {
    let mut world = InMemoryWorld::new();
    world.spawn(EntityId(3), EntityCategory::Mob, Vec3::new(2.0, 0.0, 8.0));
    let mut viewer = InMemoryViewer::default();
    let clock = ManualClock::new(0);
    let mut scheduler = AimScheduler::new();

    let failures = Arc::new(AtomicUsize::new(0));
    let hook_failures = failures.clone();
    scheduler.enqueue(
        AimTask::builder(AimTarget::Entity(EntityId(3)))
            .on_failure(move |_| {
                hook_failures.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap(),
    );

    let results = run(&mut scheduler, &world, &mut viewer, &clock, 3);
    assert!(results.iter().all(|r| *r == ProcessResult::Progress));

    world.remove(EntityId(3));
    let results = run(&mut scheduler, &world, &mut viewer, &clock, 3);
    assert_eq!(results, [ProcessResult::Failure]);
    assert_eq!(failures.load(Ordering::SeqCst), 1);
    assert!(scheduler.is_empty());
}

#[test]
fn forced_frame_window_snaps_after_timeout() {
    let world = InMemoryWorld::new();
    let mut viewer = InMemoryViewer::default();
    let clock = ManualClock::new(0);
    let mut scheduler = AimScheduler::new();
    let target = Vec3::new(-5.0, 3.0, 5.0);

    scheduler.enqueue(
        AimTask::builder(AimTarget::Waypoint(target))
            .condition(frames(4, 8, true).unwrap())
            .method(CalculationMethod::Linear)
            .build()
            .unwrap(),
    );

    run(&mut scheduler, &world, &mut viewer, &clock, 4);
    assert_eq!(viewer.writes, 0, "reaction window must not move the view");

    let results = run(&mut scheduler, &world, &mut viewer, &clock, 4);
    assert!(results.iter().all(|r| *r == ProcessResult::Progress));
    assert_eq!(viewer.writes, 4);

    let results = run(&mut scheduler, &world, &mut viewer, &clock, 1);
    assert_eq!(results, [ProcessResult::Success]);
    assert_eq!(viewer.orientation, Rotation::look_at(Vec3::ZERO, target));
    assert!(scheduler.is_empty());
}

/// Cycles through fixed waypoints, one task at a time.
struct Patrol {
    points: Vec<Vec3>,
    next: usize,
    completed: Arc<AtomicUsize>,
}

impl AimProducer for Patrol {
    fn name(&self) -> &str {
        "patrol"
    }

    fn tick(
        &mut self,
        scheduler: &mut AimScheduler,
        _world: &dyn WorldOracle,
        _viewer: &dyn ViewerOracle,
    ) {
        if !scheduler.is_empty() {
            return;
        }
        let point = self.points[self.next % self.points.len()];
        self.next += 1;
        let completed = self.completed.clone();
        scheduler.enqueue(
            AimTask::builder(AimTarget::Waypoint(point))
                .condition(frames(0, 2, true).unwrap())
                .on_success(move |_| {
                    completed.fetch_add(1, Ordering::SeqCst);
                })
                .build()
                .unwrap(),
        );
    }
}

#[test]
fn producer_keeps_one_task_live() {
    let world = InMemoryWorld::new();
    let mut viewer = InMemoryViewer::default();
    let clock = ManualClock::new(0);
    let mut scheduler = AimScheduler::new();
    let completed = Arc::new(AtomicUsize::new(0));
    let mut patrol = Patrol {
        points: vec![Vec3::new(0.0, 0.0, 10.0), Vec3::new(10.0, 0.0, 0.0)],
        next: 0,
        completed: completed.clone(),
    };

    for _ in 0..9 {
        patrol.tick(&mut scheduler, &world, &viewer);
        assert_eq!(scheduler.len(), 1);
        run(&mut scheduler, &world, &mut viewer, &clock, 1);
    }

    // Each task lives for three ticks: two Execute, then Force.
    assert_eq!(completed.load(Ordering::SeqCst), 3);
    assert_eq!(patrol.name(), "patrol");
}
