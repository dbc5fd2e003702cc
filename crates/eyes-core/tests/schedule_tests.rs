// Interval handles and the polled scheduler used by the native front-end.

use eyes_core::autotarget::AutoTargetGenerator;
use eyes_core::config::SceneConfig;
use eyes_core::schedule::{IntervalScheduler, PolledIntervals, ScheduledTask, TimerId};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn polled_interval_fires_each_period() {
    let mut sched = PolledIntervals::new();
    let id = sched.start_interval(100).unwrap();
    assert!(sched.poll(99).is_empty());
    assert_eq!(sched.poll(100).as_slice(), &[id]);
    assert!(sched.poll(150).is_empty());
    assert_eq!(sched.poll(200).as_slice(), &[id]);
}

#[test]
fn late_poll_fires_once() {
    let mut sched = PolledIntervals::new();
    let id = sched.start_interval(10).unwrap();
    assert_eq!(sched.poll(1000).as_slice(), &[id]);
    assert!(sched.poll(1005).is_empty());
    assert_eq!(sched.poll(1010).as_slice(), &[id]);
}

#[test]
fn cancelled_interval_never_fires() {
    let mut sched = PolledIntervals::new();
    let id = sched.start_interval(50).unwrap();
    sched.cancel(id);
    assert_eq!(sched.active_count(), 0);
    assert!(sched.poll(10_000).is_empty());
}

#[test]
fn task_reschedule_replaces_previous() {
    let mut sched = PolledIntervals::new();
    let mut task = ScheduledTask::default();
    let mut ids = Vec::new();
    for period in [100, 200, 300, 400] {
        ids.push(task.reschedule(&mut sched, period).unwrap());
        assert_eq!(sched.active_count(), 1);
    }
    assert_eq!(task.period_ms(), 400);
    assert!(task.is_current(ids[3]));
    assert!(!task.is_current(ids[0]));
    task.cancel(&mut sched);
    assert_eq!(sched.active_count(), 0);
    assert_eq!(task.id(), None);
}

struct Refusing;

impl IntervalScheduler for Refusing {
    fn start_interval(&mut self, _period_ms: u32) -> Option<TimerId> {
        None
    }
    fn cancel(&mut self, _id: TimerId) {}
}

#[test]
fn refused_interval_leaves_no_handle() {
    let mut task = ScheduledTask::default();
    assert_eq!(task.reschedule(&mut Refusing, 1000), None);
    assert!(task.id().is_none());
}

#[test]
fn generator_periods_stay_in_range() {
    let gen = AutoTargetGenerator::default();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let p = gen.sample_period(&mut rng);
        assert!((1500..5000).contains(&p), "period {p}");
    }
}

#[test]
fn generator_targets_sit_just_past_the_camera() {
    let gen = AutoTargetGenerator::default();
    let camera = SceneConfig::default().camera();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let t = gen.sample_target(&camera, &mut rng);
        // orthographic near plane at z = 24.9, then 0.01 along -Z
        assert!((t.z - 24.89).abs() < 1e-3);
        assert!(t.y.abs() <= 15.0 + 1e-3);
    }
}

#[test]
fn generator_stop_clears_target() {
    let mut gen = AutoTargetGenerator::default();
    let camera = SceneConfig::default().camera();
    let mut rng = StdRng::seed_from_u64(5);
    let mut sched = PolledIntervals::new();
    gen.retarget(&camera, &mut rng);
    let id = gen.restart(&mut sched, &mut rng).unwrap();
    assert!(gen.is_running());
    assert!(gen.fire(id, &camera, &mut rng).is_some());
    gen.stop(&mut sched);
    assert!(!gen.is_running());
    assert!(gen.target().is_none());
    assert!(gen.fire(id, &camera, &mut rng).is_none());
}
