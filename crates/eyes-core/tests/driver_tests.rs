// End-to-end tick behaviour through the intent queue.

use eyes_core::config::{SceneConfig, Variant};
use eyes_core::driver::{Driver, Intent};
use eyes_core::schedule::{IntervalScheduler, PolledIntervals};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn driver(variant: Variant, width: f32, height: f32) -> (Driver, PolledIntervals, StdRng) {
    let mut sched = PolledIntervals::new();
    let mut rng = StdRng::seed_from_u64(42);
    let mut d = Driver::new(SceneConfig::for_variant(variant), width, height);
    d.start(&mut sched, &mut rng);
    (d, sched, rng)
}

#[test]
fn intents_are_deferred_until_tick() {
    let (mut d, mut sched, mut rng) = driver(Variant::Perspective, 1600.0, 900.0);
    d.push(Intent::Click { x: 800.0, y: 450.0 });
    assert_eq!(d.pending(), 1);
    assert!(d.state().particles.is_empty());
    let report = d.tick(&mut sched, &mut rng);
    assert_eq!(d.pending(), 0);
    assert_eq!(report.spawned, 100);
    assert_eq!(report.pixel_level, Some(12.0));
}

#[test]
fn clicks_outside_the_disc_do_nothing() {
    let (mut d, mut sched, mut rng) = driver(Variant::Perspective, 1600.0, 900.0);
    d.push(Intent::Click { x: 5.0, y: 5.0 });
    let report = d.tick(&mut sched, &mut rng);
    assert_eq!(report.spawned, 0);
    assert_eq!(report.pixel_level, None);
    assert_eq!(d.state().pixel.level(), 0.5);
}

#[test]
fn three_clicks_cycle_pixel_levels() {
    let (mut d, mut sched, mut rng) = driver(Variant::Orthographic, 1600.0, 900.0);
    let mut levels = Vec::new();
    for _ in 0..3 {
        d.push(Intent::Click { x: 800.0, y: 450.0 });
        levels.push(d.tick(&mut sched, &mut rng).pixel_level);
    }
    assert_eq!(levels, vec![Some(12.0), Some(0.5), Some(12.0)]);
    assert_eq!(d.frame_view().pixel_level, 12.0);
}

#[test]
fn no_turning_until_model_loads() {
    let (mut d, mut sched, mut rng) = driver(Variant::Perspective, 1600.0, 900.0);
    let pupil = d.state().pupil;
    d.push(Intent::PointerMove { x: 1400.0, y: 200.0 });
    for _ in 0..20 {
        let report = d.tick(&mut sched, &mut rng);
        assert!(!report.turned);
    }
    assert!(d.state().model.is_none());
    assert!(d.frame_view().model.is_none());
    assert_eq!(d.state().pupil, pupil);

    d.push(Intent::ModelLoaded);
    let report = d.tick(&mut sched, &mut rng);
    assert!(report.turned);
    assert!(d.state().model.is_some());
}

#[test]
fn pointer_right_moves_pupil_left() {
    let (mut d, mut sched, mut rng) = driver(Variant::Perspective, 1600.0, 900.0);
    d.push(Intent::ModelLoaded);
    d.push(Intent::PointerMove { x: 1400.0, y: 450.0 });
    for _ in 0..120 {
        d.tick(&mut sched, &mut rng);
    }
    let model = d.state().model.unwrap();
    let (_, yaw) = eyes_core::look::pitch_yaw_degrees(model.rotation);
    assert!(yaw > 0.0);
    assert!(d.state().pupil.x < 0.0);
    assert_eq!(d.state().pupil.z, -6.0);
}

#[test]
fn narrow_start_enters_auto_mode_with_one_timer() {
    let (d, sched, _) = driver(Variant::Responsive, 800.0, 600.0);
    assert!(d.state().auto_mode);
    assert_eq!(sched.active_count(), 1);
    assert!(d.state().auto_target.target().is_some());
    let period = d.state().auto_target.period_ms();
    assert!((1500..5000).contains(&period));
}

#[test]
fn auto_mode_ignores_pointer_moves() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 800.0, 600.0);
    let before = d.state().look_target();
    d.push(Intent::PointerMove { x: 10.0, y: 10.0 });
    d.push(Intent::PointerMove { x: 790.0, y: 590.0 });
    d.tick(&mut sched, &mut rng);
    assert_eq!(d.state().look_target(), before);
}

#[test]
fn resizes_leave_exactly_one_timer() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 800.0, 600.0);
    for i in 0..10 {
        d.push(Intent::Resize {
            width: 700.0 + i as f32 * 10.0,
            height: 600.0,
        });
    }
    let report = d.tick(&mut sched, &mut rng);
    assert_eq!(report.resized, Some((790, 600)));
    assert_eq!(sched.active_count(), 1);
    assert_eq!(sched.active_ids(), vec![d.state().auto_target.timer().unwrap()]);
}

#[test]
fn widening_stops_auto_mode() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 800.0, 600.0);
    d.push(Intent::Resize {
        width: 1600.0,
        height: 900.0,
    });
    d.tick(&mut sched, &mut rng);
    assert!(!d.state().auto_mode);
    assert_eq!(sched.active_count(), 0);
    assert_eq!(d.state().origin, glam::Vec2::new(6.0, 0.0));
    assert_eq!(d.state().background_center(), Vec3::new(6.0, 0.0, -5.0));
}

#[test]
fn stale_timer_firings_are_ignored() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 800.0, 600.0);
    let old = d.state().auto_target.timer().unwrap();
    d.push(Intent::Resize {
        width: 780.0,
        height: 600.0,
    });
    d.tick(&mut sched, &mut rng);
    let current = d.state().auto_target.timer().unwrap();
    assert_ne!(old, current);

    let target = d.state().look_target();
    d.push(Intent::AutoTarget(old));
    d.tick(&mut sched, &mut rng);
    assert_eq!(d.state().look_target(), target);

    d.push(Intent::AutoTarget(current));
    d.tick(&mut sched, &mut rng);
    assert_ne!(d.state().look_target(), target);
}

#[test]
fn polled_timer_drives_retargeting() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 800.0, 600.0);
    let period = u64::from(d.state().auto_target.period_ms());
    assert!(sched.poll(period - 1).is_empty());
    let fired = sched.poll(period);
    assert_eq!(fired.len(), 1);
    let before = d.state().look_target();
    for id in fired {
        d.push(Intent::AutoTarget(id));
    }
    d.tick(&mut sched, &mut rng);
    assert_ne!(d.state().look_target(), before);
}

#[test]
fn shutdown_cancels_timers() {
    let (mut d, mut sched, _) = driver(Variant::Responsive, 800.0, 600.0);
    d.shutdown(&mut sched);
    assert_eq!(sched.active_count(), 0);
    assert!(!d.state().auto_mode);
}

#[test]
fn hovering_grows_the_disc() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 1600.0, 900.0);
    assert!((d.frame_view().background.size - 14.0).abs() < 1e-4);
    // disc sits at x = 6 world units right of centre
    d.push(Intent::PointerMove { x: 1000.0, y: 450.0 });
    d.tick(&mut sched, &mut rng);
    assert!(d.state().hovered);
    for _ in 0..200 {
        d.tick(&mut sched, &mut rng);
    }
    assert!((d.state().background_scale - 0.8).abs() < 1e-3);
}

#[test]
fn particles_expire_through_ticks() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 800.0, 600.0);
    d.push(Intent::Click { x: 400.0, y: 300.0 });
    let report = d.tick(&mut sched, &mut rng);
    assert_eq!(report.spawned, 75);
    let mut expired = report.expired;
    for _ in 0..1000 {
        expired += d.tick(&mut sched, &mut rng).expired;
    }
    assert_eq!(expired, 75);
    assert!(d.frame_view().particles.is_empty());
}

#[test]
fn scheduler_trait_objects_work() {
    let mut sched = PolledIntervals::new();
    let dynamic: &mut dyn IntervalScheduler = &mut sched;
    let mut rng = StdRng::seed_from_u64(9);
    let mut d = Driver::new(SceneConfig::default(), 800.0, 600.0);
    d.start(dynamic, &mut rng);
    assert_eq!(sched.active_count(), 1);
}

#[test]
fn resize_clears_hover_when_the_disc_moves_away() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 1600.0, 900.0);
    d.push(Intent::PointerMove { x: 1160.0, y: 450.0 });
    d.tick(&mut sched, &mut rng);
    assert!(d.state().hovered);

    // narrow layout recentres the disc; the pointer stays put
    d.push(Intent::Resize {
        width: 800.0,
        height: 600.0,
    });
    d.tick(&mut sched, &mut rng);
    let st = d.state();
    assert_eq!(st.hovered, st.hit_clickable(st.pointer.ndc).is_some());
    assert!(!st.hovered);

    for _ in 0..200 {
        d.tick(&mut sched, &mut rng);
    }
    assert!((d.state().background_scale - 0.7).abs() < 1e-3);
}

#[test]
fn zero_size_resize_keeps_auto_mode_and_timer() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 800.0, 600.0);
    let timer = d.state().auto_target.timer();
    d.push(Intent::Resize {
        width: 0.0,
        height: 0.0,
    });
    let report = d.tick(&mut sched, &mut rng);
    assert_eq!(report.resized, None);
    assert!(d.state().auto_mode);
    assert_eq!(sched.active_count(), 1);
    assert_eq!(d.state().auto_target.timer(), timer);
    assert_eq!(d.state().viewport, glam::Vec2::new(800.0, 600.0));
}

#[test]
fn minimised_wide_window_stays_in_pointer_mode() {
    let (mut d, mut sched, mut rng) = driver(Variant::Responsive, 1600.0, 900.0);
    d.push(Intent::Resize {
        width: 0.0,
        height: 0.0,
    });
    d.push(Intent::Resize {
        width: 1600.0,
        height: 900.0,
    });
    let report = d.tick(&mut sched, &mut rng);
    assert_eq!(report.resized, Some((1600, 900)));
    assert!(!d.state().auto_mode);
    assert_eq!(sched.active_count(), 0);
    assert_eq!(d.state().origin, glam::Vec2::new(6.0, 0.0));
}
