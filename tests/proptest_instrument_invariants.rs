//! Property-based invariant tests for gauge state and pointer gestures.
//!
//! 1. Clamped readings stay in range and repeating an update changes nothing.
//! 2. Wrapped angles land in their half-open ranges and stay congruent.
//! 3. Non-finite inputs never disturb gauge state.
//! 4. A drag keeps the grab offset for any pointer path.
//! 5. Resizes respect the mount's size limits and keep the anchored edge.
//! 6. Points beyond the radius are never inside a circular gauge.
//! 7. At most one gauge is in a gesture, whatever the pointer does.
//! 8. Layout is a pure function of canvas size and config.
//! 9. Every gauge leaves the surface balanced for any reading.

use cockpit::geometry::Point;
use cockpit::instrument::{
    AirspeedIndicator, AttitudeIndicator, Extent, Gauge, HeadingIndicator, Mount, SizeLimits,
    VerticalSpeedIndicator,
};
use cockpit::snapshot::{AttitudeInput, StateSnapshot, TurnInput};
use cockpit::{Cockpit, LayoutConfig, Reading, Scene};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn circular_mount() -> Mount {
    let mut mount = Mount::circular(Point::new(400.0, 300.0), 160.0, SizeLimits::default());
    mount.set_edit_mode(true);
    mount
}

fn any_reading() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6f64..1.0e6,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn pointer() -> impl Strategy<Value = (f64, f64)> {
    (-200.0f64..1400.0, -200.0f64..1000.0)
}

#[derive(Debug, Clone, Copy)]
enum PointerEvent {
    Press(f64, f64),
    Move(f64, f64),
    Release,
    Leave,
    ToggleEdit,
}

fn pointer_event() -> impl Strategy<Value = PointerEvent> {
    prop_oneof![
        pointer().prop_map(|(x, y)| PointerEvent::Press(x, y)),
        pointer().prop_map(|(x, y)| PointerEvent::Move(x, y)),
        Just(PointerEvent::Release),
        Just(PointerEvent::Leave),
        Just(PointerEvent::ToggleEdit),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Clamping and idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn airspeed_stays_on_scale(speed in -1.0e6f64..1.0e6) {
        let mut asi = AirspeedIndicator::new(circular_mount());
        asi.update(&Reading::Value(speed));
        let once = asi.speed();
        prop_assert!((0.0..=400.0).contains(&once));
        asi.update(&Reading::Value(speed));
        prop_assert_eq!(asi.speed(), once);
    }

    #[test]
    fn vsi_stays_within_full_scale(vs in -1.0e5f64..1.0e5) {
        let mut vsi = VerticalSpeedIndicator::new(circular_mount());
        vsi.update(&Reading::Value(vs));
        prop_assert!(vsi.vertical_speed().abs() <= 2000.0);
        let angle = vsi.needle_angle();
        prop_assert!((0.0..=2.0 * std::f64::consts::PI).contains(&angle));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Angle wrapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn heading_wraps_into_circle(heading in -1.0e5f64..1.0e5) {
        let mut hi = HeadingIndicator::new(circular_mount());
        hi.update(&Reading::Value(heading));
        let wrapped = hi.heading();
        prop_assert!((0.0..360.0).contains(&wrapped));
        let turns = (heading - wrapped) / 360.0;
        prop_assert!((turns - turns.round()).abs() < 1e-6);
    }

    #[test]
    fn roll_wraps_into_signed_range(roll in -1.0e5f64..1.0e5) {
        let mut ai = AttitudeIndicator::new(circular_mount());
        ai.update(&AttitudeInput { pitch: None, roll: Some(roll) }.into());
        prop_assert!((-180.0..180.0).contains(&ai.roll()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Non-finite inputs
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn non_finite_values_are_ignored(first in -500.0f64..500.0, second in any_reading()) {
        let mut cockpit = Cockpit::new(1200.0, 800.0, &LayoutConfig::default());
        let snapshot = |v: f64| StateSnapshot {
            airspeed: Some(v),
            heading: Some(v),
            turn_indicator: Some(TurnInput { turn_rate: Some(v), slip_skid: Some(v) }),
            ..Default::default()
        };
        cockpit.update(&snapshot(first));
        let before = format!("{:?}", cockpit.instruments().collect::<Vec<_>>());
        cockpit.update(&snapshot(second));
        let after = format!("{:?}", cockpit.instruments().collect::<Vec<_>>());
        if !second.is_finite() {
            prop_assert_eq!(before, after);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Drag offset
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_preserves_grab_offset(
        grab in (-80.0f64..80.0, -80.0f64..80.0),
        path in proptest::collection::vec(pointer(), 1..20),
    ) {
        let mut mount = circular_mount();
        let start = mount.position();
        let press = Point::new(start.x + grab.0, start.y + grab.1);
        prop_assert!(mount.start_drag(press));
        for (x, y) in path {
            mount.drag(Point::new(x, y));
            let pos = mount.position();
            prop_assert!((x - pos.x - grab.0).abs() < 1e-9);
            prop_assert!((y - pos.y - grab.1).abs() < 1e-9);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Resize limits
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn circular_resize_respects_limits(path in proptest::collection::vec(pointer(), 1..20)) {
        let mut mount = circular_mount();
        prop_assert!(mount.start_resize(Point::new(480.0, 300.0)));
        for (x, y) in path {
            mount.resize(Point::new(x, y));
            prop_assert!((100.0..=300.0).contains(&mount.size()));
            prop_assert_eq!(mount.position(), Point::new(400.0, 300.0));
        }
    }

    #[test]
    fn left_resize_keeps_right_edge(path in proptest::collection::vec(pointer(), 1..20)) {
        let limits = SizeLimits { min_width: 200.0, max_width: 600.0, min_height: 80.0, max_height: 240.0 };
        let mut mount = Mount::rectangular(Point::new(300.0, 300.0), 340.0, 128.0, limits);
        mount.set_edit_mode(true);
        prop_assert!(mount.start_resize(Point::new(300.0, 364.0)));
        for (x, y) in path {
            mount.resize(Point::new(x, y));
            let Extent::Rect { width, height } = mount.extent() else {
                return Err(TestCaseError::fail("rect mount changed shape"));
            };
            prop_assert!((200.0..=600.0).contains(&width));
            prop_assert_eq!(height, 128.0);
            prop_assert!((mount.position().x + width - 640.0).abs() < 1e-9);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Hit testing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn points_past_the_radius_are_outside(angle in 0.0f64..std::f64::consts::TAU, extra in 1.0f64..500.0) {
        let mount = circular_mount();
        let c = mount.position();
        let r = 80.0 + extra;
        let p = Point::new(c.x + angle.cos() * r, c.y + angle.sin() * r);
        prop_assert!(!mount.contains_point(p));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Gesture exclusivity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn at_most_one_gesture(events in proptest::collection::vec(pointer_event(), 1..40)) {
        let mut cockpit = Cockpit::new(1200.0, 800.0, &LayoutConfig::default());
        cockpit.set_edit_mode(true);
        for event in events {
            match event {
                PointerEvent::Press(x, y) => { cockpit.pointer_pressed(x, y); }
                PointerEvent::Move(x, y) => cockpit.pointer_moved(x, y),
                PointerEvent::Release => cockpit.pointer_released(),
                PointerEvent::Leave => cockpit.pointer_left(),
                PointerEvent::ToggleEdit => { cockpit.toggle_edit_mode(); }
            }
            let busy = cockpit
                .instruments()
                .filter(|(_, i)| i.mount().is_dragging() || i.mount().is_resizing())
                .count();
            prop_assert!(busy <= 1);
            prop_assert_eq!(busy == 1, cockpit.active_gesture().is_some());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Layout determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_deterministic(width in 400.0f64..3000.0, height in 300.0f64..2000.0) {
        let config = LayoutConfig::default();
        let a = Cockpit::new(width, height, &config);
        let b = Cockpit::new(width, height, &config);
        for ((na, ia), (nb, ib)) in a.instruments().zip(b.instruments()) {
            prop_assert_eq!(na, nb);
            prop_assert_eq!(ia.mount(), ib.mount());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Balanced drawing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_frame_is_balanced(value in any_reading(), clock in 0.0f64..1.0e9) {
        let mut cockpit = Cockpit::new(1200.0, 800.0, &LayoutConfig::default());
        cockpit.update(&StateSnapshot {
            airspeed: Some(value),
            heading: Some(value),
            vsi: Some(value),
            attitude: Some(AttitudeInput { pitch: Some(value), roll: Some(value) }),
            ..Default::default()
        });
        let mut scene = Scene::new(1200.0, 800.0);
        cockpit.draw(&mut scene, clock);
        prop_assert!(scene.is_balanced());
    }
}
