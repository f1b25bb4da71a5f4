//! End-to-end panel behavior: data in, pointer in, pixels out.

use cockpit::cockpit::scenery::{self, Cloud};
use cockpit::geometry::{deg_to_rad, Point};
use cockpit::instrument::Instrument;
use cockpit::snapshot::keys;
use cockpit::{Canvas, Cockpit, LayoutConfig, StateSnapshot};

fn panel() -> Cockpit {
    Cockpit::new(1200.0, 800.0, &LayoutConfig::default())
}

#[test]
fn overspeed_pins_the_airspeed_needle() {
    let mut cockpit = panel();
    let snapshot: StateSnapshot = serde_json::from_str(r#"{ "airspeed": 500 }"#).unwrap();
    cockpit.update(&snapshot);

    let Some(Instrument::Airspeed(asi)) = cockpit.instrument(keys::AIRSPEED) else {
        panic!("airspeed indicator missing");
    };
    assert_eq!(asi.speed(), 400.0);
    assert!((asi.needle_angle() - deg_to_rad(400.0 / 400.0 * 300.0 - 90.0)).abs() < 1e-9);
}

#[test]
fn negative_heading_reads_as_its_wrapped_value() {
    let mut cockpit = panel();
    cockpit.update(&StateSnapshot {
        heading: Some(-30.0),
        ..Default::default()
    });
    let Some(Instrument::Heading(hi)) = cockpit.instrument(keys::HEADING) else {
        panic!("heading indicator missing");
    };
    assert_eq!(hi.heading(), 330.0);
    assert!((hi.card_rotation() + deg_to_rad(330.0)).abs() < 1e-12);
}

#[test]
fn cloud_at_right_edge_is_drawn_twice() {
    let width = 1200.0;
    let cloud = Cloud {
        x: width - 5.0,
        y: 50.0,
        size: 60.0,
    };
    let copy = scenery::wrapped_copy_x(&cloud, width).unwrap();
    assert_eq!(copy, cloud.x - (width - 2.0 * scenery::MARGIN));
    assert!(copy < 0.0);
}

#[test]
fn pointer_does_nothing_outside_edit_mode() {
    let mut cockpit = panel();
    let before = cockpit.instrument(keys::ATTITUDE).unwrap().mount().clone();
    let center = before.center();

    assert!(!cockpit.pointer_pressed(center.x, center.y));
    cockpit.pointer_moved(center.x + 120.0, center.y - 90.0);
    cockpit.pointer_released();

    assert_eq!(cockpit.instrument(keys::ATTITUDE).unwrap().mount(), &before);
}

#[test]
fn drag_moves_a_gauge_in_edit_mode() {
    let mut cockpit = panel();
    cockpit.set_edit_mode(true);
    let start = cockpit.instrument(keys::VOR).unwrap().mount().center();

    assert!(cockpit.pointer_pressed(start.x + 10.0, start.y));
    assert_eq!(cockpit.active_gesture(), Some(keys::VOR));
    // a second press while dragging is ignored
    assert!(!cockpit.pointer_pressed(150.0, 520.0));
    cockpit.pointer_moved(start.x - 90.0, start.y - 300.0);
    cockpit.pointer_left();
    cockpit.pointer_moved(0.0, 0.0);

    let moved = cockpit.instrument(keys::VOR).unwrap().mount().center();
    assert_eq!(moved, Point::new(start.x - 100.0, start.y - 300.0));
    assert_eq!(cockpit.active_gesture(), None);
}

#[test]
fn topmost_gauge_wins_overlapping_press() {
    let mut cockpit = panel();
    cockpit.set_edit_mode(true);
    let airspeed = cockpit.instrument(keys::AIRSPEED).unwrap().mount().center();

    // park the compass (registered later) on top of the airspeed indicator
    let compass = cockpit.instrument(keys::MAGNETIC_COMPASS).unwrap().mount().center();
    assert!(cockpit.pointer_pressed(compass.x, compass.y));
    cockpit.pointer_moved(airspeed.x, airspeed.y);
    cockpit.pointer_released();

    assert!(cockpit.pointer_pressed(airspeed.x, airspeed.y));
    assert_eq!(cockpit.active_gesture(), Some(keys::MAGNETIC_COMPASS));
}

#[test]
fn rendered_frame_shows_sky_panel_and_gauges() {
    let mut cockpit = panel();
    cockpit.set_edit_mode(true);
    let mut frame = vec![0u8; 1200 * 800 * 4];
    cockpit.draw(&mut Canvas::new(&mut frame, 1200, 800), 0.0);
    let canvas = Canvas::new(&mut frame, 1200, 800);

    // windshield interior is sky blue, the panel below is dark grey
    let [r, g, b, _] = canvas.pixel(600, 300).unwrap();
    assert!(b > r && b > g, "expected sky at windshield center, got {r},{g},{b}");
    let [r, g, b, _] = canvas.pixel(5, 795).unwrap();
    assert_eq!((r, g, b), (0x2a, 0x2a, 0x2a));

    // resize handle squares are white in edit mode
    let airspeed = cockpit.instrument(keys::AIRSPEED).unwrap().mount().center();
    let [r, g, b, _] = canvas
        .pixel((airspeed.x + 80.0) as usize, airspeed.y as usize)
        .unwrap();
    assert!(r > 200 && g > 200 && b > 200);
}
