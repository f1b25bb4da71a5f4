//! The panel: an ordered set of named gauges over the windshield backdrop.
//!
//! Registration order is paint order, so later gauges draw on top and are
//! hit-tested first. Pointer input only moves or resizes gauges while edit
//! mode is on, and at most one gauge is in a gesture at a time.

pub mod layout;
pub mod scenery;

use crate::color;
use crate::config::LayoutConfig;
use crate::geometry::Point;
use crate::instrument::{Instrument, Radio};
use crate::snapshot::{keys, Reading, StateSnapshot};
use crate::surface::{scoped, Surface};

#[derive(Debug, Clone)]
pub struct Cockpit {
    width: f64,
    height: f64,
    instruments: Vec<(String, Instrument)>,
    edit_mode: bool,
    /// Index of the gauge in a drag or resize.
    active: Option<usize>,
}

impl Cockpit {
    /// The standard ten-gauge panel laid out for a `width` x `height` canvas.
    pub fn new(width: f64, height: f64, config: &LayoutConfig) -> Self {
        Self::with_instruments(width, height, layout::default_panel(width, height, config))
    }

    pub fn with_instruments(width: f64, height: f64, instruments: Vec<(String, Instrument)>) -> Self {
        tracing::debug!(count = instruments.len(), width, height, "cockpit assembled");
        Self {
            width,
            height,
            instruments,
            edit_mode: false,
            active: None,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Backdrop size only; gauges keep their placement.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn instruments(&self) -> impl Iterator<Item = (&str, &Instrument)> {
        self.instruments.iter().map(|(name, i)| (name.as_str(), i))
    }

    pub fn instrument(&self, name: &str) -> Option<&Instrument> {
        self.instruments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, i)| i)
    }

    pub fn instrument_mut(&mut self, name: &str) -> Option<&mut Instrument> {
        self.instruments
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, i)| i)
    }

    pub fn radio_mut(&mut self) -> Option<&mut Radio> {
        match self.instrument_mut(keys::RADIO)? {
            Instrument::Radio(radio) => Some(radio),
            _ => None,
        }
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Leaving edit mode ends any gesture in progress.
    pub fn set_edit_mode(&mut self, enabled: bool) {
        if !enabled {
            self.end_gesture();
        }
        self.edit_mode = enabled;
        for (_, instrument) in &mut self.instruments {
            instrument.mount_mut().set_edit_mode(enabled);
        }
        tracing::info!(enabled, "edit mode");
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.set_edit_mode(!self.edit_mode);
        self.edit_mode
    }

    /// Name of the gauge currently being dragged or resized.
    pub fn active_gesture(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.instruments.get(i))
            .map(|(name, _)| name.as_str())
    }

    /// Routes every reading in `snapshot` to the gauge registered under its key.
    pub fn update(&mut self, snapshot: &StateSnapshot) {
        for (name, instrument) in &mut self.instruments {
            if let Some(reading) = snapshot.reading(name) {
                instrument.update(&reading);
            }
        }
    }

    /// Returns false when no gauge is registered under `name`.
    pub fn update_instrument(&mut self, name: &str, reading: &Reading) -> bool {
        match self.instrument_mut(name) {
            Some(instrument) => {
                instrument.update(reading);
                true
            }
            None => {
                tracing::debug!(name, "update for unknown instrument");
                false
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, clock_ms: f64) {
        surface.clear(color::BLACK);
        scoped(surface, |s| {
            scenery::draw_background(s, self.width, self.height, clock_ms)
        });
        for (_, instrument) in &self.instruments {
            scoped(surface, |s| instrument.draw(s));
        }
    }

    /// Starts a resize if the press lands on a handle, otherwise a drag if it
    /// lands inside a gauge. Topmost gauge wins. Returns whether a gesture
    /// started.
    pub fn pointer_pressed(&mut self, x: f64, y: f64) -> bool {
        if !self.edit_mode || self.active.is_some() {
            return false;
        }
        let p = Point::new(x, y);
        for (index, (name, instrument)) in self.instruments.iter_mut().enumerate().rev() {
            let mount = instrument.mount_mut();
            let gesture = if mount.is_over_resize_handle(p) && mount.start_resize(p) {
                "resize"
            } else if mount.contains_point(p) && mount.start_drag(p) {
                "drag"
            } else {
                continue;
            };
            tracing::debug!(instrument = %name, gesture, x, y, "gesture started");
            self.active = Some(index);
            return true;
        }
        false
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if let Some((_, instrument)) = self.active.and_then(|i| self.instruments.get_mut(i)) {
            instrument.mount_mut().track(Point::new(x, y));
        }
    }

    pub fn pointer_released(&mut self) {
        self.end_gesture();
    }

    /// The pointer leaving the canvas ends a drag or a resize alike.
    pub fn pointer_left(&mut self) {
        self.end_gesture();
    }

    fn end_gesture(&mut self) {
        if let Some((name, instrument)) = self.active.take().and_then(|i| self.instruments.get_mut(i)) {
            instrument.mount_mut().end_gesture();
            let mount = instrument.mount();
            tracing::debug!(
                instrument = %name,
                x = mount.position().x,
                y = mount.position().y,
                size = mount.size(),
                "gesture ended"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    fn cockpit() -> Cockpit {
        Cockpit::new(1200.0, 800.0, &LayoutConfig::default())
    }

    #[test]
    fn snapshot_only_touches_present_keys() {
        let mut c = cockpit();
        c.update(&StateSnapshot {
            heading: Some(90.0),
            ..Default::default()
        });
        c.update(&StateSnapshot {
            airspeed: Some(120.0),
            ..Default::default()
        });
        match c.instrument(keys::HEADING) {
            Some(Instrument::Heading(h)) => assert_eq!(h.heading(), 90.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn update_instrument_reports_unknown_names() {
        let mut c = cockpit();
        assert!(c.update_instrument(keys::VSI, &Reading::Value(500.0)));
        assert!(!c.update_instrument("flaps", &Reading::Value(10.0)));
    }

    #[test]
    fn leaving_edit_mode_ends_the_gesture() {
        let mut c = cockpit();
        c.set_edit_mode(true);
        assert!(c.pointer_pressed(150.0, 520.0));
        assert_eq!(c.active_gesture(), Some(keys::AIRSPEED));
        c.set_edit_mode(false);
        assert_eq!(c.active_gesture(), None);
        c.pointer_moved(400.0, 400.0);
        let airspeed = c.instrument(keys::AIRSPEED).unwrap();
        assert_eq!(airspeed.mount().center(), Point::new(150.0, 520.0));
    }

    #[test]
    fn handle_press_resizes_instead_of_dragging() {
        let mut c = cockpit();
        c.set_edit_mode(true);
        // right handle of the airspeed indicator
        assert!(c.pointer_pressed(230.0, 520.0));
        c.pointer_moved(250.0, 520.0);
        c.pointer_released();
        let mount = c.instrument(keys::AIRSPEED).unwrap().mount();
        assert_eq!(mount.size(), 200.0);
        assert_eq!(mount.center(), Point::new(150.0, 520.0));
    }

    #[test]
    fn radio_swap_is_reachable() {
        let mut c = cockpit();
        c.radio_mut().unwrap().swap_com();
        let Some(Instrument::Radio(radio)) = c.instrument(keys::RADIO) else {
            panic!("radio missing");
        };
        assert_eq!(radio.frequencies().active_com, 136.975);
    }

    #[test]
    fn full_frame_is_balanced() {
        let mut c = cockpit();
        c.set_edit_mode(true);
        let mut scene = Scene::new(1200.0, 800.0);
        c.draw(&mut scene, 42_000.0);
        assert!(scene.is_balanced());
    }
}
