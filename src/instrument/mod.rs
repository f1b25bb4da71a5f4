//! Placement, interaction and rendering shared by every gauge.
//!
//! Each gauge owns a [`Mount`]: where it sits on the panel, how big it is,
//! and which pointer gesture (if any) it is in. The [`Gauge`] trait adds the
//! gauge-specific parts, `update` and `draw_face`, and supplies the common
//! drawing order: housing chrome, then the face inside its own save/restore
//! scope, then resize handles on top.

pub mod airspeed;
pub mod altimeter;
pub mod attitude;
pub mod chrome;
pub mod compass;
pub mod heading;
pub mod ndb;
pub mod radio;
pub mod turn;
pub mod vor;
pub mod vsi;

pub use airspeed::AirspeedIndicator;
pub use altimeter::Altimeter;
pub use attitude::AttitudeIndicator;
pub use compass::MagneticCompass;
pub use heading::HeadingIndicator;
pub use ndb::NdbIndicator;
pub use radio::Radio;
pub use turn::TurnCoordinator;
pub use vor::VorIndicator;
pub use vsi::VerticalSpeedIndicator;

use crate::geometry::Point;
use crate::snapshot::Reading;
use crate::surface::{scoped, Surface};

/// Circular faces are drawn in a frame `REFERENCE_SIZE` units across,
/// centered on the origin, and scaled to the mounted diameter.
pub const REFERENCE_SIZE: f64 = 180.0;

/// Side of the square resize handles, in device pixels.
pub const HANDLE_SIZE: f64 = 8.0;

// ============================================================================
// MOUNT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// Positioned by its center.
    Circle { diameter: f64 },
    /// Positioned by its top-left corner.
    Rect { width: f64, height: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl SizeLimits {
    pub const fn uniform(min: f64, max: f64) -> Self {
        Self {
            min_width: min,
            max_width: max,
            min_height: min,
            max_height: max,
        }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::uniform(100.0, 300.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        /// Pointer minus position at press time.
        offset: Point,
    },
    Resizing {
        handle: Handle,
        /// Pointer at press time.
        origin: Point,
        extent: Extent,
        position: Point,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mount {
    position: Point,
    extent: Extent,
    limits: SizeLimits,
    gesture: Gesture,
    edit_mode: bool,
    resizable: bool,
}

impl Mount {
    pub fn circular(center: Point, diameter: f64, limits: SizeLimits) -> Self {
        Self {
            position: center,
            extent: Extent::Circle { diameter },
            limits,
            gesture: Gesture::Idle,
            edit_mode: false,
            resizable: true,
        }
    }

    pub fn rectangular(top_left: Point, width: f64, height: f64, limits: SizeLimits) -> Self {
        Self {
            position: top_left,
            extent: Extent::Rect { width, height },
            limits,
            gesture: Gesture::Idle,
            edit_mode: false,
            resizable: true,
        }
    }

    pub fn fixed_size(self) -> Self {
        Self {
            resizable: false,
            ..self
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Gesture::Resizing { .. })
    }

    /// Diameter for circular mounts, width for rectangular ones.
    pub fn size(&self) -> f64 {
        match self.extent {
            Extent::Circle { diameter } => diameter,
            Extent::Rect { width, .. } => width,
        }
    }

    pub fn center(&self) -> Point {
        match self.extent {
            Extent::Circle { .. } => self.position,
            Extent::Rect { width, height } => {
                Point::new(self.position.x + width / 2.0, self.position.y + height / 2.0)
            }
        }
    }

    /// `(x, y, width, height)` of the bounding box.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self.extent {
            Extent::Circle { diameter } => {
                let r = diameter / 2.0;
                (self.position.x - r, self.position.y - r, diameter, diameter)
            }
            Extent::Rect { width, height } => (self.position.x, self.position.y, width, height),
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        match self.extent {
            Extent::Circle { diameter } => p.distance_to(self.position) <= diameter / 2.0,
            Extent::Rect { width, height } => {
                p.x >= self.position.x
                    && p.x <= self.position.x + width
                    && p.y >= self.position.y
                    && p.y <= self.position.y + height
            }
        }
    }

    /// Handle centers at the midpoints of the bounding box edges.
    pub fn handle_positions(&self) -> [(Handle, Point); 4] {
        let (x, y, w, h) = self.bounds();
        [
            (Handle::Left, Point::new(x, y + h / 2.0)),
            (Handle::Right, Point::new(x + w, y + h / 2.0)),
            (Handle::Top, Point::new(x + w / 2.0, y)),
            (Handle::Bottom, Point::new(x + w / 2.0, y + h)),
        ]
    }

    /// The handle under `p`; only live in edit mode on resizable mounts.
    pub fn handle_at(&self, p: Point) -> Option<Handle> {
        if !self.edit_mode || !self.resizable {
            return None;
        }
        let half = HANDLE_SIZE / 2.0;
        self.handle_positions()
            .into_iter()
            .find(|(_, c)| (p.x - c.x).abs() <= half && (p.y - c.y).abs() <= half)
            .map(|(handle, _)| handle)
    }

    pub fn is_over_resize_handle(&self, p: Point) -> bool {
        self.handle_at(p).is_some()
    }

    /// Returns false when a resize is already in progress.
    pub fn start_drag(&mut self, p: Point) -> bool {
        if self.is_resizing() {
            return false;
        }
        self.gesture = Gesture::Dragging {
            offset: p - self.position,
        };
        true
    }

    pub fn drag(&mut self, p: Point) {
        if let Gesture::Dragging { offset } = self.gesture {
            self.position = p - offset;
        }
    }

    pub fn stop_drag(&mut self) {
        if self.is_dragging() {
            self.gesture = Gesture::Idle;
        }
    }

    /// Returns false on fixed-size mounts or while a drag is in progress.
    pub fn start_resize(&mut self, p: Point) -> bool {
        if !self.resizable || self.is_dragging() {
            return false;
        }
        let handle = self.handle_at(p).unwrap_or_else(|| self.nearest_handle(p));
        self.gesture = Gesture::Resizing {
            handle,
            origin: p,
            extent: self.extent,
            position: self.position,
        };
        true
    }

    pub fn resize(&mut self, p: Point) {
        let Gesture::Resizing {
            handle,
            origin,
            extent,
            position,
        } = self.gesture
        else {
            return;
        };
        let limits = self.limits;
        match extent {
            Extent::Circle { .. } => {
                let diameter =
                    (2.0 * p.distance_to(self.position)).clamp(limits.min_width, limits.max_width);
                self.extent = Extent::Circle { diameter };
            }
            Extent::Rect { width, height } => {
                let delta = p - origin;
                let (mut w, mut h) = (width, height);
                let mut pos = position;
                match handle {
                    Handle::Right => w = (width + delta.x).clamp(limits.min_width, limits.max_width),
                    Handle::Left => {
                        w = (width - delta.x).clamp(limits.min_width, limits.max_width);
                        pos.x = position.x + (width - w);
                    }
                    Handle::Bottom => {
                        h = (height + delta.y).clamp(limits.min_height, limits.max_height)
                    }
                    Handle::Top => {
                        h = (height - delta.y).clamp(limits.min_height, limits.max_height);
                        pos.y = position.y + (height - h);
                    }
                }
                self.extent = Extent::Rect {
                    width: w,
                    height: h,
                };
                self.position = pos;
            }
        }
    }

    pub fn stop_resize(&mut self) {
        if self.is_resizing() {
            self.gesture = Gesture::Idle;
        }
    }

    /// Feeds a pointer move to whichever gesture is active.
    pub fn track(&mut self, p: Point) {
        match self.gesture {
            Gesture::Dragging { .. } => self.drag(p),
            Gesture::Resizing { .. } => self.resize(p),
            Gesture::Idle => {}
        }
    }

    pub fn end_gesture(&mut self) {
        match self.gesture {
            Gesture::Dragging { .. } => self.stop_drag(),
            Gesture::Resizing { .. } => self.stop_resize(),
            Gesture::Idle => {}
        }
    }

    fn nearest_handle(&self, p: Point) -> Handle {
        let mut best = (Handle::Right, f64::INFINITY);
        for (handle, c) in self.handle_positions() {
            let d = p.distance_to(c);
            if d < best.1 {
                best = (handle, d);
            }
        }
        best.0
    }

    /// Moves the origin to the center and scales to the reference frame.
    pub fn enter_face(&self, surface: &mut dyn Surface) {
        let c = self.center();
        surface.translate(c.x, c.y);
        let k = self.size() / REFERENCE_SIZE;
        surface.scale(k, k);
    }
}

// ============================================================================
// GAUGE CONTRACT
// ============================================================================

pub trait Gauge {
    fn mount(&self) -> &Mount;
    fn mount_mut(&mut self) -> &mut Mount;

    /// Applies the fields present in `reading`; others keep their value.
    fn update(&mut self, reading: &Reading);

    fn draw_face(&self, surface: &mut dyn Surface);

    fn draw(&self, surface: &mut dyn Surface) {
        chrome::draw_housing(surface, self.mount());
        scoped(surface, |s| self.draw_face(s));
        if self.mount().edit_mode() && self.mount().is_resizable() {
            chrome::draw_resize_handles(surface, self.mount());
        }
    }
}

/// Some(v) only for finite values.
pub(crate) fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

// ============================================================================
// PANEL VARIANTS
// ============================================================================

#[derive(Debug, Clone)]
pub enum Instrument {
    Airspeed(AirspeedIndicator),
    Altimeter(Altimeter),
    Attitude(AttitudeIndicator),
    Heading(HeadingIndicator),
    Compass(MagneticCompass),
    Turn(TurnCoordinator),
    VerticalSpeed(VerticalSpeedIndicator),
    Vor(VorIndicator),
    Ndb(NdbIndicator),
    Radio(Radio),
}

impl Instrument {
    pub fn gauge(&self) -> &dyn Gauge {
        match self {
            Instrument::Airspeed(g) => g,
            Instrument::Altimeter(g) => g,
            Instrument::Attitude(g) => g,
            Instrument::Heading(g) => g,
            Instrument::Compass(g) => g,
            Instrument::Turn(g) => g,
            Instrument::VerticalSpeed(g) => g,
            Instrument::Vor(g) => g,
            Instrument::Ndb(g) => g,
            Instrument::Radio(g) => g,
        }
    }

    pub fn gauge_mut(&mut self) -> &mut dyn Gauge {
        match self {
            Instrument::Airspeed(g) => g,
            Instrument::Altimeter(g) => g,
            Instrument::Attitude(g) => g,
            Instrument::Heading(g) => g,
            Instrument::Compass(g) => g,
            Instrument::Turn(g) => g,
            Instrument::VerticalSpeed(g) => g,
            Instrument::Vor(g) => g,
            Instrument::Ndb(g) => g,
            Instrument::Radio(g) => g,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Instrument::Airspeed(_) => "airspeed indicator",
            Instrument::Altimeter(_) => "altimeter",
            Instrument::Attitude(_) => "attitude indicator",
            Instrument::Heading(_) => "heading indicator",
            Instrument::Compass(_) => "magnetic compass",
            Instrument::Turn(_) => "turn coordinator",
            Instrument::VerticalSpeed(_) => "vertical speed indicator",
            Instrument::Vor(_) => "VOR indicator",
            Instrument::Ndb(_) => "NDB indicator",
            Instrument::Radio(_) => "radio stack",
        }
    }

    pub fn mount(&self) -> &Mount {
        self.gauge().mount()
    }

    pub fn mount_mut(&mut self) -> &mut Mount {
        self.gauge_mut().mount_mut()
    }

    pub fn update(&mut self, reading: &Reading) {
        self.gauge_mut().update(reading);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.gauge().draw(surface);
    }
}

macro_rules! instrument_from {
    ($($variant:ident($gauge:ty)),* $(,)?) => {
        $(
            impl From<$gauge> for Instrument {
                fn from(gauge: $gauge) -> Self {
                    Instrument::$variant(gauge)
                }
            }
        )*
    };
}

instrument_from!(
    Airspeed(AirspeedIndicator),
    Altimeter(Altimeter),
    Attitude(AttitudeIndicator),
    Heading(HeadingIndicator),
    Compass(MagneticCompass),
    Turn(TurnCoordinator),
    VerticalSpeed(VerticalSpeedIndicator),
    Vor(VorIndicator),
    Ndb(NdbIndicator),
    Radio(Radio),
);
