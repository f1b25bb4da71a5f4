use super::{chrome, usable, Gauge, Mount};
use crate::color;
use crate::geometry::{deg_to_rad, wrap_degrees};
use crate::snapshot::Reading;
use crate::surface::{scoped, Path, Surface, TextStyle};

const RADIUS: f64 = 85.0;

// top-down aircraft, nose up, centered on the pivot
const SILHOUETTE: [(f64, f64); 14] = [
    (0.0, -40.0),
    (5.0, -30.0),
    (5.0, -10.0),
    (40.0, 5.0),
    (40.0, 12.0),
    (5.0, 5.0),
    (4.0, 25.0),
    (15.0, 33.0),
    (15.0, 38.0),
    (0.0, 34.0),
    (-15.0, 38.0),
    (-15.0, 33.0),
    (-4.0, 25.0),
    (-5.0, 5.0),
];

pub(crate) fn cardinal(degrees: i32) -> Option<&'static str> {
    match degrees {
        0 => Some("N"),
        90 => Some("E"),
        180 => Some("S"),
        270 => Some("W"),
        _ => None,
    }
}

/// Directional gyro: the card turns, the aircraft symbol stays put.
#[derive(Debug, Clone)]
pub struct HeadingIndicator {
    mount: Mount,
    heading: f64,
}

impl HeadingIndicator {
    pub fn new(mount: Mount) -> Self {
        Self { mount, heading: 0.0 }
    }

    /// Heading in `[0, 360)`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn card_rotation(&self) -> f64 {
        -deg_to_rad(self.heading)
    }

    fn draw_card(&self, surface: &mut dyn Surface) {
        surface.rotate(self.card_rotation());
        let label = TextStyle::centered(12.0);
        let cardinal_label = TextStyle::centered(15.0).bold();
        for degrees in (0..360).step_by(5) {
            let radians = deg_to_rad(degrees as f64);
            let length = if degrees % 30 == 0 {
                20.0
            } else if degrees % 10 == 0 {
                15.0
            } else {
                10.0
            };
            chrome::bearing_tick(surface, radians, RADIUS - length, RADIUS, 2.0, color::MARKINGS);
            if degrees % 30 != 0 {
                continue;
            }
            let (text, style) = match cardinal(degrees) {
                Some(letter) => (letter.to_string(), cardinal_label),
                None => ((degrees / 10).to_string(), label),
            };
            // labels are upright relative to the card, like a real DG
            scoped(surface, |s| {
                s.rotate(radians);
                s.fill_text(&text, 0.0, -(RADIUS - 27.0), &style, color::MARKINGS);
            });
        }
    }
}

impl Gauge for HeadingIndicator {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn update(&mut self, reading: &Reading) {
        match reading {
            Reading::Value(v) => {
                if let Some(v) = usable(Some(*v)) {
                    self.heading = wrap_degrees(v);
                }
            }
            other => tracing::trace!(?other, "heading indicator ignores reading"),
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        self.mount.enter_face(surface);
        scoped(surface, |s| self.draw_card(s));

        let mut aircraft = Path::new().move_to(SILHOUETTE[0].0, SILHOUETTE[0].1);
        for &(x, y) in &SILHOUETTE[1..] {
            aircraft = aircraft.line_to(x, y);
        }
        let aircraft = aircraft.close();
        surface.fill(&aircraft, &color::RED.with_alpha(0.35).into());
        surface.stroke(&aircraft, &color::RED.into(), 2.0);

        // fixed index marks around the bezel, lubber at the top
        for step in 0..8 {
            let marker = Path::new()
                .move_to(0.0, -(RADIUS - 10.0))
                .line_to(-6.0, -RADIUS)
                .line_to(6.0, -RADIUS)
                .close();
            let tint = if step == 0 { color::MARKINGS } else { color::RED };
            scoped(surface, |s| {
                s.rotate(deg_to_rad(step as f64 * 45.0));
                s.fill(&marker, &tint.into());
            });
        }
    }
}
