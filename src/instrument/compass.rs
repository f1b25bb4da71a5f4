use super::heading::cardinal;
use super::{usable, Gauge, Mount};
use crate::color::{self, Color};
use crate::geometry::{wrap_degrees, wrap_signed_degrees, Point};
use crate::snapshot::Reading;
use crate::surface::{scoped, stop, Brush, Path, Surface, TextStyle};

/// Half-width of the housing in reference units.
const RADIUS: f64 = 70.0;

/// Whiskey compass: a horizontal card strip seen through a window.
#[derive(Debug, Clone)]
pub struct MagneticCompass {
    mount: Mount,
    heading: f64,
}

impl MagneticCompass {
    pub fn new(mount: Mount) -> Self {
        Self { mount, heading: 0.0 }
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Horizontal position on the strip of the mark at `degrees`, relative
    /// to the lubber line. The shorter way around wins, so the strip wraps
    /// without a seam.
    pub fn card_offset(&self, degrees: f64) -> f64 {
        wrap_signed_degrees(degrees - self.heading) * RADIUS / 90.0
    }
}

impl Gauge for MagneticCompass {
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
            other => tracing::trace!(?other, "magnetic compass ignores reading"),
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        self.mount.enter_face(surface);

        let housing = Path::round_rect(-RADIUS, -RADIUS / 2.0, RADIUS * 2.0, RADIUS, 10.0);
        surface.fill(&housing, &color::CASE.into());
        surface.stroke(&housing, &color::HOUSING_EDGE.into(), 2.0);

        let (wx, wy, ww, wh) = (-RADIUS / 2.0, -RADIUS / 3.0, RADIUS, RADIUS / 2.0);
        let window = Path::round_rect(wx, wy, ww, wh, 5.0);
        surface.fill(&window, &color::FACE.into());

        let mid = wy + wh / 2.0;
        scoped(surface, |s| {
            s.clip(&window);
            let label = TextStyle::centered(12.0);
            for degrees in (0..360).step_by(15) {
                let x = self.card_offset(degrees as f64);
                if x.abs() > ww / 2.0 + 20.0 {
                    continue;
                }
                let major = degrees % 30 == 0;
                let tick_top = if major { mid + 6.0 } else { mid + 9.0 };
                let tick = Path::new().move_to(x, tick_top).line_to(x, wy + wh);
                s.stroke(&tick, &color::MARKINGS.into(), 1.5);
                if major {
                    let text = cardinal(degrees)
                        .map(str::to_string)
                        .unwrap_or_else(|| (degrees / 10).to_string());
                    s.fill_text(&text, x, mid - 4.0, &label, color::MARKINGS);
                }
            }
        });

        let lubber = Path::new().move_to(0.0, wy).line_to(0.0, wy + wh);
        surface.stroke(&lubber, &color::RED.into(), 2.0);

        let liquid = Brush::Linear {
            from: Point::new(0.0, wy),
            to: Point::new(0.0, wy + wh),
            stops: vec![stop(0.0, Color::white(0.1)), stop(1.0, Color::white(0.0))],
        };
        surface.fill(&window, &liquid);
        surface.stroke(&window, &color::BEZEL.into(), 2.0);
    }
}
