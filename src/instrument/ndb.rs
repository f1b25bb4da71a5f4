use super::heading::cardinal;
use super::{chrome, usable, Gauge, Mount};
use crate::color;
use crate::geometry::{deg_to_rad, wrap_degrees};
use crate::snapshot::{NdbInput, Reading};
use crate::surface::{scoped, Path, Surface, TextStyle};

const RADIUS: f64 = 85.0;

/// Fixed-card ADF: the needle shows the beacon relative to the nose.
#[derive(Debug, Clone)]
pub struct NdbIndicator {
    mount: Mount,
    bearing: f64,
    heading: f64,
}

impl NdbIndicator {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            bearing: 0.0,
            heading: 0.0,
        }
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Beacon bearing relative to the nose, degrees in `[0, 360)`.
    pub fn relative_bearing(&self) -> f64 {
        wrap_degrees(self.bearing - self.heading)
    }

    fn set_bearing(&mut self, bearing: Option<f64>) {
        if let Some(v) = usable(bearing) {
            self.bearing = wrap_degrees(v);
        }
    }

    fn set_heading(&mut self, heading: Option<f64>) {
        if let Some(v) = usable(heading) {
            self.heading = wrap_degrees(v);
        }
    }
}

impl Gauge for NdbIndicator {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn update(&mut self, reading: &Reading) {
        match *reading {
            Reading::Value(v) | Reading::Ndb(NdbInput::Bearing(v)) => self.set_bearing(Some(v)),
            Reading::Ndb(NdbInput::Full { bearing, heading }) => {
                self.set_bearing(bearing);
                self.set_heading(heading);
            }
            other => tracing::trace!(?other, "NDB indicator ignores reading"),
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        self.mount.enter_face(surface);
        surface.fill(&Path::circle(0.0, 0.0, RADIUS - 10.0), &color::BLACK.into());

        let label = TextStyle::centered(12.0);
        let cardinal_label = TextStyle::centered(14.0).bold();
        for degrees in (0..360).step_by(10) {
            let radians = deg_to_rad(degrees as f64);
            let length = if degrees % 30 == 0 { 12.0 } else { 6.0 };
            chrome::bearing_tick(
                surface,
                radians,
                RADIUS - 10.0 - length,
                RADIUS - 10.0,
                2.0,
                color::MARKINGS,
            );
            if degrees % 30 == 0 {
                let (text, style) = match cardinal(degrees) {
                    Some(letter) => (letter.to_string(), cardinal_label),
                    None => ((degrees / 10).to_string(), label),
                };
                chrome::bearing_label(surface, &text, radians, RADIUS - 32.0, &style, color::MARKINGS);
            }
        }

        let tip = RADIUS - 15.0;
        let head = Path::new()
            .move_to(0.0, -tip)
            .line_to(5.0, 0.0)
            .line_to(-5.0, 0.0)
            .close();
        let tail = Path::new()
            .move_to(5.0, 0.0)
            .line_to(0.0, tip)
            .line_to(-5.0, 0.0)
            .close();
        scoped(surface, |s| {
            s.rotate(deg_to_rad(self.relative_bearing()));
            s.fill(&head, &color::YELLOW.into());
            s.fill(&tail, &color::MARKINGS.into());
            s.stroke(&head, &color::BLACK.into(), 1.0);
            s.stroke(&tail, &color::BLACK.into(), 1.0);
        });
        chrome::center_cap(surface, 6.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::instrument::SizeLimits;

    fn indicator() -> NdbIndicator {
        NdbIndicator::new(Mount::circular(
            Point::new(0.0, 0.0),
            160.0,
            SizeLimits::default(),
        ))
    }

    #[test]
    fn bare_number_sets_bearing_only() {
        let mut ndb = indicator();
        ndb.update(
            &NdbInput::Full {
                bearing: None,
                heading: Some(90.0),
            }
            .into(),
        );
        ndb.update(&NdbInput::Bearing(45.0).into());
        assert_eq!(ndb.bearing(), 45.0);
        assert_eq!(ndb.heading(), 90.0);
        assert_eq!(ndb.relative_bearing(), 315.0);
    }

    #[test]
    fn relative_bearing_wraps() {
        let mut ndb = indicator();
        ndb.update(
            &NdbInput::Full {
                bearing: Some(10.0),
                heading: Some(350.0),
            }
            .into(),
        );
        assert_eq!(ndb.relative_bearing(), 20.0);
    }
}
