use super::{chrome, usable, Gauge, Mount};
use crate::color::{self, Color};
use crate::geometry::{deg_to_rad, polar, ArcScale};
use crate::snapshot::Reading;
use crate::surface::{scoped, Path, Surface, TextStyle};

/// 0 kt at 12 o'clock, 400 kt after 300° clockwise.
pub const AIRSPEED_SCALE: ArcScale = ArcScale::new(0.0, 400.0, -90.0, 300.0);

const RADIUS: f64 = 85.0;

#[derive(Debug, Clone)]
pub struct AirspeedIndicator {
    mount: Mount,
    speed: f64,
    scale: ArcScale,
    green_arc: (f64, f64),
    yellow_arc: (f64, f64),
}

impl AirspeedIndicator {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            speed: 0.0,
            scale: AIRSPEED_SCALE,
            green_arc: (60.0, 240.0),
            yellow_arc: (240.0, 350.0),
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Needle angle in canvas radians (0 = 3 o'clock).
    pub fn needle_angle(&self) -> f64 {
        self.scale.angle_of(self.speed)
    }

    fn band(&self, surface: &mut dyn Surface, (from, to): (f64, f64), color: Color) {
        let start = self.scale.angle_of(from);
        let end = self.scale.angle_of(to);
        let p = polar(RADIUS, start);
        let arc = Path::new()
            .move_to(p.x, p.y)
            .arc(0.0, 0.0, RADIUS, start, end);
        surface.stroke(&arc, &color.with_alpha(0.3).into(), 8.0);
    }
}

impl Gauge for AirspeedIndicator {
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
                    self.speed = self.scale.clamp(v);
                }
            }
            other => tracing::trace!(?other, "airspeed ignores reading"),
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        self.mount.enter_face(surface);

        self.band(surface, self.green_arc, color::GREEN);
        self.band(surface, self.yellow_arc, color::YELLOW);

        let label = TextStyle::centered(12.0);
        let steps = ((self.scale.max - self.scale.min) / 20.0).floor() as usize;
        for i in 0..=steps {
            let value = self.scale.min + i as f64 * 20.0;
            let angle = self.scale.angle_of(value);
            let major = value % 100.0 == 0.0;
            let length = if major { 15.0 } else { 10.0 };
            chrome::radial_tick(surface, angle, RADIUS - length, RADIUS, 2.0, color::MARKINGS);
            if major {
                let p = polar(RADIUS - 25.0, angle);
                surface.fill_text(&format!("{value:.0}"), p.x, p.y, &label, color::MARKINGS);
            }
        }

        scoped(surface, |s| {
            // needle shapes point up; the scale angle is measured from 3 o'clock
            s.rotate(self.needle_angle() + deg_to_rad(90.0));
            chrome::needle(s, RADIUS - 10.0, 4.0, color::MARKINGS);
            let inner = Path::new()
                .move_to(-4.0 * 0.3, 0.0)
                .line_to(0.0, -(RADIUS - 10.0) * 0.3)
                .line_to(4.0 * 0.3, 0.0)
                .close();
            s.fill(&inner, &color::BLACK.into());
        });
        chrome::center_cap(surface, 8.0);

        surface.fill_text(
            &format!("{:.0}", self.speed),
            0.0,
            45.0,
            &TextStyle::centered(15.0).bold(),
            color::MARKINGS,
        );
        surface.fill_text("KNOTS", 0.0, 60.0, &label, color::MARKINGS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::instrument::SizeLimits;
    use crate::scene::Scene;

    fn indicator() -> AirspeedIndicator {
        AirspeedIndicator::new(Mount::circular(
            Point::new(100.0, 100.0),
            160.0,
            SizeLimits::default(),
        ))
    }

    #[test]
    fn overspeed_clamps_to_scale_top() {
        let mut asi = indicator();
        asi.update(&Reading::Value(500.0));
        assert_eq!(asi.speed(), 400.0);
        assert!((asi.needle_angle() - deg_to_rad(210.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_points_straight_up() {
        let asi = indicator();
        assert!((asi.needle_angle() - deg_to_rad(-90.0)).abs() < 1e-9);
    }

    #[test]
    fn non_finite_speed_is_ignored() {
        let mut asi = indicator();
        asi.update(&Reading::Value(120.0));
        asi.update(&Reading::Value(f64::NAN));
        asi.update(&Reading::Value(f64::INFINITY));
        assert_eq!(asi.speed(), 120.0);
    }

    #[test]
    fn face_labels_every_hundred_knots() {
        let mut asi = indicator();
        asi.update(&Reading::Value(123.4));
        let mut scene = Scene::new(200.0, 200.0);
        asi.draw(&mut scene);
        let texts: Vec<&str> = scene.texts().collect();
        for label in ["0", "100", "200", "300", "400", "123", "KNOTS"] {
            assert!(texts.contains(&label), "missing {label}");
        }
    }
}
