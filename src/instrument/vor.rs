use super::{chrome, usable, Gauge, Mount};
use crate::color;
use crate::geometry::{deg_to_rad, wrap_degrees};
use crate::snapshot::Reading;
use crate::surface::{scoped, Path, Surface, TextStyle};

const RADIUS: f64 = 85.0;
/// Needle travel at full-scale deviation.
const FULL_SCALE: f64 = RADIUS / 3.0;

/// OBS course card, course deviation needle and TO/FROM flag.
#[derive(Debug, Clone)]
pub struct VorIndicator {
    mount: Mount,
    course: f64,
    bearing: f64,
    deviation: f64,
    from_flag: bool,
    is_valid: bool,
}

impl VorIndicator {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            course: 0.0,
            bearing: 0.0,
            deviation: 0.0,
            from_flag: true,
            is_valid: true,
        }
    }

    pub fn course(&self) -> f64 {
        self.course
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn card_rotation(&self) -> f64 {
        -deg_to_rad(self.course)
    }

    /// CDI displacement in reference units; positive is right.
    pub fn needle_offset(&self) -> f64 {
        self.deviation * FULL_SCALE
    }

    pub fn flag_text(&self) -> &'static str {
        if self.from_flag {
            "FROM"
        } else {
            "TO"
        }
    }

    fn draw_card(&self, surface: &mut dyn Surface) {
        surface.rotate(self.card_rotation());
        let label = TextStyle::centered(12.0);
        for degrees in (0..360).step_by(5) {
            let radians = deg_to_rad(degrees as f64);
            let length = if degrees % 30 == 0 {
                15.0
            } else if degrees % 10 == 0 {
                10.0
            } else {
                5.0
            };
            chrome::bearing_tick(
                surface,
                radians,
                RADIUS - 10.0 - length,
                RADIUS - 10.0,
                2.0,
                color::MARKINGS,
            );
            if degrees % 30 == 0 {
                let text = if degrees == 0 {
                    "36".to_string()
                } else {
                    (degrees / 10).to_string()
                };
                scoped(surface, |s| {
                    s.rotate(radians);
                    s.fill_text(&text, 0.0, -(RADIUS - 35.0), &label, color::MARKINGS);
                });
            }
        }

        let bug = Path::new()
            .move_to(0.0, -(RADIUS - 11.0))
            .line_to(-5.0, -(RADIUS - 20.0))
            .line_to(5.0, -(RADIUS - 20.0))
            .close();
        scoped(surface, |s| {
            s.rotate(deg_to_rad(self.bearing));
            s.fill(&bug, &color::GREEN.into());
        });
    }
}

impl Gauge for VorIndicator {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn update(&mut self, reading: &Reading) {
        let Reading::Vor(input) = reading else {
            tracing::trace!(?reading, "VOR indicator ignores reading");
            return;
        };
        if let Some(course) = usable(input.course) {
            self.course = wrap_degrees(course);
        }
        if let Some(bearing) = usable(input.bearing) {
            self.bearing = wrap_degrees(bearing);
        }
        if let Some(deviation) = usable(input.deviation) {
            self.deviation = deviation.clamp(-1.0, 1.0);
        }
        if let Some(from) = input.from_flag {
            self.from_flag = from;
        }
        if let Some(valid) = input.is_valid {
            self.is_valid = valid;
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        self.mount.enter_face(surface);
        surface.fill(&Path::circle(0.0, 0.0, RADIUS - 10.0), &color::BLACK.into());
        scoped(surface, |s| self.draw_card(s));

        for dot in [-2.0, -1.0, 1.0, 2.0] {
            let dot = Path::circle(dot * FULL_SCALE / 2.0, 0.0, 2.5);
            surface.stroke(&dot, &color::MARKINGS.into(), 1.0);
        }
        let x = self.needle_offset();
        surface.fill(&Path::rect(x - 2.0, -40.0, 4.0, 80.0), &color::MARKINGS.into());
        surface.fill(&Path::rect(-40.0, -2.0, 80.0, 4.0), &color::MARKINGS.into());

        let flag_color = if self.from_flag {
            color::GREEN
        } else {
            color::RED
        };
        surface.fill_text(
            self.flag_text(),
            0.0,
            RADIUS / 3.0,
            &TextStyle::centered(12.0).bold(),
            flag_color,
        );
        if !self.is_valid {
            surface.fill_text(
                "NAV",
                0.0,
                -RADIUS / 3.0,
                &TextStyle::centered(14.0).bold(),
                color::RED,
            );
        }

        let pointer = Path::new()
            .move_to(0.0, -RADIUS)
            .line_to(-7.0, -(RADIUS - 12.0))
            .line_to(7.0, -(RADIUS - 12.0))
            .close();
        surface.fill(&pointer, &color::MARKINGS.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::instrument::SizeLimits;
    use crate::scene::Scene;
    use crate::snapshot::VorInput;

    fn indicator() -> VorIndicator {
        VorIndicator::new(Mount::circular(
            Point::new(0.0, 0.0),
            160.0,
            SizeLimits::default(),
        ))
    }

    #[test]
    fn deviation_moves_needle_up_to_full_scale() {
        let mut vor = indicator();
        vor.update(
            &VorInput {
                deviation: Some(0.5),
                ..Default::default()
            }
            .into(),
        );
        assert!((vor.needle_offset() - FULL_SCALE / 2.0).abs() < 1e-12);
        vor.update(
            &VorInput {
                deviation: Some(-7.0),
                ..Default::default()
            }
            .into(),
        );
        assert_eq!(vor.needle_offset(), -FULL_SCALE);
    }

    #[test]
    fn flags_follow_input() {
        let mut vor = indicator();
        assert_eq!(vor.flag_text(), "FROM");
        vor.update(
            &VorInput {
                from_flag: Some(false),
                is_valid: Some(false),
                ..Default::default()
            }
            .into(),
        );
        assert_eq!(vor.flag_text(), "TO");
        let mut scene = Scene::new(200.0, 200.0);
        vor.draw(&mut scene);
        let texts: Vec<&str> = scene.texts().collect();
        assert!(texts.contains(&"TO"));
        assert!(texts.contains(&"NAV"));
        assert!(texts.contains(&"36"));
    }

    #[test]
    fn course_wraps() {
        let mut vor = indicator();
        vor.update(
            &VorInput {
                course: Some(-90.0),
                ..Default::default()
            }
            .into(),
        );
        assert_eq!(vor.course(), 270.0);
    }
}
