use super::{chrome, usable, Gauge, Mount, REFERENCE_SIZE};
use crate::color::{self, Color};
use crate::geometry::{deg_to_rad, wrap_signed_degrees};
use crate::snapshot::Reading;
use crate::surface::{scoped, Path, Surface, TextAlign, TextStyle};

const RADIUS: f64 = REFERENCE_SIZE / 2.0;
const ROLL_MARKS: [(f64, f64); 11] = [
    (-60.0, 20.0),
    (-45.0, 10.0),
    (-30.0, 20.0),
    (-20.0, 10.0),
    (-10.0, 10.0),
    (0.0, 15.0),
    (10.0, 10.0),
    (20.0, 10.0),
    (30.0, 20.0),
    (45.0, 10.0),
    (60.0, 20.0),
];

#[derive(Debug, Clone)]
pub struct AttitudeIndicator {
    mount: Mount,
    pitch: f64,
    roll: f64,
}

impl AttitudeIndicator {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Bank angle in `[-180, 180)`.
    pub fn roll(&self) -> f64 {
        self.roll
    }

    /// Vertical shift of the horizon in device pixels.
    pub fn horizon_offset(&self) -> f64 {
        self.pitch * self.mount.size() / 180.0
    }

    fn draw_world(&self, surface: &mut dyn Surface) {
        // one reference unit per degree of pitch
        let offset = self.pitch;
        surface.rotate(deg_to_rad(self.roll));

        let span = REFERENCE_SIZE * 2.0;
        surface.fill(
            &Path::rect(-span / 2.0, -span, span, span + offset),
            &color::SKY.into(),
        );
        surface.fill(
            &Path::rect(-span / 2.0, offset, span, span),
            &color::GROUND.into(),
        );
        let horizon = Path::new()
            .move_to(-span / 2.0, offset)
            .line_to(span / 2.0, offset);
        surface.stroke(&horizon, &color::MARKINGS.into(), 2.0);

        let label = TextStyle::centered(REFERENCE_SIZE / 20.0);
        for step in -4..=4 {
            let degrees = step as f64 * 5.0;
            if step == 1 {
                continue;
            }
            let (width, line_width) = if step % 4 == 0 {
                (REFERENCE_SIZE * 0.42 + degrees.abs(), 2.0)
            } else if step % 2 == 0 {
                (REFERENCE_SIZE * 0.28 + degrees.abs(), 2.0)
            } else {
                (REFERENCE_SIZE * 0.14, 4.0)
            };
            let y = offset - degrees;
            let gap = REFERENCE_SIZE * 0.1 / 2.0;
            let rung = Path::new()
                .move_to(-width / 2.0, y)
                .line_to(-gap, y)
                .move_to(gap, y)
                .line_to(width / 2.0, y);
            surface.stroke(&rung, &color::MARKINGS.into(), line_width);
            if step != 0 && step % 2 == 0 {
                let text = format!("{:.0}", degrees.abs());
                surface.fill_text(
                    &text,
                    -width / 2.0 - 8.0,
                    y,
                    &label.aligned(TextAlign::Right),
                    color::MARKINGS,
                );
                surface.fill_text(
                    &text,
                    width / 2.0 + 8.0,
                    y,
                    &label.aligned(TextAlign::Left),
                    color::MARKINGS,
                );
            }
        }

        for (degrees, length) in ROLL_MARKS {
            chrome::bearing_tick(
                surface,
                deg_to_rad(degrees),
                RADIUS - 5.0 - length,
                RADIUS - 5.0,
                2.0,
                color::MARKINGS,
            );
        }
    }
}

impl Gauge for AttitudeIndicator {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn update(&mut self, reading: &Reading) {
        let Reading::Attitude(input) = reading else {
            tracing::trace!(?reading, "attitude indicator ignores reading");
            return;
        };
        if let Some(pitch) = usable(input.pitch) {
            self.pitch = pitch.clamp(-90.0, 90.0);
        }
        if let Some(roll) = usable(input.roll) {
            self.roll = wrap_signed_degrees(roll);
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        self.mount.enter_face(surface);
        scoped(surface, |s| {
            s.clip(&Path::circle(0.0, 0.0, RADIUS));
            self.draw_world(s);
        });

        let symbol = color::YELLOW;
        let wings = Path::new()
            .move_to(-REFERENCE_SIZE / 3.0, 0.0)
            .line_to(-REFERENCE_SIZE / 9.0, 0.0)
            .line_to(-REFERENCE_SIZE / 18.0, REFERENCE_SIZE / 18.0)
            .move_to(REFERENCE_SIZE / 3.0, 0.0)
            .line_to(REFERENCE_SIZE / 9.0, 0.0)
            .line_to(REFERENCE_SIZE / 18.0, REFERENCE_SIZE / 18.0);
        surface.stroke(&wings, &symbol.into(), 3.0);
        surface.fill(&Path::circle(0.0, 0.0, 3.0), &symbol.into());

        let pointer = Path::new()
            .move_to(0.0, -(RADIUS - 5.0))
            .line_to(-7.0, -(RADIUS - 17.0))
            .line_to(7.0, -(RADIUS - 17.0))
            .close();
        surface.fill(&pointer, &symbol.into());
        surface.stroke(
            &Path::circle(0.0, 0.0, RADIUS - 1.0),
            &Color::rgba(0, 0, 0, 160).into(),
            2.0,
        );
    }
}
