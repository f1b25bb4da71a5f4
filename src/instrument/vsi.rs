use super::{chrome, usable, Gauge, Mount};
use crate::color;
use crate::geometry::polar;
use crate::snapshot::Reading;
use crate::surface::{scoped, Surface, TextStyle};
use std::f64::consts::{FRAC_PI_2, PI};

/// Full-scale climb or descent, ft/min.
pub const VERTICAL_SPEED_LIMIT: f64 = 2000.0;

const RADIUS: f64 = 65.0;

#[derive(Debug, Clone)]
pub struct VerticalSpeedIndicator {
    mount: Mount,
    vertical_speed: f64,
}

impl VerticalSpeedIndicator {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            vertical_speed: 0.0,
        }
    }

    pub fn vertical_speed(&self) -> f64 {
        self.vertical_speed
    }

    /// Canvas radians: level flight points left (π), full climb and full
    /// descent both meet on the right.
    pub fn angle_for(vertical_speed: f64) -> f64 {
        PI + vertical_speed / VERTICAL_SPEED_LIMIT * PI
    }

    pub fn needle_angle(&self) -> f64 {
        Self::angle_for(self.vertical_speed)
    }
}

impl Gauge for VerticalSpeedIndicator {
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
                    self.vertical_speed = v.clamp(-VERTICAL_SPEED_LIMIT, VERTICAL_SPEED_LIMIT);
                }
            }
            other => tracing::trace!(?other, "VSI ignores reading"),
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        self.mount.enter_face(surface);

        let label = TextStyle::centered(12.0);
        for step in -20..=20 {
            let value = step as f64 * 100.0;
            let angle = Self::angle_for(value);
            let (length, width) = if step % 5 == 0 { (10.0, 2.0) } else { (5.0, 1.0) };
            chrome::radial_tick(surface, angle, RADIUS - length, RADIUS, width, color::MARKINGS);
            // ±2000 share a position, label it once
            if step % 10 == 0 && step != -20 {
                let p = polar(RADIUS - 18.0, angle);
                let text = format!("{}", (value / 100.0).abs());
                surface.fill_text(&text, p.x, p.y, &label, color::MARKINGS);
            }
        }

        surface.fill_text("UP", 0.0, -RADIUS + 5.0, &label, color::MARKINGS);
        surface.fill_text("DOWN", 0.0, RADIUS - 5.0, &label, color::MARKINGS);
        surface.fill_text("FT/MIN", 22.0, -12.0, &TextStyle::centered(7.0), color::MARKINGS);
        surface.fill_text("x100", 22.0, 12.0, &TextStyle::centered(7.0), color::MARKINGS);

        scoped(surface, |s| {
            s.rotate(self.needle_angle() + FRAC_PI_2);
            chrome::needle(s, RADIUS + 5.0, 4.0, color::MARKINGS);
        });
        chrome::center_cap(surface, 7.0);
    }
}
