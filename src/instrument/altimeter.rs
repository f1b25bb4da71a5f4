use super::{chrome, usable, Gauge, Mount};
use crate::color;
use crate::snapshot::{AltimeterInput, Reading};
use crate::surface::{scoped, Path, Surface, TextStyle};
use std::f64::consts::TAU;

pub const ALTITUDE_RANGE: (f64, f64) = (0.0, 99_999.0);
pub const PRESSURE_RANGE: (f64, f64) = (28.0, 31.0);
pub const STANDARD_PRESSURE: f64 = 29.92;

const RADIUS: f64 = 85.0;

/// Three-pointer altimeter with a Kollsman pressure window.
#[derive(Debug, Clone)]
pub struct Altimeter {
    mount: Mount,
    altitude: f64,
    pressure: f64,
}

impl Altimeter {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            altitude: 0.0,
            pressure: STANDARD_PRESSURE,
        }
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Hundreds, thousands and ten-thousands pointers as fractions of a turn.
    pub fn pointer_turns(&self) -> [f64; 3] {
        [
            (self.altitude % 1_000.0) / 1_000.0,
            (self.altitude % 10_000.0) / 10_000.0,
            (self.altitude % 100_000.0) / 100_000.0,
        ]
    }

    fn set_altitude(&mut self, altitude: Option<f64>) {
        if let Some(v) = usable(altitude) {
            self.altitude = v.clamp(ALTITUDE_RANGE.0, ALTITUDE_RANGE.1);
        }
    }

    fn set_pressure(&mut self, pressure: Option<f64>) {
        if let Some(v) = usable(pressure) {
            self.pressure = v.clamp(PRESSURE_RANGE.0, PRESSURE_RANGE.1);
        }
    }
}

impl Gauge for Altimeter {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn update(&mut self, reading: &Reading) {
        match *reading {
            Reading::Value(v) | Reading::Altimeter(AltimeterInput::Altitude(v)) => {
                self.set_altitude(Some(v))
            }
            Reading::Altimeter(AltimeterInput::Setting { altitude, pressure }) => {
                self.set_altitude(altitude);
                self.set_pressure(pressure);
            }
            other => tracing::trace!(?other, "altimeter ignores reading"),
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        self.mount.enter_face(surface);

        let label = TextStyle::centered(12.0);
        for digit in 0..10 {
            let radians = digit as f64 * TAU / 10.0;
            chrome::bearing_label(
                surface,
                &digit.to_string(),
                radians,
                RADIUS - 25.0,
                &label,
                color::MARKINGS,
            );
        }
        for i in 0..50 {
            let length = if i % 5 == 0 { 15.0 } else { 10.0 };
            let radians = i as f64 * TAU / 50.0;
            chrome::bearing_tick(surface, radians, RADIUS - length, RADIUS, 2.0, color::MARKINGS);
        }

        // Kollsman window sits under the pointers
        let window = Path::rect(-30.0, RADIUS / 2.0, 60.0, 20.0);
        surface.fill(&window, &color::BLACK.into());
        surface.stroke(&window, &color::MARKINGS.into(), 1.0);
        surface.fill_text(
            &format!("{:.2}", self.pressure),
            0.0,
            RADIUS / 2.0 + 10.0,
            &label,
            color::MARKINGS,
        );

        let [hundreds, thousands, ten_thousands] = self.pointer_turns();
        let pointers = [
            (ten_thousands, RADIUS * 0.5, 3.0),
            (thousands, RADIUS * 0.7, 4.0),
            (hundreds, RADIUS * 0.9, 2.5),
        ];
        for (turns, length, half_width) in pointers {
            scoped(surface, |s| {
                s.rotate(turns * TAU);
                chrome::needle(s, length, half_width, color::MARKINGS);
            });
        }
        chrome::center_cap(surface, 6.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::instrument::SizeLimits;
    use crate::scene::Scene;

    fn altimeter() -> Altimeter {
        Altimeter::new(Mount::circular(
            Point::new(0.0, 0.0),
            160.0,
            SizeLimits::default(),
        ))
    }

    #[test]
    fn pointers_split_altitude_into_turns() {
        let mut alt = altimeter();
        alt.update(&Reading::Value(12_500.0));
        let [h, t, tt] = alt.pointer_turns();
        assert!((h - 0.5).abs() < 1e-9);
        assert!((t - 0.25).abs() < 1e-9);
        assert!((tt - 0.125).abs() < 1e-9);
    }

    #[test]
    fn partial_setting_keeps_altitude() {
        let mut alt = altimeter();
        alt.update(&AltimeterInput::Altitude(3_000.0).into());
        alt.update(
            &AltimeterInput::Setting {
                altitude: None,
                pressure: Some(30.12),
            }
            .into(),
        );
        assert_eq!(alt.altitude(), 3_000.0);
        assert_eq!(alt.pressure(), 30.12);
    }

    #[test]
    fn out_of_range_values_clamp() {
        let mut alt = altimeter();
        alt.update(
            &AltimeterInput::Setting {
                altitude: Some(-50.0),
                pressure: Some(40.0),
            }
            .into(),
        );
        assert_eq!(alt.altitude(), 0.0);
        assert_eq!(alt.pressure(), 31.0);
    }

    #[test]
    fn pressure_window_shows_two_decimals() {
        let mut scene = Scene::new(200.0, 200.0);
        altimeter().draw(&mut scene);
        assert!(scene.texts().any(|t| t == "29.92"));
    }
}
