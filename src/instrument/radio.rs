use super::{usable, Extent, Gauge, Mount};
use crate::color::{self, Color};
use crate::snapshot::{RadioInput, Reading};
use crate::surface::{Baseline, Path, Surface, TextAlign, TextStyle};

/// Communication band, MHz.
pub const COM_RANGE: (f64, f64) = (118.0, 136.975);
/// Navigation band, MHz.
pub const NAV_RANGE: (f64, f64) = (108.0, 117.95);

const PAD: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequencies {
    pub active_com: f64,
    pub standby_com: f64,
    pub active_nav: f64,
    pub standby_nav: f64,
}

impl Default for Frequencies {
    fn default() -> Self {
        Self {
            active_com: 118.0,
            standby_com: 136.975,
            active_nav: 110.5,
            standby_nav: 113.9,
        }
    }
}

/// COM/NAV radio head with active and standby windows.
#[derive(Debug, Clone)]
pub struct Radio {
    mount: Mount,
    frequencies: Frequencies,
}

impl Radio {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            frequencies: Frequencies::default(),
        }
    }

    pub fn frequencies(&self) -> Frequencies {
        self.frequencies
    }

    pub fn swap_com(&mut self) {
        let f = &mut self.frequencies;
        std::mem::swap(&mut f.active_com, &mut f.standby_com);
    }

    pub fn swap_nav(&mut self) {
        let f = &mut self.frequencies;
        std::mem::swap(&mut f.active_nav, &mut f.standby_nav);
    }

    fn size(&self) -> (f64, f64) {
        match self.mount.extent() {
            Extent::Rect { width, height } => (width, height),
            Extent::Circle { diameter } => (diameter, diameter),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_column(
        &self,
        surface: &mut dyn Surface,
        x: f64,
        width: f64,
        display_height: f64,
        band: &str,
        (active, standby): (String, String),
        button: f64,
        button_y: f64,
    ) {
        let windows = [
            (PAD, active, color::GREEN),
            (2.0 * PAD + display_height, standby, color::YELLOW),
        ];
        for (y, text, tint) in windows {
            let display = Path::rect(x, y, width, display_height);
            surface.fill(&display, &color::BLACK.into());
            surface.stroke(&display, &color::HOUSING_EDGE.into(), 1.0);
            surface.fill_text(
                &text,
                x + width / 2.0,
                y + display_height / 2.0,
                &TextStyle::centered(display_height * 0.6).monospaced(),
                tint,
            );
        }
        surface.fill_text(
            band,
            x + 3.0,
            PAD + 2.0,
            &TextStyle::centered((display_height * 0.25).max(6.0))
                .aligned(TextAlign::Left)
                .on_baseline(Baseline::Top),
            Color::new(0x90, 0x90, 0x90),
        );

        let swap = Path::round_rect(x, button_y, button * 1.6, button, 3.0);
        surface.fill(&swap, &color::BEZEL.into());
        surface.stroke(&swap, &color::HOUSING_EDGE.into(), 1.0);
        surface.fill_text(
            "<->",
            x + button * 0.8,
            button_y + button / 2.0,
            &TextStyle::centered(button * 0.6),
            color::MARKINGS,
        );

        let (kx, ky) = (x + width - button / 2.0, button_y + button / 2.0);
        surface.fill(&Path::circle(kx, ky, button / 2.0), &color::HOUSING_EDGE.into());
        surface.fill(&Path::circle(kx, ky, button / 4.0), &color::BEZEL.into());
    }
}

impl Gauge for Radio {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn update(&mut self, reading: &Reading) {
        let Reading::Radio(RadioInput {
            active_freq,
            standby_freq,
            active_nav_freq,
            standby_nav_freq,
        }) = *reading
        else {
            tracing::trace!(?reading, "radio ignores reading");
            return;
        };
        let f = &mut self.frequencies;
        let com = |v: Option<f64>| usable(v).map(|v| v.clamp(COM_RANGE.0, COM_RANGE.1));
        let nav = |v: Option<f64>| usable(v).map(|v| v.clamp(NAV_RANGE.0, NAV_RANGE.1));
        if let Some(v) = com(active_freq) {
            f.active_com = v;
        }
        if let Some(v) = com(standby_freq) {
            f.standby_com = v;
        }
        if let Some(v) = nav(active_nav_freq) {
            f.active_nav = v;
        }
        if let Some(v) = nav(standby_nav_freq) {
            f.standby_nav = v;
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        let origin = self.mount.position();
        surface.translate(origin.x, origin.y);

        let (width, height) = self.size();
        let button = (height * 0.16).min(20.0);
        let column = (width - 3.0 * PAD) / 2.0;
        let display_height = ((height - 4.0 * PAD - button) / 2.0).max(1.0);
        let button_y = height - PAD - button;
        let f = self.frequencies;

        self.draw_column(
            surface,
            PAD,
            column,
            display_height,
            "COM",
            (format!("{:.3}", f.active_com), format!("{:.3}", f.standby_com)),
            button,
            button_y,
        );
        self.draw_column(
            surface,
            2.0 * PAD + column,
            column,
            display_height,
            "NAV",
            (format!("{:.2}", f.active_nav), format!("{:.2}", f.standby_nav)),
            button,
            button_y,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::instrument::SizeLimits;
    use crate::scene::{DrawCommand, Scene};
    use crate::surface::FontFamily;

    fn radio() -> Radio {
        Radio::new(Mount::rectangular(
            Point::new(10.0, 10.0),
            340.0,
            128.0,
            SizeLimits::uniform(80.0, 600.0),
        ))
    }

    #[test]
    fn swap_exchanges_active_and_standby() {
        let mut r = radio();
        r.swap_com();
        assert_eq!(r.frequencies().active_com, 136.975);
        assert_eq!(r.frequencies().standby_com, 118.0);
        r.swap_nav();
        assert_eq!(r.frequencies().active_nav, 113.9);
    }

    #[test]
    fn partial_update_clamps_to_band() {
        let mut r = radio();
        r.update(
            &RadioInput {
                standby_freq: Some(150.0),
                active_nav_freq: Some(100.0),
                ..Default::default()
            }
            .into(),
        );
        let f = r.frequencies();
        assert_eq!(f.active_com, 118.0);
        assert_eq!(f.standby_com, COM_RANGE.1);
        assert_eq!(f.active_nav, NAV_RANGE.0);
    }

    #[test]
    fn displays_use_band_precision() {
        let mut scene = Scene::new(400.0, 200.0);
        radio().draw(&mut scene);
        let texts: Vec<&str> = scene.texts().collect();
        for label in ["118.000", "136.975", "110.50", "113.90", "COM", "NAV"] {
            assert!(texts.contains(&label), "missing {label}");
        }
    }

    #[test]
    fn frequency_readouts_are_monospaced() {
        let mut scene = Scene::new(400.0, 200.0);
        radio().draw(&mut scene);
        let families: Vec<(&str, FontFamily)> = scene
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, style, .. } => Some((text.as_str(), style.family)),
                _ => None,
            })
            .collect();
        for readout in ["118.000", "136.975", "110.50", "113.90"] {
            assert!(families.contains(&(readout, FontFamily::Monospace)), "{readout}");
        }
        assert!(families.contains(&("COM", FontFamily::Proportional)));
    }
}
