use super::{chrome, usable, Gauge, Mount};
use crate::color;
use crate::geometry::{deg_to_rad, polar};
use crate::snapshot::Reading;
use crate::surface::{scoped, Path, Surface, TextStyle};
use std::f64::consts::FRAC_PI_2;

/// Turn rates beyond this (°/s) pin the symbol.
pub const TURN_RATE_LIMIT: f64 = 6.0;
/// Rate of a two minute turn, °/s. The L/R marks sit where it puts the symbol.
pub const STANDARD_RATE: f64 = 3.0;
/// Symbol bank per °/s of turn. Standard rate reads at 30°, roughly the bank
/// it takes near 100 kt, and the ±6 °/s limit stops well short of vertical.
pub const DEGREES_PER_TURN_RATE: f64 = 10.0;
/// Ball travel at full slip or skid, in reference units.
pub const BALL_TRAVEL: f64 = 20.0;

const RADIUS: f64 = 85.0;
const RACE_RADIUS: f64 = 60.0;
const RACE_HALF_SWEEP: f64 = 0.45;

/// Angle of the R mark in degrees; L is its mirror.
pub fn standard_rate_mark() -> f64 {
    STANDARD_RATE * DEGREES_PER_TURN_RATE
}

#[derive(Debug, Clone)]
pub struct TurnCoordinator {
    mount: Mount,
    turn_rate: f64,
    slip_skid: f64,
}

impl TurnCoordinator {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            turn_rate: 0.0,
            slip_skid: 0.0,
        }
    }

    pub fn turn_rate(&self) -> f64 {
        self.turn_rate
    }

    pub fn slip_skid(&self) -> f64 {
        self.slip_skid
    }

    /// Bank of the aircraft symbol, radians, clockwise positive.
    pub fn symbol_rotation(&self) -> f64 {
        deg_to_rad(self.turn_rate * DEGREES_PER_TURN_RATE)
    }

    /// Horizontal ball displacement in reference units.
    pub fn ball_offset(&self) -> f64 {
        self.slip_skid * BALL_TRAVEL
    }

    fn draw_race(&self, surface: &mut dyn Surface) {
        // the race is the bottom of a circle hanging above the ball
        let cy = RADIUS / 2.0 - RACE_RADIUS;
        let start = FRAC_PI_2 - RACE_HALF_SWEEP;
        let end = FRAC_PI_2 + RACE_HALF_SWEEP;
        let p = polar(RACE_RADIUS, start);
        let race = Path::new()
            .move_to(p.x, cy + p.y)
            .arc(0.0, cy, RACE_RADIUS, start, end);
        surface.stroke(&race, &color::MARKINGS.with_alpha(0.85).into(), 18.0);

        for wire in [-10.0, 10.0] {
            let y = cy + (RACE_RADIUS * RACE_RADIUS - wire * wire).sqrt();
            let line = Path::new().move_to(wire, y - 10.0).line_to(wire, y + 10.0);
            surface.stroke(&line, &color::BLACK.into(), 1.5);
        }

        let x = self.ball_offset();
        let y = cy + (RACE_RADIUS * RACE_RADIUS - x * x).sqrt();
        let ball = Path::circle(x, y, 8.0);
        surface.fill(&ball, &color::BLACK.into());
        surface.stroke(&ball, &color::MARKINGS.into(), 1.0);
    }
}

impl Gauge for TurnCoordinator {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn update(&mut self, reading: &Reading) {
        let Reading::Turn(input) = reading else {
            tracing::trace!(?reading, "turn coordinator ignores reading");
            return;
        };
        if let Some(rate) = usable(input.turn_rate) {
            self.turn_rate = rate.clamp(-TURN_RATE_LIMIT, TURN_RATE_LIMIT);
        }
        if let Some(slip) = usable(input.slip_skid) {
            self.slip_skid = slip.clamp(-1.0, 1.0);
        }
    }

    fn draw_face(&self, surface: &mut dyn Surface) {
        self.mount.enter_face(surface);

        let small = TextStyle::centered(12.0);
        surface.fill_text("2 MIN TURN", 0.0, -RADIUS / 2.0, &small, color::MARKINGS);

        let standard = standard_rate_mark();
        for (degrees, mark) in [(-standard, Some("L")), (0.0, None), (standard, Some("R"))] {
            let radians = deg_to_rad(degrees);
            chrome::bearing_tick(surface, radians, RADIUS - 30.0, RADIUS - 15.0, 3.0, color::MARKINGS);
            if let Some(mark) = mark {
                chrome::bearing_label(
                    surface,
                    mark,
                    radians,
                    RADIUS - 42.0,
                    &TextStyle::centered(14.0).bold(),
                    color::MARKINGS,
                );
            }
        }

        scoped(surface, |s| {
            s.rotate(self.symbol_rotation());
            let wings = Path::new().move_to(-45.0, 0.0).line_to(45.0, 0.0);
            s.stroke(&wings, &color::MARKINGS.into(), 4.0);
            let fin = Path::new().move_to(0.0, 0.0).line_to(0.0, -14.0);
            s.stroke(&fin, &color::MARKINGS.into(), 3.0);
            s.fill(&Path::circle(0.0, 0.0, 7.0), &color::MARKINGS.into());
        });

        self.draw_race(surface);

        surface.fill_text(
            "NO PITCH INFORMATION",
            0.0,
            RADIUS * 0.8,
            &TextStyle::centered(9.0),
            color::MARKINGS,
        );
    }
}
