//! Housing, glass and the small drawing pieces gauges share.

use super::{Extent, Mount, HANDLE_SIZE};
use crate::color::{self, Color};
use crate::geometry::{bearing_point, polar, Point};
use crate::surface::{scoped, stop, Brush, Path, Surface, TextStyle};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};

/// Case ring, face, glare and glass highlight, in device coordinates.
pub fn draw_housing(surface: &mut dyn Surface, mount: &Mount) {
    match mount.extent() {
        Extent::Circle { diameter } => {
            let c = mount.center();
            let r = diameter / 2.0;
            surface.fill(&Path::circle(c.x, c.y, r + 5.0), &color::CASE.into());
            surface.fill(&Path::circle(c.x, c.y, r), &color::FACE.into());

            let glare = Brush::Radial {
                inner: c - Point::new(diameter / 4.0, diameter / 4.0),
                inner_radius: 0.0,
                outer: c,
                outer_radius: r,
                stops: vec![stop(0.0, Color::white(0.1)), stop(1.0, Color::white(0.0))],
            };
            surface.fill(&Path::circle(c.x, c.y, r), &glare);

            let glass = Path::new()
                .move_to(c.x, c.y - (r - 2.0))
                .arc(c.x, c.y, r - 2.0, -FRAC_PI_2, FRAC_PI_6);
            surface.stroke(&glass, &Color::white(0.1).into(), 2.0);
        }
        Extent::Rect { width, height } => {
            let p = mount.position();
            let housing = Path::round_rect(p.x, p.y, width, height, 5.0);
            surface.fill(&housing, &color::CASE.into());
            surface.stroke(&housing, &color::HOUSING_EDGE.into(), 2.0);
        }
    }
}

pub fn draw_resize_handles(surface: &mut dyn Surface, mount: &Mount) {
    let half = HANDLE_SIZE / 2.0;
    for (_, c) in mount.handle_positions() {
        let square = Path::rect(c.x - half, c.y - half, HANDLE_SIZE, HANDLE_SIZE);
        surface.fill(&square, &color::MARKINGS.into());
        surface.stroke(&square, &color::FACE.into(), 1.0);
    }
}

/// Radial tick on a dial with canvas-convention `radians`.
pub fn radial_tick(
    surface: &mut dyn Surface,
    radians: f64,
    inner: f64,
    outer: f64,
    width: f64,
    color: Color,
) {
    let a = polar(inner, radians);
    let b = polar(outer, radians);
    let line = Path::new().move_to(a.x, a.y).line_to(b.x, b.y);
    surface.stroke(&line, &color.into(), width);
}

/// Radial tick on a card with compass-convention `radians` (0 = up).
pub fn bearing_tick(
    surface: &mut dyn Surface,
    radians: f64,
    inner: f64,
    outer: f64,
    width: f64,
    color: Color,
) {
    let a = bearing_point(inner, radians);
    let b = bearing_point(outer, radians);
    let line = Path::new().move_to(a.x, a.y).line_to(b.x, b.y);
    surface.stroke(&line, &color.into(), width);
}

/// Text at `radius` along compass-convention `radians`, kept upright.
pub fn bearing_label(
    surface: &mut dyn Surface,
    text: &str,
    radians: f64,
    radius: f64,
    style: &TextStyle,
    color: Color,
) {
    let p = bearing_point(radius, radians);
    surface.fill_text(text, p.x, p.y, style, color);
}

/// Tapered needle pointing up from the origin, with a drop shadow.
pub fn needle(surface: &mut dyn Surface, length: f64, half_width: f64, color: Color) {
    let shape = Path::new()
        .move_to(-half_width, 0.0)
        .line_to(0.0, -length)
        .line_to(half_width, 0.0)
        .close();
    scoped(surface, |s| {
        s.translate(2.0, 2.0);
        s.fill(&shape, &Color::rgba(0, 0, 0, 128).into());
    });
    surface.fill(&shape, &color.into());
}

/// Black hub with a white rim over the needle pivot.
pub fn center_cap(surface: &mut dyn Surface, radius: f64) {
    let cap = Path::circle(0.0, 0.0, radius);
    surface.fill(&cap, &color::BLACK.into());
    surface.stroke(&cap, &color::MARKINGS.into(), 2.0);
}
