//! The immediate-mode drawing contract gauges paint against.
//!
//! Any backend that can build paths, fill and stroke them with solid or
//! gradient brushes, clip, keep an affine transform stack and lay out text
//! implements [`Surface`]. The crate ships two: the software [`Canvas`] and
//! the recording [`Scene`].
//!
//! [`Canvas`]: crate::raster::Canvas
//! [`Scene`]: crate::scene::Scene

use crate::color::Color;
use crate::geometry::{Point, Transform};
use std::f64::consts::TAU;

// ============================================================================
// PATHS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    ops: Vec<PathOp>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.ops.push(PathOp::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.ops.push(PathOp::LineTo(Point::new(x, y)));
        self
    }

    /// Canvas-style arc: connects from the current point to the arc start.
    pub fn arc(mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> Self {
        self.ops.push(PathOp::Arc {
            center: Point::new(cx, cy),
            radius,
            start,
            end,
            anticlockwise: false,
        });
        self
    }

    pub fn arc_anticlockwise(mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> Self {
        self.ops.push(PathOp::Arc {
            center: Point::new(cx, cy),
            radius,
            start,
            end,
            anticlockwise: true,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.ops.push(PathOp::Close);
        self
    }

    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Path::new()
            .move_to(cx + radius, cy)
            .arc(cx, cy, radius, 0.0, TAU)
            .close()
    }

    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Path::new()
            .move_to(x, y)
            .line_to(x + w, y)
            .line_to(x + w, y + h)
            .line_to(x, y + h)
            .close()
    }

    pub fn round_rect(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Self {
        use std::f64::consts::{FRAC_PI_2, PI};
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        Path::new()
            .move_to(x + r, y)
            .line_to(x + w - r, y)
            .arc(x + w - r, y + r, r, -FRAC_PI_2, 0.0)
            .line_to(x + w, y + h - r)
            .arc(x + w - r, y + h - r, r, 0.0, FRAC_PI_2)
            .line_to(x + r, y + h)
            .arc(x + r, y + h - r, r, FRAC_PI_2, PI)
            .line_to(x, y + r)
            .arc(x + r, y + r, r, PI, PI + FRAC_PI_2)
            .close()
    }

    /// Polylines in device space; `closed` marks subpaths ended by `Close`.
    pub fn flatten(&self, transform: &Transform) -> Vec<Polyline> {
        let scale = transform.scale_factor().max(1e-6);
        let mut out: Vec<Polyline> = Vec::new();
        let mut current: Option<Polyline> = None;

        for op in &self.ops {
            match *op {
                PathOp::MoveTo(p) => {
                    if let Some(done) = current.take() {
                        out.push(done);
                    }
                    current = Some(Polyline {
                        points: vec![transform.apply(p)],
                        closed: false,
                    });
                }
                PathOp::LineTo(p) => {
                    current
                        .get_or_insert_with(Polyline::default)
                        .points
                        .push(transform.apply(p));
                }
                PathOp::Arc {
                    center,
                    radius,
                    start,
                    end,
                    anticlockwise,
                } => {
                    let sweep = arc_sweep(start, end, anticlockwise);
                    let segments = ((sweep.abs() * radius * scale) / 3.0)
                        .ceil()
                        .clamp(4.0, 256.0) as usize;
                    let line = current.get_or_insert_with(Polyline::default);
                    for i in 0..=segments {
                        let angle = start + sweep * i as f64 / segments as f64;
                        let p = Point::new(
                            center.x + angle.cos() * radius,
                            center.y + angle.sin() * radius,
                        );
                        line.points.push(transform.apply(p));
                    }
                }
                PathOp::Close => {
                    if let Some(mut done) = current.take() {
                        done.closed = true;
                        let first = done.points.first().copied();
                        out.push(done);
                        // A path may continue after close from the same start point
                        if let Some(first) = first {
                            current = Some(Polyline {
                                points: vec![first],
                                closed: false,
                            });
                        }
                    }
                }
            }
        }
        if let Some(done) = current {
            if done.points.len() > 1 {
                out.push(done);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = if self.closed && self.points.len() > 2 {
            self.points.last().copied().zip(self.points.first().copied())
        } else {
            None
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }
}

/// Signed sweep following the HTML canvas arc rules.
fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if !anticlockwise {
        if end - start >= TAU {
            TAU
        } else {
            let s = (end - start) % TAU;
            if s < 0.0 {
                s + TAU
            } else {
                s
            }
        }
    } else if start - end >= TAU {
        -TAU
    } else {
        let s = (start - end) % TAU;
        -(if s < 0.0 { s + TAU } else { s })
    }
}

// ============================================================================
// BRUSHES AND TEXT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

pub fn stop(offset: f64, color: Color) -> GradientStop {
    GradientStop { offset, color }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Solid(Color),
    Linear {
        from: Point,
        to: Point,
        stops: Vec<GradientStop>,
    },
    Radial {
        inner: Point,
        inner_radius: f64,
        outer: Point,
        outer_radius: f64,
        stops: Vec<GradientStop>,
    },
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl Brush {
    /// Same brush with its geometry mapped into device space.
    pub fn transformed(&self, transform: &Transform) -> Brush {
        match self {
            Brush::Solid(c) => Brush::Solid(*c),
            Brush::Linear { from, to, stops } => Brush::Linear {
                from: transform.apply(*from),
                to: transform.apply(*to),
                stops: stops.clone(),
            },
            Brush::Radial {
                inner,
                inner_radius,
                outer,
                outer_radius,
                stops,
            } => {
                let k = transform.scale_factor();
                Brush::Radial {
                    inner: transform.apply(*inner),
                    inner_radius: inner_radius * k,
                    outer: transform.apply(*outer),
                    outer_radius: outer_radius * k,
                    stops: stops.clone(),
                }
            }
        }
    }

    /// Color at `p`, with `p` in the same space as the brush geometry.
    pub fn color_at(&self, p: Point) -> Color {
        match self {
            Brush::Solid(c) => *c,
            Brush::Linear { from, to, stops } => {
                let d = *to - *from;
                let len_sq = d.x * d.x + d.y * d.y;
                let t = if len_sq > 0.0 {
                    ((p.x - from.x) * d.x + (p.y - from.y) * d.y) / len_sq
                } else {
                    0.0
                };
                sample_stops(stops, t)
            }
            Brush::Radial {
                inner,
                inner_radius,
                outer,
                outer_radius,
                stops,
            } => match radial_parameter(p, *inner, *inner_radius, *outer, *outer_radius) {
                Some(t) => sample_stops(stops, t),
                None => Color::rgba(0, 0, 0, 0),
            },
        }
    }
}

/// Largest `t` with `|p - c(t)| = r(t)` and `r(t) >= 0` for a two-circle
/// conical gradient.
fn radial_parameter(p: Point, c0: Point, r0: f64, c1: Point, r1: f64) -> Option<f64> {
    let cd = c1 - c0;
    let pd = p - c0;
    let dr = r1 - r0;
    let a = cd.x * cd.x + cd.y * cd.y - dr * dr;
    let b = pd.x * cd.x + pd.y * cd.y + r0 * dr;
    let c = pd.x * pd.x + pd.y * pd.y - r0 * r0;
    if a.abs() < 1e-9 {
        if b.abs() < 1e-9 {
            return None;
        }
        let t = c / (2.0 * b);
        return (r0 + t * dr >= 0.0).then_some(t);
    }
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let (t1, t2) = ((b + root) / a, (b - root) / a);
    let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
    if r0 + hi * dr >= 0.0 {
        Some(hi)
    } else if r0 + lo * dr >= 0.0 {
        Some(lo)
    } else {
        None
    }
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Color {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::rgba(0, 0, 0, 0);
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    stops
        .windows(2)
        .find(|w| t >= w[0].offset && t <= w[1].offset)
        .map(|w| {
            let span = w[1].offset - w[0].offset;
            let local = if span > 0.0 { (t - w[0].offset) / span } else { 0.0 };
            w[0].color.mix(w[1].color, local)
        })
        .unwrap_or(last.color)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Baseline {
    Top,
    #[default]
    Middle,
    Alphabetic,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Proportional text uses the face's own advances; monospaced text gives
/// every character the width of the widest digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Proportional,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub weight: FontWeight,
    pub family: FontFamily,
    pub align: TextAlign,
    pub baseline: Baseline,
}

impl TextStyle {
    /// Centered on both axes, the most common gauge label.
    pub fn centered(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            family: FontFamily::Proportional,
            align: TextAlign::Center,
            baseline: Baseline::Middle,
        }
    }

    pub fn bold(self) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..self
        }
    }

    /// Fixed character cells, so readouts hold still as digits change.
    pub fn monospaced(self) -> Self {
        Self {
            family: FontFamily::Monospace,
            ..self
        }
    }

    pub fn aligned(self, align: TextAlign) -> Self {
        Self { align, ..self }
    }

    pub fn on_baseline(self, baseline: Baseline) -> Self {
        Self { baseline, ..self }
    }
}

// ============================================================================
// SURFACE CONTRACT
// ============================================================================

pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);
    fn scale(&mut self, sx: f64, sy: f64);

    /// Replaces every pixel, ignoring transform and clip.
    fn clear(&mut self, color: Color);
    fn fill(&mut self, path: &Path, brush: &Brush);
    fn stroke(&mut self, path: &Path, brush: &Brush, line_width: f64);
    /// Intersects the current clip with `path`; undone by `restore`.
    fn clip(&mut self, path: &Path);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle, color: Color);
}

/// Runs `draw` between a matched `save`/`restore` pair.
pub fn scoped<R>(surface: &mut dyn Surface, draw: impl FnOnce(&mut dyn Surface) -> R) -> R {
    surface.save();
    let result = draw(surface);
    surface.restore();
    result
}
