//! Software rasterizer writing straight into an RGBA8 frame buffer.
//!
//! Fills use non-zero winding with sub-scanline coverage; strokes use the
//! distance-to-segment coverage of the thick-line drawer; text goes through
//! `rusttype` and is splatted bilinearly so it survives rotation and mirroring.

use crate::color::Color;
use crate::geometry::{Point, Transform};
use crate::surface::{
    Baseline, Brush, FontFamily, FontWeight, Path, Polyline, Surface, TextAlign, TextStyle,
};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::rc::Rc;

const SUBSAMPLES: usize = 4;
const MIN_ALPHA: f32 = 0.003;

// ============================================================================
// CORE DATA TYPES
// ============================================================================

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    font: Option<&'a Font<'static>>,
    state: DrawState,
    stack: Vec<DrawState>,
}

#[derive(Clone, Default)]
struct DrawState {
    transform: Transform,
    clip: Option<Rc<Mask>>,
}

/// Per-pixel coverage over a device-space bounding box.
#[derive(Debug, Clone, PartialEq)]
struct Mask {
    x0: i32,
    y0: i32,
    w: usize,
    h: usize,
    data: Vec<f32>,
}

impl Mask {
    fn empty() -> Self {
        Self {
            x0: 0,
            y0: 0,
            w: 0,
            h: 0,
            data: Vec::new(),
        }
    }

    fn get(&self, x: i32, y: i32) -> f32 {
        let (lx, ly) = (x - self.x0, y - self.y0);
        if lx < 0 || ly < 0 || lx as usize >= self.w || ly as usize >= self.h {
            return 0.0;
        }
        self.data[ly as usize * self.w + lx as usize]
    }

    fn intersect(&self, other: &Mask) -> Mask {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = (self.x0 + self.w as i32).min(other.x0 + other.w as i32);
        let y1 = (self.y0 + self.h as i32).min(other.y0 + other.h as i32);
        if x1 <= x0 || y1 <= y0 {
            return Mask::empty();
        }
        let (w, h) = ((x1 - x0) as usize, (y1 - y0) as usize);
        let mut data = Vec::with_capacity(w * h);
        for y in y0..y1 {
            for x in x0..x1 {
                data.push(self.get(x, y) * other.get(x, y));
            }
        }
        Mask { x0, y0, w, h, data }
    }
}

impl<'a> Canvas<'a> {
    /// `frame` must hold `width * height` RGBA pixels.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
            font: None,
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    pub fn with_font(mut self, font: Option<&'a Font<'static>>) -> Self {
        self.font = font;
        self
    }

    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    /// RGBA of the pixel at `(x, y)`, for inspection.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    fn clip_at(&self, x: i32, y: i32) -> f32 {
        self.state.clip.as_ref().map_or(1.0, |m| m.get(x, y))
    }

    fn device_bounds(&self, points: impl Iterator<Item = Point>, pad: f64) -> Option<(i32, i32, i32, i32)> {
        let (mut min_x, mut min_y, mut max_x, mut max_y) =
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for p in points {
            if !p.x.is_finite() || !p.y.is_finite() {
                continue;
            }
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if min_x > max_x {
            return None;
        }
        let x0 = ((min_x - pad).floor() as i32).max(0);
        let y0 = ((min_y - pad).floor() as i32).max(0);
        let x1 = ((max_x + pad).ceil() as i32).min(self.width as i32);
        let y1 = ((max_y + pad).ceil() as i32).min(self.height as i32);
        (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
    }

    fn fill_coverage(&self, lines: &[Polyline]) -> Option<Mask> {
        let edges: Vec<(Point, Point)> = lines
            .iter()
            .filter(|l| l.points.len() > 1)
            .flat_map(|l| {
                let closing = l.points.last().copied().zip(l.points.first().copied());
                l.points.windows(2).map(|w| (w[0], w[1])).chain(closing)
            })
            .filter(|(a, b)| a.y != b.y && a.x.is_finite() && b.x.is_finite())
            .collect();
        if edges.is_empty() {
            return None;
        }
        let (x0, y0, x1, y1) =
            self.device_bounds(edges.iter().flat_map(|(a, b)| [*a, *b]), 0.0)?;
        let (w, h) = ((x1 - x0) as usize, (y1 - y0) as usize);
        let mut data = vec![0.0f32; w * h];
        let mut crossings: Vec<(f64, i32)> = Vec::new();
        let weight = 1.0 / SUBSAMPLES as f32;

        for row in 0..h {
            let slice = &mut data[row * w..(row + 1) * w];
            for s in 0..SUBSAMPLES {
                let sy = (y0 as usize + row) as f64 + (s as f64 + 0.5) / SUBSAMPLES as f64;
                crossings.clear();
                for (a, b) in &edges {
                    if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                        let x = a.x + (sy - a.y) * (b.x - a.x) / (b.y - a.y);
                        crossings.push((x, if b.y > a.y { 1 } else { -1 }));
                    }
                }
                crossings.sort_by(|l, r| l.0.total_cmp(&r.0));
                let mut winding = 0;
                let mut span_start = 0.0;
                for &(x, dir) in &crossings {
                    let was = winding;
                    winding += dir;
                    if was == 0 && winding != 0 {
                        span_start = x;
                    } else if was != 0 && winding == 0 {
                        accumulate_span(slice, span_start - x0 as f64, x - x0 as f64, weight);
                    }
                }
            }
        }
        Some(Mask { x0, y0, w, h, data })
    }

    fn stroke_coverage(&self, lines: &[Polyline], line_width: f64) -> Option<Mask> {
        let half = (line_width / 2.0).max(0.5);
        let (x0, y0, x1, y1) = self.device_bounds(
            lines.iter().flat_map(|l| l.points.iter().copied()),
            half + 1.0,
        )?;
        let (w, h) = ((x1 - x0) as usize, (y1 - y0) as usize);
        let mut data = vec![0.0f32; w * h];

        for (a, b) in lines.iter().flat_map(|l| l.segments()) {
            let sx0 = ((a.x.min(b.x) - half - 1.0).floor() as i32).max(x0);
            let sx1 = ((a.x.max(b.x) + half + 1.0).ceil() as i32).min(x1);
            let sy0 = ((a.y.min(b.y) - half - 1.0).floor() as i32).max(y0);
            let sy1 = ((a.y.max(b.y) + half + 1.0).ceil() as i32).min(y1);
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let len_sq = dx * dx + dy * dy;
            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                    let t = if len_sq > 0.0 {
                        (((px - a.x) * dx + (py - a.y) * dy) / len_sq).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    let dist = (a.x + t * dx - px).hypot(a.y + t * dy - py);
                    let aa = (1.0 - (dist - half).clamp(0.0, 1.0)) as f32;
                    let idx = (y - y0) as usize * w + (x - x0) as usize;
                    if aa > data[idx] {
                        data[idx] = aa;
                    }
                }
            }
        }
        Some(Mask { x0, y0, w, h, data })
    }

    fn composite(&mut self, mask: &Mask, brush: &Brush) {
        let device_brush = brush.transformed(&self.state.transform);
        let solid = match device_brush {
            Brush::Solid(c) => Some(c),
            _ => None,
        };
        for row in 0..mask.h {
            for col in 0..mask.w {
                let coverage = mask.data[row * mask.w + col].min(1.0);
                if coverage <= MIN_ALPHA {
                    continue;
                }
                let (x, y) = (mask.x0 + col as i32, mask.y0 + row as i32);
                let alpha = coverage * self.clip_at(x, y);
                if alpha <= MIN_ALPHA {
                    continue;
                }
                let color = solid.unwrap_or_else(|| {
                    device_brush.color_at(Point::new(x as f64 + 0.5, y as f64 + 0.5))
                });
                set_pixel(self.frame, self.width, x as usize, y as usize, color, alpha * color.alpha());
            }
        }
    }

    fn draw_antialiased_pixel(&mut self, x: f64, y: f64, color: Color, alpha: f32) {
        let x_floor = x.floor() as i32;
        let y_floor = y.floor() as i32;
        let x_frac = x - x_floor as f64;
        let y_frac = y - y_floor as f64;

        // Distribute the sample across the 4 nearest pixels
        let samples = [
            (x_floor, y_floor, (1.0 - x_frac) * (1.0 - y_frac)),
            (x_floor + 1, y_floor, x_frac * (1.0 - y_frac)),
            (x_floor, y_floor + 1, (1.0 - x_frac) * y_frac),
            (x_floor + 1, y_floor + 1, x_frac * y_frac),
        ];

        for (px, py, weight) in samples {
            if px >= 0 && px < self.width as i32 && py >= 0 && py < self.height as i32 {
                let final_alpha = alpha * weight as f32 * self.clip_at(px, py);
                if final_alpha > 0.001 {
                    set_pixel(self.frame, self.width, px as usize, py as usize, color, final_alpha);
                }
            }
        }
    }
}

fn accumulate_span(row: &mut [f32], xa: f64, xb: f64, weight: f32) {
    let xa = xa.max(0.0);
    let xb = xb.min(row.len() as f64);
    if xb <= xa {
        return;
    }
    let ia = xa.floor() as usize;
    let ib = xb.floor() as usize;
    if ia == ib {
        row[ia] += (xb - xa) as f32 * weight;
        return;
    }
    row[ia] += (ia as f64 + 1.0 - xa) as f32 * weight;
    for cell in &mut row[ia + 1..ib] {
        *cell += weight;
    }
    if ib < row.len() {
        row[ib] += (xb - ib as f64) as f32 * weight;
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, color: Color, alpha: f32) {
    if x < width && y < frame.len() / (width * 4) {
        let idx = (y * width + x) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        let out = [
            (src[0] * a + frame[idx] as f32 * (1.0 - a)).round() as u8,
            (src[1] * a + frame[idx + 1] as f32 * (1.0 - a)).round() as u8,
            (src[2] * a + frame[idx + 2] as f32 * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}

impl Surface for Canvas<'_> {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => tracing::warn!("restore without matching save"),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f64) {
        self.state.transform = self.state.transform.rotate(radians);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self.state.transform.scale(sx, sy);
    }

    fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    fn fill(&mut self, path: &Path, brush: &Brush) {
        let lines = path.flatten(&self.state.transform);
        if let Some(mask) = self.fill_coverage(&lines) {
            self.composite(&mask, brush);
        }
    }

    fn stroke(&mut self, path: &Path, brush: &Brush, line_width: f64) {
        let lines = path.flatten(&self.state.transform);
        let device_width = line_width * self.state.transform.scale_factor();
        if let Some(mask) = self.stroke_coverage(&lines, device_width) {
            self.composite(&mask, brush);
        }
    }

    fn clip(&mut self, path: &Path) {
        let lines = path.flatten(&self.state.transform);
        let mask = self.fill_coverage(&lines).unwrap_or_else(Mask::empty);
        let clipped = match &self.state.clip {
            Some(current) => current.intersect(&mask),
            None => mask,
        };
        self.state.clip = Some(Rc::new(clipped));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle, color: Color) {
        let Some(font) = self.font else {
            return;
        };
        let transform = self.state.transform;
        let k = transform.scale_factor();
        let px = (style.size * k) as f32;
        if text.is_empty() || px < 1.0 {
            return;
        }
        let scale = Scale::uniform(px);
        let v_metrics = font.v_metrics(scale);
        let (glyphs, text_width) = lay_out(font, text, scale, style.family);
        let text_width = text_width as f64;

        let dx = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -text_width / 2.0,
            TextAlign::Right => -text_width,
        };
        let dy = match style.baseline {
            Baseline::Top => v_metrics.ascent,
            Baseline::Middle => (v_metrics.ascent + v_metrics.descent) / 2.0,
            Baseline::Alphabetic => 0.0,
            Baseline::Bottom => v_metrics.descent,
        } as f64;
        let passes: &[f64] = match style.weight {
            FontWeight::Regular => &[0.0],
            FontWeight::Bold => &[0.0, (px as f64 / 24.0).max(0.75)],
        };

        // Glyph pixels are laid out in device units; map them through the
        // rotation/mirror part of the transform only.
        let anchor = transform.apply(Point::new(x, y));
        let basis = transform.scale(1.0 / k, 1.0 / k);
        for &offset in passes {
            for glyph in &glyphs {
                let Some(bb) = glyph.pixel_bounding_box() else {
                    continue;
                };
                glyph.draw(|gx, gy, v| {
                    if v <= 0.001 {
                        return;
                    }
                    let local = Point::new(
                        bb.min.x as f64 + gx as f64 + 0.5 + dx + offset,
                        bb.min.y as f64 + gy as f64 + 0.5 + dy,
                    );
                    let d = basis.apply_vector(local);
                    self.draw_antialiased_pixel(
                        anchor.x + d.x - 0.5,
                        anchor.y + d.y - 0.5,
                        color,
                        v * color.alpha(),
                    );
                });
            }
        }
    }
}

/// Positions `text` on a baseline at the origin and returns its advance width.
fn lay_out(
    font: &Font<'static>,
    text: &str,
    scale: Scale,
    family: FontFamily,
) -> (Vec<PositionedGlyph<'static>>, f32) {
    match family {
        FontFamily::Proportional => {
            let glyphs: Vec<_> = font.layout(text, scale, point(0.0, 0.0)).collect();
            let width = glyphs
                .last()
                .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                .unwrap_or(0.0);
            (glyphs, width)
        }
        FontFamily::Monospace => {
            let advance = |c: char| font.glyph(c).scaled(scale).h_metrics().advance_width;
            let cell = ('0'..='9').map(advance).fold(0.0f32, f32::max);
            let glyphs = text
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    // centered in its cell
                    let inset = (cell - advance(c)) / 2.0;
                    font.glyph(c)
                        .scaled(scale)
                        .positioned(point(i as f32 * cell + inset, 0.0))
                })
                .collect();
            (glyphs, cell * text.chars().count() as f32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::load_font;
    use crate::surface::scoped;

    fn buffer(w: usize, h: usize) -> Vec<u8> {
        vec![0u8; w * h * 4]
    }

    #[test]
    fn filled_rect_covers_interior_only() {
        let mut frame = buffer(20, 20);
        let mut canvas = Canvas::new(&mut frame, 20, 20);
        canvas.fill(&Path::rect(5.0, 5.0, 10.0, 10.0), &Color::new(255, 0, 0).into());
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(15, 15), Some([0, 0, 0, 0]));
    }

    #[test]
    fn clip_limits_fill_and_is_undone_by_restore() {
        let mut frame = buffer(20, 20);
        let mut canvas = Canvas::new(&mut frame, 20, 20);
        let white: Brush = Color::new(255, 255, 255).into();
        scoped(&mut canvas, |s| {
            s.clip(&Path::rect(0.0, 0.0, 10.0, 20.0));
            s.fill(&Path::rect(0.0, 0.0, 20.0, 20.0), &white);
        });
        assert_eq!(canvas.pixel(4, 4).map(|p| p[0]), Some(255));
        assert_eq!(canvas.pixel(15, 4).map(|p| p[0]), Some(0));

        canvas.fill(&Path::rect(10.0, 0.0, 10.0, 20.0), &white);
        assert_eq!(canvas.pixel(15, 4).map(|p| p[0]), Some(255));
    }

    #[test]
    fn stroke_follows_transform() {
        let mut frame = buffer(40, 40);
        let mut canvas = Canvas::new(&mut frame, 40, 40);
        canvas.translate(20.0, 20.0);
        canvas.rotate(std::f64::consts::FRAC_PI_2);
        let path = Path::new().move_to(0.0, 0.0).line_to(10.0, 0.0);
        canvas.stroke(&path, &Color::new(0, 255, 0).into(), 2.0);
        // Rotated a quarter turn clockwise, the segment now points down.
        assert_eq!(canvas.pixel(20, 25).map(|p| p[1]), Some(255));
        assert_eq!(canvas.pixel(25, 20).map(|p| p[1]), Some(0));
    }

    #[test]
    fn nonzero_winding_fills_overlapping_circles() {
        let mut frame = buffer(40, 40);
        let mut canvas = Canvas::new(&mut frame, 40, 40);
        let mut path = Path::circle(15.0, 20.0, 8.0);
        for op in Path::circle(25.0, 20.0, 8.0).ops() {
            path = match op {
                crate::surface::PathOp::MoveTo(p) => path.move_to(p.x, p.y),
                crate::surface::PathOp::LineTo(p) => path.line_to(p.x, p.y),
                crate::surface::PathOp::Arc { center, radius, start, end, .. } => {
                    path.arc(center.x, center.y, *radius, *start, *end)
                }
                crate::surface::PathOp::Close => path.close(),
            };
        }
        canvas.fill(&path, &Color::new(0, 0, 255).into());
        assert_eq!(canvas.pixel(20, 20).map(|p| p[2]), Some(255));
    }

    #[test]
    fn unmatched_restore_keeps_current_state() {
        let mut frame = buffer(4, 4);
        let mut canvas = Canvas::new(&mut frame, 4, 4);
        canvas.translate(1.0, 2.0);
        canvas.restore();
        assert_eq!(canvas.transform().e, 1.0);
        assert_eq!(canvas.transform().f, 2.0);
    }

    #[test]
    fn text_without_font_is_a_no_op() {
        let mut frame = buffer(8, 8);
        let mut canvas = Canvas::new(&mut frame, 8, 8);
        canvas.fill_text("N", 4.0, 4.0, &TextStyle::centered(8.0), Color::new(255, 255, 255));
        assert!(frame.iter().all(|&b| b == 0));
    }

    #[test]
    fn monospaced_digits_share_one_cell() {
        // needs a system font; there is nothing to measure without one
        let Ok(Some(font)) = load_font(None) else {
            return;
        };
        let scale = Scale::uniform(24.0);
        let (ones, narrow) = lay_out(&font, "111.111", scale, FontFamily::Monospace);
        let (eights, wide) = lay_out(&font, "888.888", scale, FontFamily::Monospace);
        assert_eq!(narrow, wide);
        let cell = narrow / 7.0;
        for (one, eight) in ones.iter().zip(&eights) {
            let left = |g: &PositionedGlyph| g.position().x;
            let center = |g: &PositionedGlyph| {
                left(g) + g.unpositioned().h_metrics().advance_width / 2.0
            };
            assert!((center(one) - center(eight)).abs() < 1e-3);
            assert!(left(eight) >= 0.0 && left(eight) < narrow);
        }
        assert!(cell > 0.0);

        let (_, proportional) = lay_out(&font, "111.111", scale, FontFamily::Proportional);
        assert!(proportional <= narrow);
    }
}
