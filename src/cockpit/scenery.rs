//! Panel backdrop: the windshield with sky and drifting clouds.

use crate::color::{self, Color};
use crate::geometry::Point;
use crate::surface::{scoped, stop, Brush, Path, Surface};

/// Inset of the windshield from the canvas edge.
pub const MARGIN: f64 = 10.0;
const FRAME_WIDTH: f64 = 5.0;

/// `(phase, speed px per time unit, y, size)` of each cloud track.
const CLOUD_TRACKS: [(f64, f64, f64, f64); 5] = [
    (0.0, 50.0, 50.0, 60.0),
    (2.0, 30.0, 120.0, 40.0),
    (4.0, 40.0, 80.0, 50.0),
    (6.0, 20.0, 150.0, 45.0),
    (8.0, 35.0, 100.0, 55.0),
];

/// Offsets and radii of a cloud's puffs, as fractions of its size.
const PUFFS: [(f64, f64, f64); 5] = [
    (0.0, 0.0, 0.4),
    (0.3, -0.1, 0.4),
    (0.5, 0.1, 0.3),
    (0.3, 0.2, 0.3),
    (0.1, 0.15, 0.35),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    /// Horizontal position inside the windshield, in `[0, width)`.
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Clouds at `clock_ms`; one time unit is five seconds.
pub fn clouds_at(clock_ms: f64, width: f64) -> Vec<Cloud> {
    let t = clock_ms / 5000.0;
    CLOUD_TRACKS
        .iter()
        .map(|&(phase, speed, y, size)| Cloud {
            x: ((t + phase) * speed).rem_euclid(width.max(1.0)),
            y,
            size,
        })
        .collect()
}

/// Where to draw the second copy of a cloud running off the right edge.
pub fn wrapped_copy_x(cloud: &Cloud, width: f64) -> Option<f64> {
    let span = width - 2.0 * MARGIN;
    (cloud.x + cloud.size > span).then(|| cloud.x - span)
}

pub fn windshield_height(height: f64) -> f64 {
    height * 0.6 - 2.0 * MARGIN
}

fn windshield(width: f64, height: f64) -> Path {
    let h = windshield_height(height);
    Path::new()
        .move_to(MARGIN + 100.0, MARGIN + 20.0)
        .line_to(width - MARGIN - 100.0, MARGIN + 20.0)
        .line_to(width - MARGIN - 20.0, MARGIN + h * 0.3)
        .line_to(width - MARGIN - 20.0, h)
        .line_to(MARGIN + 20.0, h)
        .line_to(MARGIN + 20.0, MARGIN + h * 0.3)
        .close()
}

fn draw_cloud(surface: &mut dyn Surface, x: f64, y: f64, size: f64) {
    let puffs = |dx: f64, dy: f64| {
        PUFFS.iter().fold(Path::new(), |path, &(ox, oy, r)| {
            let (cx, cy, r) = (x + dx + ox * size, y + dy + oy * size, r * size);
            path.move_to(cx + r, cy).arc(cx, cy, r, 0.0, std::f64::consts::TAU).close()
        })
    };
    surface.fill(&puffs(2.0, 2.0), &Color::white(0.6).into());
    surface.fill(&puffs(0.0, 0.0), &Color::white(0.8).into());
}

/// Instrument panel fill plus the windshield view, drawn before any gauge.
pub fn draw_background(surface: &mut dyn Surface, width: f64, height: f64, clock_ms: f64) {
    surface.fill(&Path::rect(0.0, 0.0, width, height), &color::CASE.into());

    let glass = windshield(width, height);
    let h = windshield_height(height);
    scoped(surface, |s| {
        s.clip(&glass);
        let sky = Brush::Linear {
            from: Point::new(0.0, MARGIN),
            to: Point::new(0.0, h),
            stops: vec![
                stop(0.0, Color::new(0x34, 0x98, 0xdb)),
                stop(1.0, Color::new(0x87, 0xce, 0xeb)),
            ],
        };
        s.fill(&Path::rect(0.0, 0.0, width, h + MARGIN), &sky);

        for cloud in clouds_at(clock_ms, width) {
            draw_cloud(s, cloud.x + MARGIN, cloud.y + MARGIN, cloud.size);
            if let Some(x) = wrapped_copy_x(&cloud, width) {
                draw_cloud(s, x, cloud.y + MARGIN, cloud.size);
            }
        }

        let reflection = Brush::Linear {
            from: Point::new(0.0, MARGIN),
            to: Point::new(0.0, h),
            stops: vec![
                stop(0.0, Color::white(0.1)),
                stop(0.5, Color::white(0.05)),
                stop(1.0, Color::white(0.0)),
            ],
        };
        s.fill(&Path::rect(0.0, 0.0, width, h + MARGIN), &reflection);
    });

    surface.stroke(&glass, &Color::new(0x15, 0x15, 0x15).into(), FRAME_WIDTH + 4.0);
    surface.stroke(&glass, &Color::new(0x30, 0x30, 0x30).into(), FRAME_WIDTH + 2.0);
    surface.stroke(&glass, &color::BEZEL.into(), 2.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    #[test]
    fn clouds_drift_with_the_clock() {
        let a = clouds_at(0.0, 1200.0);
        let b = clouds_at(5000.0, 1200.0);
        assert_eq!(a[0].x, 0.0);
        assert_eq!(b[0].x, 50.0);
        assert_eq!(b[1].x, 90.0);
    }

    #[test]
    fn positions_wrap_to_the_canvas_width() {
        for cloud in clouds_at(987_654_321.0, 1200.0) {
            assert!((0.0..1200.0).contains(&cloud.x));
        }
    }

    #[test]
    fn cloud_near_right_edge_gets_a_copy() {
        let width = 1200.0;
        let cloud = Cloud {
            x: width - 5.0,
            y: 50.0,
            size: 60.0,
        };
        assert_eq!(wrapped_copy_x(&cloud, width), Some(width - 5.0 - (width - 20.0)));

        let inside = Cloud { x: 100.0, ..cloud };
        assert_eq!(wrapped_copy_x(&inside, width), None);
    }

    #[test]
    fn background_leaves_state_balanced() {
        let mut scene = Scene::new(1200.0, 800.0);
        draw_background(&mut scene, 1200.0, 800.0, 12_345.0);
        assert!(scene.is_balanced());
    }
}
