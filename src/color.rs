// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Straight-alpha RGBA color used by every brush and text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// White with the given opacity in `0.0..=1.0`.
    pub fn white(alpha: f64) -> Self {
        Self::new(0xff, 0xff, 0xff).with_alpha(alpha)
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn alpha(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Component-wise interpolation, `t` in `0.0..=1.0`.
    pub fn mix(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: lerp(self.a, other.a),
        }
    }
}

// Panel palette
pub const CASE: Color = Color::new(0x2a, 0x2a, 0x2a);
pub const FACE: Color = Color::new(0x20, 0x20, 0x20);
pub const MARKINGS: Color = Color::new(0xff, 0xff, 0xff);
pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
pub const RED: Color = Color::new(0xff, 0x00, 0x00);
pub const GREEN: Color = Color::new(0x00, 0xff, 0x00);
pub const YELLOW: Color = Color::new(0xff, 0xff, 0x00);
pub const SKY: Color = Color::new(0x7e, 0xc0, 0xee);
pub const GROUND: Color = Color::new(0x8b, 0x45, 0x13);
pub const HOUSING_EDGE: Color = Color::new(0x40, 0x40, 0x40);
pub const BEZEL: Color = Color::new(0x50, 0x50, 0x50);
