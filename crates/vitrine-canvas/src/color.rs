//! Color utilities for canvas drawing.

use ratatui::style::Color;

/// Fill laid under everything, and tinted over each frame.
pub const BACKGROUND: Rgba = Rgba::rgb(8, 12, 28);

/// Particle and link color (brand gold).
pub const PARTICLE_COLOR: Rgba = Rgba::rgb(212, 175, 55);

/// Star color.
pub const STAR_COLOR: Rgba = Rgba::rgb(220, 225, 255);

/// An sRGB color with a straight alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a new alpha, clamped to the valid range.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: clamp_alpha(a),
            ..self
        }
    }

    /// Composite this color over an opaque `background`.
    pub fn over(self, background: Rgba) -> Rgba {
        let a = clamp_alpha(self.a);
        let mix = |fg: u8, bg: u8| (fg as f64 * a + bg as f64 * (1.0 - a)).round() as u8;
        Rgba::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }

    /// Terminal color, ignoring alpha.
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

fn clamp_alpha(a: f64) -> f64 {
    if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) }
}
