//! The drawing target abstraction.

use vitrine_core::{Point, Viewport};

use crate::color::Rgba;

/// An immediate-mode 2D raster target, y growing downward.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> Viewport;

    /// Resize the bitmap. Previous content is discarded.
    fn resize(&mut self, viewport: Viewport);

    /// Fill an axis-aligned rectangle, blending by the color's alpha.
    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Rgba);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Stroke a one-unit wide line segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba);
}
