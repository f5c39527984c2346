//! Terminal surface drawn with Braille dots through ratatui's canvas widget.
//!
//! A terminal has no persistent bitmap, so the surface keeps the shapes drawn
//! so far together with their alpha. A translucent full-surface fill fades
//! every retained shape instead of painting over it, which gives the same
//! trailing look as a real canvas.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line, Painter, Shape},
    },
};
use vitrine_core::{Point, Viewport};

use crate::color::{BACKGROUND, Rgba};
use crate::surface::Surface;

/// Shapes fainter than this are dropped.
const MIN_VISIBLE_ALPHA: f64 = 0.03;

/// Upper bound on retained shapes; the oldest go first.
pub(crate) const MAX_RETAINED: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
enum Mark {
    Disc {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Segment {
        from: Point,
        to: Point,
        color: Rgba,
    },
}

impl Mark {
    fn color_mut(&mut self) -> &mut Rgba {
        match self {
            Mark::Disc { color, .. } | Mark::Segment { color, .. } => color,
        }
    }
}

/// Retained-mode [`Surface`] rendered as a ratatui widget.
#[derive(Debug, Clone)]
pub struct BrailleSurface {
    size: Viewport,
    background: Rgba,
    marks: Vec<Mark>,
}

impl Default for BrailleSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl BrailleSurface {
    pub fn new() -> Self {
        Self {
            size: Viewport::default(),
            background: BACKGROUND,
            marks: Vec::new(),
        }
    }

    /// Number of shapes still visible.
    pub fn retained(&self) -> usize {
        self.marks.len()
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    fn keep(&mut self, mark: Mark) {
        self.marks.push(mark);
        if self.marks.len() > MAX_RETAINED {
            let excess = self.marks.len() - MAX_RETAINED;
            self.marks.drain(..excess);
        }
    }
}

impl Surface for BrailleSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport;
        self.marks.clear();
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Rgba) {
        let covers_surface = origin.x <= 0.0
            && origin.y <= 0.0
            && origin.x + width >= self.size.width
            && origin.y + height >= self.size.height;
        // Partial fills have no use on a Braille grid
        if !covers_surface {
            return;
        }
        self.background = color.over(self.background);
        if color.a >= 1.0 {
            self.marks.clear();
            return;
        }
        let keep = 1.0 - color.a;
        for mark in &mut self.marks {
            let c = mark.color_mut();
            c.a *= keep;
        }
        self.marks.retain_mut(|m| m.color_mut().a >= MIN_VISIBLE_ALPHA);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        if color.a >= MIN_VISIBLE_ALPHA {
            self.keep(Mark::Disc {
                center,
                radius,
                color,
            });
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba) {
        if color.a >= MIN_VISIBLE_ALPHA {
            self.keep(Mark::Segment { from, to, color });
        }
    }
}

/// Filled disc sampled at one-unit steps.
struct Disc {
    x: f64,
    y: f64,
    radius: f64,
    color: ratatui::style::Color,
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter) {
        let r = self.radius.max(0.5);
        let steps = r.ceil() as i32;
        for i in -steps..=steps {
            for j in -steps..=steps {
                let (dx, dy) = (i as f64, j as f64);
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                if let Some((px, py)) = painter.get_point(self.x + dx, self.y + dy) {
                    painter.paint(px, py, self.color);
                }
            }
        }
    }
}

impl BrailleSurface {
    /// Render with every shape moved up by `offset_y` units, wrapping at the
    /// surface edge.
    pub fn shifted(&self, offset_y: f64) -> Shifted<'_> {
        Shifted {
            surface: self,
            offset_y,
        }
    }
}

/// A [`BrailleSurface`] drawn with a vertical offset.
#[derive(Debug, Clone, Copy)]
pub struct Shifted<'a> {
    surface: &'a BrailleSurface,
    offset_y: f64,
}

impl Widget for &BrailleSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.shifted(0.0).render(area, buf);
    }
}

impl Widget for Shifted<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let surface = self.surface;
        let height = surface.size.height.max(1.0);
        let background = surface.background;
        // Distance to add to a y so it lands in [0, height) after the shift
        let wrap = |y: f64| (y - self.offset_y).rem_euclid(height) - y;
        // Canvas y grows upward
        let flip = |y: f64| height - y;
        Canvas::default()
            .background_color(background.to_color())
            .marker(Marker::Braille)
            .x_bounds([0.0, surface.size.width.max(1.0)])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for mark in &surface.marks {
                    match mark {
                        Mark::Disc {
                            center,
                            radius,
                            color,
                        } => ctx.draw(&Disc {
                            x: center.x,
                            y: flip(center.y + wrap(center.y)),
                            radius: *radius,
                            color: color.over(background).to_color(),
                        }),
                        Mark::Segment { from, to, color } => {
                            // Both ends move together so a link never spans the seam
                            let dy = wrap(from.y);
                            ctx.draw(&Line {
                                x1: from.x,
                                y1: flip(from.y + dy),
                                x2: to.x,
                                y2: flip(to.y + dy),
                                color: color.over(background).to_color(),
                            })
                        }
                    }
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PARTICLE_COLOR;

    fn surface() -> BrailleSurface {
        let mut s = BrailleSurface::new();
        s.resize(Viewport::new(160.0, 80.0));
        s
    }

    #[test]
    fn test_translucent_fill_fades_shapes() {
        let mut s = surface();
        s.fill_circle(Point::new(10.0, 10.0), 2.0, PARTICLE_COLOR.with_alpha(0.5));
        for _ in 0..3 {
            s.fill_rect(Point::default(), 160.0, 80.0, BACKGROUND.with_alpha(0.1));
        }
        assert_eq!(s.retained(), 1);
        // 0.5 * 0.9^30 < 0.03
        for _ in 0..27 {
            s.fill_rect(Point::default(), 160.0, 80.0, BACKGROUND.with_alpha(0.1));
        }
        assert_eq!(s.retained(), 0);
    }

    #[test]
    fn test_opaque_fill_clears() {
        let mut s = surface();
        s.stroke_line(Point::new(0.0, 0.0), Point::new(50.0, 50.0), PARTICLE_COLOR);
        s.fill_rect(Point::default(), 160.0, 80.0, Rgba::rgb(0, 0, 0));
        assert_eq!(s.retained(), 0);
        assert_eq!(s.background(), Rgba::rgb(0, 0, 0));
    }

    #[test]
    fn test_invisible_shapes_are_not_kept() {
        let mut s = surface();
        s.fill_circle(Point::new(1.0, 1.0), 1.0, PARTICLE_COLOR.with_alpha(0.0));
        s.stroke_line(Point::default(), Point::new(1.0, 1.0), PARTICLE_COLOR.with_alpha(0.01));
        assert_eq!(s.retained(), 0);
    }

    #[test]
    fn test_unfaded_shapes_are_capped() {
        let mut s = surface();
        for i in 0..MAX_RETAINED + 100 {
            s.fill_circle(Point::new(i as f64 % 160.0, 5.0), 1.0, PARTICLE_COLOR);
        }
        assert_eq!(s.retained(), MAX_RETAINED);
        // The oldest were dropped
        assert_eq!(
            s.marks[0],
            Mark::Disc {
                center: Point::new(100.0, 5.0),
                radius: 1.0,
                color: PARTICLE_COLOR,
            }
        );
    }

    #[test]
    fn test_render_paints_braille() {
        let mut s = surface();
        s.fill_circle(Point::new(80.0, 40.0), 3.0, PARTICLE_COLOR);
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        (&s).render(area, &mut buf);
        let painted = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " " && cell.symbol() != "\u{2800}")
            .count();
        assert!(painted > 0);
    }

    fn painted_rows(buf: &Buffer) -> Vec<u16> {
        let area = buf.area;
        (area.top()..area.bottom())
            .filter(|&y| {
                (area.left()..area.right()).any(|x| {
                    let symbol = buf[(x, y)].symbol();
                    symbol != " " && symbol != "\u{2800}"
                })
            })
            .collect()
    }

    #[test]
    fn test_shifted_render_wraps_vertically() {
        let mut s = surface();
        s.fill_circle(Point::new(80.0, 10.0), 3.0, PARTICLE_COLOR);
        let area = Rect::new(0, 0, 20, 5);

        let mut buf = Buffer::empty(area);
        (&s).render(area, &mut buf);
        assert_eq!(painted_rows(&buf), vec![0]);

        // 10 - 20 wraps round to 70, the bottom row
        let mut buf = Buffer::empty(area);
        s.shifted(20.0).render(area, &mut buf);
        assert_eq!(painted_rows(&buf), vec![4]);

        // A whole surface height is a no-op
        let mut buf = Buffer::empty(area);
        s.shifted(80.0).render(area, &mut buf);
        assert_eq!(painted_rows(&buf), vec![0]);
    }
}
