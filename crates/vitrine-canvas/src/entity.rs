//! Point entities and their per-tick physics.

use std::f64::consts::TAU;

use rand::Rng;
use vitrine_core::{FieldKind, FieldSettings, Point, Viewport};

/// A particle or a star.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub position: Point,
    /// Units per tick; always zero for stars.
    pub velocity: Point,
    pub radius: f64,
    pub base_opacity: f64,
    /// Oscillation phase in radians, kept in `0..TAU`.
    pub phase: f64,
    /// Phase advance per tick.
    pub phase_speed: f64,
    /// Opacity for the next draw, always in `0.0..=1.0`.
    pub opacity: f64,
}

/// Number of entities for a surface: `min(cap, floor(area / density))`.
pub fn entity_count(viewport: Viewport, settings: &FieldSettings) -> usize {
    if viewport.is_empty() || settings.density <= 0.0 {
        return 0;
    }
    // Float-to-int casts saturate, so an infinite area still lands on the cap.
    let by_area = (viewport.area() / settings.density).floor() as usize;
    by_area.min(settings.max_entities)
}

/// Build a fresh field sized for `viewport`.
pub fn generate<R: Rng>(
    viewport: Viewport,
    settings: &FieldSettings,
    rng: &mut R,
) -> Vec<Entity> {
    (0..entity_count(viewport, settings))
        .map(|_| {
            let position = Point::new(
                rng.random::<f64>() * viewport.width,
                rng.random::<f64>() * viewport.height,
            );
            let (radius, base_opacity, phase_speed) = match settings.kind {
                FieldKind::Particles => (
                    between(rng, 1.0, 3.0),
                    between(rng, 0.2, 0.7),
                    between(rng, 0.02, 0.05),
                ),
                FieldKind::Starfield => (
                    between(rng, 0.5, 2.0),
                    between(rng, 0.3, 0.8),
                    between(rng, 0.01, 0.04),
                ),
            };
            let velocity = Point::new(
                between(rng, -settings.max_speed, settings.max_speed),
                between(rng, -settings.max_speed, settings.max_speed),
            );
            let phase = rng.random::<f64>() * TAU;
            let mut entity = Entity {
                position,
                velocity,
                radius,
                base_opacity,
                phase,
                phase_speed,
                opacity: base_opacity,
            };
            entity.refresh_opacity(settings.oscillation);
            entity
        })
        .collect()
}

fn between<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + rng.random::<f64>() * (high - low)
}

impl Entity {
    /// Advance one tick inside `bounds`, pushed away from `pointer` when close.
    pub fn update(&mut self, bounds: Viewport, settings: &FieldSettings, pointer: Option<Point>) {
        if let Some(pointer) = pointer
            && settings.pointer_radius > 0.0
        {
            let distance = self.position.distance(pointer);
            if distance > 0.0 && distance < settings.pointer_radius {
                let push = (1.0 - distance / settings.pointer_radius) * settings.pointer_force;
                self.velocity.x += (self.position.x - pointer.x) / distance * push;
                self.velocity.y += (self.position.y - pointer.y) / distance * push;
            }
        }

        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;

        // Reflect off the edges and clamp back inside
        if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > bounds.width {
            self.position.x = bounds.width;
            self.velocity.x = -self.velocity.x.abs();
        }
        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > bounds.height {
            self.position.y = bounds.height;
            self.velocity.y = -self.velocity.y.abs();
        }

        self.phase = (self.phase + self.phase_speed) % TAU;
        self.refresh_opacity(settings.oscillation);

        self.velocity.x *= settings.damping;
        self.velocity.y *= settings.damping;
    }

    fn refresh_opacity(&mut self, oscillation: f64) {
        self.opacity = (self.base_opacity + self.phase.sin() * oscillation).clamp(0.0, 1.0);
    }
}
