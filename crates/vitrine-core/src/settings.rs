//! Tunables for the animated components.

use serde::{Deserialize, Serialize};

/// Which entity field the canvas animator renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Drifting particles joined by proximity lines.
    #[default]
    Particles,
    /// Fixed, twinkling stars.
    Starfield,
}

impl FieldKind {
    /// Switch to the other field kind.
    pub fn toggle(self) -> Self {
        match self {
            FieldKind::Particles => FieldKind::Starfield,
            FieldKind::Starfield => FieldKind::Particles,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Particles => "particles",
            FieldKind::Starfield => "starfield",
        }
    }
}

/// Canvas animator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    pub kind: FieldKind,
    /// Surface area (units²) per entity.
    pub density: f64,
    /// Upper bound on the entity count, whatever the surface area.
    pub max_entities: usize,
    /// Largest initial speed per axis, in units per tick.
    pub max_speed: f64,
    /// Multiplier applied to velocity every tick, below 1.
    pub damping: f64,
    /// Amplitude of the sinusoidal opacity term.
    pub oscillation: f64,
    /// Entities closer than this are joined by a line; 0 disables links.
    pub link_distance: f64,
    /// Alpha of the full-surface fill laid down each frame.
    pub trail_alpha: f64,
    /// Reach of the pointer push; 0 disables it.
    pub pointer_radius: f64,
    /// Velocity added at zero distance from the pointer.
    pub pointer_force: f64,
    pub resize_debounce_ms: u64,
    pub pointer_throttle_ms: u64,
}

impl FieldSettings {
    pub fn particles() -> Self {
        Self {
            kind: FieldKind::Particles,
            density: 15_000.0,
            max_entities: 30,
            max_speed: 0.5,
            damping: 0.99,
            oscillation: 0.2,
            link_distance: 100.0,
            trail_alpha: 0.1,
            pointer_radius: 80.0,
            pointer_force: 0.6,
            resize_debounce_ms: 250,
            pointer_throttle_ms: 16,
        }
    }

    pub fn starfield() -> Self {
        Self {
            kind: FieldKind::Starfield,
            density: 10_000.0,
            max_entities: 50,
            max_speed: 0.0,
            damping: 1.0,
            oscillation: 0.5,
            link_distance: 0.0,
            trail_alpha: 0.2,
            pointer_radius: 0.0,
            pointer_force: 0.0,
            resize_debounce_ms: 250,
            pointer_throttle_ms: 16,
        }
    }

    /// Defaults for the given kind.
    pub fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Particles => Self::particles(),
            FieldKind::Starfield => Self::starfield(),
        }
    }
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self::particles()
    }
}

/// Carousel auto-play settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    /// Delay between automatic advances.
    pub interval_ms: u64,
    /// Restart the auto-play timer after manual navigation.
    pub reset_on_manual_jump: bool,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            reset_on_manual_jump: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_toggle() {
        assert_eq!(FieldKind::Particles.toggle(), FieldKind::Starfield);
        assert_eq!(FieldKind::Starfield.toggle(), FieldKind::Particles);
    }

    #[test]
    fn test_kind_defaults() {
        let particles = FieldSettings::for_kind(FieldKind::Particles);
        assert_eq!(particles.max_entities, 30);
        assert!(particles.damping < 1.0);
        let stars = FieldSettings::for_kind(FieldKind::Starfield);
        assert_eq!(stars.max_entities, 50);
        assert_eq!(stars.link_distance, 0.0);
    }
}
