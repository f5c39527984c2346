//! Animated canvas backgrounds for the vitrine showcase.
//!
//! An [`Animator`] owns a field of point entities (drifting particles or
//! twinkling stars) and repaints them onto any [`Surface`] once per frame.
//! [`BrailleSurface`] is the terminal implementation, drawn with ratatui's
//! canvas widget.

mod animator;
mod braille;
mod color;
mod entity;
mod surface;

pub use animator::{Animator, MIN_TRAIL_ALPHA};
pub use braille::{BrailleSurface, Shifted};
pub use color::{BACKGROUND, PARTICLE_COLOR, Rgba, STAR_COLOR};
pub use entity::{Entity, entity_count, generate};
pub use surface::Surface;
