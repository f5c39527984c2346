//! Core types shared by the vitrine crates.
//!
//! Besides plain value types (geometry, settings, page content) this crate
//! holds the host primitives the animated components are driven by: a
//! [`Scheduler`] for frame requests and repeating timers, and the
//! [`Debounce`] / [`Throttle`] rate limiters used on pointer and resize input.

mod content;
mod geometry;
mod rate;
mod schedule;
mod settings;

pub use content::{Section, Slide};
pub use geometry::{CELL_HEIGHT_UNITS, CELL_WIDTH_UNITS, Point, Viewport};
pub use rate::{Debounce, Throttle};
pub use schedule::{FrameId, Scheduler, TimerId};
pub use settings::{CarouselSettings, FieldKind, FieldSettings};
