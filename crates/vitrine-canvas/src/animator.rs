//! Canvas animator: owns a field of entities and repaints it every frame.

use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;
use vitrine_core::{
    Debounce, FieldKind, FieldSettings, FrameId, Point, Scheduler, Throttle, Viewport,
};

use crate::color::{BACKGROUND, PARTICLE_COLOR, STAR_COLOR};
use crate::entity::{self, Entity};
use crate::surface::Surface;

/// Peak alpha of a link line between two touching particles.
const LINK_ALPHA: f64 = 0.3;

/// Lowest trail fade accepted. Anything fainter never lets old frames go.
pub const MIN_TRAIL_ALPHA: f64 = 0.05;

/// Animated entity field bound to an optional drawing surface.
///
/// Without a surface the animator is inert for its whole lifetime: it never
/// requests a frame and every operation is a no-op.
#[derive(Debug)]
pub struct Animator<S> {
    settings: FieldSettings,
    surface: Option<S>,
    entities: Vec<Entity>,
    /// Last known pointer position.
    pointer: Option<Point>,
    /// Whether the host is foregrounded; gates the update step.
    visible: bool,
    /// Outstanding frame request, if running.
    frame: Option<FrameId>,
    pending_resize: Debounce<Viewport>,
    pointer_throttle: Throttle,
    rng: StdRng,
}

impl<S: Surface> Animator<S> {
    /// Bind to `surface`, size it to `viewport` and populate the field.
    pub fn new(
        mut settings: FieldSettings,
        surface: Option<S>,
        viewport: Viewport,
        seed: u64,
    ) -> Self {
        settings.trail_alpha = settings.trail_alpha.max(MIN_TRAIL_ALPHA).min(1.0);
        let mut animator = Self {
            pending_resize: Debounce::new(settings.resize_debounce_ms),
            pointer_throttle: Throttle::new(settings.pointer_throttle_ms),
            settings,
            surface,
            entities: Vec::new(),
            pointer: None,
            visible: true,
            frame: None,
            rng: StdRng::seed_from_u64(seed),
        };
        if animator.surface.is_none() {
            debug!("no drawing surface; field animator stays inert");
        } else {
            animator.resize(viewport);
        }
        animator
    }

    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    /// Whether a frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    pub fn kind(&self) -> FieldKind {
        self.settings.kind
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Begin the frame loop. No-op when inert or already running.
    pub fn start(&mut self, scheduler: &mut Scheduler) {
        if self.is_inert() || self.is_running() {
            return;
        }
        self.frame = Some(scheduler.request_frame());
        debug!(kind = self.settings.kind.name(), "field animator started");
    }

    /// Cancel the outstanding frame request.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.frame.take() {
            scheduler.cancel_frame(id);
            debug!(kind = self.settings.kind.name(), "field animator stopped");
        }
    }

    /// Run one frame if `id` is this animator's pending request, then re-arm.
    ///
    /// Returns false for foreign or stale ids.
    pub fn on_frame(&mut self, id: FrameId, scheduler: &mut Scheduler, now_ms: u64) -> bool {
        if self.frame != Some(id) {
            return false;
        }
        if let Some(viewport) = self.pending_resize.poll(now_ms) {
            self.resize(viewport);
        }
        self.tick();
        self.frame = Some(scheduler.request_frame());
        true
    }

    /// Resize the surface to `viewport` and regenerate the whole field.
    pub fn resize(&mut self, viewport: Viewport) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.resize(viewport);
        self.entities = entity::generate(viewport, &self.settings, &mut self.rng);
        debug!(
            width = viewport.width,
            height = viewport.height,
            entities = self.entities.len(),
            "field regenerated"
        );
    }

    /// Debounced resize; applied on the first frame after the delay.
    pub fn on_resize(&mut self, viewport: Viewport, now_ms: u64) {
        if !self.is_inert() {
            self.pending_resize.trigger(now_ms, viewport);
        }
    }

    /// Throttled pointer tracking.
    pub fn on_pointer_move(&mut self, point: Point, now_ms: u64) {
        if self.pointer_throttle.ready(now_ms) {
            self.pointer = Some(point);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    /// Pause or resume entity updates; drawing continues either way.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// One frame: update (when visible), then repaint.
    pub fn tick(&mut self) {
        if self.is_inert() {
            return;
        }
        if self.visible {
            self.update();
        }
        self.draw();
    }

    fn update(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let bounds = surface.size();
        for entity in &mut self.entities {
            entity.update(bounds, &self.settings, self.pointer);
        }
    }

    fn draw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let size = surface.size();
        surface.fill_rect(
            Point::default(),
            size.width,
            size.height,
            BACKGROUND.with_alpha(self.settings.trail_alpha),
        );

        let color = match self.settings.kind {
            FieldKind::Particles => PARTICLE_COLOR,
            FieldKind::Starfield => STAR_COLOR,
        };

        if self.settings.kind == FieldKind::Particles && self.settings.link_distance > 0.0 {
            let threshold = self.settings.link_distance;
            // Even indices against later even indices only
            for i in (0..self.entities.len()).step_by(2) {
                for j in (i + 2..self.entities.len()).step_by(2) {
                    let a = self.entities[i].position;
                    let b = self.entities[j].position;
                    let distance = a.distance(b);
                    if distance < threshold {
                        let alpha = (1.0 - distance / threshold) * LINK_ALPHA;
                        surface.stroke_line(a, b, color.with_alpha(alpha));
                    }
                }
            }
        }

        for entity in &self.entities {
            surface.fill_circle(entity.position, entity.radius, color.with_alpha(entity.opacity));
        }
    }
}
