//! Auto-advancing carousel.
//!
//! The carousel is a cursor over a fixed list of slides. A repeating timer,
//! owned through a [`TimerId`] from the host [`Scheduler`], advances it;
//! pointer hover pauses auto-play and manual navigation jumps the cursor.

use tracing::{debug, trace};
use vitrine_core::{CarouselSettings, Scheduler, Slide, TimerId};

/// Cyclic slide cursor with an optional auto-play timer.
#[derive(Debug)]
pub struct Carousel {
    slides: Vec<Slide>,
    settings: CarouselSettings,
    /// Index of the active slide.
    cursor: usize,
    /// Live auto-play timer, if armed.
    timer: Option<TimerId>,
}

impl Carousel {
    /// Build a carousel over `slides`; with no slides it is inert.
    pub fn new(slides: Vec<Slide>, settings: CarouselSettings) -> Self {
        if slides.is_empty() {
            debug!("no slides; carousel stays inert");
        }
        Self {
            slides,
            settings,
            cursor: 0,
            timer: None,
        }
    }

    pub fn is_inert(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.slides.get(self.cursor)
    }

    /// Whether slide (and indicator) `index` is the active one.
    pub fn is_active(&self, index: usize) -> bool {
        !self.is_inert() && index == self.cursor
    }

    pub fn is_auto_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// Move the active mark to `index`. Out-of-range indices are ignored.
    pub fn go_to_slide(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.cursor = index;
        trace!(index, "carousel slide changed");
        true
    }

    pub fn next_slide(&mut self) -> bool {
        if self.is_inert() {
            return false;
        }
        self.go_to_slide((self.cursor + 1) % self.slides.len())
    }

    pub fn prev_slide(&mut self) -> bool {
        if self.is_inert() {
            return false;
        }
        let len = self.slides.len();
        self.go_to_slide((self.cursor + len - 1) % len)
    }

    /// Arm the auto-play timer, replacing any live one.
    pub fn start_auto_play(&mut self, scheduler: &mut Scheduler, now_ms: u64) {
        if self.is_inert() {
            return;
        }
        self.stop_auto_play(scheduler);
        self.timer = Some(scheduler.set_interval(self.settings.interval_ms, now_ms));
        debug!(interval_ms = self.settings.interval_ms, "carousel auto-play armed");
    }

    /// Cancel the auto-play timer. Safe to call repeatedly.
    pub fn stop_auto_play(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            scheduler.clear_interval(id);
            debug!("carousel auto-play cancelled");
        }
    }

    /// Advance for a fired timer. Returns false for foreign or stale ids.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.next_slide()
    }

    pub fn on_pointer_enter(&mut self, scheduler: &mut Scheduler) {
        self.stop_auto_play(scheduler);
    }

    pub fn on_pointer_leave(&mut self, scheduler: &mut Scheduler, now_ms: u64) {
        self.start_auto_play(scheduler, now_ms);
    }

    /// Jump to the slide whose indicator was clicked.
    pub fn on_indicator_click(&mut self, index: usize, scheduler: &mut Scheduler, now_ms: u64) {
        if self.go_to_slide(index) {
            self.after_manual_jump(scheduler, now_ms);
        }
    }

    pub fn on_next_control(&mut self, scheduler: &mut Scheduler, now_ms: u64) {
        if self.next_slide() {
            self.after_manual_jump(scheduler, now_ms);
        }
    }

    pub fn on_prev_control(&mut self, scheduler: &mut Scheduler, now_ms: u64) {
        if self.prev_slide() {
            self.after_manual_jump(scheduler, now_ms);
        }
    }

    fn after_manual_jump(&mut self, scheduler: &mut Scheduler, now_ms: u64) {
        // Only restart a running timer; a paused carousel stays paused
        if self.settings.reset_on_manual_jump && self.is_auto_playing() {
            self.start_auto_play(scheduler, now_ms);
        }
    }
}
