//! Scrollable page of sections with a scroll-spy navigation bar.
//!
//! Every section is one viewport tall, so section `i` starts at row
//! `i * viewport_rows`. A section fades in and rises into place the first
//! time a tenth of it is on screen.

use vitrine_core::Section;

/// Scroll offset past which the header switches to its solid style.
const SCROLLED_THRESHOLD_ROWS: u16 = 6;

/// A section becomes active this many rows before its top reaches the header.
const SPY_MARGIN_ROWS: u16 = 6;

/// Share of a section that must be on screen before it reveals.
const REVEAL_THRESHOLD: f64 = 0.1;

const REVEAL_DURATION_MS: u64 = 600;

/// Rows a section's text rises while revealing.
const REVEAL_RISE_ROWS: f64 = 2.0;

/// Background rows moved per row scrolled.
const PARALLAX_FACTOR: f64 = 0.5;

/// Sections, scroll position and menu state.
#[derive(Debug)]
pub struct Page {
    sections: Vec<Section>,
    /// First visible row.
    scroll: u16,
    /// Where an in-progress smooth scroll is heading.
    scroll_target: Option<u16>,
    /// Height of the content area in rows.
    viewport_rows: u16,
    /// Whether the collapsed navigation menu is expanded.
    menu_open: bool,
    /// When each section started revealing.
    revealed_at: Vec<Option<u64>>,
}

impl Page {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            revealed_at: vec![None; sections.len()],
            sections,
            scroll: 0,
            scroll_target: None,
            viewport_rows: 1,
            menu_open: false,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn section_rows(&self) -> u16 {
        self.viewport_rows.max(1)
    }

    /// Top row of section `index`.
    pub fn section_top(&self, index: usize) -> u32 {
        index as u32 * u32::from(self.section_rows())
    }

    fn max_scroll(&self) -> u16 {
        let total = self.sections.len() as u32 * u32::from(self.section_rows());
        total
            .saturating_sub(u32::from(self.viewport_rows))
            .min(u32::from(u16::MAX)) as u16
    }

    /// Update the content height, keeping the scroll offset in range.
    pub fn set_viewport_rows(&mut self, rows: u16) {
        if rows == self.viewport_rows {
            return;
        }
        self.viewport_rows = rows.max(1);
        self.scroll = self.scroll.min(self.max_scroll());
        self.scroll_target = self.scroll_target.map(|t| t.min(self.max_scroll()));
    }

    /// Scroll immediately by `delta` rows, cancelling any smooth scroll.
    pub fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = next as u16;
        self.scroll_target = None;
    }

    /// Whether the page has scrolled far enough to restyle the header.
    pub fn is_scrolled(&self) -> bool {
        self.scroll > SCROLLED_THRESHOLD_ROWS
    }

    /// Index of the section whose navigation link is highlighted.
    ///
    /// The last section whose top, less the spy margin, has been reached;
    /// the first section when none has.
    pub fn active_section(&self) -> usize {
        let scroll = u32::from(self.scroll);
        (0..self.sections.len())
            .rev()
            .find(|&i| scroll >= self.section_top(i).saturating_sub(u32::from(SPY_MARGIN_ROWS)))
            .unwrap_or(0)
    }

    /// Start a smooth scroll to section `index` and close the menu.
    pub fn navigate_to(&mut self, index: usize) -> bool {
        if index >= self.sections.len() {
            return false;
        }
        let top = self.section_top(index).min(u32::from(self.max_scroll())) as u16;
        self.scroll_target = Some(top);
        self.menu_open = false;
        true
    }

    /// Navigate to the section with anchor `id`.
    pub fn navigate_to_anchor(&mut self, id: &str) -> bool {
        match self.sections.iter().position(|s| s.id == id) {
            Some(index) => self.navigate_to(index),
            None => false,
        }
    }

    /// Move one step of an in-progress smooth scroll, easing out.
    pub fn advance_scroll(&mut self) {
        let Some(target) = self.scroll_target else {
            return;
        };
        let distance = i32::from(target) - i32::from(self.scroll);
        if distance == 0 {
            self.scroll_target = None;
            return;
        }
        let step = (distance.abs() / 4).max(1) * distance.signum();
        self.scroll = (i32::from(self.scroll) + step) as u16;
        if self.scroll == target {
            self.scroll_target = None;
        }
    }

    /// Rows of section `index` inside the viewport.
    fn visible_rows(&self, index: usize) -> u32 {
        let top = self.section_top(index);
        let bottom = top + u32::from(self.section_rows());
        let view_top = u32::from(self.scroll);
        let view_bottom = view_top + u32::from(self.viewport_rows);
        bottom.min(view_bottom).saturating_sub(top.max(view_top))
    }

    /// Start the reveal of every section that has just come into view.
    pub fn update_reveals(&mut self, now_ms: u64) {
        let needed = f64::from(self.section_rows()) * REVEAL_THRESHOLD;
        for index in 0..self.sections.len() {
            if self.revealed_at[index].is_none() && f64::from(self.visible_rows(index)) >= needed {
                self.revealed_at[index] = Some(now_ms);
            }
        }
    }

    /// Reveal progress of section `index`, from 0 (hidden) to 1 (settled).
    pub fn reveal_progress(&self, index: usize, now_ms: u64) -> f64 {
        match self.revealed_at.get(index).copied().flatten() {
            Some(start) => {
                (now_ms.saturating_sub(start) as f64 / REVEAL_DURATION_MS as f64).min(1.0)
            }
            None => 0.0,
        }
    }

    /// Rows section `index` still sits below its resting place.
    pub fn reveal_offset(&self, index: usize, now_ms: u64) -> u16 {
        ((1.0 - self.reveal_progress(index, now_ms)) * REVEAL_RISE_ROWS).round() as u16
    }

    /// How far the background trails the page, in rows.
    pub fn parallax_rows(&self) -> f64 {
        f64::from(self.scroll) * PARALLAX_FACTOR
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        let sections = ["home", "areas", "credentials", "contact"]
            .into_iter()
            .map(|id| Section::new(id, id.to_uppercase(), ""))
            .collect();
        let mut page = Page::new(sections);
        page.set_viewport_rows(20);
        page
    }

    fn settle(page: &mut Page) {
        for _ in 0..200 {
            page.advance_scroll();
        }
    }

    #[test]
    fn test_first_section_active_at_top() {
        let page = page();
        assert_eq!(page.active_section(), 0);
        assert!(!page.is_scrolled());
    }

    #[test]
    fn test_scroll_spy_uses_margin() {
        let mut page = page();
        page.scroll_by(13);
        assert_eq!(page.active_section(), 0);
        page.scroll_by(1);
        assert_eq!(page.active_section(), 1);
        page.scroll_by(20);
        assert_eq!(page.active_section(), 2);
    }

    #[test]
    fn test_header_restyles_past_threshold() {
        let mut page = page();
        page.scroll_by(6);
        assert!(!page.is_scrolled());
        page.scroll_by(1);
        assert!(page.is_scrolled());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut page = page();
        page.scroll_by(-5);
        assert_eq!(page.scroll(), 0);
        page.scroll_by(10_000);
        assert_eq!(page.scroll(), 60);
        assert_eq!(page.active_section(), 3);
    }

    #[test]
    fn test_navigate_scrolls_smoothly_and_closes_menu() {
        let mut page = page();
        page.toggle_menu();
        assert!(page.navigate_to_anchor("credentials"));
        assert!(!page.is_menu_open());
        page.advance_scroll();
        assert!(page.scroll() > 0 && page.scroll() < 40);
        settle(&mut page);
        assert_eq!(page.scroll(), 40);
        assert_eq!(page.active_section(), 2);

        page.navigate_to(0);
        settle(&mut page);
        assert_eq!(page.scroll(), 0);
    }

    #[test]
    fn test_unknown_anchor_is_ignored() {
        let mut page = page();
        assert!(!page.navigate_to_anchor("missing"));
        assert!(!page.navigate_to(9));
        settle(&mut page);
        assert_eq!(page.scroll(), 0);
    }

    #[test]
    fn test_manual_scroll_cancels_smooth_scroll() {
        let mut page = page();
        page.navigate_to(3);
        page.advance_scroll();
        page.scroll_by(-1);
        let held = page.scroll();
        settle(&mut page);
        assert_eq!(page.scroll(), held);
    }

    #[test]
    fn test_shrinking_viewport_keeps_scroll_in_range() {
        let mut page = page();
        page.scroll_by(60);
        page.set_viewport_rows(10);
        assert_eq!(page.scroll(), 30);
    }

    #[test]
    fn test_visible_section_reveals_on_first_update() {
        let mut page = page();
        assert_eq!(page.reveal_progress(0, 0), 0.0);
        page.update_reveals(100);
        assert_eq!(page.reveal_progress(0, 100), 0.0);
        assert_eq!(page.reveal_offset(0, 100), 2);
        assert_eq!(page.reveal_progress(1, 100), 0.0);

        assert_eq!(page.reveal_progress(0, 400), 0.5);
        assert_eq!(page.reveal_offset(0, 400), 1);
        assert_eq!(page.reveal_progress(0, 700), 1.0);
        assert_eq!(page.reveal_offset(0, 700), 0);
        assert_eq!(page.reveal_progress(0, 10_000), 1.0);
    }

    #[test]
    fn test_reveal_waits_for_a_tenth_in_view() {
        let mut page = page();
        page.update_reveals(0);
        // One row of twenty is not enough
        page.scroll_by(1);
        page.update_reveals(50);
        assert_eq!(page.reveal_progress(1, 1_000), 0.0);

        page.scroll_by(1);
        page.update_reveals(80);
        assert_eq!(page.reveal_progress(1, 80), 0.0);
        assert_eq!(page.reveal_progress(1, 380), 0.5);
        assert_eq!(page.reveal_progress(2, 1_000), 0.0);
    }

    #[test]
    fn test_reveal_runs_once() {
        let mut page = page();
        page.update_reveals(0);
        page.scroll_by(60);
        page.update_reveals(1_000);
        page.scroll_by(-60);
        page.update_reveals(2_000);
        // Section 0 kept its first start; scrolling back does not replay it
        assert_eq!(page.reveal_progress(0, 2_000), 1.0);
        assert_eq!(page.reveal_offset(0, 2_000), 0);
        assert_eq!(page.reveal_progress(3, 1_300), 0.5);
        // Section 1 and 2 were skipped over by the jump
        assert_eq!(page.reveal_progress(1, 2_000), 0.0);
    }

    #[test]
    fn test_background_trails_at_half_speed() {
        let mut page = page();
        assert_eq!(page.parallax_rows(), 0.0);
        page.scroll_by(15);
        assert_eq!(page.parallax_rows(), 7.5);
    }
}
