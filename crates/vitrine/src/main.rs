mod banner;
mod logging;
mod page;

use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::Utc;
use color_eyre::eyre::{Report, WrapErr};
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect, Size},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};
use tracing::{debug, info, warn};
use vitrine_canvas::{Animator, BACKGROUND, BrailleSurface, PARTICLE_COLOR, Rgba};
use vitrine_carousel::Carousel;
use vitrine_config::{Config, paths};
use vitrine_core::{CELL_HEIGHT_UNITS, FieldKind, Point, Scheduler, Viewport};

use crate::banner::AlertBanner;
use crate::page::Page;

/// Target delay between two frames (one display refresh).
const FRAME_INTERVAL_MS: u64 = 16;

/// Below this width the navigation collapses behind the menu toggle.
const NARROW_WIDTH: u16 = 70;

/// Height of the carousel panel, borders included.
const CAROUSEL_HEIGHT: u16 = 6;

const TEXT_COLOR: Rgba = Rgba::rgb(230, 232, 240);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let logged = paths::log_file()
        .map_err(Report::from)
        .and_then(|path| logging::init(&path));
    if let Err(err) = logged {
        eprintln!("vitrine: logging disabled: {err}");
    }
    info!("starting vitrine");
    let config = Config::load().wrap_err("failed to load configuration")?;

    let alert = AlertBanner::new(config.alert.clone(), paths::alert_state_file().ok());
    let terminal = ratatui::init();
    let result = run(terminal, config, alert);
    if let Err(err) = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange) {
        warn!(error = %err, "failed to reset terminal input modes");
    }
    ratatui::restore();
    result
}

fn run(
    mut terminal: DefaultTerminal,
    config: Config,
    alert: AlertBanner,
) -> color_eyre::Result<()> {
    execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)?;
    let size = terminal.size()?;
    App::new(config, alert, size).run(terminal)
}

/// Screen regions from the last render, for mouse hit-testing.
#[derive(Debug, Default)]
struct HitAreas {
    carousel: Rect,
    prev_control: Rect,
    next_control: Rect,
    indicators: Vec<Rect>,
    /// Navigation links and the section anchor each points at.
    nav_links: Vec<(Rect, String)>,
    menu_toggle: Rect,
    alert: Rect,
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Frame requests and timers for every component.
    scheduler: Scheduler,
    /// Background animation.
    field: Animator<BrailleSurface>,
    carousel: Carousel,
    page: Page,
    alert: AlertBanner,
    /// Full terminal area in surface units.
    viewport: Viewport,
    /// Host clock origin.
    started: Instant,
    /// Next time frame requests are served.
    next_frame_ms: u64,
    /// Whether the pointer was inside the carousel on the last move.
    pointer_over_carousel: bool,
    hits: HitAreas,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `size` cells.
    pub fn new(config: Config, alert: AlertBanner, size: Size) -> Self {
        let viewport = Viewport::from_cells(size.width, size.height);
        let field = build_field(&config, config.field.kind, viewport);
        let carousel = Carousel::new(config.carousel.slides.clone(), config.carousel_settings());
        let page = Page::new(config.sections.clone());
        Self {
            running: false,
            config,
            scheduler: Scheduler::new(),
            field,
            carousel,
            page,
            alert,
            viewport,
            started: Instant::now(),
            next_frame_ms: 0,
            pointer_over_carousel: false,
            hits: HitAreas::default(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.field.start(&mut self.scheduler);
        let now = self.now_ms();
        self.carousel.start_auto_play(&mut self.scheduler, now);

        while self.running {
            let now = self.now_ms();
            self.dispatch_timers(now);
            if now >= self.next_frame_ms {
                self.dispatch_frames(now);
                self.next_frame_ms = now + FRAME_INTERVAL_MS;
            }
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }

        self.field.stop(&mut self.scheduler);
        self.carousel.stop_auto_play(&mut self.scheduler);
        info!("vitrine stopped");
        Ok(())
    }

    /// Milliseconds since start-up.
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn dispatch_timers(&mut self, now: u64) {
        for id in self.scheduler.due_timers(now) {
            if !self.carousel.on_timer(id) {
                debug!(?id, "timer fired with no owner");
            }
        }
    }

    fn dispatch_frames(&mut self, now: u64) {
        for id in self.scheduler.take_frames() {
            if !self.field.on_frame(id, &mut self.scheduler, now) {
                debug!(?id, "frame fired with no owner");
            }
        }
        self.page.advance_scroll();
        self.page.update_reveals(now);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(surface) = self.field.surface() {
            let offset = self.page.parallax_rows() * CELL_HEIGHT_UNITS;
            frame.render_widget(surface.shifted(offset), area);
        }

        let alert_visible = self.alert.is_visible(Utc::now());
        let narrow = area.width < NARROW_WIDTH;
        let menu_rows = if narrow && self.page.is_menu_open() {
            self.page.sections().len() as u16
        } else {
            0
        };

        let chunks = Layout::vertical([
            Constraint::Length(1),                        // Header
            Constraint::Length(u16::from(alert_visible)), // Alert banner
            Constraint::Length(menu_rows),                // Expanded menu
            Constraint::Fill(1),                          // Sections
            Constraint::Length(CAROUSEL_HEIGHT),          // Carousel
            Constraint::Length(1),                        // Help text
        ])
        .split(area);

        self.hits = HitAreas::default();
        self.render_header(frame, chunks[0], narrow);
        if alert_visible {
            self.render_alert(frame, chunks[1]);
        }
        if menu_rows > 0 {
            self.render_menu(frame, chunks[2]);
        }
        self.render_sections(frame, chunks[3]);
        self.render_carousel(frame, chunks[4]);
        self.render_help(frame, chunks[5]);
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, narrow: bool) {
        let accent = PARTICLE_COLOR.to_color();
        let header_style = if self.page.is_scrolled() {
            Style::new().bg(Color::Rgb(16, 22, 44))
        } else {
            Style::new()
        };
        frame.render_widget(Block::new().style(header_style), area);

        let title = Span::from(format!(" {} ", self.config.title)).bold().fg(accent);
        let mut x = area.x + title.width() as u16 + 2;
        let mut spans = vec![title, Span::raw("  ")];

        if narrow {
            let toggle = Span::from(if self.page.is_menu_open() {
                "✕ menu"
            } else {
                "≡ menu"
            })
            .fg(accent);
            self.hits.menu_toggle = Rect::new(x, area.y, toggle.width() as u16, 1);
            spans.push(toggle);
        } else {
            let active = self.page.active_section();
            for (i, section) in self.page.sections().iter().enumerate() {
                let label = Span::from(format!(" {} ", section.title));
                let label = if i == active {
                    label.bold().underlined().fg(accent)
                } else {
                    label.white()
                };
                let width = label.width() as u16;
                self.hits
                    .nav_links
                    .push((Rect::new(x, area.y, width, 1), section.id.clone()));
                x = x.saturating_add(width + 1);
                spans.push(label);
                spans.push(Span::raw(" "));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(header_style), area);
    }

    fn render_menu(&mut self, frame: &mut Frame, area: Rect) {
        let accent = PARTICLE_COLOR.to_color();
        let active = self.page.active_section();
        let mut lines = Vec::new();
        for (i, section) in self.page.sections().iter().enumerate() {
            let label = Span::from(format!("  {}", section.title));
            lines.push(if i == active {
                Line::from(label.bold().fg(accent))
            } else {
                Line::from(label.white())
            });
            let row = Rect::new(area.x, area.y + i as u16, area.width, 1);
            self.hits.nav_links.push((row, section.id.clone()));
        }
        frame.render_widget(
            Paragraph::new(lines).style(Style::new().bg(Color::Rgb(16, 22, 44))),
            area,
        );
    }

    fn render_alert(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.alert = area;
        let line = Line::from(vec![
            " ⚠ ".bold(),
            Span::raw(self.alert.message().to_string()),
            "  [d] dismiss".bold(),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::new().fg(Color::Black).bg(Color::Rgb(230, 180, 40))),
            area,
        );
    }

    fn render_sections(&mut self, frame: &mut Frame, area: Rect) {
        self.page.set_viewport_rows(area.height);
        let now = self.now_ms();
        let rows = i32::from(self.page.section_rows());
        let scroll = i32::from(self.page.scroll());

        for (i, section) in self.page.sections().iter().enumerate() {
            let top = self.page.section_top(i) as i32 - scroll;
            let bottom = top + rows;
            if bottom <= 0 || top >= i32::from(area.height) {
                continue;
            }
            let visible_top = top.max(0);
            let visible_bottom = bottom.min(i32::from(area.height));
            let rect = Rect::new(
                area.x,
                area.y + visible_top as u16,
                area.width,
                (visible_bottom - visible_top) as u16,
            );

            // Fade in from the background while rising into place
            let progress = self.page.reveal_progress(i, now);
            let title = PARTICLE_COLOR.with_alpha(progress).over(BACKGROUND);
            let body = TEXT_COLOR.with_alpha(progress).over(BACKGROUND);

            // Vertically center the text block inside the section
            let padding =
                (rows / 3).max(0) as usize + usize::from(self.page.reveal_offset(i, now));
            let mut lines: Vec<Line> = vec![Line::raw(""); padding];
            lines.push(Line::from(Span::from(section.title.clone()).bold().fg(title.to_color())));
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::from(section.body.clone()).fg(body.to_color())));

            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .scroll(((visible_top - top) as u16, 0));
            frame.render_widget(paragraph, rect);
        }
    }

    fn render_carousel(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.carousel = area;
        let accent = PARTICLE_COLOR.to_color();
        let block = Block::bordered()
            .title(" Highlights ")
            .border_style(Style::new().fg(accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(slide) = self.carousel.active_slide() else {
            return;
        };
        let text = vec![
            Line::from(Span::from(slide.title.clone()).bold()),
            Line::from(Span::from(slide.body.clone()).dark_gray()),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );

        if inner.height < 4 {
            return;
        }
        // "‹ ● ○ ○ ›": controls and one two-cell indicator per slide
        let count = self.carousel.len() as u16;
        let width = 4 + count * 2;
        let x = inner.x + inner.width.saturating_sub(width) / 2;
        let y = inner.y + 3;
        let mut spans = vec!["‹ ".fg(accent)];
        self.hits.prev_control = Rect::new(x, y, 1, 1);
        for i in 0..count {
            let dot = if self.carousel.is_active(i as usize) {
                "● ".fg(accent)
            } else {
                "○ ".dark_gray()
            };
            self.hits.indicators.push(Rect::new(x + 2 + i * 2, y, 1, 1));
            spans.push(dot);
        }
        spans.push(" ›".fg(accent));
        self.hits.next_control = Rect::new(x + 3 + count * 2, y, 1, 1);
        frame.render_widget(Line::from(spans), Rect::new(x, y, width.min(inner.width), 1));
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let accent = PARTICLE_COLOR.to_color();
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "←/→".bold().fg(accent),
            " slides  ".dark_gray(),
            "↑/↓".bold().fg(accent),
            " scroll  ".dark_gray(),
            "1-9".bold().fg(accent),
            " jump  ".dark_gray(),
            "m".bold().fg(accent),
            " menu  ".dark_gray(),
            "f".bold().fg(accent),
            Span::from(format!(" {}", self.field.kind().toggle().name())).dark_gray(),
        ])
        .centered();
        frame.render_widget(help, area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls until the next frame is due so animation keeps its pace.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let wait = self.next_frame_ms.saturating_sub(self.now_ms());
        if event::poll(Duration::from_millis(wait))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.on_resize(width, height),
                Event::FocusGained => self.field.set_visible(true),
                Event::FocusLost => self.field.set_visible(false),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let now = self.now_ms();
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Left) => self.carousel.on_prev_control(&mut self.scheduler, now),
            (_, KeyCode::Right) => self.carousel.on_next_control(&mut self.scheduler, now),
            (_, KeyCode::Up) => self.page.scroll_by(-1),
            (_, KeyCode::Down) => self.page.scroll_by(1),
            (_, KeyCode::PageUp) => self.page.scroll_by(-i32::from(self.page.section_rows())),
            (_, KeyCode::PageDown) => self.page.scroll_by(i32::from(self.page.section_rows())),
            (_, KeyCode::Home) => {
                self.page.navigate_to(0);
            }
            (_, KeyCode::Char(c @ '1'..='9')) => {
                self.page.navigate_to(c as usize - '1' as usize);
            }
            (_, KeyCode::Char('m')) => self.page.toggle_menu(),
            (_, KeyCode::Char('d')) => self.alert.dismiss(Utc::now()),
            (_, KeyCode::Char('f')) => self.switch_field(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let now = self.now_ms();
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.field.on_pointer_move(Point::from_cell(mouse.column, mouse.row), now);
                self.update_carousel_hover(position, now);
            }
            MouseEventKind::ScrollUp => self.page.scroll_by(-2),
            MouseEventKind::ScrollDown => self.page.scroll_by(2),
            MouseEventKind::Down(MouseButton::Left) => self.on_click(position, now),
            _ => {}
        }
    }

    /// Pause auto-play while the pointer rests on the carousel.
    fn update_carousel_hover(&mut self, position: Position, now: u64) {
        let inside = self.hits.carousel.contains(position);
        if inside == self.pointer_over_carousel {
            return;
        }
        self.pointer_over_carousel = inside;
        if inside {
            self.carousel.on_pointer_enter(&mut self.scheduler);
        } else {
            self.carousel.on_pointer_leave(&mut self.scheduler, now);
        }
    }

    fn on_click(&mut self, position: Position, now: u64) {
        if let Some(i) = self.hits.indicators.iter().position(|r| r.contains(position)) {
            self.carousel.on_indicator_click(i, &mut self.scheduler, now);
        } else if self.hits.prev_control.contains(position) {
            self.carousel.on_prev_control(&mut self.scheduler, now);
        } else if self.hits.next_control.contains(position) {
            self.carousel.on_next_control(&mut self.scheduler, now);
        } else if let Some((_, anchor)) =
            self.hits.nav_links.iter().find(|(r, _)| r.contains(position))
        {
            self.page.navigate_to_anchor(anchor);
        } else if self.hits.menu_toggle.contains(position) {
            self.page.toggle_menu();
        } else if self.hits.alert.contains(position) {
            self.alert.dismiss(Utc::now());
        } else {
            self.page.close_menu();
        }
    }

    fn on_resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::from_cells(width, height);
        self.field.on_resize(self.viewport, self.now_ms());
    }

    /// Swap between the particle field and the starfield.
    fn switch_field(&mut self) {
        let kind = self.field.kind().toggle();
        let visible = self.field.is_visible();
        self.field.stop(&mut self.scheduler);
        self.field = build_field(&self.config, kind, self.viewport);
        self.field.set_visible(visible);
        self.field.start(&mut self.scheduler);
        info!(kind = kind.name(), "background switched");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Build the background animator; disabled fields get no surface and stay inert.
fn build_field(config: &Config, kind: FieldKind, viewport: Viewport) -> Animator<BrailleSurface> {
    let surface = config.field.enabled.then(BrailleSurface::new);
    Animator::new(config.field.settings_for(kind), surface, viewport, time_seed())
}

/// Seed drawn from the wall clock.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app(width: u16, height: u16) -> App {
        let config = Config::default();
        let alert = AlertBanner::new(config.alert.clone(), None);
        App::new(config, alert, Size::new(width, height))
    }

    fn render(app: &mut App, width: u16, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    fn click(app: &mut App, rect: Rect) {
        app.on_click(Position::new(rect.x + rect.width / 2, rect.y), 0);
        for _ in 0..200 {
            app.page.advance_scroll();
        }
    }

    #[test]
    fn test_nav_link_scrolls_to_its_anchor() {
        let mut app = app(100, 30);
        render(&mut app, 100, 30);
        let (rect, anchor) = app.hits.nav_links[2].clone();
        assert_eq!(anchor, "credentials");

        click(&mut app, rect);
        assert_eq!(app.page.active_section(), 2);
        assert_eq!(u32::from(app.page.scroll()), app.page.section_top(2));
    }

    #[test]
    fn test_menu_link_scrolls_and_closes_menu() {
        let mut app = app(60, 30);
        app.page.toggle_menu();
        render(&mut app, 60, 30);
        let (rect, anchor) = app.hits.nav_links[3].clone();
        assert_eq!(anchor, "contact");

        click(&mut app, rect);
        assert!(!app.page.is_menu_open());
        assert_eq!(app.page.active_section(), 3);
    }

    #[test]
    fn test_switching_field_keeps_visibility() {
        let mut app = app(80, 24);
        app.field.start(&mut app.scheduler);
        app.field.set_visible(false);

        app.switch_field();
        assert_eq!(app.field.kind(), FieldKind::Starfield);
        assert!(!app.field.is_visible());
        assert_eq!(app.scheduler.pending_frames(), 1);

        app.field.set_visible(true);
        app.switch_field();
        assert_eq!(app.field.kind(), FieldKind::Particles);
        assert!(app.field.is_visible());
    }

    #[test]
    fn test_first_frame_starts_revealing_the_top_section() {
        let mut app = app(80, 24);
        render(&mut app, 80, 24);
        app.dispatch_frames(1_000);
        assert_eq!(app.page.reveal_progress(0, 1_000), 0.0);
        assert_eq!(app.page.reveal_progress(0, 1_600), 1.0);
        assert_eq!(app.page.reveal_progress(1, 1_600), 0.0);
    }
}
