//! Demo screens for the `fjira` binary: a list of issues and a detail page.

use fjira::app::{App, Component, Drawable, KeyListener, Resizable, System, View};
use fjira::core::event::{KeyCode, KeyEvent};
use fjira::ui::core::geom::{Pos, Rect};
use fjira::ui::core::painter::Painter;
use fjira::ui::core::style::{Color, Mod, Style};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

const ACCENT: Color = Color::Rgb(0x56, 0x9c, 0xd6);
const MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
const TEXT: Color = Color::Rgb(0xd4, 0xd4, 0xd4);

const ISSUES: [(&str, &str); 5] = [
    ("FJ-101", "Search view loses focus after resize"),
    ("FJ-102", "Status change form ignores Escape"),
    ("FJ-107", "Spinner keeps spinning after failed fetch"),
    ("FJ-110", "Add assignee filter"),
    ("FJ-113", "Wrap long summaries in the detail view"),
];

pub fn install(app: &App) {
    let status = Component::new(Arc::new(StatusBar::new()))
        .drawable()
        .resizable()
        .build();
    app.add_drawable(&status);
    app.keep_alive(&status);

    app.set_view(home_view(app.clone(), 0));
}

fn home_view(app: App, selected: usize) -> fjira::app::ViewComponent {
    Component::new(Arc::new(HomeView::new(app, selected)))
        .key_listener()
        .into_view()
}

fn detail_view(app: App, index: usize) -> fjira::app::ViewComponent {
    Component::new(Arc::new(DetailView { app, index }))
        .key_listener()
        .into_view()
}

/// Handles the keys both screens share. Returns `true` if the key was used.
fn common_key(app: &App, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('l') => {
            let app_ref = app.clone();
            app.run_on_app_thread(move || app_ref.loading(!app_ref.is_loading()));
        }
        KeyCode::Char('e') => app.error("FJ-000: simulated request failure"),
        _ => return false,
    }
    true
}

fn body(area: Rect) -> Rect {
    Rect::new(area.x, area.y, area.w, area.h.saturating_sub(1))
}

struct HomeView {
    app: App,
    selected: AtomicUsize,
}

impl HomeView {
    fn new(app: App, selected: usize) -> Self {
        Self {
            app,
            selected: AtomicUsize::new(selected.min(ISSUES.len() - 1)),
        }
    }

    fn move_selection(&self, down: bool) {
        let current = self.selected.load(Ordering::SeqCst);
        let next = if down {
            (current + 1).min(ISSUES.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        self.selected.store(next, Ordering::SeqCst);
        self.app.set_dirty();
    }
}

impl Drawable for HomeView {
    fn draw(&self, painter: &mut Painter, area: Rect) {
        let area = body(area);
        if area.w < 4 || area.h < 3 {
            return;
        }
        painter.border(area, Style::default().fg(MUTED));
        painter.text(
            Pos::new(area.x + 2, area.y),
            " Issues ",
            Style::default().fg(ACCENT).add_mod(Mod::BOLD),
        );

        let inner = Rect::new(area.x + 1, area.y + 1, area.w - 2, area.h - 2);
        let selected = self.selected.load(Ordering::SeqCst);
        for (row, (key, summary)) in ISSUES.iter().enumerate().take(inner.h as usize) {
            let y = inner.y + row as u16;
            let mut style = Style::default().fg(TEXT);
            if row == selected {
                style = style.add_mod(Mod::REVERSE);
                painter.fill_rect(Rect::new(inner.x, y, inner.w, 1), style);
            }
            painter.text_clipped(
                Pos::new(inner.x + 1, y),
                format!("{key}  {summary}"),
                style,
                inner,
            );
        }
    }
}

impl System for HomeView {
    fn update(&self) {}
}

impl KeyListener for HomeView {
    fn handle_key(&self, key: KeyEvent) {
        if common_key(&self.app, &key) {
            return;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter => {
                let index = self.selected.load(Ordering::SeqCst);
                self.app.set_view(detail_view(self.app.clone(), index));
            }
            _ => {}
        }
    }
}

impl View for HomeView {
    fn init(&self) {
        tracing::debug!("home view opened");
    }

    fn destroy(&self) {
        tracing::debug!("home view closed");
    }
}

struct DetailView {
    app: App,
    index: usize,
}

impl Drawable for DetailView {
    fn draw(&self, painter: &mut Painter, area: Rect) {
        let area = body(area);
        let Some((key, summary)) = ISSUES.get(self.index) else {
            return;
        };
        if area.w < 4 || area.h < 4 {
            return;
        }
        painter.border(area, Style::default().fg(ACCENT));
        painter.text(
            Pos::new(area.x + 2, area.y),
            format!(" {key} "),
            Style::default().fg(ACCENT).add_mod(Mod::BOLD),
        );
        let inner = Rect::new(area.x + 1, area.y + 1, area.w - 2, area.h - 2);
        painter.text_clipped(
            Pos::new(inner.x + 1, inner.y),
            *summary,
            Style::default().fg(TEXT),
            inner,
        );
        painter.text_clipped(
            Pos::new(inner.x + 1, inner.y + 2),
            "Esc back · l toggle loading · e error · q quit",
            Style::default().fg(MUTED),
            inner,
        );
    }
}

impl System for DetailView {
    fn update(&self) {}
}

impl KeyListener for DetailView {
    fn handle_key(&self, key: KeyEvent) {
        if common_key(&self.app, &key) {
            return;
        }
        if key.is_escape() {
            self.app.set_view(home_view(self.app.clone(), self.index));
        }
    }
}

impl View for DetailView {}

/// Bottom line that stays across screens.
struct StatusBar {
    size: Mutex<(u16, u16)>,
}

impl StatusBar {
    fn new() -> Self {
        Self {
            size: Mutex::new((0, 0)),
        }
    }
}

impl Drawable for StatusBar {
    fn draw(&self, painter: &mut Painter, area: Rect) {
        let row = area.bottom_row();
        if row.is_empty() {
            return;
        }
        let (w, h) = *self.size.lock().unwrap_or_else(PoisonError::into_inner);
        painter.fill_rect(row, Style::default().bg(Color::Rgb(0x2d, 0x2d, 0x2d)));
        painter.text_clipped(
            Pos::new(row.x + 1, row.y),
            format!("fjira  {w}x{h}  j/k move · Enter open · q quit"),
            Style::default().fg(MUTED).bg(Color::Rgb(0x2d, 0x2d, 0x2d)),
            row,
        );
    }
}

impl Resizable for StatusBar {
    fn resize(&self, width: u16, height: u16) {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) = (width, height);
    }
}
