//! Overlays the runtime paints on its own: the loading spinner and the
//! transient error bar.

use crate::settings::SpinnerSettings;
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::Painter;
use crate::ui::core::style::{Color, Mod, Style};
use unicode_width::UnicodeWidthStr;

const SPINNER_FG: Color = Color::Rgb(0x9c, 0xdc, 0xfe);
const ERROR_FG: Color = Color::Rgb(0xff, 0xff, 0xff);
const ERROR_BG: Color = Color::Rgb(0xa1, 0x26, 0x0d);

/// Rotating glyph followed by a caption, centered on the screen.
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: Vec<String>,
    ticks_per_frame: u32,
    ticks: u64,
}

impl Spinner {
    pub fn new(settings: &SpinnerSettings) -> Self {
        Self {
            frames: settings.frames.clone(),
            ticks_per_frame: settings.ticks_per_frame.max(1),
            ticks: 0,
        }
    }

    pub fn frame(&self) -> &str {
        if self.frames.is_empty() {
            return "";
        }
        let index = (self.ticks / u64::from(self.ticks_per_frame)) as usize % self.frames.len();
        &self.frames[index]
    }

    /// Paint the current frame and advance the rotation by one tick.
    pub fn paint(&mut self, painter: &mut Painter, area: Rect, caption: &str) {
        let line = if caption.is_empty() {
            self.frame().to_string()
        } else {
            format!("{} {}", self.frame(), caption)
        };
        let width = line.width().min(u16::MAX as usize) as u16;
        let slot = area.centered(width, 1);
        if !slot.is_empty() {
            painter.text_clipped(
                Pos::new(slot.x, slot.y),
                line,
                Style::default().fg(SPINNER_FG).add_mod(Mod::BOLD),
                slot,
            );
        }
        self.ticks = self.ticks.wrapping_add(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ErrorMessage {
    text: String,
    remaining: u32,
}

/// Bottom-row message that disappears after a fixed number of ticks.
#[derive(Debug, Default)]
pub struct ErrorBar {
    message: Option<ErrorMessage>,
}

impl ErrorBar {
    pub fn show(&mut self, text: impl Into<String>, ticks: u32) {
        self.message = Some(ErrorMessage {
            text: text.into(),
            remaining: ticks.max(1),
        });
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    /// Paint the message if one is active and count down its lifetime.
    pub fn paint(&mut self, painter: &mut Painter, area: Rect) {
        let Some(message) = self.message.as_mut() else {
            return;
        };
        let row = area.bottom_row();
        if !row.is_empty() {
            let style = Style::default().fg(ERROR_FG).bg(ERROR_BG);
            painter.fill_rect(row, style);
            painter.text_clipped(
                Pos::new(row.x.saturating_add(1), row.y),
                message.text.clone(),
                style.add_mod(Mod::BOLD),
                row,
            );
        }
        message.remaining -= 1;
        if message.remaining == 0 {
            self.message = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/overlay.rs"]
mod tests;
