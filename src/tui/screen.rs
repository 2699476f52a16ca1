use super::terminal_guard::{TerminalGuard, TerminalRestorer};
use crate::ui::backend::terminal::RatatuiTerminal;
use crate::ui::backend::Screen;
use crate::ui::core::painter::{PaintCmd, Painter};
use crate::ui::core::style::Style;
use std::io;

/// The real terminal: raw mode + alternate screen for as long as it lives.
pub struct TerminalScreen {
    terminal: RatatuiTerminal,
    guard: TerminalGuard,
    style: Style,
    size: (u16, u16),
}

impl TerminalScreen {
    pub fn new() -> io::Result<Self> {
        let guard = TerminalGuard::new()?;
        let terminal = RatatuiTerminal::new(io::stdout())?;
        let size = crossterm::terminal::size()?;
        Ok(Self {
            terminal,
            guard,
            style: Style::default(),
            size,
        })
    }

    /// Handle that can put the terminal back from outside the runtime (panic hook).
    pub fn restorer(&self) -> TerminalRestorer {
        self.guard.restorer()
    }
}

impl Screen for TerminalScreen {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.terminal.resize(width, height)?;
        self.size = (width, height);
        Ok(())
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn enable_mouse(&mut self) -> io::Result<()> {
        crossterm::execute!(io::stdout(), crossterm::event::EnableMouseCapture)
    }

    fn show(&mut self, frame: &Painter) -> io::Result<()> {
        let style = self.style;
        self.terminal.draw(|backend, area| {
            backend.draw(area, &[PaintCmd::FillRect { rect: area, style }]);
            backend.draw(area, frame.cmds());
        })
    }

    fn clear(&mut self) -> io::Result<()> {
        self.show(&Painter::new())
    }

    fn fini(&mut self) -> io::Result<()> {
        self.guard.restorer().restore()
    }
}
