//! Rendering backends.
//!
//! [`Backend`] replays a frame's paint commands onto some cell buffer.
//! [`Screen`] is the terminal collaborator the runtime drives: it owns the
//! terminal (or a headless stand-in), knows its size and shows frames.

use crate::ui::core::geom::Rect;
use crate::ui::core::painter::{PaintCmd, Painter};
use crate::ui::core::style::Style;
use std::io;

pub trait Backend {
    fn draw(&mut self, area: Rect, cmds: &[PaintCmd]);
}

pub trait Screen: Send {
    /// Current size in cells as `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Resynchronize with the terminal after it changed to `width` x `height`.
    fn resize(&mut self, width: u16, height: u16) -> io::Result<()>;

    /// Default style painted under every frame.
    fn set_style(&mut self, style: Style);

    fn enable_mouse(&mut self) -> io::Result<()>;

    /// Paint `frame` over the default style and flush it to the terminal.
    fn show(&mut self, frame: &Painter) -> io::Result<()>;

    /// Blank the terminal immediately.
    fn clear(&mut self) -> io::Result<()>;

    /// Restore the terminal. Called once, when the runtime shuts down.
    fn fini(&mut self) -> io::Result<()>;
}

// The concrete terminal backend lives in `ratatui.rs`, but we keep the module name generic so the
// rest of the codebase does not need to mention ratatui.
#[cfg(feature = "tui")]
#[path = "ratatui.rs"]
pub mod terminal;
