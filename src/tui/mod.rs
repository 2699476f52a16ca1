//! Crossterm integration: terminal setup/restore, the event source and the
//! concrete [`crate::ui::backend::Screen`].

pub mod crossterm;
pub mod screen;
pub mod terminal_guard;

pub use self::crossterm::CrosstermEvents;
pub use screen::TerminalScreen;
pub use terminal_guard::{TerminalGuard, TerminalRestorer};
