//! Core types shared by every layer: input events and the crate error.

pub mod error;
pub mod event;

pub use error::{AppError, Result};
pub use event::{
    EventSource, InputEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
