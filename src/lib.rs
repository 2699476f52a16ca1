//! fjira - terminal application runtime
//!
//! Module layout:
//! - core: input events, the crate error
//! - ui: geometry, styles, the paint-command frame buffer, screen backends
//! - runtime: loop wakeup and the key-handler worker pool
//! - settings: `settings.json` under the user cache directory
//! - app: the runtime itself (components, registry, views, event bridge, loop)
//! - tui: crossterm terminal wiring (feature `tui`)

pub mod app;
pub mod core;
pub mod runtime;
pub mod settings;
#[cfg(feature = "tui")]
pub mod tui;
pub mod ui;
