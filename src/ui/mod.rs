//! UI layer.
//!
//! Components paint into a [`core::painter::Painter`]; backends replay the
//! recorded commands onto ratatui or a headless buffer. No `ratatui` type
//! leaks past `backend`.

pub mod backend;
pub mod core;
