//! Terminal events in, resize notifications and key dispatch out.

use super::{lock, App};
use crate::core::event::{EventSource, InputEvent, KeyEvent};
use crate::core::{AppError, Result};
use std::ops::ControlFlow;
use std::thread::JoinHandle;

pub(crate) fn spawn<E: EventSource>(app: App, mut events: E) -> Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("fjira-event-bridge".to_string())
        .spawn(move || {
            while !app.is_shutting_down() {
                match events.next_event() {
                    Ok(Some(event)) => {
                        if app.handle_event(event).is_break() {
                            break;
                        }
                    }
                    Ok(None) => {
                        tracing::debug!("event source closed");
                        break;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "reading terminal events failed");
                        app.request_shutdown();
                        break;
                    }
                }
            }
            events.close();
            tracing::debug!("event bridge stopped");
        })
        .map_err(|source| AppError::Spawn {
            what: "event bridge",
            source,
        })
}

impl App {
    pub(crate) fn handle_event(&self, event: InputEvent) -> ControlFlow<()> {
        match event {
            InputEvent::Resize(width, height) => {
                self.handle_resize(width, height);
                ControlFlow::Continue(())
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(_)
            | InputEvent::Paste(_)
            | InputEvent::FocusGained
            | InputEvent::FocusLost => ControlFlow::Continue(()),
        }
    }

    fn handle_resize(&self, width: u16, height: u16) {
        let size = {
            let mut screen = lock(&self.shared.screen);
            if let Err(err) = screen.resize(width, height) {
                tracing::error!(error = %err, width, height, "screen resize failed");
            }
            screen.size()
        };
        *lock(&self.shared.size) = size;
        for component in self.shared.registry.resizables() {
            component.resize(size.0, size.1);
        }
        self.set_dirty();
    }

    fn handle_key(&self, key: KeyEvent) -> ControlFlow<()> {
        if key.is_release() {
            return ControlFlow::Continue(());
        }
        if key.is_interrupt() {
            self.request_shutdown();
            return ControlFlow::Break(());
        }
        if key.is_escape() && self.shared.registry.system_count() == 0 {
            self.request_shutdown();
        }

        let listeners = self.shared.registry.key_listeners();
        if listeners.is_empty() {
            return ControlFlow::Continue(());
        }
        let keys = lock(&self.shared.keys);
        let Some(pool) = keys.as_ref() else {
            return ControlFlow::Continue(());
        };
        for listener in listeners {
            pool.spawn("key handler", move || listener.handle_key(key));
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/bridge.rs"]
mod tests;
