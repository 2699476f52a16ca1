use super::{bridge, lock, App};
use crate::core::event::EventSource;
use crate::core::Result;
use crate::ui::core::geom::Rect;
use crate::ui::core::painter::Painter;
use std::sync::atomic::Ordering;
use std::time::Instant;

impl App {
    /// Run until shutdown is requested, then finalize.
    ///
    /// Terminal events are read from `events` on a background thread. On unix
    /// SIGHUP, SIGTERM, SIGQUIT and SIGINT also request shutdown.
    pub fn start<E: EventSource>(&self, events: E) -> Result<()> {
        let bridge = match bridge::spawn(self.clone(), events) {
            Ok(bridge) => bridge,
            Err(err) => {
                self.close();
                return Err(err);
            }
        };

        #[cfg(unix)]
        let mut watcher = {
            let app = self.clone();
            match super::signals::SignalWatcher::spawn(
                &super::signals::TERMINATION_SIGNALS,
                move || {
                    app.request_shutdown();
                },
            ) {
                Ok(watcher) => watcher,
                Err(err) => {
                    self.request_shutdown();
                    self.close();
                    return Err(err);
                }
            }
        };

        self.run_loop();

        #[cfg(unix)]
        watcher.stop();
        self.close();

        // A bridge still parked in a blocking read is left behind; see `close`.
        if bridge.is_finished() && bridge.join().is_err() {
            tracing::error!("event bridge panicked");
        }
        Ok(())
    }

    pub(crate) fn run_loop(&self) {
        let period = self.shared.settings.tick_period();
        let mut painter = Painter::new();
        tracing::debug!(?period, "runtime loop started");
        while !self.is_shutting_down() {
            let started = Instant::now();
            let ran = self.tick(&mut painter);
            if self.should_idle(ran) {
                let rest = period.saturating_sub(started.elapsed());
                if !rest.is_zero() {
                    self.shared.idle.wait(rest);
                }
            }
        }
        tracing::debug!("runtime loop stopped");
    }

    /// Idle only after a tick that ran no tasks and left none queued.
    pub(crate) fn should_idle(&self, ran: usize) -> bool {
        ran == 0 && self.shared.tasks.is_empty()
    }

    /// One frame: show the previous frame, update, repaint, drain deferred
    /// tasks. Returns how many tasks ran.
    pub(crate) fn tick(&self, painter: &mut Painter) -> usize {
        self.show_frame();

        for system in self.shared.registry.systems() {
            system.update();
        }

        painter.clear();
        let (width, height) = self.size();
        let area = Rect::screen(width, height);
        if self.is_loading() {
            let caption = self.loading_text();
            lock(&self.shared.spinner).paint(painter, area, &caption);
        }
        for drawable in self.shared.registry.drawables() {
            drawable.draw(painter, area);
        }
        lock(&self.shared.error_bar).paint(painter, area);
        std::mem::swap(&mut *lock(&self.shared.frame), painter);

        self.shared.tasks.drain()
    }

    fn show_frame(&self) {
        let frame = lock(&self.shared.frame);
        if let Err(err) = lock(&self.shared.screen).show(&frame) {
            tracing::error!(error = %err, "frame flush failed");
        }
    }

    /// Blank and restore the terminal and drop all runtime state. Only the
    /// first call does anything.
    ///
    /// The event source given to [`App::start`] belongs to the reader thread
    /// and is not closed here. That thread sees the shutdown flag after its
    /// next event, then calls [`EventSource::close`] and drops the source. A
    /// source still blocked in `next_event` stays open until the process exits.
    pub fn close(&self) {
        if self.shared.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shared.shutdown.store(true, Ordering::SeqCst);

        {
            let mut screen = lock(&self.shared.screen);
            if let Err(err) = screen.clear() {
                tracing::error!(error = %err, "final clear failed");
            }
            if let Err(err) = screen.fini() {
                tracing::error!(error = %err, "terminal restore failed");
            }
        }

        let view = lock(&self.shared.view).take();
        drop(view);
        self.shared.registry.reset();
        self.shared.tasks.clear();
        lock(&self.shared.frame).clear();
        lock(&self.shared.error_bar).dismiss();
        let keys = lock(&self.shared.keys).take();
        drop(keys);
        tracing::info!("app closed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/run.rs"]
mod tests;
