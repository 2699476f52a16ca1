//! The application runtime.
//!
//! [`App`] is a cheap-to-clone handle over everything the runtime shares
//! between the loop thread, the event bridge, the signal watcher and key
//! handlers. The entry point creates it once with [`App::new`], hands clones
//! to views, and drives it with [`App::start`].

pub mod component;
pub mod overlay;
pub mod registry;
pub mod tasks;

mod bridge;
mod run;
#[cfg(unix)]
mod signals;
mod view;

pub use component::{
    Component, ComponentBuilder, ComponentId, Drawable, KeyListener, Resizable, System, View,
    ViewComponent,
};
pub use registry::Registry;

use crate::core::{AppError, Result};
use crate::runtime::{wakeup_pipe, WakeupReceiver, WakeupSender, WorkerPool};
use crate::settings::Settings;
use crate::ui::backend::Screen;
use crate::ui::core::painter::Painter;
use overlay::{ErrorBar, Spinner};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tasks::TaskQueue;

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Shared {
    settings: Settings,
    screen: Mutex<Box<dyn Screen>>,
    /// Last painted frame, shown at the start of the next tick.
    frame: Mutex<Painter>,
    size: Mutex<(u16, u16)>,
    registry: Registry,
    tasks: TaskQueue,
    view: Mutex<Option<ViewComponent>>,
    transition: view::Transition,
    shutdown: AtomicBool,
    closed: AtomicBool,
    loading: AtomicBool,
    caption: Mutex<String>,
    spinner: Mutex<Spinner>,
    error_bar: Mutex<ErrorBar>,
    keys: Mutex<Option<WorkerPool>>,
    wakeup: WakeupSender,
    idle: WakeupReceiver,
}

#[derive(Clone)]
pub struct App {
    shared: Arc<Shared>,
}

impl App {
    pub fn new(mut screen: Box<dyn Screen>, settings: Settings) -> Result<Self> {
        let settings = settings.normalized();
        screen.set_style(settings.background_style());
        if let Err(err) = screen.enable_mouse() {
            tracing::warn!(error = %err, "mouse capture unavailable");
        }
        let size = screen.size();

        let keys = WorkerPool::new(
            settings.key_dispatch.workers,
            settings.key_dispatch.max_in_flight,
        )
        .map_err(|source| AppError::Spawn {
            what: "key dispatcher",
            source,
        })?;
        let (wakeup, idle) = wakeup_pipe().map_err(|source| AppError::Spawn {
            what: "wakeup pipe",
            source,
        })?;

        tracing::debug!(width = size.0, height = size.1, fps = settings.fps, "app created");
        Ok(Self {
            shared: Arc::new(Shared {
                caption: Mutex::new(settings.loading_text.clone()),
                spinner: Mutex::new(Spinner::new(&settings.spinner)),
                settings,
                screen: Mutex::new(screen),
                frame: Mutex::new(Painter::new()),
                size: Mutex::new(size),
                registry: Registry::new(),
                tasks: TaskQueue::new(),
                view: Mutex::new(None),
                transition: view::Transition::default(),
                shutdown: AtomicBool::new(false),
                closed: AtomicBool::new(false),
                loading: AtomicBool::new(false),
                error_bar: Mutex::new(ErrorBar::default()),
                keys: Mutex::new(Some(keys)),
                wakeup,
                idle,
            }),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.shared.settings
    }

    pub fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    /// Terminal size as last observed, `(width, height)`.
    pub fn size(&self) -> (u16, u16) {
        *lock(&self.shared.size)
    }

    pub fn current_view(&self) -> Option<ComponentId> {
        lock(&self.shared.view).as_ref().map(ViewComponent::id)
    }

    /// Toggle the spinner with the default caption.
    pub fn loading(&self, flag: bool) {
        let text = self.shared.settings.loading_text.clone();
        self.loading_with_text(flag, text);
    }

    pub fn loading_with_text(&self, flag: bool, text: impl Into<String>) {
        *lock(&self.shared.caption) = text.into();
        self.shared.loading.store(flag, Ordering::SeqCst);
    }

    pub fn is_loading(&self) -> bool {
        self.shared.loading.load(Ordering::SeqCst)
    }

    pub fn loading_text(&self) -> String {
        lock(&self.shared.caption).clone()
    }

    pub fn keep_alive(&self, component: &Component) {
        self.shared.registry.keep_alive(component);
    }

    pub fn unkeep_alive(&self, id: ComponentId) {
        self.shared.registry.unkeep_alive(id);
    }

    /// See [`Registry::add_drawable`]: repeats are ignored and return `false`.
    pub fn add_drawable(&self, component: &Component) -> bool {
        self.shared.registry.add_drawable(component, self.size())
    }

    pub fn remove_drawable(&self, id: ComponentId) -> bool {
        self.shared.registry.remove_drawable(id)
    }

    /// See [`Registry::add_system`]: repeats are ignored and return `false`.
    pub fn add_system(&self, component: &Component) -> bool {
        self.shared.registry.add_system(component, self.size())
    }

    pub fn remove_system(&self, id: ComponentId) -> bool {
        self.shared.registry.remove_system(id)
    }

    /// Run `task` once on the loop thread, at the end of a coming tick.
    pub fn run_on_app_thread<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.tasks.push(Box::new(task));
        self.shared.wakeup.wake();
    }

    pub fn quit(&self) {
        self.request_shutdown();
    }

    /// Returns `true` for the call that actually flipped the flag.
    pub(crate) fn request_shutdown(&self) -> bool {
        let first = !self.shared.shutdown.swap(true, Ordering::SeqCst);
        if first {
            tracing::info!("shutdown requested");
        }
        self.shared.wakeup.wake();
        first
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shared.shutdown.load(Ordering::SeqCst)
    }

    /// Ask for the next frame now instead of at the end of the idle wait.
    pub fn set_dirty(&self) {
        self.shared.wakeup.wake();
    }

    /// Drop every non-kept-alive component and blank the terminal right away.
    pub fn clear_now(&self) {
        self.shared.registry.clear_all(self.size());
        lock(&self.shared.frame).clear();
        if let Err(err) = lock(&self.shared.screen).clear() {
            tracing::error!(error = %err, "screen clear failed");
        }
    }

    /// Log `text` and show it on the bottom row for a while.
    pub fn error(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::error!(message = %text, "app error");
        lock(&self.shared.error_bar).show(text, self.shared.settings.error_bar_ticks);
        self.shared.wakeup.wake();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "../../tests/unit/app/mod.rs"]
mod tests;
