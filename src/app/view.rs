use super::component::ViewComponent;
use super::{lock, App};
use std::sync::{Mutex, MutexGuard};
use std::thread::ThreadId;

/// Serializes view transitions. `owner` names the thread inside one so a
/// hook that switches views again can be detected instead of deadlocking.
#[derive(Default)]
pub(super) struct Transition {
    gate: Mutex<()>,
    owner: Mutex<Option<ThreadId>>,
}

impl Transition {
    fn held_by_current_thread(&self) -> bool {
        *lock(&self.owner) == Some(std::thread::current().id())
    }

    fn enter(&self) -> TransitionGuard<'_> {
        let gate = lock(&self.gate);
        *lock(&self.owner) = Some(std::thread::current().id());
        TransitionGuard {
            transition: self,
            _gate: gate,
        }
    }
}

struct TransitionGuard<'a> {
    transition: &'a Transition,
    _gate: MutexGuard<'a, ()>,
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        *lock(&self.transition.owner) = None;
    }
}

impl App {
    /// Replace the active view.
    ///
    /// The previous view is destroyed and unregistered unless the application
    /// keeps it alive explicitly. The new view is kept alive for as long as it
    /// is current, so it survives `clear_now` calls made by its own hooks.
    ///
    /// Transitions from different threads run one after another, hooks
    /// included. A `set_view` made from inside `init` or `destroy` is queued
    /// with [`App::run_on_app_thread`] and applied on the next tick.
    pub fn set_view(&self, view: ViewComponent) {
        let transition = &self.shared.transition;
        if transition.held_by_current_thread() {
            tracing::debug!(new = ?view.id(), "view switch from a view hook deferred");
            let app = self.clone();
            self.run_on_app_thread(move || app.set_view(view));
            return;
        }

        let _guard = transition.enter();
        self.switch_view(view);
    }

    fn switch_view(&self, view: ViewComponent) {
        let previous = lock(&self.shared.view).replace(view.clone());
        let registry = &self.shared.registry;

        if let Some(old) = previous {
            tracing::debug!(old = ?old.id(), new = ?view.id(), "switching view");
            old.destroy();
            registry.unmark_view(old.id());
            registry.remove_drawable(old.id());
            registry.remove_system(old.id());
        } else {
            tracing::debug!(new = ?view.id(), "installing first view");
        }

        registry.mark_view(view.component());
        self.clear_now();
        self.add_drawable(view.component());
        self.add_system(view.component());
        view.init();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/view.rs"]
mod tests;
