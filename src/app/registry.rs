//! Active drawables and systems, and the components that survive view
//! transitions.
//!
//! Membership changes happen under one lock. Readers get snapshots, so no
//! component hook ever runs while the lock is held; hooks are free to call
//! back into the registry.

use super::component::{Component, ComponentId, KeyListener};
use rustc_hash::FxHashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Slots {
    drawables: Vec<Component>,
    systems: Vec<Component>,
    /// Marked by the application, in marking order.
    kept: Vec<Component>,
    /// Marked implicitly for as long as it is the current view.
    view: Option<Component>,
}

impl Slots {
    fn is_kept(&self, id: ComponentId) -> bool {
        self.view.as_ref().is_some_and(|c| c.id() == id) || self.kept.iter().any(|c| c.id() == id)
    }

    fn is_registered(&self, id: ComponentId) -> bool {
        self.drawables.iter().any(|c| c.id() == id) || self.systems.iter().any(|c| c.id() == id)
    }
}

#[derive(Default)]
pub struct Registry {
    slots: Mutex<Slots>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `component` for painting. A resizable component that was not
    /// registered anywhere yet is told the current `size` right away.
    ///
    /// A component already in the draw list is not added again. Returns
    /// `false` for such a repeat and for a component that is not drawable,
    /// `true` only when the list grew.
    pub fn add_drawable(&self, component: &Component, size: (u16, u16)) -> bool {
        if !component.is_drawable() {
            tracing::warn!(id = ?component.id(), "add_drawable on a non-drawable component");
            return false;
        }
        let notify = {
            let mut slots = self.slots();
            if slots.drawables.iter().any(|c| c.id() == component.id()) {
                return false;
            }
            let first = !slots.is_registered(component.id());
            slots.drawables.push(component.clone());
            first
        };
        if notify {
            component.resize(size.0, size.1);
        }
        true
    }

    /// Register `component` for updates. Same de-duplication and return value
    /// as [`Registry::add_drawable`].
    pub fn add_system(&self, component: &Component, size: (u16, u16)) -> bool {
        if !component.is_system() {
            tracing::warn!(id = ?component.id(), "add_system on a non-system component");
            return false;
        }
        let notify = {
            let mut slots = self.slots();
            if slots.systems.iter().any(|c| c.id() == component.id()) {
                return false;
            }
            let first = !slots.is_registered(component.id());
            slots.systems.push(component.clone());
            first
        };
        if notify {
            component.resize(size.0, size.1);
        }
        true
    }

    /// No-op for kept-alive components.
    pub fn remove_drawable(&self, id: ComponentId) -> bool {
        let mut slots = self.slots();
        if slots.is_kept(id) {
            return false;
        }
        match slots.drawables.iter().position(|c| c.id() == id) {
            Some(index) => {
                slots.drawables.remove(index);
                true
            }
            None => false,
        }
    }

    /// No-op for kept-alive components.
    pub fn remove_system(&self, id: ComponentId) -> bool {
        let mut slots = self.slots();
        if slots.is_kept(id) {
            return false;
        }
        match slots.systems.iter().position(|c| c.id() == id) {
            Some(index) => {
                slots.systems.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn keep_alive(&self, component: &Component) {
        let mut slots = self.slots();
        if !slots.kept.iter().any(|c| c.id() == component.id()) {
            slots.kept.push(component.clone());
        }
    }

    /// Drops the explicit mark only; the current view stays protected.
    pub fn unkeep_alive(&self, id: ComponentId) {
        self.slots().kept.retain(|c| c.id() != id);
    }

    pub fn is_kept_alive(&self, id: ComponentId) -> bool {
        self.slots().is_kept(id)
    }

    pub(crate) fn mark_view(&self, view: &Component) {
        self.slots().view = Some(view.clone());
    }

    pub(crate) fn unmark_view(&self, id: ComponentId) {
        let mut slots = self.slots();
        if slots.view.as_ref().is_some_and(|c| c.id() == id) {
            slots.view = None;
        }
    }

    /// Empty both lists, then put every kept-alive component back into each
    /// list its capabilities allow.
    pub fn clear_all(&self, size: (u16, u16)) {
        let readded = {
            let mut slots = self.slots();
            slots.drawables.clear();
            slots.systems.clear();

            let mut kept: Vec<Component> = slots.kept.clone();
            if let Some(view) = &slots.view {
                if !kept.iter().any(|c| c.id() == view.id()) {
                    kept.push(view.clone());
                }
            }
            for component in &kept {
                if component.is_drawable() {
                    slots.drawables.push(component.clone());
                }
                if component.is_system() {
                    slots.systems.push(component.clone());
                }
            }
            kept
        };
        for component in &readded {
            component.resize(size.0, size.1);
        }
    }

    /// Forget everything, marks included.
    pub(crate) fn reset(&self) {
        *self.slots() = Slots::default();
    }

    pub fn drawables(&self) -> Vec<Component> {
        self.slots().drawables.clone()
    }

    pub fn systems(&self) -> Vec<Component> {
        self.slots().systems.clone()
    }

    pub fn system_count(&self) -> usize {
        self.slots().systems.len()
    }

    pub fn contains_drawable(&self, id: ComponentId) -> bool {
        self.slots().drawables.iter().any(|c| c.id() == id)
    }

    pub fn contains_system(&self, id: ComponentId) -> bool {
        self.slots().systems.iter().any(|c| c.id() == id)
    }

    /// Key listeners among the registered systems, in registration order.
    pub fn key_listeners(&self) -> Vec<Arc<dyn KeyListener>> {
        self.slots()
            .systems
            .iter()
            .filter_map(Component::key_listener)
            .collect()
    }

    /// Every registered resizable component, once, drawables first.
    pub fn resizables(&self) -> Vec<Component> {
        let slots = self.slots();
        let mut seen = FxHashSet::default();
        slots
            .drawables
            .iter()
            .chain(slots.systems.iter())
            .filter(|c| c.is_resizable() && seen.insert(c.id()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/registry.rs"]
mod tests;
