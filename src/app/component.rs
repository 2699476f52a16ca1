//! Component handles.
//!
//! A [`Component`] binds one shared object to the capabilities it opts into.
//! Capabilities are chosen when the handle is built:
//!
//! ```ignore
//! let list = Arc::new(IssueList::new(app.clone()));
//! let component = Component::new(list).drawable().system().key_listener().build();
//! ```
//!
//! Clones of a handle share its [`ComponentId`], which is what the registry
//! and the keep-alive marks compare.

use crate::core::event::KeyEvent;
use crate::ui::core::geom::Rect;
use crate::ui::core::painter::Painter;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub trait Drawable: Send + Sync {
    fn draw(&self, painter: &mut Painter, area: Rect);
}

pub trait System: Send + Sync {
    fn update(&self);
}

/// Called from the key dispatcher's workers, never from the runtime loop.
pub trait KeyListener: Send + Sync {
    fn handle_key(&self, key: KeyEvent);
}

pub trait Resizable: Send + Sync {
    fn resize(&self, width: u16, height: u16);
}

pub trait View: Drawable + System {
    fn init(&self) {}
    fn destroy(&self) {}
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone)]
pub struct Component {
    id: ComponentId,
    drawable: Option<Arc<dyn Drawable>>,
    system: Option<Arc<dyn System>>,
    key_listener: Option<Arc<dyn KeyListener>>,
    resizable: Option<Arc<dyn Resizable>>,
}

impl Component {
    pub fn new<T: Send + Sync + 'static>(object: Arc<T>) -> ComponentBuilder<T> {
        ComponentBuilder {
            component: Component {
                id: ComponentId::next(),
                drawable: None,
                system: None,
                key_listener: None,
                resizable: None,
            },
            object,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn is_drawable(&self) -> bool {
        self.drawable.is_some()
    }

    pub fn is_system(&self) -> bool {
        self.system.is_some()
    }

    pub fn is_key_listener(&self) -> bool {
        self.key_listener.is_some()
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable.is_some()
    }

    pub(crate) fn draw(&self, painter: &mut Painter, area: Rect) {
        if let Some(drawable) = &self.drawable {
            drawable.draw(painter, area);
        }
    }

    pub(crate) fn update(&self) {
        if let Some(system) = &self.system {
            system.update();
        }
    }

    pub(crate) fn resize(&self, width: u16, height: u16) {
        if let Some(resizable) = &self.resizable {
            resizable.resize(width, height);
        }
    }

    pub(crate) fn key_listener(&self) -> Option<Arc<dyn KeyListener>> {
        self.key_listener.clone()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("drawable", &self.is_drawable())
            .field("system", &self.is_system())
            .field("key_listener", &self.is_key_listener())
            .field("resizable", &self.is_resizable())
            .finish()
    }
}

pub struct ComponentBuilder<T> {
    component: Component,
    object: Arc<T>,
}

impl<T: Send + Sync + 'static> ComponentBuilder<T> {
    pub fn drawable(mut self) -> Self
    where
        T: Drawable,
    {
        let drawable: Arc<dyn Drawable> = self.object.clone();
        self.component.drawable = Some(drawable);
        self
    }

    pub fn system(mut self) -> Self
    where
        T: System,
    {
        let system: Arc<dyn System> = self.object.clone();
        self.component.system = Some(system);
        self
    }

    pub fn key_listener(mut self) -> Self
    where
        T: KeyListener,
    {
        let listener: Arc<dyn KeyListener> = self.object.clone();
        self.component.key_listener = Some(listener);
        self
    }

    pub fn resizable(mut self) -> Self
    where
        T: Resizable,
    {
        let resizable: Arc<dyn Resizable> = self.object.clone();
        self.component.resizable = Some(resizable);
        self
    }

    pub fn build(self) -> Component {
        self.component
    }

    /// Finish as a view. A view is always both drawable and system.
    pub fn into_view(self) -> ViewComponent
    where
        T: View,
    {
        let builder = self.drawable().system();
        let view: Arc<dyn View> = builder.object;
        ViewComponent {
            component: builder.component,
            view,
        }
    }
}

#[derive(Clone)]
pub struct ViewComponent {
    component: Component,
    view: Arc<dyn View>,
}

impl ViewComponent {
    pub fn id(&self) -> ComponentId {
        self.component.id
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub(crate) fn init(&self) {
        self.view.init();
    }

    pub(crate) fn destroy(&self) {
        self.view.destroy();
    }
}

impl fmt::Debug for ViewComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewComponent").field(&self.component).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/component.rs"]
mod tests;
