use crate::app::component::{Component, Drawable, System, View, ViewComponent};
use crate::app::test_support::{test_app, Tracker};
use crate::app::App;
use crate::ui::core::geom::Rect;
use crate::ui::core::painter::Painter;
use std::sync::{Arc, Barrier, Mutex};

#[test]
fn first_view_is_registered_and_initialized() {
    let (app, screen) = test_app(40, 10);
    let tracker = Tracker::new("home");
    let view = Component::new(tracker.clone()).into_view();

    app.set_view(view.clone());

    assert_eq!(tracker.inits(), 1);
    assert_eq!(tracker.destroys(), 0);
    assert!(app.registry().contains_drawable(view.id()));
    assert!(app.registry().contains_system(view.id()));
    assert_eq!(app.current_view(), Some(view.id()));
    assert_eq!(screen.clears(), 1);
}

#[test]
fn switching_views_destroys_and_unregisters_the_old_one() {
    let (app, _screen) = test_app(40, 10);
    let p1 = Tracker::new("v1");
    let p2 = Tracker::new("v2");
    let v1 = Component::new(p1.clone()).into_view();
    let v2 = Component::new(p2.clone()).into_view();

    app.set_view(v1.clone());
    app.set_view(v2.clone());

    assert_eq!(p1.destroys(), 1);
    assert_eq!(p1.inits(), 1);
    assert!(!app.registry().contains_drawable(v1.id()));
    assert!(!app.registry().contains_system(v1.id()));

    assert_eq!(p2.inits(), 1);
    assert_eq!(p2.destroys(), 0);
    assert!(app.registry().contains_drawable(v2.id()));
    assert!(app.registry().contains_system(v2.id()));
    assert_eq!(app.registry().drawables().len(), 1);
}

#[test]
fn kept_alive_old_view_stays_registered() {
    let (app, _screen) = test_app(40, 10);
    let p1 = Tracker::new("v1");
    let p2 = Tracker::new("v2");
    let v1 = Component::new(p1.clone()).into_view();
    let v2 = Component::new(p2.clone()).into_view();

    app.set_view(v1.clone());
    app.keep_alive(v1.component());
    app.set_view(v2.clone());

    assert_eq!(p1.destroys(), 1);
    assert!(app.registry().contains_drawable(v1.id()));
    assert!(app.registry().contains_system(v1.id()));
    assert!(app.registry().contains_drawable(v2.id()));
    assert!(app.registry().contains_system(v2.id()));
}

#[test]
fn view_transition_drops_unmarked_components() {
    let (app, _screen) = test_app(40, 10);
    let status = Component::new(Tracker::new("status")).drawable().build();
    let banner = Component::new(Tracker::new("banner")).drawable().build();
    app.set_view(Component::new(Tracker::new("v1")).into_view());
    app.add_drawable(&status);
    app.add_drawable(&banner);
    app.keep_alive(&status);

    app.set_view(Component::new(Tracker::new("v2")).into_view());

    assert!(app.registry().contains_drawable(status.id()));
    assert!(!app.registry().contains_drawable(banner.id()));
}

#[test]
fn resizable_view_is_told_the_size_once() {
    let (app, _screen) = test_app(64, 20);
    let tracker = Tracker::new("v");
    app.set_view(Component::new(tracker.clone()).resizable().into_view());

    assert_eq!(tracker.resizes(), vec![(64, 20)]);
}

#[test]
fn current_view_survives_clear_now() {
    let (app, _screen) = test_app(40, 10);
    let view = Component::new(Tracker::new("v")).into_view();
    app.set_view(view.clone());

    app.clear_now();

    assert!(app.registry().contains_drawable(view.id()));
    assert!(app.registry().contains_system(view.id()));
}

#[test]
fn concurrent_set_view_keeps_one_registered_view() {
    let (app, _screen) = test_app(40, 10);
    app.set_view(Component::new(Tracker::new("start")).into_view());

    for round in 0..300 {
        let barrier = Arc::new(Barrier::new(2));
        let trackers = [Tracker::new("left"), Tracker::new("right")];
        let handles: Vec<_> = trackers
            .iter()
            .map(|tracker| {
                let app = app.clone();
                let barrier = barrier.clone();
                let view = Component::new(tracker.clone()).into_view();
                std::thread::spawn(move || {
                    barrier.wait();
                    app.set_view(view);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let current = app.current_view().unwrap();
        let drawn: Vec<_> = app.registry().drawables().iter().map(|c| c.id()).collect();
        let systems: Vec<_> = app.registry().systems().iter().map(|c| c.id()).collect();
        assert_eq!(drawn, vec![current], "round {round}");
        assert_eq!(systems, vec![current], "round {round}");

        // The loser of the race was installed and then replaced, in order.
        let replaced = trackers.iter().filter(|p| p.destroys() == 1).count();
        assert_eq!(replaced, 1, "round {round}");
        for tracker in &trackers {
            assert_eq!(tracker.inits(), 1, "round {round}");
        }
    }
}

/// Switches to `next` from its own `init`.
struct Redirect {
    app: App,
    next: Mutex<Option<ViewComponent>>,
}

impl Drawable for Redirect {
    fn draw(&self, _painter: &mut Painter, _area: Rect) {}
}

impl System for Redirect {
    fn update(&self) {}
}

impl View for Redirect {
    fn init(&self) {
        if let Some(next) = self.next.lock().unwrap().take() {
            self.app.set_view(next);
        }
    }
}

#[test]
fn set_view_from_init_is_applied_on_next_tick() {
    let (app, _screen) = test_app(40, 10);
    let target = Tracker::new("target");
    let next = Component::new(target.clone()).into_view();
    let redirect = Component::new(Arc::new(Redirect {
        app: app.clone(),
        next: Mutex::new(Some(next.clone())),
    }))
    .into_view();

    app.set_view(redirect.clone());
    assert_eq!(app.current_view(), Some(redirect.id()));
    assert_eq!(target.inits(), 0);

    assert_eq!(app.tick(&mut Painter::new()), 1);
    assert_eq!(app.current_view(), Some(next.id()));
    assert_eq!(target.inits(), 1);
    assert!(!app.registry().contains_drawable(redirect.id()));
}
