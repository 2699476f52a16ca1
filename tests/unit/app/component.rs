use super::*;
use crate::app::test_support::Tracker;

#[test]
fn capabilities_follow_the_builder() {
    let tracker = Tracker::new("p");
    let plain = Component::new(tracker.clone()).drawable().build();
    assert!(plain.is_drawable());
    assert!(!plain.is_system());
    assert!(!plain.is_key_listener());
    assert!(!plain.is_resizable());

    let full = Component::new(tracker.clone())
        .drawable()
        .system()
        .key_listener()
        .resizable()
        .build();
    assert!(full.is_drawable() && full.is_system());
    assert!(full.is_key_listener() && full.is_resizable());
}

#[test]
fn ids_are_unique_per_handle_and_shared_by_clones() {
    let tracker = Tracker::new("p");
    let a = Component::new(tracker.clone()).system().build();
    let b = Component::new(tracker).system().build();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.clone().id(), a.id());
    assert!(b.id().as_u64() > a.id().as_u64());
}

#[test]
fn hooks_reach_only_opted_in_capabilities() {
    let tracker = Tracker::new("p");
    let component = Component::new(tracker.clone()).system().build();

    let mut painter = Painter::new();
    component.draw(&mut painter, Rect::screen(10, 2));
    component.update();
    component.resize(10, 2);

    assert_eq!(tracker.draws(), 0);
    assert_eq!(tracker.updates(), 1);
    assert!(tracker.resizes().is_empty());
    assert!(painter.is_empty());
    assert!(component.key_listener().is_none());
}

#[test]
fn into_view_is_drawable_and_system() {
    let tracker = Tracker::new("view");
    let view = Component::new(tracker.clone()).key_listener().into_view();
    let component = view.component();
    assert!(component.is_drawable());
    assert!(component.is_system());
    assert!(component.is_key_listener());
    assert_eq!(view.id(), component.id());

    view.init();
    view.destroy();
    assert_eq!(tracker.inits(), 1);
    assert_eq!(tracker.destroys(), 1);
}
