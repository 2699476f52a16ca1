use super::*;
use crate::app::component::Component;
use crate::app::test_support::{test_app, Tracker};
use crate::core::event::{KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use crate::ui::backend::Screen;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    cond()
}

#[test]
fn resize_updates_size_and_notifies_each_resizable_once() {
    let (app, screen) = test_app(80, 24);
    let both = Tracker::new("both");
    let drawn = Tracker::new("drawn");
    let c1 = Component::new(both.clone())
        .drawable()
        .system()
        .resizable()
        .build();
    let c2 = Component::new(drawn.clone()).drawable().resizable().build();
    app.add_drawable(&c1);
    app.add_system(&c1);
    app.add_drawable(&c2);

    assert!(app.handle_event(InputEvent::Resize(120, 40)).is_continue());

    assert_eq!(app.size(), (120, 40));
    assert_eq!(screen.size(), (120, 40));
    assert_eq!(both.resizes(), vec![(80, 24), (120, 40)]);
    assert_eq!(drawn.resizes(), vec![(80, 24), (120, 40)]);
}

#[test]
fn ctrl_c_requests_shutdown_and_stops() {
    let (app, _screen) = test_app(10, 5);
    assert!(app.handle_event(InputEvent::Key(KeyEvent::ctrl('c'))).is_break());
    assert!(app.is_shutting_down());
}

#[test]
fn escape_quits_only_without_systems() {
    let (app, _screen) = test_app(10, 5);
    let esc = InputEvent::Key(KeyEvent::plain(KeyCode::Esc));
    app.add_system(&Component::new(Tracker::new("s")).system().build());
    assert!(app.handle_event(esc.clone()).is_continue());
    assert!(!app.is_shutting_down());

    let (app, _screen) = test_app(10, 5);
    assert!(app.handle_event(esc).is_continue());
    assert!(app.is_shutting_down());
}

#[test]
fn keys_reach_every_listening_system() {
    let (app, _screen) = test_app(10, 5);
    let a = Tracker::new("a");
    let b = Tracker::new("b");
    let deaf = Tracker::new("deaf");
    app.add_system(&Component::new(a.clone()).system().key_listener().build());
    app.add_system(&Component::new(b.clone()).system().key_listener().build());
    app.add_system(&Component::new(deaf.clone()).system().build());
    app.add_drawable(&Component::new(Tracker::new("d")).drawable().key_listener().build());

    let key = KeyEvent::plain(KeyCode::Char('j'));
    app.handle_event(InputEvent::Key(key));

    assert!(wait_for(|| a.keys().len() == 1 && b.keys().len() == 1));
    assert_eq!(a.keys(), vec![key]);
    assert!(deaf.keys().is_empty());
}

#[test]
fn releases_and_non_key_events_are_ignored() {
    let (app, _screen) = test_app(10, 5);
    let tracker = Tracker::new("a");
    app.add_system(&Component::new(tracker.clone()).system().key_listener().build());

    let mut release = KeyEvent::plain(KeyCode::Char('x'));
    release.kind = KeyEventKind::Release;
    let mouse = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 1,
        row: 1,
        modifiers: Default::default(),
    };
    for event in [
        InputEvent::Key(release),
        InputEvent::Mouse(mouse),
        InputEvent::Paste("text".to_string()),
        InputEvent::FocusGained,
        InputEvent::FocusLost,
    ] {
        assert!(app.handle_event(event).is_continue());
    }

    std::thread::sleep(Duration::from_millis(20));
    assert!(tracker.keys().is_empty());
    assert!(!app.is_shutting_down());
}

#[test]
fn bridge_thread_stops_on_interrupt() {
    let (app, _screen) = test_app(10, 5);
    let (tx, rx) = mpsc::channel();
    let handle = spawn(app.clone(), rx).unwrap();

    tx.send(InputEvent::Resize(30, 8)).unwrap();
    tx.send(InputEvent::Key(KeyEvent::ctrl('c'))).unwrap();
    handle.join().unwrap();

    assert_eq!(app.size(), (30, 8));
    assert!(app.is_shutting_down());
}

#[test]
fn bridge_thread_stops_when_source_closes() {
    let (app, _screen) = test_app(10, 5);
    let (tx, rx) = mpsc::channel::<InputEvent>();
    let handle = spawn(app.clone(), rx).unwrap();

    drop(tx);
    handle.join().unwrap();
    assert!(!app.is_shutting_down());
}

struct Broken;

impl EventSource for Broken {
    fn next_event(&mut self) -> std::io::Result<Option<InputEvent>> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "tty gone"))
    }
}

#[test]
fn source_error_requests_shutdown() {
    let (app, _screen) = test_app(10, 5);
    spawn(app.clone(), Broken).unwrap().join().unwrap();
    assert!(app.is_shutting_down());
}

/// Channel-backed source that records when the reader closes it.
struct Tracked {
    events: mpsc::Receiver<InputEvent>,
    closed: Arc<AtomicUsize>,
}

impl EventSource for Tracked {
    fn next_event(&mut self) -> std::io::Result<Option<InputEvent>> {
        self.events.next_event()
    }

    fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn source_is_closed_after_shutdown_is_observed() {
    let (app, _screen) = test_app(10, 5);
    let (tx, events) = mpsc::channel();
    let closed = Arc::new(AtomicUsize::new(0));
    let handle = spawn(
        app.clone(),
        Tracked {
            events,
            closed: closed.clone(),
        },
    )
    .unwrap();

    tx.send(InputEvent::Resize(20, 6)).unwrap();
    assert!(wait_for(|| app.size() == (20, 6)));
    assert_eq!(closed.load(Ordering::SeqCst), 0);

    app.close();
    tx.send(InputEvent::FocusGained).unwrap();
    handle.join().unwrap();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn source_is_closed_when_it_ends() {
    let (app, _screen) = test_app(10, 5);
    let (tx, events) = mpsc::channel::<InputEvent>();
    let closed = Arc::new(AtomicUsize::new(0));
    let handle = spawn(
        app.clone(),
        Tracked {
            events,
            closed: closed.clone(),
        },
    )
    .unwrap();

    drop(tx);
    handle.join().unwrap();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}
