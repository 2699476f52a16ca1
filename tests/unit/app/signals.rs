use super::*;
use signal_hook::consts::signal::{SIGUSR1, SIGUSR2};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn first_signal_is_reported_once() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let mut watcher = SignalWatcher::spawn(&[SIGUSR1], move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    signal_hook::low_level::raise(SIGUSR1).unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while hits.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(2));
    }
    watcher.stop();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn stop_without_signal_ends_the_thread() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let mut watcher = SignalWatcher::spawn(&[SIGUSR2], move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    watcher.stop();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn watches_the_termination_set() {
    assert!(TERMINATION_SIGNALS.contains(&SIGINT));
    assert!(TERMINATION_SIGNALS.contains(&SIGTERM));
    assert!(TERMINATION_SIGNALS.contains(&SIGHUP));
    assert!(TERMINATION_SIGNALS.contains(&SIGQUIT));
}
