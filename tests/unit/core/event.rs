use super::*;
use std::sync::mpsc;

#[test]
fn ctrl_c_is_interrupt_in_either_case() {
    assert!(KeyEvent::ctrl('c').is_interrupt());
    assert!(KeyEvent::ctrl('C').is_interrupt());
    let with_shift = KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL | KeyModifiers::SHIFT,
    );
    assert!(with_shift.is_interrupt());
}

#[test]
fn plain_c_is_not_interrupt() {
    assert!(!KeyEvent::plain(KeyCode::Char('c')).is_interrupt());
    assert!(!KeyEvent::ctrl('x').is_interrupt());
}

#[test]
fn key_modifiers_combine() {
    let mut mods = KeyModifiers::NONE;
    assert!(mods.is_empty());
    mods |= KeyModifiers::ALT;
    assert!(mods.contains(KeyModifiers::ALT));
    assert!(!mods.contains(KeyModifiers::CONTROL));
}

#[test]
fn input_event_as_key() {
    let event = InputEvent::Key(KeyEvent::plain(KeyCode::Esc));
    assert!(event.is_key());
    assert!(event.as_key().unwrap().is_escape());
    assert!(InputEvent::Resize(1, 1).as_key().is_none());
}

#[test]
fn receiver_event_source_reports_close() {
    let (tx, mut rx) = mpsc::channel();
    tx.send(InputEvent::FocusGained).unwrap();
    drop(tx);

    assert_eq!(rx.next_event().unwrap(), Some(InputEvent::FocusGained));
    assert_eq!(rx.next_event().unwrap(), None);
}
