use super::*;

#[test]
fn ctrl_space_normalizes_from_null() {
    let event = crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Null,
        crossterm::event::KeyModifiers::NONE,
    );
    let converted = into_key_event(event);
    assert_eq!(converted.code, KeyCode::Char(' '));
    assert!(converted.modifiers.contains(KeyModifiers::CONTROL));
}

#[test]
fn ctrl_c_converts_to_interrupt() {
    let event = crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Char('c'),
        crossterm::event::KeyModifiers::CONTROL,
    );
    assert!(into_key_event(event).is_interrupt());
}

#[test]
fn resize_and_paste_pass_through() {
    assert_eq!(
        into_input_event(crossterm::event::Event::Resize(100, 40)),
        InputEvent::Resize(100, 40)
    );
    assert_eq!(
        into_input_event(crossterm::event::Event::Paste("x".to_string())),
        InputEvent::Paste("x".to_string())
    );
}

#[test]
fn release_kind_is_preserved() {
    let mut event = crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Esc,
        crossterm::event::KeyModifiers::NONE,
    );
    event.kind = crossterm::event::KeyEventKind::Release;
    assert!(into_key_event(event).is_release());
}
