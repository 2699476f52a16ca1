use super::*;
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::style::{Color, Style};

#[test]
fn draw_text_clips_wide_glyphs_that_do_not_fit() {
    let mut buf = TestBuffer::new(Rect::new(0, 0, 1, 1));
    draw_text(&mut buf, Pos::new(0, 0), "界", Style::default(), None);
    assert_eq!(buf.cell(0, 0).unwrap().symbol, " ");
}

#[test]
fn draw_text_renders_wide_glyphs_when_they_fit() {
    let mut buf = TestBuffer::new(Rect::new(0, 0, 2, 1));
    draw_text(&mut buf, Pos::new(0, 0), "界", Style::default(), None);
    assert_eq!(buf.cell(0, 0).unwrap().symbol, "界");
    assert_eq!(buf.cell(1, 0).unwrap().symbol, " ");
}

#[test]
fn draw_text_respects_clip() {
    let mut buf = TestBuffer::new(Rect::new(0, 0, 10, 1));
    draw_text(
        &mut buf,
        Pos::new(0, 0),
        "abcdef",
        Style::default(),
        Some(Rect::new(0, 0, 3, 1)),
    );
    assert_eq!(buf.row_text(0), "abc");
}

#[test]
fn fill_rect_clips_to_buffer_area() {
    let mut buf = TestBuffer::new(Rect::new(0, 0, 2, 2));
    buf.cell_mut(0, 0).unwrap().symbol = "A".to_string();
    fill_rect(&mut buf, Rect::new(0, 0, 10, 10), Style::default());
    assert_eq!(buf.cell(0, 0).unwrap().symbol, " ");
}

#[test]
fn draw_border_draws_corners() {
    let mut buf = TestBuffer::new(Rect::new(0, 0, 3, 3));
    draw_border(&mut buf, Rect::new(0, 0, 3, 3), Style::default());
    assert_eq!(buf.row_text(0), "┌─┐");
    assert_eq!(buf.row_text(1), "│ │");
    assert_eq!(buf.row_text(2), "└─┘");
}

#[test]
fn screen_show_replays_frame_over_default_style() {
    let mut screen = TestScreen::new(6, 2);
    let bg = Style::default().bg(Color::Rgb(22, 22, 22));
    screen.set_style(bg);

    let mut frame = Painter::new();
    frame.text(Pos::new(1, 1), "hey", Style::default());
    screen.show(&frame).unwrap();

    let buf = screen.buffer();
    assert_eq!(buf.row_text(1), " hey");
    assert_eq!(buf.cell(0, 0).unwrap().style, bg);
    assert_eq!(screen.shows(), 1);
}

#[test]
fn screen_clones_share_state() {
    let observer = TestScreen::new(4, 1);
    let mut owned = observer.clone();
    owned.resize(8, 3).unwrap();
    owned.clear().unwrap();
    owned.enable_mouse().unwrap();
    owned.fini().unwrap();

    assert_eq!(observer.size(), (8, 3));
    assert_eq!(observer.clears(), 1);
    assert!(observer.mouse_enabled());
    assert!(observer.is_finished());
}
