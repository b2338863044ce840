//! Screen buffer tests - clamping, wrapping, wide glyphs and dirty tracking

use tui_minesweeper::term::{Cell, ScreenBuffer};
use tui_minesweeper::types::PLACEHOLDER_GLYPH;

fn clean(width: u16, height: u16) -> ScreenBuffer {
    let screen = ScreenBuffer::new(width, height);
    screen.take_dirty();
    screen
}

fn text(screen: &ScreenBuffer) -> Vec<String> {
    screen.lines()
}

#[test]
fn test_resize_clamps_and_marks_dirty() {
    let screen = clean(4, 4);
    screen.write("xx", 0, 0);
    screen.take_dirty();

    screen.resize(0, 0);
    assert_eq!((screen.width(), screen.height()), (1, 1));
    assert!(screen.is_dirty());
    assert_eq!(screen.get(0, 0), Some(Cell::BLANK));
}

#[test]
fn test_identical_write_is_not_dirty() {
    let screen = clean(5, 2);
    screen.write("abc", 1, 0);
    assert!(screen.take_dirty());

    screen.write("abc", 1, 0);
    assert!(!screen.is_dirty());
    screen.set_char('b', 2, 0);
    assert!(!screen.is_dirty());

    screen.set_char('z', 2, 0);
    assert!(screen.take_dirty());
}

#[test]
fn test_write_wraps_to_left_column() {
    let screen = clean(6, 3);
    screen.write_text("abcdef", 1, 0, 4, 3, 0);
    assert_eq!(text(&screen), vec![" abc  ", " def  ", "      "]);
}

#[test]
fn test_write_clips_at_bottom_bound() {
    let screen = clean(4, 3);
    screen.write_text("abcdefghijkl", 0, 0, 4, 2, 0);
    assert_eq!(text(&screen), vec!["abcd", "efgh", "    "]);
}

#[test]
fn test_indent_applies_to_first_line_only() {
    let screen = clean(5, 2);
    screen.write_text("abcd", 0, 0, 5, 2, 2);
    assert_eq!(text(&screen), vec!["  abc", "d    "]);
}

#[test]
fn test_line_breaks_reset_column() {
    let screen = clean(4, 4);
    screen.write("ab\ncd\r\nef\rg", 1, 0);
    assert_eq!(text(&screen), vec![" ab ", " cd ", " ef ", " g  "]);
}

#[test]
fn test_tab_expands_to_four_spaces() {
    let screen = clean(7, 1);
    screen.fill('.', 0, 0, 7, 1);
    screen.write("a\tb", 0, 0);
    assert_eq!(text(&screen), vec!["a    b."]);
}

#[test]
fn test_coordinates_are_clamped() {
    let screen = clean(3, 2);
    screen.set_char('x', -5, 10);
    assert_eq!(screen.get(0, 1), Some(Cell::Glyph('x')));
    screen.write("yz", 99, -3);
    assert_eq!(screen.get(2, 0), Some(Cell::Glyph('y')));
    assert_eq!(screen.get(2, 1), Some(Cell::Glyph('z')));
}

#[test]
fn test_control_characters_are_rejected() {
    let screen = clean(3, 1);
    for c in ['\n', '\r', '\t', '\0'] {
        screen.set_char(c, 0, 0);
        screen.fill(c, 0, 0, 3, 1);
    }
    assert!(!screen.is_dirty());
    assert_eq!(text(&screen), vec!["   "]);
}

#[test]
fn test_wide_glyph_spans_two_cells() {
    let screen = clean(4, 1);
    screen.write("中a", 0, 0);
    assert_eq!(screen.get(0, 0), Some(Cell::Glyph('中')));
    assert_eq!(screen.get(1, 0), Some(Cell::Hole));
    assert_eq!(screen.get(2, 0), Some(Cell::Glyph('a')));
    assert_eq!(screen.row_text(0).as_deref(), Some("中a "));
}

#[test]
fn test_wide_glyph_in_single_column_bound_is_placeholder() {
    let screen = clean(6, 2);
    screen.write_text("中中", 2, 0, 3, 2, 0);
    assert_eq!(screen.get(2, 0), Some(Cell::Glyph(PLACEHOLDER_GLYPH)));
    assert_eq!(screen.get(2, 1), Some(Cell::Glyph(PLACEHOLDER_GLYPH)));
    assert_eq!(screen.get(3, 0), Some(Cell::BLANK));

    screen.set_char('中', 5, 1);
    assert_eq!(screen.get(5, 1), Some(Cell::Glyph(PLACEHOLDER_GLYPH)));
}

#[test]
fn test_wide_glyph_wraps_at_bound_edge() {
    let screen = clean(6, 2);
    screen.write_text("中中", 0, 0, 3, 2, 0);
    assert_eq!(text(&screen), vec!["中    ", "中    "]);
    assert_eq!(screen.get(1, 1), Some(Cell::Hole));
    assert_eq!(screen.get(2, 0), Some(Cell::BLANK));

    screen.write_text("ab中", 0, 0, 3, 2, 0);
    assert_eq!(text(&screen), vec!["ab    ", "中    "]);
}

#[test]
fn test_wide_glyph_wrap_is_clipped_at_bottom() {
    let screen = clean(6, 2);
    screen.write_text("ab中", 0, 0, 3, 1, 0);
    assert_eq!(text(&screen), vec!["ab    ", "      "]);
}

#[test]
fn test_write_onto_hole_is_dropped() {
    let screen = clean(4, 1);
    screen.set_char('中', 0, 0);
    screen.take_dirty();

    screen.set_char('x', 1, 0);
    assert!(!screen.is_dirty());
    assert_eq!(screen.get(1, 0), Some(Cell::Hole));

    // The column still advances past the hole.
    screen.write("xy", 1, 0);
    assert_eq!(screen.row_text(0).as_deref(), Some("中y "));
}

#[test]
fn test_fill_clamps_rectangle() {
    let screen = clean(4, 3);
    screen.fill('#', 2, 1, 10, 10);
    assert_eq!(text(&screen), vec!["    ", "  ##", "  ##"]);
}

#[test]
fn test_fill_wide_glyph_uses_placeholder_at_right_edge() {
    let screen = clean(5, 1);
    screen.fill('中', 0, 0, 3, 1);
    assert_eq!(screen.get(0, 0), Some(Cell::Glyph('中')));
    assert_eq!(screen.get(1, 0), Some(Cell::Hole));
    assert_eq!(screen.get(2, 0), Some(Cell::Glyph(PLACEHOLDER_GLYPH)));
    assert_eq!(screen.get(3, 0), Some(Cell::BLANK));
}

#[test]
fn test_flush_skips_holes_and_ignores_dirty_state() {
    let screen = clean(3, 2);
    screen.write("中z", 0, 0);
    screen.take_dirty();

    let mut out = Vec::new();
    screen.flush(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "中z\n   \n");
    assert!(!screen.is_dirty());
}
