use tui_merge::core::SessionSnapshot;
use tui_merge::term::{tile_colors, CursorView, FrameBuffer, GameView, Viewport};
use tui_merge::types::CascadeState;

fn snap(size: usize, cells: &[u32]) -> SessionSnapshot {
    SessionSnapshot {
        size,
        cells: cells
            .iter()
            .map(|&r| if r == 0 { None } else { Some(r) })
            .collect(),
        pending: Some(1),
        ..SessionSnapshot::default()
    }
}

fn row_text(fb: &FrameBuffer, y: u16) -> String {
    fb.row(y).iter().map(|g| g.ch).collect()
}

#[test]
fn term_view_renders_border_corners() {
    let view = GameView::default();
    let s = snap(2, &[0; 4]);
    // 2 tiles of 6x3 plus border => 14x8; no room for the side panel
    let fb = view.render(&s, &CursorView::default(), Viewport::new(14, 8));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(13, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 7).unwrap().ch, '└');
    assert_eq!(fb.get(13, 7).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_rank_with_tile_colors() {
    let view = GameView::default();
    let s = snap(2, &[0, 0, 0, 7]);
    let fb = view.render(&s, &CursorView::default(), Viewport::new(14, 8));

    // Tile (1, 1) starts at (7, 4); the label is centred in its 4 inner columns
    let label = fb.get(9, 5).unwrap();
    assert_eq!(label.ch, '7');
    assert_eq!(label.style.bg, tile_colors(7).0);
    assert_eq!(label.style.fg, tile_colors(7).1);
}

#[test]
fn term_view_marks_cursor_cell() {
    let view = GameView::default();
    let s = snap(2, &[0; 4]);
    let cursor = CursorView {
        row: 1,
        col: 0,
        held: None,
    };
    let fb = view.render(&s, &cursor, Viewport::new(14, 8));
    assert_eq!(fb.get(1, 5).unwrap().ch, '[');
    assert_eq!(fb.get(6, 5).unwrap().ch, ']');
    assert_ne!(fb.get(1, 2).unwrap().ch, '[');
}

#[test]
fn term_view_dims_held_tile() {
    let view = GameView::default();
    let s = snap(2, &[3, 0, 0, 0]);
    let cursor = CursorView {
        row: 1,
        col: 1,
        held: Some(0),
    };
    let fb = view.render(&s, &cursor, Viewport::new(14, 8));
    assert!(fb.get(3, 2).unwrap().style.dim);
}

#[test]
fn term_view_side_panel_shows_score_and_move_cost() {
    let view = GameView::default();
    let mut s = snap(2, &[1, 2, 0, 0]);
    s.score = 42;
    s.move_cost = Some(14);
    s.cascade = CascadeState::Resolving;
    let fb = view.render(&s, &CursorView::default(), Viewport::new(40, 12));

    let text: Vec<String> = (0..12).map(|y| row_text(&fb, y)).collect();
    assert!(text.iter().any(|l| l.contains("SCORE")));
    assert!(text.iter().any(|l| l.contains("42")));
    assert!(text.iter().any(|l| l.contains("-14")));
    assert!(text.iter().any(|l| l.contains("merging")));
}

#[test]
fn term_view_game_over_overlay() {
    let view = GameView::default();
    let mut s = snap(2, &[1, 2, 2, 1]);
    s.game_over = true;
    s.score = 31;
    let fb = view.render(&s, &CursorView::default(), Viewport::new(14, 8));
    assert!(row_text(&fb, 4).contains("GAME OVER"));
    assert!(row_text(&fb, 5).contains("31"));
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let view = GameView::default();
    let s = snap(3, &[0; 9]);
    let mut fb = FrameBuffer::new(1, 1);
    view.render_into(&s, &CursorView::default(), Viewport::new(30, 12), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 12));
}
