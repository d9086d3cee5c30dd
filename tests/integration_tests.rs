//! Integration tests for whole-session behaviour

use rand::RngCore;
use tui_merge::core::{
    find_components, DropOutcome, GameError, Grid, Session, SessionConfig, StepOutcome,
};
use tui_merge::input::{CursorController, Intent};
use tui_merge::types::{CascadeState, DropSource, GameEvent, RejectReason, UiAction};

/// Always yields zero, so every pending tile is rank 1.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

fn grid(size: usize, cells: &[u32]) -> Grid {
    let cells = cells
        .iter()
        .map(|&r| if r == 0 { None } else { Some(r) })
        .collect();
    Grid::from_cells(size, cells).unwrap()
}

fn session(size: usize, cells: &[u32], score: u64) -> Session<ZeroRng> {
    let mut s = Session::with_board(grid(size, cells), score, Some(1), ZeroRng);
    s.take_events();
    s
}

#[test]
fn test_pair_merge_from_two_drops() {
    let mut s = session(3, &[0; 9], 0);

    assert!(s.drop_tile(DropSource::Pending, 0).unwrap().is_accepted());
    assert_eq!(s.pending_tile(), Some(1));
    assert!(s.drop_tile(DropSource::Pending, 1).unwrap().is_accepted());

    // Anchor of the second drop wins the collapse
    assert_eq!(s.grid().get(1), Ok(Some(2)));
    assert_eq!(s.grid().get(0), Ok(None));
    assert_eq!(s.grid().occupied_count(), 1);
    assert_eq!(s.score(), 2);
    assert_eq!(s.cascade_state(), CascadeState::Idle);
}

#[test]
fn test_l_shape_triple_bonus() {
    let mut s = session(3, &[1, 0, 0, 1, 0, 0, 0, 0, 0], 0);
    s.drop_tile(DropSource::Pending, 1).unwrap();

    assert_eq!(s.grid().occupied_count(), 1);
    assert_eq!(s.grid().get(1), Ok(Some(2)));
    assert_eq!(s.score(), 6);
}

#[test]
fn test_rejected_overwrite_changes_nothing() {
    let mut s = session(3, &[1, 0, 0, 0, 2, 0, 0, 0, 0], 9);
    let before = s.snapshot();

    let out = s.drop_tile(DropSource::Pending, 4).unwrap();
    assert_eq!(out, DropOutcome::Rejected(RejectReason::OccupiedTarget));
    let out = s.drop_tile(DropSource::Grid(0), 4).unwrap();
    assert_eq!(out, DropOutcome::Rejected(RejectReason::OccupiedTarget));

    assert_eq!(s.snapshot(), before);
    assert_eq!(
        s.take_events(),
        vec![
            GameEvent::MoveRejected {
                reason: RejectReason::OccupiedTarget
            };
            2
        ]
    );
}

#[test]
fn test_move_gated_by_score() {
    let mut poor = session(3, &[0, 0, 0, 0, 2, 0, 0, 0, 0], 2);
    let out = poor.drop_tile(DropSource::Grid(4), 8).unwrap();
    assert_eq!(out, DropOutcome::Rejected(RejectReason::InsufficientScore));
    assert_eq!(poor.grid().get(4), Ok(Some(2)));
    assert_eq!(poor.score(), 2);
    assert_eq!(poor.move_cost(), None);

    let mut rich = session(3, &[0, 0, 0, 0, 2, 0, 0, 0, 0], 5);
    assert_eq!(rich.move_cost(), Some(1));
    let out = rich.drop_tile(DropSource::Grid(4), 8).unwrap();
    assert_eq!(out, DropOutcome::Accepted { cost: 1 });
    assert_eq!(rich.score(), 4);
    assert_eq!(rich.grid().get(4), Ok(None));
    assert_eq!(rich.grid().get(8), Ok(Some(2)));
    // Moving does not consume the pending tile
    assert_eq!(rich.pending_tile(), Some(1));
}

#[test]
fn test_full_board_ends_game() {
    let mut s = session(2, &[1, 2, 2, 0], 7);
    s.drop_tile(DropSource::Pending, 3).unwrap();

    assert!(s.grid().is_full());
    assert!(s.is_game_over());
    let events = s.take_events();
    assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 7 }));

    // Terminal: every further drop is refused, and nothing re-fires
    let out = s.drop_tile(DropSource::Grid(0), 1).unwrap();
    assert_eq!(out, DropOutcome::Rejected(RejectReason::GameOver));
    assert!(!s
        .take_events()
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert!(!s.snapshot().playable());
}

#[test]
fn test_cascade_accumulates_both_passes() {
    let mut s = session(3, &[1, 0, 2, 0, 0, 0, 0, 0, 0], 0);
    s.drop_tile(DropSource::Pending, 1).unwrap();

    assert_eq!(s.grid().get(1), Ok(Some(3)));
    assert_eq!(s.grid().occupied_count(), 1);
    assert_eq!(s.score(), 2 + 4);
    assert_eq!(s.cascade_state(), CascadeState::Idle);

    let passes: Vec<_> = s
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::PassResolved { pass, credit, .. } => Some((pass, credit)),
            _ => None,
        })
        .collect();
    assert_eq!(passes, vec![(1, 2), (2, 4)]);
}

#[test]
fn test_follow_up_pass_collapses_on_smallest_index() {
    // Pass 1 builds a 2 at the anchor (7); pass 2 merges it with the 2 at 4
    // onto index 4, the smaller member.
    let mut s = session(3, &[0, 0, 0, 0, 2, 0, 1, 0, 0], 0);
    s.drop_tile(DropSource::Pending, 7).unwrap();
    assert_eq!(s.grid().get(4), Ok(Some(3)));
    assert_eq!(s.grid().get(7), Ok(None));
}

#[test]
fn test_simultaneous_components_in_one_pass() {
    // The drop at 3 joins the 1s; the 3s at 6/7 are already a pair but were
    // never resolved (layouts are taken as is).
    let mut s = session(3, &[1, 0, 0, 0, 0, 0, 3, 3, 0], 0);
    s.drop_tile(DropSource::Pending, 3).unwrap();
    let merged: Vec<_> = s
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::TilesMerged { .. }))
        .collect();
    assert_eq!(merged.len(), 2);
    assert_eq!(s.grid().get(3), Ok(Some(2)));
    assert_eq!(s.grid().get(6), Ok(Some(4)));
    assert_eq!(s.score(), 2 + 6);
}

#[test]
fn test_out_of_range_is_a_contract_error() {
    let mut s = session(3, &[0; 9], 9);
    assert!(matches!(
        s.drop_tile(DropSource::Pending, 9),
        Err(GameError::IndexOutOfRange { index: 9, len: 9 })
    ));
    assert!(s.events().is_empty());
}

#[test]
fn test_same_seed_same_game() {
    let script = |s: &mut Session| {
        for i in 0..30 {
            let empties = s.grid().empty_indices();
            if empties.is_empty() {
                break;
            }
            let target = empties[i % empties.len()];
            s.drop_tile(DropSource::Pending, target).unwrap();
        }
    };

    let mut a = Session::new(SessionConfig::new(5, 2024)).unwrap();
    let mut b = Session::new(SessionConfig::new(5, 2024)).unwrap();
    script(&mut a);
    script(&mut b);

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.take_events(), b.take_events());
}

#[test]
fn test_stepping_matches_running() {
    let mut run = Session::new(SessionConfig::new(4, 99)).unwrap();
    let mut stepped = Session::new(SessionConfig::new(4, 99)).unwrap();

    for _ in 0..12 {
        let Some(&target) = run.grid().empty_indices().first() else {
            break;
        };
        run.drop_tile(DropSource::Pending, target).unwrap();

        stepped.begin_drop(DropSource::Pending, target).unwrap();
        let mut guard = 0;
        while stepped.step() != StepOutcome::Idle {
            guard += 1;
            assert!(guard < 100);
        }

        assert_eq!(run.snapshot(), stepped.snapshot());
    }
    assert_eq!(run.take_events(), stepped.take_events());
}

#[test]
fn test_restart_keeps_size_and_bumps_episode() {
    let mut s = Session::new(SessionConfig::new(5, 3)).unwrap();
    let first = s.snapshot();
    s.restart();
    let second = s.snapshot();

    assert_eq!(second.size, 5);
    assert_eq!(second.episode_id, first.episode_id + 1);
    assert_eq!(second.score, 0);
    assert_eq!(s.grid().occupied_count(), 10);
    assert!(find_components(s.grid()).iter().all(|c| c.rank <= 3));
}

#[test]
fn test_cursor_drives_session() {
    let mut s = session(3, &[0, 0, 0, 0, 2, 0, 0, 0, 0], 6);
    let mut cursor = CursorController::new(3);
    cursor.reset(3);

    let cells = s.cells();
    let cost = s.move_cost();
    assert_eq!(cursor.apply(UiAction::PickUp, &cells, cost), None);
    cursor.apply(UiAction::CursorDown, &cells, cost);
    let Some(Intent::Drop { source, target }) = cursor.apply(UiAction::PlacePending, &cells, cost)
    else {
        panic!("expected a drop intent");
    };
    assert_eq!(s.drop_tile(source, target).unwrap(), DropOutcome::Accepted { cost: 2 });
    assert_eq!(s.grid().get(7), Ok(Some(2)));
    assert_eq!(s.score(), 4);
}
