//! Session: clock and player commands share one ordered queue.

use std::time::Duration;

use tui_blockfall::core::{Board, GameState, SequenceSource};
use tui_blockfall::engine::{Session, QUEUE_CAPACITY};
use tui_blockfall::types::{GameAction, PieceKind, Position, GRAVITY_INTERVAL_MS};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn session(kinds: &[PieceKind]) -> Session<SequenceSource> {
    let game = GameState::new(SequenceSource::new(kinds.iter().copied()));
    Session::new(game, GRAVITY_INTERVAL_MS)
}

#[test]
fn gravity_ticks_follow_elapsed_time() {
    let mut s = session(&[PieceKind::O]);

    assert_eq!(s.advance_clock(ms(999)), 0);
    assert_eq!(s.pump(), 0);

    assert_eq!(s.advance_clock(ms(1)), 1);
    assert_eq!(s.pump(), 1);
    assert_eq!(s.game().active().pos, Position::new(1, 4));

    assert_eq!(s.advance_clock(ms(2500)), 2);
    s.pump();
    assert_eq!(s.game().active().pos, Position::new(3, 4));
}

#[test]
fn commands_apply_in_arrival_order() {
    let mut s = session(&[PieceKind::T]);

    s.submit(GameAction::MoveLeft).unwrap();
    s.advance_clock(ms(GRAVITY_INTERVAL_MS as u64));
    s.submit(GameAction::MoveLeft).unwrap();
    assert_eq!(s.pending(), 3);

    assert_eq!(s.pump(), 3);
    assert_eq!(s.game().active().pos, Position::new(1, 2));
    assert_eq!(s.applied(), 3);
}

#[test]
fn full_queue_rejects_commands() {
    let mut s = session(&[PieceKind::T]);
    for _ in 0..QUEUE_CAPACITY {
        s.submit(GameAction::Rotate).unwrap();
    }
    let err = s.submit(GameAction::MoveLeft).unwrap_err();
    assert_eq!(err.action, GameAction::MoveLeft);
    assert_eq!(s.pump(), QUEUE_CAPACITY);
}

#[test]
fn clock_stops_at_game_over_and_restarts_with_the_game() {
    let mut board = Board::new();
    board.fill_row(0, Some(PieceKind::I));
    board.fill_row(1, Some(PieceKind::I));
    let game = GameState::with_board(board, SequenceSource::repeat(PieceKind::O));
    assert!(game.game_over());

    let mut s = Session::new(game, 100);
    assert!(!s.clock().is_running());
    assert_eq!(s.advance_clock(ms(10_000)), 0);

    s.submit(GameAction::Restart).unwrap();
    s.pump();
    assert!(!s.game().game_over());
    assert!(s.clock().is_running());
    assert_eq!(s.advance_clock(ms(100)), 1);
}

#[test]
fn shutdown_drops_pending_work() {
    let mut s = session(&[PieceKind::L]);
    s.submit(GameAction::Rotate).unwrap();
    s.shutdown();

    assert_eq!(s.pending(), 0);
    assert_eq!(s.advance_clock(ms(5_000)), 0);
    assert_eq!(s.pump(), 0);
}

#[test]
fn fast_gravity_never_loses_ticks_to_a_full_queue() {
    let mut s = Session::new(GameState::new(SequenceSource::repeat(PieceKind::O)), 1);

    let mut delivered = s.advance_clock(ms(40));
    s.pump();
    delivered += s.advance_clock(Duration::ZERO);
    s.pump();

    assert_eq!(delivered, 40);
    assert_eq!(s.applied(), 40);
    // Ticks 1-19 land and lock the first O, 20-36 the second one on top of
    // it; the last four move the third O down to row 4.
    assert_eq!(s.game().pieces_locked(), 2);
    assert_eq!(s.game().active().pos, Position::new(4, 4));
}
