//! End-to-end engine scenarios on a real 20x10 board with scripted pieces.

use tui_blockfall::core::{
    Board, GameState, Phase, SequenceSource, SpawnProbe, StepOutcome, Tetromino,
};
use tui_blockfall::types::{GameAction, PieceKind, Position, BOARD_COLS, SPAWN_POSITION};

fn scripted(kinds: &[PieceKind]) -> GameState<SequenceSource> {
    GameState::new(SequenceSource::new(kinds.iter().copied()))
}

#[test]
fn o_piece_falls_to_the_floor_and_locks() {
    let mut game = scripted(&[PieceKind::O, PieceKind::T]);
    assert_eq!(game.active().pos, Position::new(0, 4));

    assert_eq!(game.tick(), StepOutcome::Fell);
    assert_eq!(game.active().pos, Position::new(1, 4));

    for _ in 1..18 {
        assert_eq!(game.tick(), StepOutcome::Fell);
    }
    assert_eq!(game.active().pos, Position::new(18, 4));
    assert!(game.board().is_empty());

    // 19th tick: blocked by the floor.
    assert_eq!(game.tick(), StepOutcome::Locked);
    let board = game.board();
    for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
        assert_eq!(board.get(row, col), Some(Some(PieceKind::O)));
    }
    assert_eq!(board.occupied_count(), 4);

    assert_eq!(game.active().kind, PieceKind::T);
    assert_eq!(game.active().pos, SPAWN_POSITION);
    assert_eq!(game.pieces_locked(), 1);
}

#[test]
fn i_piece_stops_at_the_right_wall() {
    let mut game = scripted(&[PieceKind::I]);
    let width = game.active().shape.cols() as i8;

    let moved = (0..6).filter(|_| game.move_right()).count();
    assert_eq!(moved, 2);
    assert_eq!(game.active().pos.col, BOARD_COLS as i8 - width);
    assert_eq!(game.active().pos.col, 6);
}

#[test]
fn lateral_move_rejected_at_left_wall() {
    let mut game = scripted(&[PieceKind::T]);
    while game.move_left() {}
    assert_eq!(game.active().pos.col, 0);

    let before = game.active();
    assert!(!game.move_left());
    assert_eq!(game.active(), before);
}

#[test]
fn lock_on_blocked_drop_with_gap_under_the_piece() {
    let mut board = Board::new();
    board.fill_row(19, Some(PieceKind::Z));
    board.set(19, 4, None);
    board.set(19, 5, None);

    let mut game = GameState::with_board(board, SequenceSource::new([PieceKind::O, PieceKind::L]));
    let mut ticks = 0;
    while game.tick() == StepOutcome::Fell {
        ticks += 1;
        assert!(ticks < 40, "piece never locked");
    }

    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.board().occupied_count(), BOARD_COLS as usize + 2);
    assert_eq!(game.board().get(18, 4), Some(Some(PieceKind::O)));
    assert_eq!(game.board().get(19, 5), Some(Some(PieceKind::O)));
    assert_eq!(game.active().kind, PieceKind::L);
    assert_eq!(game.active().pos, SPAWN_POSITION);
}

#[test]
fn full_top_rows_end_the_game_on_next_lock() {
    let mut board = Board::new();
    board.fill_row(0, Some(PieceKind::J));
    board.fill_row(1, Some(PieceKind::J));

    let active = Tetromino::at(PieceKind::O, Position::new(17, 0));
    let mut game = GameState::with_active(board, active, SequenceSource::repeat(PieceKind::O))
        .expect("piece fits below the full rows");

    assert_eq!(game.tick(), StepOutcome::Fell);
    assert_eq!(game.tick(), StepOutcome::ToppedOut);
    assert!(game.game_over());

    let frozen = *game.board();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::Tick,
    ] {
        assert!(!game.apply_action(action), "{action:?} changed a finished game");
        assert_eq!(*game.board(), frozen);
    }
    assert_eq!(game.tick(), StepOutcome::Ignored);
}

#[test]
fn fresh_draw_probe_checks_a_different_shape() {
    // With the top rows free except the I spawn cells, an O spawn fits but an
    // I probe would collide.
    let mut board = Board::new();
    board.set(0, 7, Some(PieceKind::Z));

    let active = Tetromino::at(PieceKind::O, Position::new(17, 0));
    let probe_source = SequenceSource::new([PieceKind::O, PieceKind::I]);
    let mut fresh = GameState::with_active(board, active, probe_source)
        .expect("fits")
        .with_spawn_probe(SpawnProbe::FreshDraw);
    fresh.tick();
    assert_eq!(fresh.tick(), StepOutcome::ToppedOut);

    let mut next = GameState::with_active(board, active, SequenceSource::new([PieceKind::O, PieceKind::I]))
        .expect("fits");
    next.tick();
    assert_eq!(next.tick(), StepOutcome::Locked);
    assert_eq!(next.active().kind, PieceKind::O);
}

#[test]
fn rotation_near_wall_is_rejected_without_kicks() {
    let mut game = scripted(&[PieceKind::I]);
    // Vertical I at the right wall; turning back to horizontal would overflow.
    assert!(game.rotate());
    while game.move_right() {}
    assert_eq!(game.active().pos.col, BOARD_COLS as i8 - 1);

    let before = game.active();
    assert!(!game.rotate());
    assert_eq!(game.active(), before);
}

#[test]
fn restart_clears_the_board_and_runs_again() {
    let mut board = Board::new();
    board.fill_row(0, Some(PieceKind::S));
    let mut game = GameState::with_board(board, SequenceSource::new([PieceKind::T, PieceKind::O]));
    assert!(game.game_over());

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.phase(), Phase::Running);
    assert!(game.board().is_empty());
    assert_eq!(game.active().kind, PieceKind::O);
}
