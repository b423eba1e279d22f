//! Game state module - the engine
//!
//! Owns the board, the active piece and the running/game-over phase, and
//! applies the four player commands plus the gravity tick. Every rejected
//! command leaves the state untouched; game over is a normal terminal phase in
//! which every command except a restart is ignored.

use crate::board::Board;
use crate::collision::is_valid_move;
use crate::rng::{PieceSource, UniformSource};
use crate::shapes::{random_shape, shape_of, Shape};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::transform::rotate_cw;
use crate::types::{GameAction, PieceKind, Position, SPAWN_POSITION};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub pos: Position,
}

impl Tetromino {
    /// Canonical orientation at the spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_POSITION)
    }

    /// Canonical orientation at an arbitrary position
    pub fn at(kind: PieceKind, pos: Position) -> Self {
        Self {
            kind,
            shape: shape_of(kind),
            pos,
        }
    }

    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dr, dc)| (self.pos.row + dr, self.pos.col + dc))
    }

    pub fn fits(&self, board: &Board) -> bool {
        is_valid_move(board, &self.shape, self.pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Which shape is tested at the spawn position after a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnProbe {
    /// The piece that was actually spawned.
    #[default]
    NextPiece,
    /// A second, independently drawn shape; the spawned piece itself is not
    /// checked and may overlap the stack.
    FreshDraw,
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece locked and a new one spawned.
    Locked,
    /// The piece locked and the spawn probe failed; the game is over.
    ToppedOut,
    /// Nothing happened (game already over).
    Ignored,
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState<S = UniformSource> {
    board: Board,
    active: Tetromino,
    phase: Phase,
    probe: SpawnProbe,
    source: S,
    pieces_locked: u32,
}

impl<S: PieceSource> GameState<S> {
    /// Fresh session: empty board, random piece at the spawn position
    pub fn new(source: S) -> Self {
        Self::with_board(Board::new(), source)
    }

    /// Session on a pre-arranged board, spawning a random piece.
    ///
    /// If the spawned piece does not fit, the session starts in `GameOver`.
    pub fn with_board(board: Board, mut source: S) -> Self {
        let (kind, _) = random_shape(&mut source);
        let active = Tetromino::new(kind);
        let phase = if active.fits(&board) {
            Phase::Running
        } else {
            tracing::info!(kind = kind.as_str(), "spawn blocked on a new session");
            Phase::GameOver
        };

        Self {
            board,
            active,
            phase,
            probe: SpawnProbe::default(),
            source,
            pieces_locked: 0,
        }
    }

    /// Session with an explicit active piece. `None` if the piece does not fit.
    pub fn with_active(board: Board, active: Tetromino, source: S) -> Option<Self> {
        if !active.fits(&board) {
            return None;
        }
        Some(Self {
            board,
            active,
            phase: Phase::Running,
            probe: SpawnProbe::default(),
            source,
            pieces_locked: 0,
        })
    }

    pub fn with_spawn_probe(mut self, probe: SpawnProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn spawn_probe(&self) -> SpawnProbe {
        self.probe
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Shift the piece one column toward the sign of `dir`; `0` is a no-op.
    /// Returns whether it moved.
    pub fn move_lateral(&mut self, dir: i8) -> bool {
        if self.game_over() || dir == 0 {
            return false;
        }
        let candidate = self.active.pos.offset(0, dir.signum());
        if !is_valid_move(&self.board, &self.active.shape, candidate) {
            return false;
        }
        self.active.pos = candidate;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.move_lateral(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_lateral(1)
    }

    /// Rotate clockwise in place. Rejected rotations keep the old shape; no kicks.
    pub fn rotate(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        let rotated = rotate_cw(&self.active.shape);
        if !is_valid_move(&self.board, &rotated, self.active.pos) {
            return false;
        }
        self.active.shape = rotated;
        true
    }

    /// Player-requested drop: same transition as [`GameState::tick`].
    pub fn soft_drop(&mut self) -> StepOutcome {
        self.tick()
    }

    /// Gravity step: fall one row, or lock and spawn when blocked.
    pub fn tick(&mut self) -> StepOutcome {
        if self.game_over() {
            return StepOutcome::Ignored;
        }

        let candidate = self.active.pos.offset(1, 0);
        if is_valid_move(&self.board, &self.active.shape, candidate) {
            self.active.pos = candidate;
            return StepOutcome::Fell;
        }

        self.lock_and_spawn()
    }

    fn lock_and_spawn(&mut self) -> StepOutcome {
        let locked = self.active;
        self.board = self.board.merged(&locked.shape, locked.pos, locked.kind);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        tracing::debug!(
            kind = locked.kind.as_str(),
            row = locked.pos.row,
            col = locked.pos.col,
            locked = self.pieces_locked,
            "piece locked"
        );

        let (kind, _) = random_shape(&mut self.source);
        self.active = Tetromino::new(kind);

        let spawn_ok = match self.probe {
            SpawnProbe::NextPiece => self.active.fits(&self.board),
            SpawnProbe::FreshDraw => {
                let (_, probe) = random_shape(&mut self.source);
                is_valid_move(&self.board, &probe, SPAWN_POSITION)
            }
        };

        if spawn_ok {
            tracing::debug!(kind = kind.as_str(), "piece spawned");
            StepOutcome::Locked
        } else {
            self.phase = Phase::GameOver;
            tracing::info!(locked = self.pieces_locked, "game over: spawn blocked");
            StepOutcome::ToppedOut
        }
    }

    /// Throw the session away: empty board, new piece, running again.
    pub fn restart(&mut self) {
        tracing::info!(locked = self.pieces_locked, "restarting session");
        self.board = Board::new();
        self.pieces_locked = 0;
        let (kind, _) = random_shape(&mut self.source);
        self.active = Tetromino::new(kind);
        self.phase = Phase::Running;
    }

    /// Board with the active piece merged in. Never mutates.
    pub fn display_board(&self) -> Board {
        self.board
            .merged(&self.active.shape, self.active.pos, self.active.kind)
    }

    /// Apply a command. Returns whether the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => self.soft_drop() != StepOutcome::Ignored,
            GameAction::Tick => self.tick() != StepOutcome::Ignored,
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.display_board().write_grid(&mut out.board);
        out.active = Some(ActiveSnapshot::from(self.active));
        out.game_over = self.game_over();
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<UniformSource> {
    fn default() -> Self {
        Self::new(UniformSource::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::{BOARD_COLS, BOARD_ROWS};

    fn game_with(kinds: &[PieceKind]) -> GameState<SequenceSource> {
        GameState::new(SequenceSource::new(kinds.iter().copied()))
    }

    #[test]
    fn test_new_game_state() {
        let state = game_with(&[PieceKind::T]);

        assert_eq!(state.phase(), Phase::Running);
        assert!(state.board().is_empty());
        assert_eq!(state.active().kind, PieceKind::T);
        assert_eq!(state.active().pos, SPAWN_POSITION);
        assert_eq!(state.pieces_locked(), 0);
    }

    #[test]
    fn test_tick_moves_down_one_row() {
        let mut state = game_with(&[PieceKind::O]);
        assert_eq!(state.tick(), StepOutcome::Fell);
        assert_eq!(state.active().pos, Position::new(1, 4));
    }

    #[test]
    fn test_soft_drop_matches_tick() {
        let mut a = game_with(&[PieceKind::L, PieceKind::S]);
        let mut b = game_with(&[PieceKind::L, PieceKind::S]);
        for _ in 0..25 {
            assert_eq!(a.tick(), b.soft_drop());
            assert_eq!(a.active(), b.active());
            assert_eq!(a.board(), b.board());
        }
    }

    #[test]
    fn test_move_left_blocked_at_wall() {
        let board = Board::new();
        let piece = Tetromino::at(PieceKind::O, Position::new(5, 0));
        let mut state =
            GameState::with_active(board, piece, SequenceSource::repeat(PieceKind::O)).unwrap();

        assert!(!state.move_left());
        assert_eq!(state.active().pos, Position::new(5, 0));
        assert!(state.move_right());
        assert_eq!(state.active().pos, Position::new(5, 1));
    }

    #[test]
    fn test_move_lateral_steps_one_column() {
        let mut state = game_with(&[PieceKind::T]);
        let start = state.active().pos;

        assert!(!state.move_lateral(0));
        assert_eq!(state.active().pos, start);

        assert!(state.move_lateral(5));
        assert_eq!(state.active().pos, start.offset(0, 1));
        assert!(state.move_lateral(-3));
        assert_eq!(state.active().pos, start);
    }

    #[test]
    fn test_move_blocked_by_stack() {
        let mut board = Board::new();
        board.set(0, 3, Some(PieceKind::Z));
        let mut state = GameState::with_board(board, SequenceSource::repeat(PieceKind::O));

        assert!(!state.move_left());
        assert!(state.move_right());
    }

    #[test]
    fn test_rotate_commits_new_shape() {
        let mut state = game_with(&[PieceKind::T]);
        let before = state.active();
        assert!(state.rotate());
        assert_eq!(state.active().pos, before.pos);
        assert_eq!(state.active().shape, rotate_cw(&before.shape));
    }

    #[test]
    fn test_rotate_rejected_near_floor_keeps_shape() {
        // Horizontal I on the floor; vertical I would need rows 19..22.
        let piece = Tetromino::at(PieceKind::I, Position::new(19, 3));
        let mut state =
            GameState::with_active(Board::new(), piece, SequenceSource::repeat(PieceKind::I))
                .unwrap();

        assert!(!state.rotate());
        assert_eq!(state.active(), piece);
    }

    #[test]
    fn test_lock_spawns_next_piece() {
        let mut state = game_with(&[PieceKind::O, PieceKind::T]);
        let mut outcome = StepOutcome::Fell;
        let mut ticks = 0;
        while outcome == StepOutcome::Fell {
            outcome = state.tick();
            ticks += 1;
        }

        assert_eq!(outcome, StepOutcome::Locked);
        assert_eq!(ticks, 19);
        assert_eq!(state.pieces_locked(), 1);
        assert_eq!(state.active().kind, PieceKind::T);
        assert_eq!(state.active().pos, SPAWN_POSITION);
        assert_eq!(state.board().occupied_count(), 4);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut board = Board::new();
        board.fill_row(0, Some(PieceKind::I));
        board.fill_row(1, Some(PieceKind::I));
        let piece = Tetromino::at(PieceKind::O, Position::new(18, 0));
        let mut state =
            GameState::with_active(board, piece, SequenceSource::repeat(PieceKind::O)).unwrap();

        assert_eq!(state.tick(), StepOutcome::ToppedOut);
        assert!(state.game_over());

        let frozen = *state.board();
        let active = state.active();
        assert!(!state.move_left());
        assert!(!state.move_right());
        assert!(!state.rotate());
        assert_eq!(state.tick(), StepOutcome::Ignored);
        assert_eq!(state.soft_drop(), StepOutcome::Ignored);
        assert_eq!(*state.board(), frozen);
        assert_eq!(state.active(), active);
    }

    #[test]
    fn test_fresh_draw_probe_uses_second_draw() {
        // Spawned piece is I (fits beside the block), probe draws O (blocked).
        let mut board = Board::new();
        board.set(1, 5, Some(PieceKind::Z));
        let piece = Tetromino::at(PieceKind::O, Position::new(17, 0));
        let source = SequenceSource::new([PieceKind::I, PieceKind::O]);
        let mut state = GameState::with_active(board, piece, source)
            .unwrap()
            .with_spawn_probe(SpawnProbe::FreshDraw);

        assert_eq!(state.tick(), StepOutcome::Fell);
        assert_eq!(state.tick(), StepOutcome::ToppedOut);
        assert_eq!(state.active().kind, PieceKind::I);
        assert_eq!(state.source().drawn(), 2);
    }

    #[test]
    fn test_next_piece_probe_checks_spawned_piece() {
        let mut board = Board::new();
        board.set(1, 5, Some(PieceKind::Z));
        let piece = Tetromino::at(PieceKind::O, Position::new(17, 0));
        let source = SequenceSource::new([PieceKind::I, PieceKind::O]);
        let mut state = GameState::with_active(board, piece, source).unwrap();

        state.tick();
        assert_eq!(state.tick(), StepOutcome::Locked);
        assert!(!state.game_over());
        assert_eq!(state.source().drawn(), 1);
    }

    #[test]
    fn test_display_board_does_not_mutate() {
        let state = game_with(&[PieceKind::S]);
        let display = state.display_board();
        assert_eq!(display.occupied_count(), 4);
        assert!(state.board().is_empty());
        assert!(display.is_occupied(0, 5));
        assert!(display.is_occupied(1, 4));
    }

    #[test]
    fn test_restart_resets_board_and_phase() {
        let mut board = Board::new();
        board.fill_row(0, Some(PieceKind::I));
        let mut state = GameState::with_board(board, SequenceSource::repeat(PieceKind::T));
        assert!(state.game_over());

        assert!(state.apply_action(GameAction::Restart));
        assert!(!state.game_over());
        assert!(state.board().is_empty());
        assert_eq!(state.pieces_locked(), 0);
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = game_with(&[PieceKind::T]);
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active().pos.col, 3);
        assert!(state.apply_action(GameAction::MoveRight));
        assert!(state.apply_action(GameAction::Tick));
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.active().pos, Position::new(2, 4));
        assert!(state.apply_action(GameAction::Rotate));
    }

    #[test]
    fn test_snapshot_reports_display_grid() {
        let state = game_with(&[PieceKind::O]);
        let snap = state.snapshot();
        assert!(!snap.game_over);
        assert_eq!(snap.board.len(), BOARD_ROWS as usize);
        assert_eq!(snap.board[0].len(), BOARD_COLS as usize);
        assert_eq!(snap.board[0][4], Some(PieceKind::O));
        assert_eq!(snap.board[1][5], Some(PieceKind::O));
        assert!(snap.active.unwrap().covers(1, 5));
    }

    #[test]
    fn test_with_active_rejects_overlap() {
        let mut board = Board::new();
        board.set(10, 0, Some(PieceKind::J));
        let piece = Tetromino::at(PieceKind::O, Position::new(9, 0));
        let source = SequenceSource::repeat(PieceKind::O);
        assert!(GameState::with_active(board, piece, source).is_none());
    }
}
