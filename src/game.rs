//! Core game state and logic
//!
//! `Game` owns the board, the falling piece and the score. Callers drive it
//! with discrete commands (`advance`, `move_horizontal`, `rotate`) and read it
//! back through `snapshot`. Illegal moves are silently rejected; the only
//! terminal transition is game over, which is reported once to the installed
//! `ScoreSink`.

use crate::board::Board;
use crate::piece::Piece;
use crate::score::Score;
use crate::tetromino::TetrominoType;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Constructed, nothing spawned yet
    Ready,
    /// A piece is falling
    Falling,
    /// Terminal; every command is a no-op
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    /// Handled by the driver, ignored by the engine
    Pause,
    /// Handled by the driver, ignored by the engine
    Quit,
}

/// Receives the final score when a game ends
pub trait ScoreSink {
    fn submit(&mut self, final_score: u64);
}

impl<F: FnMut(u64)> ScoreSink for F {
    fn submit(&mut self, final_score: u64) {
        self(final_score)
    }
}

/// Read-only view of the game for renderers
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub active_piece: Option<&'a Piece>,
    pub score: u64,
    pub lines: u32,
    pub drop_interval: Duration,
    pub state: GameState,
}

impl Snapshot<'_> {
    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }
}

/// The main game struct
pub struct Game {
    board: Board,
    current_piece: Option<Piece>,
    score: Score,
    state: GameState,
    rng: ChaCha8Rng,
    /// Taken when fired, so it can only ever run once
    score_sink: Option<Box<dyn ScoreSink>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a game whose piece sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            board: Board::new(),
            current_piece: None,
            score: Score::new(),
            state: GameState::Ready,
            rng: ChaCha8Rng::seed_from_u64(seed),
            score_sink: None,
        }
    }

    /// Install the callback that receives the final score
    pub fn on_game_over(&mut self, sink: impl ScoreSink + 'static) {
        self.score_sink = Some(Box::new(sink));
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            active_piece: self.current_piece.as_ref(),
            score: self.score.points,
            lines: self.score.lines,
            drop_interval: self.score.drop_interval,
            state: self.state,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn drop_interval(&self) -> Duration {
        self.score.drop_interval
    }

    /// Process an action from the input adapter
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.move_horizontal(-1),
            Action::MoveRight => self.move_horizontal(1),
            Action::SoftDrop => self.advance(),
            Action::Rotate => self.rotate(),
            Action::Pause | Action::Quit => {}
        }
    }

    /// Put a fresh random piece at the spawn position. If it overlaps the
    /// settled stack the game ends instead.
    ///
    /// An explicit call is checked the same way as a respawn after a lock, so
    /// it can end the game and report the score to the sink.
    pub fn spawn(&mut self) {
        if self.is_over() {
            return;
        }

        let piece = Piece::new(TetrominoType::random(&mut self.rng));
        if self.board.collides(&piece.shape, piece.position) {
            debug!("{:?} blocked at spawn", piece.kind);
            self.end_game();
            return;
        }

        self.current_piece = Some(piece);
        self.state = GameState::Falling;
    }

    /// Move the falling piece one column left (-1) or right (+1)
    pub fn move_horizontal(&mut self, direction: i32) {
        if self.is_over() {
            return;
        }
        if let Some(piece) = &mut self.current_piece {
            piece.shift(direction.signum(), &self.board);
        }
    }

    pub fn rotate(&mut self) {
        if self.is_over() {
            return;
        }
        if let Some(piece) = &mut self.current_piece {
            piece.rotate(&self.board);
        }
    }

    /// One gravity step: fall a row, or lock and spawn the next piece
    pub fn advance(&mut self) {
        match self.state {
            GameState::GameOver => return,
            GameState::Ready => {
                self.spawn();
                return;
            }
            GameState::Falling => {}
        }

        let Some(piece) = &mut self.current_piece else {
            return;
        };
        if piece.fall(&self.board) {
            return;
        }

        self.lock_piece();
    }

    /// Merge the current piece, clear rows, score, then spawn the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };

        piece.merge_into(&mut self.board);
        let lines_cleared = self.board.clear_lines();
        self.score.add_clear(lines_cleared);

        debug!(
            kind = ?piece.kind,
            x = piece.position.x,
            y = piece.position.y,
            lines_cleared,
            score = self.score.points,
            "piece locked"
        );
        if lines_cleared > 0 {
            debug!(
                "drop interval now {}ms",
                self.score.drop_interval.as_millis()
            );
        }

        self.spawn();
    }

    fn end_game(&mut self) {
        self.state = GameState::GameOver;
        self.current_piece = None;
        info!(
            score = self.score.points,
            lines = self.score.lines,
            "game over"
        );

        if let Some(mut sink) = self.score_sink.take() {
            sink.submit(self.score.points);
        }
    }
}
