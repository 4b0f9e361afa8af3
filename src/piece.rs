//! Active falling piece

use crate::board::{Board, Position, BOARD_WIDTH};
use crate::shape::Shape;
use crate::tetromino::TetrominoType;
use ratatui::style::Color;

/// Where every new piece's top-left corner appears
pub const SPAWN_POSITION: Position = Position::new((BOARD_WIDTH / 2) as i32 - 1, 0);

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: TetrominoType,
    /// Current orientation; starts as the kind's base shape
    pub shape: Shape,
    /// Top-left corner of `shape` in board coordinates
    pub position: Position,
}

impl Piece {
    /// Create a new piece at the spawn position
    pub fn new(kind: TetrominoType) -> Self {
        Self {
            kind,
            shape: kind.base_shape(),
            position: SPAWN_POSITION,
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Absolute board coordinates of every occupied cell
    pub fn block_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(|(dx, dy)| (self.position.x + dx, self.position.y + dy))
    }

    /// Shift horizontally by `direction`; returns false (and stays put) on collision
    pub fn shift(&mut self, direction: i32, board: &Board) -> bool {
        let candidate = self.position.offset(direction, 0);
        if board.collides(&self.shape, candidate) {
            return false;
        }
        self.position = candidate;
        true
    }

    /// Fall one row; returns false if the piece has landed
    pub fn fall(&mut self, board: &Board) -> bool {
        let candidate = self.position.offset(0, 1);
        if board.collides(&self.shape, candidate) {
            return false;
        }
        self.position = candidate;
        true
    }

    /// Quarter turn in place; discarded on collision (no wall kicks)
    pub fn rotate(&mut self, board: &Board) -> bool {
        let rotated = self.shape.rotated();
        if board.collides(&rotated, self.position) {
            return false;
        }
        self.shape = rotated;
        true
    }

    /// Lock into the board at the current position
    pub fn merge_into(&self, board: &mut Board) {
        board.merge(&self.shape, self.position, self.color());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, BOARD_HEIGHT};

    #[test]
    fn test_spawn_position() {
        let piece = Piece::new(TetrominoType::T);
        assert_eq!(piece.position, Position::new(4, 0));
        assert_eq!(piece.shape, TetrominoType::T.base_shape());
    }

    #[test]
    fn test_shift_stops_at_walls() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::I);
        let mut moves = 0;
        while piece.shift(-1, &board) {
            moves += 1;
        }
        assert_eq!(moves, 4);
        assert_eq!(piece.position.x, 0);

        while piece.shift(1, &board) {}
        assert_eq!(piece.position.x, BOARD_WIDTH as i32 - 4);
    }

    #[test]
    fn test_fall_to_floor() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::O);
        let mut rows = 0;
        while piece.fall(&board) {
            rows += 1;
        }
        assert_eq!(rows, BOARD_HEIGHT as i32 - 2);
    }

    #[test]
    fn test_rotate_keeps_position() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::T);
        assert!(piece.rotate(&board));
        assert_eq!(piece.position, SPAWN_POSITION);
        assert_eq!(piece.shape, TetrominoType::T.base_shape().rotated());
    }

    #[test]
    fn test_rotate_blocked_by_floor() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::I);
        while piece.fall(&board) {}
        // A vertical bar would poke through the floor
        assert!(!piece.rotate(&board));
        assert_eq!(piece.shape, TetrominoType::I.base_shape());
    }

    #[test]
    fn test_rotate_blocked_by_wall() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::I);
        assert!(piece.rotate(&board));
        while piece.shift(1, &board) {}
        assert_eq!(piece.position.x, BOARD_WIDTH as i32 - 1);
        // Back to horizontal would run past the right wall
        assert!(!piece.rotate(&board));
        assert_eq!(piece.shape.width(), 1);
    }

    #[test]
    fn test_merge_into() {
        let mut board = Board::new();
        let piece = Piece::new(TetrominoType::O);
        piece.merge_into(&mut board);
        let filled: Vec<_> = piece.block_positions().collect();
        assert_eq!(filled.len(), 4);
        for (x, y) in filled {
            assert_eq!(board.get(x, y), Some(Cell::Filled(Color::Yellow)));
        }
    }
}
