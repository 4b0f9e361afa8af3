//! Playfield grid, collision detection, merging and line clears

use crate::shape::Shape;
use ratatui::style::Color;

/// Fixed playfield dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Board coordinates of a shape's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Get the cell at (x, y), `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Set the cell at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self
            .cells
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `shape` placed at `pos` breaches a wall, the floor, or a settled cell.
    /// Rows above the top are never checked for occupancy.
    pub fn collides(&self, shape: &Shape, pos: Position) -> bool {
        shape.cells().any(|(dx, dy)| {
            let x = pos.x + dx;
            let y = pos.y + dy;
            if y >= BOARD_HEIGHT as i32 || x < 0 || x >= BOARD_WIDTH as i32 {
                return true;
            }
            y >= 0 && self.cells[y as usize][x as usize].is_filled()
        })
    }

    /// Write `color` into every cell covered by `shape` at `pos`
    pub fn merge(&mut self, shape: &Shape, pos: Position, color: Color) {
        for (dx, dy) in shape.cells() {
            self.set(pos.x + dx, pos.y + dy, Cell::Filled(color));
        }
    }

    /// Remove full rows, compacting everything above them downward.
    /// Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let mut write_row = BOARD_HEIGHT;

        for read_row in (0..BOARD_HEIGHT).rev() {
            if self.is_line_full(read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                self.cells[write_row] = self.cells[read_row];
            }
        }

        // Everything above the last kept row becomes fresh empty rows
        for row in &mut self.cells[..write_row] {
            *row = [Cell::Empty; BOARD_WIDTH];
        }

        write_row
    }

    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(Cell::is_filled)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(Cell::is_empty))
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;

    fn fill_row(board: &mut Board, y: i32, color: Color) {
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, y, Cell::Filled(color));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 5, Cell::Filled(Color::Red)));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(Color::Red)));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
        assert!(!board.set(0, BOARD_HEIGHT as i32, Cell::Filled(Color::Red)));
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let board = Board::new();
        let i = TetrominoType::I.base_shape();
        assert!(!board.collides(&i, Position::new(0, 0)));
        assert!(!board.collides(&i, Position::new(6, 19)));
        assert!(board.collides(&i, Position::new(-1, 0)));
        assert!(board.collides(&i, Position::new(7, 0)));
        assert!(board.collides(&i, Position::new(0, 20)));
    }

    #[test]
    fn test_collides_with_settled_cell() {
        let mut board = Board::new();
        board.set(4, 10, Cell::Filled(Color::Red));
        let o = TetrominoType::O.base_shape();
        assert!(board.collides(&o, Position::new(3, 9)));
        assert!(board.collides(&o, Position::new(4, 10)));
        assert!(!board.collides(&o, Position::new(5, 9)));
    }

    #[test]
    fn test_rows_above_top_are_not_checked() {
        let mut board = Board::new();
        fill_row(&mut board, 0, Color::Red);
        let o = TetrominoType::O.base_shape();
        // Bottom row of the O sits on row -1, top row on -2
        assert!(!board.collides(&o, Position::new(4, -2)));
        // Walls still apply above the board
        assert!(board.collides(&o, Position::new(-1, -2)));
        assert!(board.collides(&o, Position::new(4, -1)));
    }

    #[test]
    fn test_merge_writes_color() {
        let mut board = Board::new();
        let t = TetrominoType::T.base_shape();
        board.merge(&t, Position::new(0, 18), Color::Magenta);
        assert_eq!(board.get(1, 18), Some(Cell::Filled(Color::Magenta)));
        assert_eq!(board.get(0, 19), Some(Cell::Filled(Color::Magenta)));
        assert_eq!(board.get(2, 19), Some(Cell::Filled(Color::Magenta)));
        assert_eq!(board.get(0, 18), Some(Cell::Empty));
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::new();
        fill_row(&mut board, 19, Color::Cyan);
        board.set(0, 18, Cell::Filled(Color::Red));

        assert_eq!(board.clear_lines(), 1);
        // The block from row 18 drops onto the bottom row
        assert_eq!(board.get(0, 19), Some(Cell::Filled(Color::Red)));
        assert!(board.get(1, 19).unwrap().is_empty());
        assert!(board.get(0, 18).unwrap().is_empty());
    }

    #[test]
    fn test_clear_non_adjacent_lines() {
        let mut board = Board::new();
        fill_row(&mut board, 19, Color::Cyan);
        board.set(3, 18, Cell::Filled(Color::Green));
        fill_row(&mut board, 17, Color::Cyan);
        board.set(7, 16, Cell::Filled(Color::Blue));

        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.get(3, 19), Some(Cell::Filled(Color::Green)));
        assert_eq!(board.get(7, 18), Some(Cell::Filled(Color::Blue)));
        let occupied = board
            .rows()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_filled())
            .count();
        assert_eq!(occupied, 2);
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
    }

    #[test]
    fn test_clear_nothing() {
        let mut board = Board::new();
        board.set(0, 19, Cell::Filled(Color::Red));
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }
}
