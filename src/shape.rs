//! Piece occupancy matrices and their rotation

/// A rectangular occupancy matrix, rows listed top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Build a shape from rows of 0/1 cells
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|&cell| cell != 0).collect())
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Occupied cells as (x, y) offsets from the shape's top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }

    /// Quarter turn: new row `i` takes, from each current row top to bottom,
    /// the cell at column `width - 1 - i`. An R×C shape becomes C×R.
    pub fn rotated(&self) -> Shape {
        let width = self.width();
        let rows = (0..width)
            .map(|i| self.rows.iter().map(|row| row[width - 1 - i]).collect())
            .collect();
        Shape { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;

    #[test]
    fn test_rotation_swaps_dimensions() {
        let shape = Shape::from_rows(&[&[1, 0], &[1, 0], &[1, 1]]);
        let rotated = shape.rotated();
        assert_eq!(rotated.height(), 2);
        assert_eq!(rotated.width(), 3);
        assert_eq!(rotated, Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]));
    }

    #[test]
    fn test_i_piece_turns_vertical() {
        let rotated = TetrominoType::I.base_shape().rotated();
        assert_eq!(rotated.width(), 1);
        assert_eq!(rotated.height(), 4);
        assert_eq!(rotated.cells().count(), 4);
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for kind in TetrominoType::all() {
            let base = kind.base_shape();
            let turned = base.rotated().rotated().rotated().rotated();
            assert_eq!(turned, base, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotation_keeps_cell_count() {
        for kind in TetrominoType::all() {
            assert_eq!(kind.base_shape().rotated().cells().count(), 4);
        }
    }

    #[test]
    fn test_cells_are_row_major() {
        let t = TetrominoType::T.base_shape();
        let cells: Vec<_> = t.cells().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
