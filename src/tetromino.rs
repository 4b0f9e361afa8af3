//! Tetromino catalog
//!
//! Seven fixed kinds, each a base occupancy matrix paired with a color tag.
//! Rotation never touches the catalog; it builds new `Shape`s from these templates.

use crate::shape::Shape;
use rand::Rng;
use ratatui::style::Color;

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple
    L, // Orange
    J, // Blue
    S, // Green
    Z, // Red
}

impl TetrominoType {
    /// Color tag written into board cells when a piece of this kind locks
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Magenta,
            TetrominoType::L => Color::Rgb(255, 165, 0),
            TetrominoType::J => Color::Blue,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
        }
    }

    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::L,
            TetrominoType::J,
            TetrominoType::S,
            TetrominoType::Z,
        ]
    }

    /// Uniform draw over the seven kinds
    pub fn random<R: Rng>(rng: &mut R) -> TetrominoType {
        let kinds = Self::all();
        kinds[rng.gen_range(0..kinds.len())]
    }

    /// Spawn orientation, rows listed top to bottom
    pub fn base_shape(&self) -> Shape {
        match self {
            TetrominoType::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
            TetrominoType::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            TetrominoType::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
            // L: X.    J: .X
            //    X.       .X
            //    XX       XX
            TetrominoType::L => Shape::from_rows(&[&[1, 0], &[1, 0], &[1, 1]]),
            TetrominoType::J => Shape::from_rows(&[&[0, 1], &[0, 1], &[1, 1]]),
            TetrominoType::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
            TetrominoType::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        }
    }
}
