use serde::Serialize;

pub mod board;
pub mod errors;
pub mod generator;
pub mod hints;
pub mod log;
pub mod placement;
pub mod render;
pub mod words;

pub use board::{Board, HintGrid, HintMark};
pub use errors::GenerateError;
pub use generator::{Generator, PlacedWord, Puzzle, SeedOutcome, Statistics};
pub use hints::{HintDictionary, HintEntry, HintNumber};
pub use words::{WordEntry, WordId, WordList};

/// The expected maximum length for a single word. Longer words still work, they just spill out of
/// the inline buffers onto the heap.
pub const MAX_WORD_LENGTH: usize = 21;

/// Zero-indexed (row, col) coords for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// Direction that a word is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Both directions, in the order placement tries them.
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// (row, col) delta for one step along this direction.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}
