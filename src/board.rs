use serde::{Serialize, Serializer};

use crate::hints::HintNumber;
use crate::{Direction, GridCoord};

/// Move `coord` by (`d_row`, `d_col`), returning `None` if that leaves a `rows` x `cols` grid.
fn offset(coord: GridCoord, d_row: isize, d_col: isize, rows: usize, cols: usize) -> Option<GridCoord> {
    let row = coord.0.checked_add_signed(d_row)?;
    let col = coord.1.checked_add_signed(d_col)?;
    if row < rows && col < cols { Some((row, col)) } else { None }
}

/// The letter matrix. `None` is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Option<char>>>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Board {
        Board { rows, cols, cells: vec![vec![None; cols]; rows] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, (row, col): GridCoord) -> Option<char> {
        self.cells.get(row).and_then(|cells| cells.get(col).copied().flatten())
    }

    pub(crate) fn set(&mut self, (row, col): GridCoord, letter: char) {
        self.cells[row][col] = Some(letter);
    }

    /// The cell at the given offset from `coord`, if it lies on the board.
    pub fn offset(&self, coord: GridCoord, d_row: isize, d_col: isize) -> Option<GridCoord> {
        offset(coord, d_row, d_col, self.rows, self.cols)
    }

    /// Is the cell at the given offset from `coord` free of letters? Cells off the board count
    /// as empty.
    pub fn is_empty_at_offset(&self, coord: GridCoord, d_row: isize, d_col: isize) -> bool {
        self.offset(coord, d_row, d_col).map_or(true, |cell| self.get(cell).is_none())
    }

    /// Does any of the four orthogonal neighbors of `coord` hold a letter?
    pub fn has_letter_neighbor(&self, coord: GridCoord) -> bool {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .iter()
            .any(|&(d_row, d_col)| !self.is_empty_at_offset(coord, d_row, d_col))
    }

    pub fn row(&self, row: usize) -> &[Option<char>] {
        &self.cells[row]
    }

    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item=(GridCoord, Option<char>)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(col, &cell)| ((row, col), cell))
        })
    }

    pub fn letter_count(&self) -> usize {
        self.cells().filter(|(_, cell)| cell.is_some()).count()
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

/// The hint numbers of the across and down words passing through a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HintMark {
    pub across: Option<HintNumber>,
    pub down: Option<HintNumber>,
}

impl HintMark {
    pub fn get(&self, direction: Direction) -> Option<HintNumber> {
        match direction {
            Direction::Across => self.across,
            Direction::Down => self.down,
        }
    }

    fn set(&mut self, direction: Direction, number: HintNumber) {
        match direction {
            Direction::Across => self.across = Some(number),
            Direction::Down => self.down = Some(number),
        }
    }
}

/// Serialized as `[across, down]`.
impl Serialize for HintMark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.across, self.down).serialize(serializer)
    }
}

/// The hint-number matrix that parallels the `Board`. Every letter cell carries the number of
/// each word that covers it; empty cells carry nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Option<HintMark>>>,
}

impl HintGrid {
    pub fn new(rows: usize, cols: usize) -> HintGrid {
        HintGrid { rows, cols, cells: vec![vec![None; cols]; rows] }
    }

    pub fn get(&self, (row, col): GridCoord) -> Option<&HintMark> {
        self.cells.get(row).and_then(|cells| cells.get(col)).and_then(Option::as_ref)
    }

    pub(crate) fn mark(&mut self, (row, col): GridCoord, direction: Direction, number: HintNumber) {
        self.cells[row][col].get_or_insert_with(HintMark::default).set(direction, number);
    }

    /// Does the cell at the given offset from `coord` carry any mark? Cells off the grid don't.
    pub fn is_marked_at_offset(&self, coord: GridCoord, d_row: isize, d_col: isize) -> bool {
        offset(coord, d_row, d_col, self.rows, self.cols)
            .map_or(false, |cell| self.get(cell).is_some())
    }

    /// The number of the word in `direction` that starts at `coord`, if any. A word starts where
    /// its predecessor cell carries no number in the same direction.
    pub fn starts_at(&self, coord: GridCoord, direction: Direction) -> Option<HintNumber> {
        let number = self.get(coord)?.get(direction)?;
        let (d_row, d_col) = direction.step();
        let previous = offset(coord, -d_row, -d_col, self.rows, self.cols)
            .and_then(|cell| self.get(cell))
            .and_then(|mark| mark.get(direction));

        if previous == Some(number) { None } else { Some(number) }
    }

    pub fn row(&self, row: usize) -> &[Option<HintMark>] {
        &self.cells[row]
    }
}

impl Serialize for HintGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}
