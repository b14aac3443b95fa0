//! The placement engine: seeding the board, connecting words to letters already on it, and the
//! collision rules that keep every placement a legal crossword.
//!
//! Each attempt is a transaction. `Placement::plan` reads the live board and collects the cells
//! the word would write; nothing is touched unless every cell passes, in which case
//! `GenerationState::commit` applies the writes, extends the letter index and numbers the word.

use std::collections::HashMap;

use bit_set::BitSet;
use log::debug;
use serde::Serialize;
use smallvec::SmallVec;

use crate::board::{Board, HintGrid};
use crate::hints::{HintNumber, HintNumberer};
use crate::words::{WordId, WordList};
use crate::{Direction, GridCoord, MAX_WORD_LENGTH};

/// Where every placed letter lives, in the order the letters were written.
pub type LetterIndex = HashMap<char, Vec<GridCoord>>;

/// A word that made it onto the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedWord {
    pub word: String,
    pub start: GridCoord,
    pub direction: Direction,
    pub number: HintNumber,
    /// True if the word was dropped into an empty region rather than crossing another word.
    pub isolated: bool,
}

impl PlacedWord {
    /// Coords of each letter of the word, first to last.
    pub fn cells(&self) -> impl Iterator<Item=GridCoord> + '_ {
        let (d_row, d_col) = self.direction.step();
        (0..self.word.chars().count()).map(move |idx| {
            (
                self.start.0 + idx * d_row as usize,
                self.start.1 + idx * d_col as usize,
            )
        })
    }
}

/// A validated but uncommitted placement.
#[derive(Debug)]
pub struct Placement {
    pub direction: Direction,
    /// The cell the word is anchored on.
    pub anchor: GridCoord,
    /// True when the anchor is the word's first letter.
    pub anchored_at_start: bool,
    /// Every cell of the word, first to last.
    pub cells: SmallVec<[GridCoord; MAX_WORD_LENGTH]>,
    /// The cells that are currently empty and will receive a letter.
    pub writes: SmallVec<[(GridCoord, char); MAX_WORD_LENGTH]>,
}

impl Placement {
    /// Check whether a word can go through `anchor` in `direction`, with `first_half` before the
    /// anchor and `second_half` after it. `anchor_letter` is `None` when the anchor already holds
    /// the shared letter, or the letter to write there when the anchor is an empty cell.
    ///
    /// Returns `None` if:
    /// - either half would leave the board,
    /// - the cell just before or just after the word holds a letter,
    /// - a cell holds a different letter, or is empty with a letter beside it (across the
    ///   word's direction),
    /// - a cell holds the same letter but already belongs to a word in this direction.
    pub fn plan(
        board: &Board,
        hints: &HintGrid,
        anchor: GridCoord,
        anchor_letter: Option<char>,
        first_half: &[char],
        second_half: &[char],
        direction: Direction,
    ) -> Option<Placement> {
        let (d_row, d_col) = direction.step();
        let before = first_half.len() as isize;
        let after = second_half.len() as isize;

        let start = board.offset(anchor, -before * d_row, -before * d_col)?;
        board.offset(anchor, after * d_row, after * d_col)?;

        if !board.is_empty_at_offset(start, -d_row, -d_col)
            || !board.is_empty_at_offset(anchor, (after + 1) * d_row, (after + 1) * d_col) {
            return None;
        }

        // The neighbors that must stay empty next to a freshly written letter.
        let (side_row, side_col) = direction.perpendicular().step();

        let mut placement = Placement {
            direction,
            anchor,
            anchored_at_start: first_half.is_empty(),
            cells: SmallVec::new(),
            writes: SmallVec::new(),
        };

        let letters = first_half.iter().map(|&letter| Some(letter))
            .chain(std::iter::once(anchor_letter))
            .chain(second_half.iter().map(|&letter| Some(letter)));

        for (idx, letter) in letters.enumerate() {
            let cell = (start.0 + idx * d_row as usize, start.1 + idx * d_col as usize);
            let runs_this_way = hints.get(cell).and_then(|mark| mark.get(direction)).is_some();

            match (board.get(cell), letter) {
                // The shared letter, or a later crossing: fine unless a word in this direction
                // already covers it.
                (Some(_), None) => {
                    if runs_this_way {
                        return None;
                    }
                }
                (Some(existing), Some(letter)) => {
                    if existing != letter || runs_this_way {
                        return None;
                    }
                }
                (None, Some(letter)) => {
                    if !board.is_empty_at_offset(cell, side_row, side_col)
                        || !board.is_empty_at_offset(cell, -side_row, -side_col) {
                        return None;
                    }
                    placement.writes.push((cell, letter));
                }
                (None, None) => return None,
            }
            placement.cells.push(cell);
        }

        Some(placement)
    }
}

/// Everything one generation run mutates. Owned by a single run and never shared.
#[derive(Debug)]
pub struct GenerationState<'a> {
    pub words: &'a WordList,
    pub board: Board,
    pub hints: HintGrid,
    pub numberer: HintNumberer,
    pub placed_letters: LetterIndex,
    pub placed_words: Vec<PlacedWord>,
    placed_ids: BitSet,
    /// Number of single-direction placement checks performed.
    pub attempts: u64,
}

impl<'a> GenerationState<'a> {
    pub fn new(words: &'a WordList, rows: usize, cols: usize) -> GenerationState<'a> {
        GenerationState {
            words,
            board: Board::new(rows, cols),
            hints: HintGrid::new(rows, cols),
            numberer: HintNumberer::new(),
            placed_letters: HashMap::new(),
            placed_words: vec![],
            placed_ids: BitSet::with_capacity(words.len()),
            attempts: 0,
        }
    }

    pub fn is_placed(&self, word_id: WordId) -> bool {
        self.placed_ids.contains(word_id)
    }

    /// Put `word_id` through the center of the empty board: across if it fits the columns,
    /// otherwise down if it fits the rows. Returns the direction used, or `None` if the word fits
    /// neither way.
    pub fn place_seed(&mut self, word_id: WordId) -> Option<Direction> {
        let words = self.words;
        let entry = words.get(word_id);
        let len = entry.len();
        let (mid_row, mid_col) = (self.board.rows() / 2, self.board.cols() / 2);

        let (direction, start) = if len <= self.board.cols() {
            (Direction::Across, (mid_row, mid_col - len / 2))
        } else if len <= self.board.rows() {
            (Direction::Down, (mid_row - len / 2, mid_col))
        } else {
            return None;
        };

        self.attempts += 1;
        let placement = Placement::plan(
            &self.board,
            &self.hints,
            start,
            Some(entry.glyphs[0]),
            &[],
            &entry.glyphs[1..],
            direction,
        )?;
        self.commit(placement, word_id, false);

        debug!("seeded {} {:?} at {:?}", entry.word, direction, start);
        Some(direction)
    }

    /// Try to place a word through `anchor`, across first and then down. The word is split around
    /// the anchor into `first_half` and `second_half`; see `Placement::plan` for `anchor_letter`.
    /// On success the placement is committed and its direction returned.
    pub fn attempt_word_placement(
        &mut self,
        word_id: WordId,
        anchor: GridCoord,
        anchor_letter: Option<char>,
        first_half: &[char],
        second_half: &[char],
        isolated: bool,
    ) -> Option<Direction> {
        for direction in Direction::ALL {
            self.attempts += 1;

            let placement = Placement::plan(
                &self.board,
                &self.hints,
                anchor,
                anchor_letter,
                first_half,
                second_half,
                direction,
            );

            if let Some(placement) = placement {
                self.commit(placement, word_id, isolated);
                return Some(direction);
            }
        }

        None
    }

    /// Try to cross `word_id` with a letter already on the board. Letters of the word are tried
    /// left to right, and for each letter every occurrence on the board in the order it was
    /// written; the first placement that succeeds wins. A word already on the board counts as
    /// connected and is not placed again.
    pub fn connect_word(&mut self, word_id: WordId) -> bool {
        if self.is_placed(word_id) {
            return true;
        }

        let words = self.words;
        let glyphs = &words.get(word_id).glyphs;

        for (idx, letter) in glyphs.iter().enumerate() {
            let occurrences = match self.placed_letters.get(letter) {
                Some(occurrences) => occurrences.clone(),
                None => continue,
            };

            for anchor in occurrences {
                let placed = self.attempt_word_placement(
                    word_id,
                    anchor,
                    None,
                    &glyphs[..idx],
                    &glyphs[idx + 1..],
                    false,
                );
                if placed.is_some() {
                    return true;
                }
            }
        }

        false
    }

    /// Apply a validated placement.
    ///
    /// A word anchored at its own first letter takes over the number of the perpendicular word
    /// starting in the same cell. Otherwise, or if that number already holds a clue in this
    /// direction, it gets a fresh number.
    pub fn commit(&mut self, placement: Placement, word_id: WordId, isolated: bool) {
        let words = self.words;
        let entry = words.get(word_id);
        let direction = placement.direction;

        for &(cell, letter) in &placement.writes {
            self.board.set(cell, letter);
            self.placed_letters.entry(letter).or_default().push(cell);
        }

        let shared = self.shared_start_number(&placement)
            .filter(|&number| self.numberer.merge(number, direction, &entry.clue));
        let number = match shared {
            Some(number) => number,
            None => self.numberer.assign(direction, &entry.clue),
        };

        for &cell in &placement.cells {
            self.hints.mark(cell, direction, number);
        }

        self.placed_ids.insert(word_id);
        self.placed_words.push(PlacedWord {
            word: entry.word.clone(),
            start: placement.cells[0],
            direction,
            number,
            isolated,
        });
    }

    /// The number of the perpendicular word that starts at the placement's anchor, if the
    /// placement also starts there.
    fn shared_start_number(&self, placement: &Placement) -> Option<HintNumber> {
        if !placement.anchored_at_start {
            return None;
        }

        let crossing = placement.direction.perpendicular();
        let (d_row, d_col) = crossing.step();
        if self.hints.is_marked_at_offset(placement.anchor, -d_row, -d_col) {
            return None;
        }

        self.hints.get(placement.anchor)?.get(crossing)
    }
}
