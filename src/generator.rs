use instant::{Duration, Instant};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::{Board, HintGrid};
use crate::errors::GenerateError;
use crate::hints::{HintDictionary, HintNumber};
use crate::placement::GenerationState;
use crate::words::{WordId, WordList};
use crate::{Direction, GridCoord};

pub use crate::placement::PlacedWord;

/// What happened to the first (longest) word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SeedOutcome {
    Placed { word: String, direction: Direction },
    /// The word is longer than both dimensions, so nothing was placed at all.
    DoesNotFit { word: String },
    /// The dictionary was empty.
    NoWords,
}

/// A struct tracking statistics about the generation process.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Statistics {
    /// Single-direction placement checks.
    pub attempts: u64,
    /// Passes over the unplaced words after the first one.
    pub retry_rounds: u32,
    pub isolated_placements: u32,
    pub duration: Duration,
}

/// A finished crossword. Read-only once generated.
#[derive(Debug, Clone, Serialize)]
pub struct Puzzle {
    rows: usize,
    cols: usize,
    board: Board,
    hints: HintGrid,
    dictionary: HintDictionary,
    placed: Vec<PlacedWord>,
    unplaced: Vec<String>,
    seed: SeedOutcome,
    statistics: Statistics,
}

impl Puzzle {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hints(&self) -> &HintGrid {
        &self.hints
    }

    pub fn dictionary(&self) -> &HintDictionary {
        &self.dictionary
    }

    /// Placed words in placement order.
    pub fn placed(&self) -> &[PlacedWord] {
        &self.placed
    }

    /// Words that could not be placed anywhere, longest first.
    pub fn unplaced(&self) -> &[String] {
        &self.unplaced
    }

    pub fn seed(&self) -> &SeedOutcome {
        &self.seed
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// True if every dictionary word made it onto the board.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// The clue for the word in `direction` covering `cell`.
    pub fn clue_at(&self, cell: GridCoord, direction: Direction) -> Option<(HintNumber, &str)> {
        let number = self.hints.get(cell)?.get(direction)?;
        self.dictionary.clue(number, direction).map(|clue| (number, clue))
    }
}

/// Builds one crossword from a dictionary of words and clues.
///
/// ```
/// use crossgen::{Direction, Generator};
///
/// let puzzle = Generator::with_seed([("cat", "feline"), ("bat", "flying mammal")], 5, 5, 7)
///     .unwrap()
///     .generate();
///
/// assert!(puzzle.unplaced().is_empty());
/// assert_eq!(puzzle.dictionary().clue(2, Direction::Down), Some("flying mammal"));
/// ```
#[derive(Debug)]
pub struct Generator {
    words: WordList,
    rows: usize,
    cols: usize,
    rng: StdRng,
}

impl Generator {
    /// Validate the input and prepare a generator that shuffles isolated placements with OS
    /// entropy.
    pub fn new<I, W, C>(dictionary: I, rows: usize, cols: usize) -> Result<Generator, GenerateError>
        where
            I: IntoIterator<Item=(W, C)>,
            W: AsRef<str>,
            C: Into<String>,
    {
        Generator::with_rng(dictionary, rows, cols, StdRng::from_entropy())
    }

    /// Like `new`, but reproducible: the same dictionary, size and seed always give the same
    /// puzzle.
    pub fn with_seed<I, W, C>(
        dictionary: I,
        rows: usize,
        cols: usize,
        seed: u64,
    ) -> Result<Generator, GenerateError>
        where
            I: IntoIterator<Item=(W, C)>,
            W: AsRef<str>,
            C: Into<String>,
    {
        Generator::with_rng(dictionary, rows, cols, StdRng::seed_from_u64(seed))
    }

    fn with_rng<I, W, C>(
        dictionary: I,
        rows: usize,
        cols: usize,
        rng: StdRng,
    ) -> Result<Generator, GenerateError>
        where
            I: IntoIterator<Item=(W, C)>,
            W: AsRef<str>,
            C: Into<String>,
    {
        if rows == 0 || cols == 0 {
            return Err(GenerateError::InvalidDimensions { rows, cols });
        }

        Ok(Generator { words: WordList::normalize(dictionary)?, rows, cols, rng })
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// Run the generator. Consumes it, so a generator can only ever produce one puzzle.
    ///
    /// 1. Seed the board with the longest word.
    /// 2. Try to cross each remaining word, longest first, with the letters already placed.
    /// 3. Keep retrying the words that failed until a full round places none of them.
    /// 4. While words remain, drop the first into an empty region of its own, then go back to 3.
    pub fn generate(mut self) -> Puzzle {
        let start = Instant::now();
        let words = &self.words;
        let mut state = GenerationState::new(words, self.rows, self.cols);
        let mut statistics = Statistics::default();

        let order = words.by_length_desc();
        let mut unplaced: Vec<WordId> = vec![];

        let seed = match order.split_first() {
            None => SeedOutcome::NoWords,
            Some((&seed_id, rest)) => {
                let seed_word = words.get(seed_id).word.clone();

                match state.place_seed(seed_id) {
                    None => {
                        warn!(
                            "{} does not fit a {}x{} board; nothing placed",
                            seed_word, self.rows, self.cols,
                        );
                        unplaced.extend(order.iter().copied());
                        SeedOutcome::DoesNotFit { word: seed_word }
                    }
                    Some(direction) => {
                        let mut pending: Vec<WordId> =
                            rest.iter().copied().filter(|&id| !state.connect_word(id)).collect();
                        retry_until_fixpoint(&mut state, &mut pending, &mut statistics);

                        while !pending.is_empty() {
                            let word_id = pending.remove(0);
                            if place_isolated(&mut state, word_id, &mut self.rng) {
                                statistics.isolated_placements += 1;
                            } else {
                                debug!("no room left for {}", words.get(word_id).word);
                                unplaced.push(word_id);
                            }
                            retry_until_fixpoint(&mut state, &mut pending, &mut statistics);
                        }

                        SeedOutcome::Placed { word: seed_word, direction }
                    }
                }
            }
        };

        statistics.attempts = state.attempts;
        statistics.duration = start.elapsed();

        info!(
            "placed {} of {} words on a {}x{} board in {:?}",
            state.placed_words.len(),
            words.len(),
            self.rows,
            self.cols,
            statistics.duration,
        );

        Puzzle {
            rows: self.rows,
            cols: self.cols,
            board: state.board,
            hints: state.hints,
            dictionary: state.numberer.into_dictionary(),
            placed: state.placed_words,
            unplaced: unplaced.into_iter().map(|id| words.get(id).word.clone()).collect(),
            seed,
            statistics,
        }
    }
}

/// Re-attempt every pending word, in order, until a round places none of them. Placed words are
/// removed from `pending`.
fn retry_until_fixpoint(
    state: &mut GenerationState,
    pending: &mut Vec<WordId>,
    statistics: &mut Statistics,
) {
    while !pending.is_empty() {
        statistics.retry_rounds += 1;

        let before = pending.len();
        pending.retain(|&id| !state.connect_word(id));
        let progress = pending.len() < before;

        debug!(
            "retry round {}: placed {}, {} still pending",
            statistics.retry_rounds,
            before - pending.len(),
            pending.len(),
        );

        if !progress {
            break;
        }
    }
}

/// Every empty cell with no letter in any of its four neighbors.
fn isolated_cells(board: &Board) -> Vec<GridCoord> {
    board.cells()
        .filter(|&(coord, cell)| cell.is_none() && !board.has_letter_neighbor(coord))
        .map(|(coord, _)| coord)
        .collect()
}

/// Start the word in a randomly chosen isolated cell, trying each candidate until one takes the
/// rest of the word.
fn place_isolated(state: &mut GenerationState, word_id: WordId, rng: &mut StdRng) -> bool {
    let words = state.words;
    let glyphs = &words.get(word_id).glyphs;

    let mut candidates = isolated_cells(&state.board);
    candidates.shuffle(rng);

    for cell in candidates {
        let placed = state.attempt_word_placement(word_id, cell, Some(glyphs[0]), &[], &glyphs[1..], true);
        if let Some(direction) = placed {
            debug!("isolated {} {:?} at {:?}", words.get(word_id).word, direction, cell);
            return true;
        }
    }

    false
}
