//! Structural checks shared across integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use crossgen::{Direction, GridCoord, Puzzle};

/// Verify the invariants every generated puzzle must satisfy:
///
/// 1. Each placed word reads back from the board along its direction.
/// 2. Every letter belongs to some placed word, and every placed cell holds a letter.
/// 3. Two orthogonally adjacent letters are always consecutive letters of one placed word.
/// 4. Every cell of a placed word carries that word's number in the word's direction, and only
///    letter cells carry marks.
/// 5. Hint numbers are exactly `1..=max`, each used by at most one word per direction.
pub fn check_invariants(puzzle: &Puzzle) -> Result<(), String> {
    let board = puzzle.board();
    let hints = puzzle.hints();

    let mut covered: HashSet<GridCoord> = HashSet::new();
    let mut links: HashSet<(GridCoord, GridCoord)> = HashSet::new();
    let mut numbers: HashSet<(u32, Direction)> = HashSet::new();

    for placed in puzzle.placed() {
        let cells: Vec<GridCoord> = placed.cells().collect();

        let read: String = cells.iter().map(|&cell| board.get(cell).unwrap_or('.')).collect();
        if read != placed.word {
            return Err(format!("{} reads back as {} from {:?}", placed.word, read, placed.start));
        }

        for &cell in &cells {
            let mark = hints.get(cell).and_then(|mark| mark.get(placed.direction));
            if mark != Some(placed.number) {
                return Err(format!("{} cell {:?} is marked {:?}", placed.word, cell, mark));
            }
        }

        covered.extend(cells.iter().copied());
        links.extend(cells.windows(2).map(|pair| (pair[0], pair[1])));

        if !numbers.insert((placed.number, placed.direction)) {
            return Err(format!("{} {:?} reuses number {}", placed.word, placed.direction, placed.number));
        }
    }

    for (coord, cell) in board.cells() {
        if cell.is_some() != covered.contains(&coord) {
            return Err(format!("cell {:?} = {:?} but covered = {}", coord, cell, covered.contains(&coord)));
        }
        if cell.is_some() != hints.get(coord).is_some() {
            return Err(format!("cell {:?} = {:?} has mark {:?}", coord, cell, hints.get(coord)));
        }

        if cell.is_none() {
            continue;
        }
        for neighbor in [board.offset(coord, 0, 1), board.offset(coord, 1, 0)].into_iter().flatten() {
            if board.get(neighbor).is_some() && !links.contains(&(coord, neighbor)) {
                return Err(format!("{:?} and {:?} touch without forming a word", coord, neighbor));
            }
        }
    }

    let dictionary = puzzle.dictionary();
    let expected: Vec<u32> = (1..=dictionary.len() as u32).collect();
    let actual: Vec<u32> = dictionary.iter().map(|(number, _)| number).collect();
    if actual != expected {
        return Err(format!("hint numbers {:?} are not dense", actual));
    }
    for (number, _) in dictionary.iter() {
        if !numbers.iter().any(|&(used, _)| used == number) {
            return Err(format!("hint number {} belongs to no word", number));
        }
    }

    Ok(())
}

/// Assert that each placed word's clue sits under its number in its direction.
pub fn check_clues<F>(puzzle: &Puzzle, clue_for: F) -> Result<(), String>
    where
        F: Fn(&str) -> String,
{
    for placed in puzzle.placed() {
        let expected = clue_for(&placed.word);
        let actual = puzzle.dictionary().clue(placed.number, placed.direction);
        if actual != Some(expected.as_str()) {
            return Err(format!("{} has clue {:?}, expected {:?}", placed.word, actual, expected));
        }
    }

    Ok(())
}
