use crate::board::Board;
use crate::generator::{Puzzle, SeedOutcome};
use crate::hints::{HintDictionary, HintNumber};
use crate::Direction;

/// Turn the given board into a string, with `.` for empty cells.
pub fn render_board(board: &Board) -> String {
    (0..board.rows())
        .map(|row| board.row(row).iter().map(|cell| cell.unwrap_or('.')).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The clues recorded for `direction`, in ascending number order.
pub fn clue_list(dictionary: &HintDictionary, direction: Direction) -> Vec<(HintNumber, &str)> {
    dictionary.iter()
        .filter_map(|(number, entry)| entry.get(direction).map(|clue| (number, clue)))
        .collect()
}

/// Board followed by the Across and Down clue lists, plus any words that didn't fit.
pub fn render_puzzle(puzzle: &Puzzle) -> String {
    let mut out = render_board(puzzle.board());

    for (heading, direction) in [("Across", Direction::Across), ("Down", Direction::Down)] {
        out.push_str("\n\n");
        out.push_str(heading);
        for (number, clue) in clue_list(puzzle.dictionary(), direction) {
            out.push_str(&format!("\n{number}. {clue}"));
        }
    }

    if let SeedOutcome::DoesNotFit { word } = puzzle.seed() {
        out.push_str(&format!("\n\n{word} is too long for a {}x{} board", puzzle.rows(), puzzle.cols()));
    }
    if !puzzle.unplaced().is_empty() {
        out.push_str(&format!("\n\nUnplaced: {}", puzzle.unplaced().join(", ")));
    }

    out
}

#[cfg(test)]
mod tests {
    use crate::render::{clue_list, render_board, render_puzzle};
    use crate::Direction::{Across, Down};
    use crate::Generator;

    #[test]
    fn test_render_cat_and_bat() {
        let puzzle = Generator::with_seed([("cat", "feline"), ("bat", "flying mammal")], 5, 5, 0)
            .unwrap()
            .generate();

        assert_eq!(render_board(puzzle.board()), ".....\n..B..\n.CAT.\n..T..\n.....");
        assert_eq!(clue_list(puzzle.dictionary(), Across), vec![(1, "feline")]);
        assert_eq!(clue_list(puzzle.dictionary(), Down), vec![(2, "flying mammal")]);
        assert_eq!(
            render_puzzle(&puzzle),
            ".....\n..B..\n.CAT.\n..T..\n.....\n\nAcross\n1. feline\n\nDown\n2. flying mammal",
        );
    }

    #[test]
    fn test_render_lists_unplaced_words() {
        let puzzle = Generator::with_seed([("elephant", "big")], 3, 3, 0)
            .unwrap()
            .generate();

        let rendered = render_puzzle(&puzzle);
        assert!(rendered.starts_with("...\n...\n..."));
        assert!(rendered.contains("ELEPHANT is too long for a 3x3 board"));
        assert!(rendered.ends_with("Unplaced: ELEPHANT"));
    }
}
