use std::collections::HashMap;
use std::fs;
use std::path::Path;

use smallvec::SmallVec;

use crate::errors::GenerateError;
use crate::MAX_WORD_LENGTH;

/// An identifier for a given word, based on its index in the `WordList`'s `entries` field. Ids
/// follow dictionary insertion order.
pub type WordId = usize;

/// The letters of a word, one `char` per grid cell.
pub type Glyphs = SmallVec<[char; MAX_WORD_LENGTH]>;

/// A normalized dictionary entry: the uppercased, trimmed word and its clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub glyphs: Glyphs,
    pub clue: String,
}

impl WordEntry {
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// The canonical dictionary, plus the order in which placement should consider its words.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    entries: Vec<WordEntry>,
    by_length: Vec<WordId>,
}

impl WordList {
    /// Trim and uppercase every key. A key that collides with an earlier one after normalizing
    /// keeps the earlier position but takes the later clue.
    pub fn normalize<I, W, C>(dictionary: I) -> Result<WordList, GenerateError>
        where
            I: IntoIterator<Item=(W, C)>,
            W: AsRef<str>,
            C: Into<String>,
    {
        let mut entries: Vec<WordEntry> = vec![];
        let mut ids_by_word: HashMap<String, WordId> = HashMap::new();

        for (word, clue) in dictionary {
            let original = word.as_ref();
            let word = original.trim().to_uppercase();
            if word.is_empty() {
                return Err(GenerateError::EmptyWord { original: original.to_string() });
            }
            let clue = clue.into();

            match ids_by_word.get(&word) {
                Some(&id) => entries[id].clue = clue,
                None => {
                    ids_by_word.insert(word.clone(), entries.len());
                    entries.push(WordEntry {
                        glyphs: word.chars().collect(),
                        word,
                        clue,
                    });
                }
            }
        }

        // `sort_by` is stable, so equal lengths keep insertion order.
        let mut by_length: Vec<WordId> = (0..entries.len()).collect();
        by_length.sort_by(|&a, &b| entries[b].len().cmp(&entries[a].len()));

        Ok(WordList { entries, by_length })
    }

    pub fn get(&self, id: WordId) -> &WordEntry {
        &self.entries[id]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Word ids ordered longest first.
    pub fn by_length_desc(&self) -> &[WordId] {
        &self.by_length
    }

    pub fn iter(&self) -> impl Iterator<Item=&WordEntry> {
        self.entries.iter()
    }
}

/// Parse a dictionary in `word;clue` format, one entry per line. Blank lines and lines starting
/// with `#` are skipped; everything after the first `;` is the clue.
pub fn parse_dictionary(text: &str) -> Result<Vec<(String, String)>, GenerateError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            match line.split_once(';') {
                Some((word, clue)) => Ok((word.to_string(), clue.trim().to_string())),
                None => Err(GenerateError::MalformedLine { line_number: idx + 1, line: line.to_string() }),
            }
        })
        .collect()
}

/// Read and parse a `word;clue` dictionary file.
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Vec<(String, String)>, GenerateError> {
    let text = fs::read_to_string(path)?;
    parse_dictionary(&text)
}

#[cfg(test)]
mod tests {
    use crate::errors::GenerateError;
    use crate::words::{parse_dictionary, WordList};

    #[test]
    fn test_normalize_trims_and_uppercases() {
        let words = WordList::normalize([(" cat ", "feline"), ("Dog", "canine")]).unwrap();

        assert_eq!(words.len(), 2);
        assert_eq!(words.get(0).word, "CAT");
        assert_eq!(words.get(0).glyphs.as_slice(), &['C', 'A', 'T']);
        assert_eq!(words.get(1).word, "DOG");
        assert_eq!(words.get(1).clue, "canine");
    }

    #[test]
    fn test_duplicate_keeps_position_and_takes_later_clue() {
        let words = WordList::normalize([
            ("cat", "feline"),
            ("owl", "night bird"),
            ("CAT ", "pet"),
        ]).unwrap();

        assert_eq!(words.len(), 2);
        assert_eq!(words.get(0).word, "CAT");
        assert_eq!(words.get(0).clue, "pet");
        assert_eq!(words.get(1).word, "OWL");
    }

    #[test]
    fn test_length_order_is_stable() {
        let words = WordList::normalize([
            ("bee", "1"),
            ("horse", "2"),
            ("cat", "3"),
            ("zebra", "4"),
            ("ox", "5"),
        ]).unwrap();

        let order: Vec<&str> =
            words.by_length_desc().iter().map(|&id| words.get(id).word.as_str()).collect();
        assert_eq!(order, vec!["HORSE", "ZEBRA", "BEE", "CAT", "OX"]);
    }

    #[test]
    fn test_empty_word_is_rejected() {
        let result = WordList::normalize([("cat", "feline"), ("   ", "nothing")]);

        assert!(matches!(result, Err(GenerateError::EmptyWord { .. })));
    }

    #[test]
    fn test_empty_dictionary() {
        let words = WordList::normalize(Vec::<(String, String)>::new()).unwrap();

        assert!(words.is_empty());
        assert!(words.by_length_desc().is_empty());
    }

    #[test]
    fn test_parse_dictionary() {
        let text = "# animals\ncat;feline\n\nbat; flying mammal; nocturnal\n";
        let entries = parse_dictionary(text).unwrap();

        assert_eq!(entries, vec![
            ("cat".to_string(), "feline".to_string()),
            ("bat".to_string(), "flying mammal; nocturnal".to_string()),
        ]);
    }

    #[test]
    fn test_parse_dictionary_reports_line_number() {
        let result = parse_dictionary("cat;feline\ndog\n");

        match result {
            Err(GenerateError::MalformedLine { line_number, line }) => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "dog");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
