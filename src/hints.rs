use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::Direction;

/// A clue number. Numbers are dense and start at 1.
pub type HintNumber = u32;

/// The across and down clues sharing one hint number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintEntry {
    pub across: Option<String>,
    pub down: Option<String>,
}

impl HintEntry {
    pub fn get(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Across => self.across.as_deref(),
            Direction::Down => self.down.as_deref(),
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<String> {
        match direction {
            Direction::Across => &mut self.across,
            Direction::Down => &mut self.down,
        }
    }
}

/// Serialized as `[across, down]`.
impl Serialize for HintEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.across, &self.down).serialize(serializer)
    }
}

/// Clues keyed by hint number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HintDictionary {
    entries: BTreeMap<HintNumber, HintEntry>,
}

impl HintDictionary {
    pub fn get(&self, number: HintNumber) -> Option<&HintEntry> {
        self.entries.get(&number)
    }

    /// The clue for `direction` at `number`, if one was recorded.
    pub fn clue(&self, number: HintNumber, direction: Direction) -> Option<&str> {
        self.get(number).and_then(|entry| entry.get(direction))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item=(HintNumber, &HintEntry)> {
        self.entries.iter().map(|(&number, entry)| (number, entry))
    }

    pub fn max_number(&self) -> Option<HintNumber> {
        self.entries.keys().next_back().copied()
    }
}

/// Hands out hint numbers in placement order and records clues against them.
#[derive(Debug)]
pub struct HintNumberer {
    next: HintNumber,
    dictionary: HintDictionary,
}

impl HintNumberer {
    pub fn new() -> HintNumberer {
        HintNumberer { next: 1, dictionary: HintDictionary::default() }
    }

    /// Allocate the next number for a word placed in `direction`.
    pub fn assign(&mut self, direction: Direction, clue: &str) -> HintNumber {
        let number = self.next;
        self.next += 1;

        let mut entry = HintEntry::default();
        *entry.slot_mut(direction) = Some(clue.to_string());
        self.dictionary.entries.insert(number, entry);

        number
    }

    /// Record `clue` in the `direction` slot of an existing number. A slot that already holds a
    /// clue is left alone, and so is the other direction; returns whether the clue was recorded.
    pub fn merge(&mut self, number: HintNumber, direction: Direction, clue: &str) -> bool {
        match self.dictionary.entries.get_mut(&number) {
            Some(entry) => {
                let slot = entry.slot_mut(direction);
                if slot.is_some() {
                    return false;
                }
                *slot = Some(clue.to_string());
                true
            }
            None => false,
        }
    }

    /// The number the next `assign` will hand out.
    pub fn peek(&self) -> HintNumber {
        self.next
    }

    pub fn dictionary(&self) -> &HintDictionary {
        &self.dictionary
    }

    pub fn into_dictionary(self) -> HintDictionary {
        self.dictionary
    }
}

impl Default for HintNumberer {
    fn default() -> Self {
        HintNumberer::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::hints::HintNumberer;
    use crate::Direction::{Across, Down};

    #[test]
    fn test_numbers_are_sequential_from_one() {
        let mut numberer = HintNumberer::new();

        assert_eq!(numberer.assign(Across, "feline"), 1);
        assert_eq!(numberer.assign(Down, "flying mammal"), 2);
        assert_eq!(numberer.peek(), 3);

        let dictionary = numberer.into_dictionary();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.max_number(), Some(2));
        assert_eq!(dictionary.clue(1, Across), Some("feline"));
        assert_eq!(dictionary.clue(1, Down), None);
        assert_eq!(dictionary.clue(2, Down), Some("flying mammal"));
    }

    #[test]
    fn test_merge_keeps_other_direction() {
        let mut numberer = HintNumberer::new();
        let number = numberer.assign(Across, "feline");

        assert!(numberer.merge(number, Down, "drinking vessel"));
        assert!(!numberer.merge(number, Down, "something else"));
        assert!(!numberer.merge(number, Across, "overwrite"));
        assert!(!numberer.merge(7, Down, "missing"));

        let entry = numberer.dictionary().get(number).unwrap();
        assert_eq!(entry.across.as_deref(), Some("feline"));
        assert_eq!(entry.down.as_deref(), Some("drinking vessel"));
        assert_eq!(numberer.peek(), 2);
    }

    #[test]
    fn test_serializes_as_pairs() {
        let mut numberer = HintNumberer::new();
        numberer.assign(Down, "clue");

        assert_eq!(
            serde_json::to_string(numberer.dictionary()).unwrap(),
            r#"{"1":[null,"clue"]}"#,
        );
    }
}
