use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sentinel shown in a board cell not yet filled by a word group.
pub const PLACEHOLDER: &str = "--";

/// Colors that differentiate each word group once the player guesses it
/// correctly. Cycles through if there are more groups than colors.
pub const SOLVED_COLORS: [&str; 9] = [
    "#B3E5FC", "#FFECB3", "#D1C4E9", "#C8E6C9", "#FFF9C4", "#FFE0B2", "#DCEDC8", "#B2DFDB",
    "#F8BBD0",
];

pub const DEFAULT_COLOR: &str = "#ffffff";

/// Visual state of one filled board cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tile {
    pub word: String,
    /// Solved tiles are locked and no longer selectable
    pub locked: bool,
    /// Index into [`SOLVED_COLORS`], `None` for the default background
    pub color: Option<usize>,
}

impl Tile {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            locked: false,
            color: None,
        }
    }

    /// Background color for rendering
    pub fn css_color(&self) -> &'static str {
        match self.color {
            Some(i) => SOLVED_COLORS[i % SOLVED_COLORS.len()],
            None => DEFAULT_COLOR,
        }
    }
}

/// One cell of the board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Cell {
    Placeholder,
    Tile(Tile),
}

impl Cell {
    /// The displayed word (the placeholder sentinel for empty cells)
    pub fn word(&self) -> &str {
        match self {
            Cell::Placeholder => PLACEHOLDER,
            Cell::Tile(tile) => &tile.word,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Cell::Placeholder)
    }
}

/// The associated words returned for one topic; the unit the player must
/// fully select to score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordGroup {
    /// Base word used as the query key against the lookup service
    pub topic: String,
    pub words: Vec<String>,
}

impl WordGroup {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// True if the selection has exactly this group's members (click order
    /// is irrelevant).
    pub fn matches_selection(&self, selection: &HashSet<String>) -> bool {
        selection.len() == self.words.len() && self.words.iter().all(|w| selection.contains(w))
    }
}

/// What a single click did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Placeholder, unknown, or locked word: no state changed
    Ignored,
    /// The word belongs to the candidate group but the group is not yet full
    Partial,
    /// The selection completed a group, which is now locked
    GroupLocked,
    /// The locked group was the round's last; a new round was started
    RoundComplete,
    /// The word was outside the candidate group; the selection was reset
    Mismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_selection_ignores_order() {
        let group = WordGroup {
            topic: "ocean".to_string(),
            words: vec!["wave".to_string(), "tide".to_string()],
        };

        let mut selection = HashSet::new();
        selection.insert("tide".to_string());
        assert!(!group.matches_selection(&selection));

        selection.insert("wave".to_string());
        assert!(group.matches_selection(&selection));

        selection.insert("sand".to_string());
        assert!(!group.matches_selection(&selection));
    }

    #[test]
    fn test_palette_cycles() {
        let tile = Tile {
            word: "wave".to_string(),
            locked: true,
            color: Some(SOLVED_COLORS.len() + 1),
        };
        assert_eq!(tile.css_color(), SOLVED_COLORS[1]);

        let plain = Tile::new("tide");
        assert_eq!(plain.css_color(), DEFAULT_COLOR);
    }

    #[test]
    fn test_cell_word() {
        assert_eq!(Cell::Placeholder.word(), PLACEHOLDER);
        assert!(Cell::Placeholder.is_placeholder());
        assert_eq!(Cell::Tile(Tile::new("wave")).word(), "wave");
    }
}
