pub mod config;
pub mod lookup;
pub mod session;
pub mod test_utils;
pub mod types;
pub mod words;

// Re-export commonly used types
pub use lookup::{AssociationLookup, DatamuseClient, DATAMUSE_URL};
pub use session::{BoardSession, LOOKUP_ERROR_MESSAGE};
pub use test_utils::ScriptedLookup;
pub use types::{Cell, SelectOutcome, Tile, WordGroup, DEFAULT_COLOR, PLACEHOLDER, SOLVED_COLORS};
