use clap::Parser;
use std::path::PathBuf;

use crate::lookup::DATAMUSE_URL;

/// Configuration for the word-groups game
#[derive(Debug, Clone, Parser)]
#[command(name = "word-groups")]
#[command(about = "Word-association board game backed by the Datamuse API")]
pub struct Config {
    /// Board side length; the board holds board_size^2 cells
    #[arg(short, long, default_value = "5")]
    pub board_size: usize,

    /// Path to a word list (one topic per line); defaults to the bundled list
    #[arg(short, long)]
    pub word_list: Option<PathBuf>,

    /// Base URL of the association service
    #[arg(long, default_value = DATAMUSE_URL)]
    pub api_url: String,

    /// Timeout for one association request, in seconds
    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,

    /// Seed for the random number generator (for reproducible boards)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::parse_from(["word-groups"]);
        assert_eq!(config.board_size, 5);
        assert_eq!(config.api_url, DATAMUSE_URL);
        assert_eq!(config.timeout_secs, 10);
        assert!(config.word_list.is_none());
        assert!(config.seed.is_none());
    }
}
