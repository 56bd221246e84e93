use std::collections::HashSet;
use std::path::Path;

/// Word list bundled with the crate, used when no `--word-list` is given.
pub const BUILTIN_WORD_LIST: &str = include_str!("../assets/nouns.txt");

/// Topics from the bundled word list
pub fn builtin_topics() -> Vec<String> {
    parse_word_list(BUILTIN_WORD_LIST)
}

/// Load a candidate topic pool from a text file, one word per line
pub fn load_topics(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let topics = parse_word_list(&content);
    if topics.is_empty() {
        anyhow::bail!("word list {:?} contains no words", path);
    }
    Ok(topics)
}

/// Trim lines, skip empties, and deduplicate preserving first occurrence
fn parse_word_list(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_list() {
        let parsed = parse_word_list("apple\n  river \n\napple\nstone\n");
        assert_eq!(parsed, vec!["apple", "river", "stone"]);
    }

    #[test]
    fn test_builtin_topics_are_deduplicated() {
        let topics = builtin_topics();
        assert!(!topics.is_empty());
        let unique: HashSet<_> = topics.iter().collect();
        assert_eq!(unique.len(), topics.len());
    }
}
