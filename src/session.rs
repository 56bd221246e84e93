use crate::lookup::AssociationLookup;
use crate::types::{Cell, SelectOutcome, Tile, WordGroup, PLACEHOLDER, SOLVED_COLORS};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Message shown to the player when the association service fails
pub const LOOKUP_ERROR_MESSAGE: &str =
    "Could not fetch words from the association service. Please try again later.";

/// Game session state machine: owns board construction, selection tracking,
/// group validation, and round progression. Cheap to clone; clones share the
/// same session.
#[derive(Debug, Clone)]
pub struct BoardSession<L> {
    board_size: usize,
    lookup: L,
    state: Arc<RwLock<SessionState>>,
}

#[derive(Debug)]
struct SessionState {
    /// Candidate topics not yet consumed by a successful group fetch.
    /// Reshuffled at every round start; never mutated by the player.
    topic_pool: Vec<String>,
    board: Vec<Cell>,
    /// The current round's accepted groups, disjoint in membership
    groups: Vec<WordGroup>,
    /// Words the player has clicked so far this guess
    selected: HashSet<String>,
    /// Index into `groups` of the group containing the first selected word
    candidate: Option<usize>,
    groups_solved: usize,
    rounds_completed: u64,
    /// Bumped at every round start; a build that outlives its epoch discards
    /// late lookup results instead of applying them
    epoch: u64,
    error_message: Option<String>,
    rng: StdRng,
}

impl<L> BoardSession<L>
where
    L: AssociationLookup + Send + Sync,
{
    /// Create a session over a topic pool. Pass a seed for a deterministic
    /// shuffle and group sizing (useful for reproducing a board).
    pub fn new(board_size: usize, topics: Vec<String>, lookup: L, seed: Option<u64>) -> Self {
        assert!(board_size > 0, "board size must be at least 1");
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let capacity = board_size * board_size;
        Self {
            board_size,
            lookup,
            state: Arc::new(RwLock::new(SessionState {
                topic_pool: topics,
                board: vec![Cell::Placeholder; capacity],
                groups: Vec::new(),
                selected: HashSet::new(),
                candidate: None,
                groups_solved: 0,
                rounds_completed: 0,
                epoch: 0,
                error_message: None,
                rng,
            })),
        }
    }

    /// Build a fresh round: reset the round state, then fill the board with
    /// word groups fetched one topic at a time until capacity runs out or the
    /// topic pool is exhausted. A lookup failure aborts the build, leaving
    /// whatever was fetched on the board and the error message set.
    pub async fn start_new_round(&self) -> Result<()> {
        let capacity = self.board_size * self.board_size;
        let (epoch, mut remaining) = {
            let mut state = self.state.write().await;
            let state = &mut *state;
            state.groups_solved = 0;
            state.groups.clear();
            state.selected.clear();
            state.candidate = None;
            state.error_message = None;
            state.board = vec![Cell::Placeholder; capacity];
            state.epoch += 1;
            state.topic_pool.shuffle(&mut state.rng);
            (state.epoch, VecDeque::from(state.topic_pool.clone()))
        };

        let mut free = capacity;
        while free > 0 {
            let Some(topic) = remaining.pop_front() else {
                debug!("topic pool exhausted with {} free cells left", free);
                break;
            };

            let max_size = {
                let mut state = self.state.write().await;
                let draw = state.rng.gen_range(1..=self.board_size);
                free.min(draw)
            };

            let fetched = self.lookup.fetch_group(&topic, max_size).await;

            let mut state = self.state.write().await;
            let state = &mut *state;
            if state.epoch != epoch {
                debug!("discarding lookup result for {:?}: round build superseded", topic);
                return Ok(());
            }

            let mut words = match fetched {
                Ok(words) => words,
                Err(e) => {
                    warn!("association lookup failed for topic {:?}: {:#}", topic, e);
                    state.error_message = Some(LOOKUP_ERROR_MESSAGE.to_string());
                    place_groups(state, capacity);
                    return Err(e).with_context(|| format!("round build aborted at topic {:?}", topic));
                }
            };

            if words.is_empty() {
                debug!("topic {:?} yielded no associations, skipping", topic);
                continue;
            }
            // The service owns sizing, but capacity is a hard bound
            words.truncate(free);

            if !is_disjoint(&words, &state.groups) {
                warn!("rejecting group for topic {:?}: duplicate word on the board", topic);
                continue;
            }

            free -= words.len();
            state.topic_pool.retain(|t| t != &topic);
            debug!("accepted group of {} for topic {:?}", words.len(), topic);
            state.groups.push(WordGroup { topic, words });
        }

        let mut state = self.state.write().await;
        let state = &mut *state;
        if state.epoch != epoch {
            debug!("discarding completed round build: superseded");
            return Ok(());
        }
        place_groups(state, capacity);
        info!(
            "new round ready: {} groups, {} words on the board",
            state.groups.len(),
            state.board.iter().filter(|c| !c.is_placeholder()).count()
        );
        Ok(())
    }

    /// Handle one player click. Placeholder, unknown, and locked words are
    /// ignored. Completing the round's last group starts a new round, so this
    /// can fail the same way [`Self::start_new_round`] does.
    pub async fn select(&self, word: &str) -> Result<SelectOutcome> {
        let outcome = {
            let mut state = self.state.write().await;
            let state = &mut *state;

            if word == PLACEHOLDER {
                return Ok(SelectOutcome::Ignored);
            }
            let locked = state.board.iter().find_map(|cell| match cell {
                Cell::Tile(tile) if tile.word == word => Some(tile.locked),
                _ => None,
            });
            match locked {
                None | Some(true) => return Ok(SelectOutcome::Ignored),
                Some(false) => {}
            }

            state.selected.insert(word.to_string());
            if state.candidate.is_none() {
                state.candidate = state.groups.iter().position(|g| g.contains(word));
            }

            let candidate = state.candidate.and_then(|i| state.groups.get(i).cloned());
            match candidate {
                Some(group) if group.matches_selection(&state.selected) => {
                    let color = state.groups_solved % SOLVED_COLORS.len();
                    for cell in state.board.iter_mut() {
                        if let Cell::Tile(tile) = cell {
                            if group.contains(&tile.word) {
                                tile.locked = true;
                                tile.color = Some(color);
                            }
                        }
                    }
                    state.groups_solved += 1;
                    state.selected.clear();
                    state.candidate = None;
                    info!(
                        "group {:?} solved ({}/{})",
                        group.topic,
                        state.groups_solved,
                        state.groups.len()
                    );
                    if state.groups_solved == state.groups.len() {
                        state.rounds_completed += 1;
                        reset_tiles(state);
                        info!("round complete ({} total)", state.rounds_completed);
                        SelectOutcome::RoundComplete
                    } else {
                        SelectOutcome::GroupLocked
                    }
                }
                Some(group) if group.contains(word) => {
                    let color = state.groups_solved % SOLVED_COLORS.len();
                    for cell in state.board.iter_mut() {
                        if let Cell::Tile(tile) = cell {
                            if tile.word == word {
                                tile.color = Some(color);
                            }
                        }
                    }
                    SelectOutcome::Partial
                }
                _ => {
                    // Wrong guess: revert colored but unlocked tiles and
                    // start the selection over. No penalty.
                    for cell in state.board.iter_mut() {
                        if let Cell::Tile(tile) = cell {
                            if state.selected.contains(&tile.word) && !tile.locked {
                                tile.color = None;
                            }
                        }
                    }
                    state.selected.clear();
                    state.candidate = None;
                    SelectOutcome::Mismatch
                }
            }
        };

        if outcome == SelectOutcome::RoundComplete {
            self.start_new_round().await?;
        }
        Ok(outcome)
    }

    /// Player-requested restart: rebuild the board without counting the
    /// abandoned round as completed.
    pub async fn clear(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            let state = &mut *state;
            reset_tiles(state);
        }
        info!("restarting round at player request");
        self.start_new_round().await
    }

    /// Snapshot of the board cells
    pub async fn board(&self) -> Vec<Cell> {
        self.state.read().await.board.clone()
    }

    /// Groups found so far this round
    pub async fn groups_solved(&self) -> usize {
        self.state.read().await.groups_solved
    }

    /// Rounds completed over the whole session
    pub async fn rounds_completed(&self) -> u64 {
        self.state.read().await.rounds_completed
    }

    /// Number of word groups hidden in the current round
    pub async fn group_count(&self) -> usize {
        self.state.read().await.groups.len()
    }

    /// User-visible error from the last failed round build, if any
    pub async fn error_message(&self) -> Option<String> {
        self.state.read().await.error_message.clone()
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }
}

/// True if none of `words` duplicates itself or any accepted group's member
fn is_disjoint(words: &[String], groups: &[WordGroup]) -> bool {
    let mut seen: HashSet<&str> = groups
        .iter()
        .flat_map(|g| g.words.iter().map(String::as_str))
        .collect();
    words.iter().all(|w| seen.insert(w))
}

/// Flatten the accepted groups onto the board, pad with placeholders, and
/// shuffle the cell order.
fn place_groups(state: &mut SessionState, capacity: usize) {
    let mut board: Vec<Cell> = state
        .groups
        .iter()
        .flat_map(|g| g.words.iter())
        .map(|word| Cell::Tile(Tile::new(word.clone())))
        .collect();
    debug_assert!(board.len() <= capacity, "groups exceed board capacity");
    board.resize(capacity, Cell::Placeholder);
    board.shuffle(&mut state.rng);
    state.board = board;
}

/// Return every tile to the default enabled appearance
fn reset_tiles(state: &mut SessionState) {
    for cell in state.board.iter_mut() {
        if let Cell::Tile(tile) = cell {
            tile.locked = false;
            tile.color = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_disjoint() {
        let groups = vec![WordGroup {
            topic: "ocean".to_string(),
            words: vec!["wave".to_string(), "tide".to_string()],
        }];
        assert!(is_disjoint(&["reef".to_string()], &groups));
        assert!(!is_disjoint(&["tide".to_string()], &groups));
        assert!(!is_disjoint(&["reef".to_string(), "reef".to_string()], &[]));
    }
}
