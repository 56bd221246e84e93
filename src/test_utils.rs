use crate::lookup::AssociationLookup;
use anyhow::{bail, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted association lookup for tests.
///
/// Responses are queued per topic and served in order; a topic with no
/// scripted response yields an empty group, which the session skips. Calls
/// can be failed wholesale after the first N, and delayed per call to order
/// concurrent round builds.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLookup {
    inner: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    responses: HashMap<String, VecDeque<Vec<String>>>,
    delays: VecDeque<Duration>,
    /// Fail every call once this many have succeeded
    fail_after: Option<usize>,
    calls: Vec<(String, usize)>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `topic`; repeated calls queue further responses
    pub fn with_group<I, S>(self, topic: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut state = self.inner.lock().unwrap();
            state
                .responses
                .entry(topic.to_string())
                .or_default()
                .push_back(words.into_iter().map(Into::into).collect());
        }
        self
    }

    /// Fail every call after the first `n` calls have been served
    pub fn failing_after(self, n: usize) -> Self {
        self.inner.lock().unwrap().fail_after = Some(n);
        self
    }

    /// Fail every call
    pub fn failing(self) -> Self {
        self.failing_after(0)
    }

    /// Queue a delay applied to the next call (then the one after, and so on)
    pub fn with_delay(self, delay: Duration) -> Self {
        self.inner.lock().unwrap().delays.push_back(delay);
        self
    }

    /// Topics and max sizes requested so far, in call order
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.inner.lock().unwrap().calls.clone()
    }
}

impl AssociationLookup for ScriptedLookup {
    async fn fetch_group(&self, topic: &str, max_size: usize) -> Result<Vec<String>> {
        let (response, delay) = {
            let mut state = self.inner.lock().unwrap();
            let call_index = state.calls.len();
            state.calls.push((topic.to_string(), max_size));
            let delay = state.delays.pop_front();
            let failed = state.fail_after.is_some_and(|n| call_index >= n);
            let response = if failed {
                None
            } else {
                Some(
                    state
                        .responses
                        .get_mut(topic)
                        .and_then(|queue| queue.pop_front())
                        .unwrap_or_default(),
                )
            };
            (response, delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match response {
            Some(words) => Ok(words),
            None => bail!("scripted failure for topic {:?}", topic),
        }
    }
}
