use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Default base URL for the Datamuse word-association API
pub const DATAMUSE_URL: &str = "https://api.datamuse.com";

/// Remote lexical-association lookup: given a topic word and a maximum
/// result count, return an ordered list of related words.
pub trait AssociationLookup {
    fn fetch_group(
        &self,
        topic: &str,
        max_size: usize,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

/// One entry of the Datamuse `/words` response. The API also returns
/// `score` and `tags` fields, which we ignore.
#[derive(Debug, Clone, Deserialize)]
struct WordEntry {
    word: String,
}

/// Association lookup backed by the Datamuse API
#[derive(Debug, Clone)]
pub struct DatamuseClient {
    client: reqwest::Client,
    base_url: String,
}

impl DatamuseClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl AssociationLookup for DatamuseClient {
    async fn fetch_group(&self, topic: &str, max_size: usize) -> Result<Vec<String>> {
        let url = format!("{}/words", self.base_url);
        let max = max_size.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("topics", topic), ("max", max.as_str())])
            .send()
            .await
            .with_context(|| format!("association request for {:?} failed", topic))?;

        if !response.status().is_success() {
            bail!(
                "association service returned {} for topic {:?}",
                response.status(),
                topic
            );
        }

        let entries: Vec<WordEntry> = response
            .json()
            .await
            .with_context(|| format!("malformed association payload for {:?}", topic))?;

        Ok(entries.into_iter().map(|entry| entry.word).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_datamuse_payload() {
        let payload = r#"[
            {"word": "wave", "score": 2134},
            {"word": "tide", "score": 1910, "tags": ["n"]}
        ]"#;
        let entries: Vec<WordEntry> = serde_json::from_str(payload).unwrap();
        let words: Vec<String> = entries.into_iter().map(|e| e.word).collect();
        assert_eq!(words, vec!["wave", "tide"]);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = DatamuseClient::new("https://api.datamuse.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "https://api.datamuse.com");
    }
}
