use serde::Deserialize;
use thiserror::Error;

use crate::config::DictionaryConfig;
use crate::db::operations::Definition;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("word not found")]
    NotFound,
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
    #[error("dictionary request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Request(reqwest::Error),
}

impl From<reqwest::Error> for DictionaryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

/// Upper bound on an upstream response body.
pub const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct EntryPayload {
    meanings: Vec<MeaningPayload>,
}

#[derive(Debug, Deserialize)]
struct MeaningPayload {
    definitions: Vec<DefinitionPayload>,
}

#[derive(Debug, Deserialize)]
struct DefinitionPayload {
    definition: String,
    example: Option<String>,
}

/// Client for the public dictionary REST endpoint. The word is appended to
/// `base_url` as a single path segment.
#[derive(Clone)]
pub struct DictionaryClient {
    base_url: String,
    client: reqwest::Client,
}

impl DictionaryClient {
    pub fn new(config: &DictionaryConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "dictionary client builder failed, using defaults");
                reqwest::Client::new()
            });

        Self {
            base_url: config.base_url.clone(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn lookup(&self, word: &str) -> Result<Vec<Definition>, DictionaryError> {
        let url = format!("{}{}", self.base_url, urlencoding::encode(word));

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%word, %status, "dictionary lookup missed");
            return Err(DictionaryError::NotFound);
        }

        let body = read_capped(resp, MAX_RESPONSE_BYTES).await?;
        parse_definitions(&body)
    }
}

async fn read_capped(
    mut resp: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, DictionaryError> {
    if resp.content_length().is_some_and(|len| len > limit as u64) {
        return Err(oversized(limit));
    }

    let mut body = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(oversized(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn oversized(limit: usize) -> DictionaryError {
    DictionaryError::UnexpectedFormat(format!("response body exceeds {limit} bytes"))
}

/// Flattens the first entry's meanings into `(definition, example)` pairs,
/// keeping upstream order.
pub fn parse_definitions(body: &[u8]) -> Result<Vec<Definition>, DictionaryError> {
    let entries: Vec<EntryPayload> = serde_json::from_slice(body)
        .map_err(|err| DictionaryError::UnexpectedFormat(err.to_string()))?;

    let first = entries
        .into_iter()
        .next()
        .ok_or_else(|| DictionaryError::UnexpectedFormat("empty entry list".to_string()))?;

    Ok(first
        .meanings
        .into_iter()
        .flat_map(|meaning| meaning.definitions)
        .map(|d| Definition {
            definition: d.definition,
            example: d.example,
        })
        .collect())
}
