//! Score Store Client
//!
//! Persists `(name, score)` records and retrieves the leaderboard from the
//! remote score service. The service's wire contract predates this client
//! and uses `nome`/`pontuacao` as field names; the serde renames keep the
//! domain type readable without breaking that contract.
//!
//! The leaderboard comes back in whatever order the service returns it; no
//! client-side sorting is applied.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;

/// A saved score: player name and final session score.
///
/// Created once per session when the player chooses to save, never mutated
/// locally afterward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player name, non-empty once submitted.
    #[serde(rename = "nome")]
    pub name: String,
    /// Final score of the session.
    #[serde(rename = "pontuacao")]
    pub score: u32,
}

/// Ordered sequence of score records, exactly as the store returned it.
pub type Leaderboard = Vec<ScoreRecord>;

/// Access to the remote score store.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Persist one score record.
    async fn save(&self, record: &ScoreRecord) -> Result<(), NetworkError>;

    /// Fetch the full set of stored records, in store order.
    async fn leaderboard(&self) -> Result<Leaderboard, NetworkError>;
}

/// Forward through a shared handle so an `Arc`-wrapped store is itself a
/// [`ScoreStore`]. Lets callers keep a handle after the engine takes one.
#[async_trait]
impl<S: ScoreStore + ?Sized> ScoreStore for Arc<S> {
    async fn save(&self, record: &ScoreRecord) -> Result<(), NetworkError> {
        self.as_ref().save(record).await
    }

    async fn leaderboard(&self) -> Result<Leaderboard, NetworkError> {
        self.as_ref().leaderboard().await
    }
}

/// Score store client backed by the companion HTTP service.
#[derive(Clone)]
pub struct HttpScoreStore {
    /// Base URL without trailing slash.
    base_url: String,
    /// HTTP client.
    http_client: reqwest::Client,
}

impl HttpScoreStore {
    /// Default endpoint: the score service runs on the same network.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3000";

    /// Create a new score store client.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create from the `GUESSDEX_SCORES_URL` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("GUESSDEX_SCORES_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    fn save_url(&self) -> String {
        format!("{}/save-score", self.base_url)
    }

    fn ranking_url(&self) -> String {
        format!("{}/ranking", self.base_url)
    }

    /// Parse a ranking response body, failing closed.
    fn parse_ranking(body: &[u8]) -> Result<Leaderboard, NetworkError> {
        serde_json::from_slice(body).map_err(|e| NetworkError::Malformed {
            service: "score store",
            detail: e.to_string(),
        })
    }
}

impl Default for HttpScoreStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ScoreStore for HttpScoreStore {
    async fn save(&self, record: &ScoreRecord) -> Result<(), NetworkError> {
        let response = self
            .http_client
            .post(self.save_url())
            .json(record)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(NetworkError::Status {
                service: "score store",
                status: response.status(),
            });
        }
        // No response body contract beyond HTTP success.
        Ok(())
    }

    async fn leaderboard(&self) -> Result<Leaderboard, NetworkError> {
        let response = self.http_client.get(self.ranking_url()).send().await?;
        if !response.status().is_success() {
            return Err(NetworkError::Status {
                service: "score store",
                status: response.status(),
            });
        }
        let body = response.bytes().await?;
        Self::parse_ranking(&body)
    }
}
