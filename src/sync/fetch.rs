//! HTTP surface: join handshake and the one-shot state fetch used to
//! paint the table before the first broadcast arrives.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::domain::{GameState, PlayerId};
use crate::error::ClientError;

const LOG_TARGET: &str = "sync::fetch";

/// Source of full game-state snapshots, abstracted so the synchronizer
/// can be driven without a live server in tests.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_state(&self) -> Result<GameState, ClientError>;
}

/// Thin client for the table server's REST endpoints.
#[derive(Debug, Clone)]
pub struct StateClient {
    base_url: Url,
    http: Client,
}

impl StateClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// Joins the table under `nickname` and returns the server-assigned
    /// player id used for all visibility and highlight computations. The
    /// allocation logic itself lives on the server; this is only the call.
    pub async fn join(&self, nickname: &str) -> Result<PlayerId, ClientError> {
        let url = self.base_url.join("api/join")?;
        let response = self
            .http
            .post(url)
            .query(&[("nickname", nickname)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::join(format!(
                "server answered {}",
                response.status()
            )));
        }

        let id = response.text().await?.trim().to_string();
        if id.is_empty() {
            return Err(ClientError::join("server returned an empty player id"));
        }
        debug!(target = LOG_TARGET, player = %id, "join handshake complete");
        Ok(id)
    }
}

#[async_trait]
impl SnapshotSource for StateClient {
    async fn fetch_state(&self) -> Result<GameState, ClientError> {
        let url = self.base_url.join("api/state")?;
        let state = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<GameState>()
            .await?;
        debug!(
            target = LOG_TARGET,
            players = state.players.len(),
            pot = state.pot,
            "fetched state snapshot"
        );
        Ok(state)
    }
}
