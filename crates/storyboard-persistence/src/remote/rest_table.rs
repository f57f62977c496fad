use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use storyboard_core::{BoardError, BoardResult, RemoteConfig};
use storyboard_domain::{validate_card, Card, CardId};

use super::remote_error;
use crate::traits::RemoteStore;

/// Card table exposed over a PostgREST-style HTTP interface.
#[derive(Debug, Clone)]
pub struct RestTableStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RestTableStore {
    pub fn from_config(config: &RemoteConfig) -> BoardResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| remote_error("building HTTP client", e))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.url.trim().trim_end_matches('/'),
                config.table
            ),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: Response, action: &str) -> BoardResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BoardError::Remote(format!(
            "{} failed with {}: {}",
            action,
            status,
            body.trim()
        )))
    }
}

#[async_trait]
impl RemoteStore for RestTableStore {
    async fn fetch_all(&self) -> BoardResult<Vec<Card>> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "updated_at.desc")])
            .send()
            .await
            .map_err(|e| remote_error("fetching cards", e))?;
        let rows: Vec<Value> = Self::check(response, "fetch")
            .await?
            .json()
            .await
            .map_err(|e| remote_error("decoding cards", e))?;

        let total = rows.len();
        let cards: Vec<Card> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<Card>(row) {
                Ok(card) => match validate_card(&card) {
                    Ok(()) => Some(card),
                    Err(e) => {
                        tracing::warn!("Skipping remote row: {}", e);
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!("Skipping unreadable remote row: {}", e);
                    None
                }
            })
            .collect();

        tracing::info!("Fetched {} of {} remote rows", cards.len(), total);
        Ok(cards)
    }

    async fn upsert_all(&self, cards: &[Card]) -> BoardResult<()> {
        if cards.is_empty() {
            return Ok(());
        }
        let response = self
            .request(Method::POST)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(cards)
            .send()
            .await
            .map_err(|e| remote_error("upserting cards", e))?;
        Self::check(response, "upsert").await?;

        tracing::debug!("Upserted {} cards to {}", cards.len(), self.endpoint);
        Ok(())
    }

    async fn delete(&self, id: CardId) -> BoardResult<()> {
        let response = self
            .request(Method::DELETE)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| remote_error("deleting card", e))?;
        Self::check(response, "delete").await?;

        tracing::debug!("Deleted remote card {}", id);
        Ok(())
    }
}
