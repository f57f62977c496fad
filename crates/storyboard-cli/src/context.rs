use std::path::Path;

use storyboard_core::{AppConfig, BoardError, BoardResult};
use storyboard_domain::{BoardCommand, Card, CardCollection, CardId};
use storyboard_persistence::{BoardStore, PersistenceAdapter};

/// Board state and configuration for one CLI invocation.
pub struct CliContext {
    pub config: AppConfig,
    store: BoardStore,
}

impl CliContext {
    pub async fn load(file: Option<&Path>, config: AppConfig) -> BoardResult<Self> {
        let adapter = PersistenceAdapter::from_config(file, &config)?;
        let store = BoardStore::open(adapter, config.sync.merge_policy).await?;

        if config.sync.pull_on_start && store.has_remote() {
            if let Err(e) = store.refresh_from_remote().await {
                tracing::warn!("Startup pull failed: {}", e);
            }
        }

        Ok(Self { config, store })
    }

    pub fn snapshot(&self) -> CardCollection {
        self.store.snapshot()
    }

    pub fn get_card(&self, id: CardId) -> BoardResult<Card> {
        self.snapshot()
            .find(id)
            .cloned()
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", id)))
    }

    pub async fn execute(&self, command: &dyn BoardCommand) -> BoardResult<CardCollection> {
        self.store.dispatch(command).await
    }

    pub fn has_remote(&self) -> bool {
        self.store.has_remote()
    }

    pub async fn pull(&self) -> BoardResult<bool> {
        self.store.refresh_from_remote().await
    }

    pub async fn push(&self) -> BoardResult<usize> {
        self.store.push_all().await
    }

    /// Wait for background remote writes before the process exits.
    pub async fn finish(self) {
        self.store.flush().await;
    }
}
