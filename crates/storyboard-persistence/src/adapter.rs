use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use storyboard_core::{AppConfig, BoardError, BoardResult};
use storyboard_domain::{example_cards, Card, CardCollection, CardId};

use crate::remote::RestTableStore;
use crate::store::LocalFileStore;
use crate::traits::{LocalLoad, LocalStore, RemoteStore};

/// Local storage plus an optional remote mirror.
///
/// Local writes are authoritative. Remote writes only ever log their
/// failures.
#[derive(Clone)]
pub struct PersistenceAdapter {
    local: Arc<dyn LocalStore>,
    remote: Option<Arc<dyn RemoteStore>>,
}

impl PersistenceAdapter {
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self {
            local,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Wire up the file store and, when both URL and key are configured,
    /// the remote table.
    pub fn from_config(data_file: Option<&Path>, config: &AppConfig) -> BoardResult<Self> {
        let local = LocalFileStore::resolve(data_file, config)?;
        tracing::debug!("Using board file {}", local.path().display());
        let adapter = Self::new(Arc::new(local));

        match config.remote.as_ref().filter(|_| config.remote_enabled()) {
            Some(remote) => {
                let store = RestTableStore::from_config(remote)?;
                tracing::debug!("Mirroring to {}", store.endpoint());
                Ok(adapter.with_remote(Arc::new(store)))
            }
            None => Ok(adapter),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// The stored board, or the example cards when nothing usable is stored.
    /// Seeded cards are written back so their ids stay stable.
    pub async fn load_initial(&self) -> BoardResult<CardCollection> {
        match self.local.load().await? {
            LocalLoad::Loaded(cards) => Ok(CardCollection::from(cards)),
            LocalLoad::Missing => {
                tracing::info!("No stored board, starting from example cards");
                self.seed().await
            }
            LocalLoad::Corrupt(reason) => {
                tracing::warn!("Stored board is unreadable ({}), reseeding", reason);
                self.seed().await
            }
        }
    }

    async fn seed(&self) -> BoardResult<CardCollection> {
        let cards = example_cards();
        self.persist_local(&cards).await?;
        Ok(cards)
    }

    pub async fn persist_local(&self, cards: &CardCollection) -> BoardResult<()> {
        self.local.save(cards.as_slice()).await
    }

    /// Upsert every card in `next` and delete the ids that disappeared since
    /// `previous`. Failures are logged and swallowed; without a remote this
    /// does nothing.
    pub async fn mirror(&self, previous: &CardCollection, next: &CardCollection) {
        let Some(remote) = self.remote.as_ref() else {
            return;
        };
        let kept: HashSet<CardId> = next.iter().map(|c| c.id).collect();
        let removed: Vec<CardId> = previous
            .iter()
            .map(|c| c.id)
            .filter(|id| !kept.contains(id))
            .collect();

        if let Err(e) = remote.upsert_all(next.as_slice()).await {
            tracing::warn!("Remote upsert failed: {}", e);
        }
        for id in removed {
            if let Err(e) = remote.delete(id).await {
                tracing::warn!("Remote delete of {} failed: {}", id, e);
            }
        }
    }

    /// Remote rows, or `None` when there is no remote, it failed, or it is empty.
    pub async fn fetch_remote(&self) -> Option<Vec<Card>> {
        let remote = self.remote.as_ref()?;
        match remote.fetch_all().await {
            Ok(cards) if cards.is_empty() => {
                tracing::debug!("Remote table is empty, keeping local board");
                None
            }
            Ok(cards) => Some(cards),
            Err(e) => {
                tracing::warn!("Remote load failed: {}", e);
                None
            }
        }
    }

    /// Upload the whole board and wait for the result. Returns the number of
    /// cards sent.
    pub async fn push_all(&self, cards: &CardCollection) -> BoardResult<usize> {
        match &self.remote {
            Some(remote) => {
                remote.upsert_all(cards.as_slice()).await?;
                Ok(cards.len())
            }
            None => Err(BoardError::Config("no remote store configured".into())),
        }
    }
}
