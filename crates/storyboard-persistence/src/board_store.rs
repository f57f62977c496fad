//! The single owner of board state.
//!
//! `BoardStore` holds the current `CardCollection` snapshot, applies
//! commands one at a time, persists every result and publishes it to
//! subscribers. Remote loads merge in under the same writer lock, so a late
//! remote result can never be overwritten by a stale local write.
//!
//! Remote mirroring goes through one worker task fed by a channel, so the
//! remote table receives snapshots in the order they were dispatched.

use std::sync::{Arc, Weak};

use storyboard_core::{BoardResult, MergePolicy};
use storyboard_domain::{BoardCommand, Card, CardCollection};
use tokio::sync::{mpsc, oneshot, watch, Mutex};
use tokio::task::JoinHandle;

use crate::adapter::PersistenceAdapter;
use crate::conflict::merge_remote;

enum MirrorJob {
    Sync {
        previous: CardCollection,
        next: CardCollection,
    },
    /// Answered once every earlier job has been handled.
    Flush(oneshot::Sender<()>),
}

struct Inner {
    state: watch::Sender<CardCollection>,
    /// Writer lock.
    gate: Mutex<()>,
    mirror_tx: Option<mpsc::UnboundedSender<MirrorJob>>,
    adapter: PersistenceAdapter,
    policy: MergePolicy,
}

#[derive(Clone)]
pub struct BoardStore {
    inner: Arc<Inner>,
}

impl BoardStore {
    /// Load the initial board through the adapter.
    pub async fn open(adapter: PersistenceAdapter, policy: MergePolicy) -> BoardResult<Self> {
        let initial = adapter.load_initial().await?;
        tracing::debug!("Opened board with {} cards", initial.len());
        Ok(Self::with_snapshot(adapter, policy, initial))
    }

    /// Must be called from inside a tokio runtime when the adapter has a
    /// remote, since the mirror worker is spawned here.
    pub fn with_snapshot(
        adapter: PersistenceAdapter,
        policy: MergePolicy,
        initial: CardCollection,
    ) -> Self {
        let (state, _) = watch::channel(initial);
        let mirror_tx = adapter
            .has_remote()
            .then(|| spawn_mirror_worker(adapter.clone()));
        Self {
            inner: Arc::new(Inner {
                state,
                gate: Mutex::new(()),
                mirror_tx,
                adapter,
                policy,
            }),
        }
    }

    pub fn snapshot(&self) -> CardCollection {
        self.inner.state.borrow().clone()
    }

    /// Receive every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<CardCollection> {
        self.inner.state.subscribe()
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.inner.policy
    }

    pub fn has_remote(&self) -> bool {
        self.inner.adapter.has_remote()
    }

    /// Apply one command, persist the result exactly once, then publish it.
    /// A failing command leaves state and storage untouched.
    pub async fn dispatch(&self, command: &dyn BoardCommand) -> BoardResult<CardCollection> {
        let _gate = self.inner.gate.lock().await;
        let current = self.snapshot();
        let next = command.apply(&current)?;
        tracing::debug!("Dispatching: {}", command.description());

        self.inner.adapter.persist_local(&next).await?;
        self.enqueue(MirrorJob::Sync {
            previous: current,
            next: next.clone(),
        });
        self.inner.state.send_replace(next.clone());
        Ok(next)
    }

    fn enqueue(&self, job: MirrorJob) -> bool {
        match &self.inner.mirror_tx {
            Some(tx) => match tx.send(job) {
                Ok(()) => true,
                Err(_) => {
                    tracing::warn!("Remote mirror worker has stopped, skipping mirror");
                    false
                }
            },
            None => false,
        }
    }

    /// Fetch the remote table and merge it into the board. Returns whether
    /// the board changed.
    pub async fn refresh_from_remote(&self) -> BoardResult<bool> {
        match self.inner.adapter.fetch_remote().await {
            Some(cards) => apply_remote(&self.inner, cards).await,
            None => Ok(false),
        }
    }

    /// Run `refresh_from_remote` in the background. The task only holds a
    /// weak reference, and skips the merge when the store is gone by the time
    /// the remote answers.
    pub fn spawn_remote_refresh(&self) -> JoinHandle<()> {
        let adapter = self.inner.adapter.clone();
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            let Some(cards) = adapter.fetch_remote().await else {
                return;
            };
            let Some(inner) = weak.upgrade() else {
                tracing::debug!("Board closed before the remote load finished");
                return;
            };
            if let Err(e) = apply_remote(&inner, cards).await {
                tracing::warn!("Failed to apply remote cards: {}", e);
            }
        })
    }

    /// Upload the whole current board to the remote table, after any mirrors
    /// still queued.
    pub async fn push_all(&self) -> BoardResult<usize> {
        self.flush().await;
        let _gate = self.inner.gate.lock().await;
        self.inner.adapter.push_all(&self.snapshot()).await
    }

    /// Wait until every mirror queued so far has reached the remote.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.enqueue(MirrorJob::Flush(done_tx)) && done_rx.await.is_err() {
            tracing::warn!("Remote mirror worker stopped before flushing");
        }
    }
}

fn spawn_mirror_worker(adapter: PersistenceAdapter) -> mpsc::UnboundedSender<MirrorJob> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            match job {
                MirrorJob::Sync { previous, next } => adapter.mirror(&previous, &next).await,
                MirrorJob::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        tracing::debug!("Remote mirror worker finished");
    });
    tx
}

async fn apply_remote(inner: &Inner, cards: Vec<Card>) -> BoardResult<bool> {
    let _gate = inner.gate.lock().await;
    let current = inner.state.borrow().clone();
    let merged = merge_remote(&current, cards, inner.policy);
    if merged == current {
        return Ok(false);
    }

    inner.adapter.persist_local(&merged).await?;
    tracing::info!(
        "Merged remote cards ({:?}): {} -> {} cards",
        inner.policy,
        current.len(),
        merged.len()
    );
    inner.state.send_replace(merged);
    Ok(true)
}
