use async_trait::async_trait;
use storyboard_core::BoardResult;
use storyboard_domain::{Card, CardId};

/// Outcome of reading the local board file.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalLoad {
    /// A valid collection was read.
    Loaded(Vec<Card>),
    /// Nothing has been saved yet.
    Missing,
    /// Something is stored but it is not a valid collection.
    Corrupt(String),
}

/// Durable storage on this device. Whole-value reads and writes only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Replace the stored collection.
    async fn save(&self, cards: &[Card]) -> BoardResult<()>;

    /// Read the stored collection. Only I/O failures are errors; unreadable
    /// content is reported as `LocalLoad::Corrupt`.
    async fn load(&self) -> BoardResult<LocalLoad>;
}

/// Optional shared table that mirrors the board.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All rows, most recently updated first.
    async fn fetch_all(&self) -> BoardResult<Vec<Card>>;

    /// Insert or overwrite rows by card id.
    async fn upsert_all(&self, cards: &[Card]) -> BoardResult<()>;

    async fn delete(&self, id: CardId) -> BoardResult<()>;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    fn serialize(&self, data: &T) -> BoardResult<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> BoardResult<T>;
}
