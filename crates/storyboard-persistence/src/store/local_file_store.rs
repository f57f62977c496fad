use crate::serialization::JsonSerializer;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{LocalLoad, LocalStore, Serializer};
use std::path::{Path, PathBuf};
use storyboard_core::{AppConfig, BoardError, BoardResult};
use storyboard_domain::{validate_collection, Card};

/// Fixed namespaced key the board is stored under.
pub const STORAGE_KEY: &str = "story_sequence_board_v1";

/// Board stored as a single JSON array of cards in one file.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    path: PathBuf,
    serializer: JsonSerializer,
}

impl LocalFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            serializer: JsonSerializer,
        }
    }

    /// `{dir}/story_sequence_board_v1.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", STORAGE_KEY)))
    }

    /// Pick the board file: an explicit path wins, then the config file's
    /// `data_file`, then the platform data directory.
    pub fn resolve(explicit: Option<&Path>, config: &AppConfig) -> BoardResult<Self> {
        if let Some(path) = explicit.or(config.data_file.as_deref()) {
            return Ok(Self::new(path));
        }
        AppConfig::data_dir()
            .map(Self::in_dir)
            .ok_or_else(|| BoardError::Config("no data directory for the board file".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl LocalStore for LocalFileStore {
    async fn save(&self, cards: &[Card]) -> BoardResult<()> {
        let bytes = Serializer::<Vec<Card>>::serialize(&self.serializer, &cards.to_vec())?;
        AtomicWriter::write_atomic(&self.path, &bytes).await?;

        tracing::info!("Saved {} cards to {}", cards.len(), self.path.display());
        Ok(())
    }

    async fn load(&self) -> BoardResult<LocalLoad> {
        let Some(bytes) = AtomicWriter::read_if_exists(&self.path).await? else {
            return Ok(LocalLoad::Missing);
        };

        let cards: Vec<Card> = match Serializer::<Vec<Card>>::deserialize(&self.serializer, &bytes) {
            Ok(cards) => cards,
            Err(e) => return Ok(LocalLoad::Corrupt(e.to_string())),
        };
        if let Err(e) = validate_collection(&cards) {
            return Ok(LocalLoad::Corrupt(e.to_string()));
        }

        tracing::info!("Loaded {} cards from {}", cards.len(), self.path.display());
        Ok(LocalLoad::Loaded(cards))
    }
}
