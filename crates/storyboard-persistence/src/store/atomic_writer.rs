use std::path::Path;
use storyboard_core::{BoardError, BoardResult};
use tokio::fs;

/// Whole-file writes that never leave a half-written board behind.
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write `data` to a temp file next to `path`, then rename it into place.
    /// Missing parent directories are created.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> BoardResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        // Same directory keeps the rename on one filesystem.
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        fs::write(temp_file.path(), data).await?;
        temp_file
            .persist(path)
            .map_err(|e| BoardError::Io(e.error))?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read the whole file, or `None` when it does not exist.
    pub async fn read_if_exists(path: &Path) -> BoardResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
