//! HTTP-backed collaborators: the shared card table and the link metadata
//! endpoint. Both are best-effort and never block local edits.

pub mod oembed;
pub mod rest_table;

pub use oembed::{LinkMetadata, OEmbedClient};
pub use rest_table::RestTableStore;

use storyboard_core::BoardError;

pub(crate) fn remote_error(context: &str, err: reqwest::Error) -> BoardError {
    BoardError::Remote(format!("{}: {}", context, err))
}
