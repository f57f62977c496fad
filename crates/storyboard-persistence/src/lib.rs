pub mod adapter;
pub mod board_store;
pub mod conflict;
pub mod remote;
pub mod serialization;
pub mod store;
pub mod traits;

pub use adapter::PersistenceAdapter;
pub use board_store::BoardStore;
pub use conflict::{merge_remote, LastWriteWinsResolver};
pub use remote::{LinkMetadata, OEmbedClient, RestTableStore};
pub use serialization::JsonSerializer;
pub use store::{AtomicWriter, LocalFileStore, STORAGE_KEY};
pub use traits::*;
