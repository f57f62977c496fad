pub mod atomic_writer;
pub mod local_file_store;

pub use atomic_writer::AtomicWriter;
pub use local_file_store::{LocalFileStore, STORAGE_KEY};
