pub mod card;
pub mod collection;
pub mod column;
pub mod commands;
pub mod embed;
pub mod field_update;
pub mod filter;
pub mod schema;
pub mod seed;
pub mod sort;

pub use card::{Card, CardId, CardUpdate, Owner, Platform, Priority};
pub use collection::{CardCollection, ColumnBucket, ColumnView};
pub use column::{Column, ColumnId, ColumnTag, COLUMNS};
pub use commands::{BoardCommand, MoveCard, RemoveCard, ReorderCard, UpdateCard, UpsertCard};
pub use embed::{extract_embed_src, normalize_embed_input, PreviewFrame};
pub use field_update::FieldUpdate;
pub use filter::CardFilters;
pub use schema::{validate_card, validate_collection};
pub use seed::example_cards;
pub use sort::{OrderedSorter, SortBy, SortOrder};
