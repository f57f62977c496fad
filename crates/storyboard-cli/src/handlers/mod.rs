pub mod board;
pub mod card;
pub mod link;
pub mod sync;
