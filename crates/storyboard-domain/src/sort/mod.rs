//! Card sorting functionality.
//!
//! All sorts are stable, so cards that compare equal keep their collection
//! order. Column views rely on that for priority tie-breaks.

use crate::Card;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Enum dispatch for sorting cards by a specific field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Priority,
    Status,
    CreatedAt,
    UpdatedAt,
    Title,
    /// Dated cards by due date; free-text or missing due labels last.
    Due,
}

impl SortBy {
    pub fn compare(&self, a: &Card, b: &Card) -> Ordering {
        match self {
            Self::Priority => a.priority.rank().cmp(&b.priority.rank()),
            Self::Status => a.status.position().cmp(&b.status.position()),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::Due => match (a.due_date(), b.due_date()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "priority" => Ok(Self::Priority),
            "status" => Ok(Self::Status),
            "created" | "created_at" => Ok(Self::CreatedAt),
            "updated" | "updated_at" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            "due" => Ok(Self::Due),
            _ => Err(format!(
                "Invalid sort field: {}. Use: priority, status, created, updated, title, due",
                s
            )),
        }
    }
}

/// Wrapper that applies sort order (ascending/descending) to a sort field.
pub struct OrderedSorter {
    sorter: SortBy,
    order: SortOrder,
}

impl OrderedSorter {
    pub fn new(sorter: SortBy, order: SortOrder) -> Self {
        Self { sorter, order }
    }

    /// Stable sort in place. Works with both `&Card` and `Card` elements.
    pub fn sort_by<T: Borrow<Card>>(&self, cards: &mut [T]) {
        cards.sort_by(|a, b| {
            let cmp = self.sorter.compare(a.borrow(), b.borrow());
            match self.order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        });
    }
}

/// High before Medium before Low; equal priorities keep their order.
pub fn sort_by_priority<T: Borrow<Card>>(cards: &mut [T]) {
    OrderedSorter::new(SortBy::Priority, SortOrder::Ascending).sort_by(cards);
}
