//! Card filtering for list views.
//!
//! `CardFilters` holds what to filter by; each criterion is a small
//! `CardFilter` implementation so callers can compose their own.

use crate::{Card, ColumnId, Owner, Priority};

/// Trait for filtering cards by various criteria.
pub trait CardFilter {
    /// Returns true if the card matches the filter criteria.
    fn matches(&self, card: &Card) -> bool;
}

/// Filter cards by the column they sit in.
pub struct StatusFilter(pub ColumnId);

impl CardFilter for StatusFilter {
    fn matches(&self, card: &Card) -> bool {
        card.status == self.0
    }
}

pub struct PriorityFilter(pub Priority);

impl CardFilter for PriorityFilter {
    fn matches(&self, card: &Card) -> bool {
        card.priority == self.0
    }
}

pub struct OwnerFilter(pub Owner);

impl CardFilter for OwnerFilter {
    fn matches(&self, card: &Card) -> bool {
        card.owner == self.0
    }
}

/// Matches cards carrying the tag, ignoring case.
pub struct TagFilter(pub String);

impl CardFilter for TagFilter {
    fn matches(&self, card: &Card) -> bool {
        card.tags.iter().any(|t| t.eq_ignore_ascii_case(&self.0))
    }
}

/// Filter settings for querying cards. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardFilters {
    pub status: Option<ColumnId>,
    pub priority: Option<Priority>,
    pub owner: Option<Owner>,
    pub tag: Option<String>,
}

impl CardFilters {
    pub fn has_active_filters(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || self.owner.is_some() || self.tag.is_some()
    }

    fn active(&self) -> Vec<Box<dyn CardFilter>> {
        let mut filters: Vec<Box<dyn CardFilter>> = Vec::new();
        if let Some(status) = self.status {
            filters.push(Box::new(StatusFilter(status)));
        }
        if let Some(priority) = self.priority {
            filters.push(Box::new(PriorityFilter(priority)));
        }
        if let Some(owner) = self.owner {
            filters.push(Box::new(OwnerFilter(owner)));
        }
        if let Some(tag) = &self.tag {
            filters.push(Box::new(TagFilter(tag.clone())));
        }
        filters
    }

    /// Cards matching every active criterion, in their original order.
    pub fn apply<'a>(&self, cards: impl IntoIterator<Item = &'a Card>) -> Vec<&'a Card> {
        let filters = self.active();
        cards
            .into_iter()
            .filter(|card| filters.iter().all(|f| f.matches(card)))
            .collect()
    }
}
