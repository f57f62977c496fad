//! The ordered card collection behind the board.
//!
//! A `CardCollection` is an immutable snapshot. Every operation returns a new
//! snapshot and leaves the receiver untouched, so readers holding an older
//! snapshot never observe a half-applied change. Collection order is global:
//! it decides the order of cards inside each column.

use serde::Serialize;
use std::sync::Arc;

use storyboard_core::ColumnSort;

use crate::column::{Column, ColumnId, COLUMNS};
use crate::sort::sort_by_priority;
use crate::{Card, CardId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardCollection {
    cards: Arc<Vec<Card>>,
}

impl From<Vec<Card>> for CardCollection {
    fn from(cards: Vec<Card>) -> Self {
        Self {
            cards: Arc::new(cards),
        }
    }
}

impl CardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.as_ref().clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn find(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.find(id).is_some()
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    /// True when both values share the same underlying snapshot.
    pub fn same_snapshot(&self, other: &CardCollection) -> bool {
        Arc::ptr_eq(&self.cards, &other.cards)
    }

    /// Cards that are not yet posted.
    pub fn active_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_posted()).count()
    }

    fn with_card<F>(&self, id: CardId, edit: F) -> Self
    where
        F: FnOnce(&mut Card),
    {
        let Some(idx) = self.cards.iter().position(|c| c.id == id) else {
            return self.clone();
        };
        let mut cards = self.to_vec();
        edit(&mut cards[idx]);
        Self::from(cards)
    }

    /// Set the card's status and bump `updated_at`. Unknown ids leave the
    /// collection unchanged.
    pub fn move_card(&self, id: CardId, status: ColumnId) -> Self {
        self.with_card(id, |card| card.move_to(status))
    }

    /// Reinsert the card immediately before `before`, or at the front when
    /// `before` is `None` or not among the remaining cards (including when it
    /// names the moved card itself). Every other card keeps its relative order.
    pub fn reorder(&self, id: CardId, before: Option<CardId>) -> Self {
        let Some(idx) = self.cards.iter().position(|c| c.id == id) else {
            return self.clone();
        };
        let mut rest = self.to_vec();
        let item = rest.remove(idx);
        let target = before
            .and_then(|b| rest.iter().position(|c| c.id == b))
            .unwrap_or(0);
        rest.insert(target, item);
        Self::from(rest)
    }

    /// Replace an existing card's fields (keeping its creation time) or
    /// prepend a new card stamped with the current time.
    pub fn upsert(&self, card: Card) -> Self {
        if self.contains(card.id) {
            return self.with_card(card.id, |existing| existing.replace_fields(card));
        }

        let mut card = card;
        let now = chrono::Utc::now();
        card.created_at = now;
        card.updated_at = now;

        let mut cards = Vec::with_capacity(self.len() + 1);
        cards.push(card);
        cards.extend(self.cards.iter().cloned());
        Self::from(cards)
    }

    pub fn remove(&self, id: CardId) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        Self::from(
            self.cards
                .iter()
                .filter(|c| c.id != id)
                .cloned()
                .collect::<Vec<_>>(),
        )
    }

    /// Group cards by column. Every column appears, in board order, even when
    /// empty. Inside a column cards keep collection order, or are stably
    /// sorted by priority when asked to.
    pub fn by_column(&self, sort: ColumnSort) -> ColumnView {
        let mut buckets: Vec<ColumnBucket> = COLUMNS
            .iter()
            .map(|column| ColumnBucket {
                column: *column,
                count: 0,
                cards: Vec::new(),
            })
            .collect();

        for card in self.cards.iter() {
            buckets[card.status.position()].cards.push(card.clone());
        }

        for bucket in &mut buckets {
            if sort == ColumnSort::Priority {
                sort_by_priority(&mut bucket.cards);
            }
            bucket.count = bucket.cards.len();
        }

        ColumnView {
            active: self.active_count(),
            columns: buckets,
        }
    }
}

impl<'a> IntoIterator for &'a CardCollection {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnBucket {
    pub column: Column,
    pub count: usize,
    pub cards: Vec<Card>,
}

/// The board as displayed: one bucket per fixed column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub active: usize,
    pub columns: Vec<ColumnBucket>,
}

impl ColumnView {
    pub fn cards(&self, id: ColumnId) -> &[Card] {
        &self.columns[id.position()].cards
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnId, &[Card])> {
        self.columns
            .iter()
            .map(|bucket| (bucket.column.id, bucket.cards.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|b| b.cards.len()).sum()
    }
}
