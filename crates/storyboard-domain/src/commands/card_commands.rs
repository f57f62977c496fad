use super::BoardCommand;
use crate::schema::validate_card;
use crate::{Card, CardCollection, CardId, CardUpdate, ColumnId};
use storyboard_core::BoardResult;

/// Drop a card onto a column.
pub struct MoveCard {
    pub card_id: CardId,
    pub status: ColumnId,
}

impl BoardCommand for MoveCard {
    fn apply(&self, cards: &CardCollection) -> BoardResult<CardCollection> {
        Ok(cards.move_card(self.card_id, self.status))
    }

    fn description(&self) -> String {
        format!("Move card {} to {}", self.card_id, self.status)
    }
}

/// Drop a card onto another card: it lands just before it.
pub struct ReorderCard {
    pub card_id: CardId,
    pub before: Option<CardId>,
}

impl BoardCommand for ReorderCard {
    fn apply(&self, cards: &CardCollection) -> BoardResult<CardCollection> {
        Ok(cards.reorder(self.card_id, self.before))
    }

    fn description(&self) -> String {
        match self.before {
            Some(before) => format!("Reorder card {} before {}", self.card_id, before),
            None => format!("Reorder card {} to front", self.card_id),
        }
    }
}

/// Save a whole card from the edit form, creating it if it is new.
pub struct UpsertCard {
    pub card: Card,
}

impl BoardCommand for UpsertCard {
    fn apply(&self, cards: &CardCollection) -> BoardResult<CardCollection> {
        validate_card(&self.card)?;
        Ok(cards.upsert(self.card.clone()))
    }

    fn description(&self) -> String {
        format!("Save card: '{}'", self.card.title)
    }
}

/// Apply a partial edit to an existing card.
pub struct UpdateCard {
    pub card_id: CardId,
    pub updates: CardUpdate,
}

impl BoardCommand for UpdateCard {
    fn apply(&self, cards: &CardCollection) -> BoardResult<CardCollection> {
        let Some(existing) = cards.find(self.card_id) else {
            return Ok(cards.clone());
        };
        let mut edited = existing.clone();
        edited.update(self.updates.clone());
        validate_card(&edited)?;
        Ok(cards.upsert(edited))
    }

    fn description(&self) -> String {
        format!("Update card {}", self.card_id)
    }
}

pub struct RemoveCard {
    pub card_id: CardId,
}

impl BoardCommand for RemoveCard {
    fn apply(&self, cards: &CardCollection) -> BoardResult<CardCollection> {
        Ok(cards.remove(self.card_id))
    }

    fn description(&self) -> String {
        format!("Delete card {}", self.card_id)
    }
}
