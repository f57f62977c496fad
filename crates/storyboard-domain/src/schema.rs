//! Validation rules for cards and card collections.
//!
//! Types already guarantee that status, priority and owner come from their
//! closed sets. The checks here cover what the types cannot: non-empty
//! titles, well-formed design links, timestamp ordering and unique ids.

use std::collections::HashSet;

use storyboard_core::{BoardError, BoardResult};
use url::Url;

use crate::Card;

/// Collect every rule the card breaks. An empty list means the card is valid.
pub fn card_issues(card: &Card) -> Vec<String> {
    let mut issues = Vec::new();

    if card.title.trim().is_empty() {
        issues.push("title must not be empty".to_string());
    }

    if let Some(link) = card.design_url.as_deref() {
        if !link.trim().is_empty() && Url::parse(link.trim()).is_err() {
            issues.push(format!("design link is not a valid URL: {}", link));
        }
    }

    if card.updated_at < card.created_at {
        issues.push("updated_at is earlier than created_at".to_string());
    }

    if card.tags.iter().any(|t| t.trim().is_empty()) {
        issues.push("tags must not be blank".to_string());
    }

    issues
}

pub fn validate_card(card: &Card) -> BoardResult<()> {
    let issues = card_issues(card);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(BoardError::Validation(format!(
            "card {}: {}",
            card.id,
            issues.join("; ")
        )))
    }
}

/// Every card must be valid and no id may appear twice.
pub fn validate_collection(cards: &[Card]) -> BoardResult<()> {
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        validate_card(card)?;
        if !seen.insert(card.id) {
            return Err(BoardError::Validation(format!("duplicate card id {}", card.id)));
        }
    }
    Ok(())
}
