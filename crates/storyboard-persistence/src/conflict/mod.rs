//! Reconciling a late remote load with the board that is already showing.

pub mod resolver;

pub use resolver::LastWriteWinsResolver;

use std::collections::HashMap;

use storyboard_core::MergePolicy;
use storyboard_domain::{Card, CardCollection, CardId};

/// Combine the current snapshot with rows fetched from the remote table.
///
/// `LastWriteWins` walks the local order, swapping in newer remote copies,
/// then appends remote-only cards in remote order. Cards that only exist
/// locally are kept. `RemoteWins` replaces the board with the remote rows,
/// unless the remote returned nothing.
pub fn merge_remote(local: &CardCollection, remote: Vec<Card>, policy: MergePolicy) -> CardCollection {
    if remote.is_empty() {
        return local.clone();
    }

    match policy {
        MergePolicy::RemoteWins => CardCollection::from(remote),
        MergePolicy::LastWriteWins => {
            let resolver = LastWriteWinsResolver;
            let mut incoming: HashMap<CardId, Card> = HashMap::with_capacity(remote.len());
            let mut remote_order = Vec::with_capacity(remote.len());
            for card in remote {
                if !incoming.contains_key(&card.id) {
                    remote_order.push(card.id);
                }
                incoming.insert(card.id, card);
            }

            let mut merged = Vec::with_capacity(local.len() + incoming.len());
            for card in local.iter() {
                match incoming.remove(&card.id) {
                    Some(theirs) => {
                        tracing::debug!("{}", resolver.explain_resolution(card, &theirs));
                        if resolver.should_use_remote(card, &theirs) {
                            merged.push(theirs);
                        } else {
                            merged.push(card.clone());
                        }
                    }
                    None => merged.push(card.clone()),
                }
            }
            for id in remote_order {
                if let Some(card) = incoming.remove(&id) {
                    merged.push(card);
                }
            }

            CardCollection::from(merged)
        }
    }
}
