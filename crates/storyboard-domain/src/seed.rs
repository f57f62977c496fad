//! Example cards shown on a fresh board.

use crate::{Card, CardCollection, ColumnId, Platform, Priority};

struct SeedCard {
    title: &'static str,
    description: &'static str,
    status: ColumnId,
    priority: Priority,
    platform: Platform,
    slides: &'static str,
    due: &'static str,
}

const SEED_CARDS: [SeedCard; 4] = [
    SeedCard {
        title: "Behind the Scenes #4",
        description: "Shoot-day recap with before/after frames and a reveal on the last slide.",
        status: ColumnId::Ideation,
        priority: Priority::High,
        platform: Platform::Instagram,
        slides: "7 slides",
        due: "Due Feb 6",
    },
    SeedCard {
        title: "3 Editing Mistakes to Avoid",
        description: "Educational sequence with one red flag per slide.",
        status: ColumnId::Ideation,
        priority: Priority::Medium,
        platform: Platform::Instagram,
        slides: "5 slides",
        due: "Due Feb 8",
    },
    SeedCard {
        title: "How We Planned a Launch Week",
        description: "Thread-style story sequence in a personal testimony format.",
        status: ColumnId::NeedsEditing,
        priority: Priority::Medium,
        platform: Platform::Twitter,
        slides: "4 slides",
        due: "Due Feb 7",
    },
    SeedCard {
        title: "Behind the Scenes #2",
        description: "Full sequence approved. Posting Wednesday 9 AM for peak engagement.",
        status: ColumnId::Scheduled,
        priority: Priority::High,
        platform: Platform::Instagram,
        slides: "8 slides",
        due: "Feb 5 · 9AM",
    },
];

/// A fresh set of example cards with new ids and current timestamps.
pub fn example_cards() -> CardCollection {
    let cards: Vec<Card> = SEED_CARDS
        .iter()
        .map(|seed| {
            let mut card = Card::new(seed.title, seed.status);
            card.description = Some(seed.description.to_string());
            card.priority = seed.priority;
            card.platform = Some(seed.platform);
            card.slides = Some(seed.slides.to_string());
            card.due = Some(seed.due.to_string());
            card
        })
        .collect();
    CardCollection::from(cards)
}
