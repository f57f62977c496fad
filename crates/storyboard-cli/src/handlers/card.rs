use std::io::{self, BufRead, Write};

use crate::cli::{CardAction, CardAddArgs, CardListArgs, CardUpdateArgs};
use crate::context::CliContext;
use crate::output;
use storyboard_domain::{
    extract_embed_src, Card, CardFilters, CardUpdate, ColumnId, FieldUpdate, MoveCard,
    OrderedSorter, RemoveCard, ReorderCard, SortOrder, UpdateCard, UpsertCard,
};

pub async fn handle(ctx: &CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Add(args) => {
            let mut card = Card::new(args.title.trim(), args.status.unwrap_or(ColumnId::Ideation));
            let id = card.id;
            card.update(build_card_update_from_add(args));

            let cards = ctx.execute(&UpsertCard { card }).await?;
            output::output_success(cards.find(id))?;
        }
        CardAction::Get { id } => {
            output::output_success(ctx.get_card(id)?)?;
        }
        CardAction::List(args) => {
            let snapshot = ctx.snapshot();
            let mut cards: Vec<Card> = build_filters(&args)
                .apply(&snapshot)
                .into_iter()
                .cloned()
                .collect();
            if let Some(field) = args.sort {
                let order = if args.desc {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                };
                OrderedSorter::new(field, order).sort_by(&mut cards);
            }
            output::output_list(cards)?;
        }
        CardAction::Update(args) => {
            let id = args.id;
            ctx.get_card(id)?;
            let updates = build_card_update(args);
            let cards = ctx
                .execute(&UpdateCard {
                    card_id: id,
                    updates,
                })
                .await?;
            output::output_success(cards.find(id))?;
        }
        CardAction::Move { id, status } => {
            ctx.get_card(id)?;
            let cards = ctx.execute(&MoveCard { card_id: id, status }).await?;
            output::output_success(cards.find(id))?;
        }
        CardAction::Reorder { id, before } => {
            ctx.get_card(id)?;
            let cards = ctx.execute(&ReorderCard { card_id: id, before }).await?;
            let position = cards.iter().position(|c| c.id == id);
            output::output_success(serde_json::json!({
                "id": id,
                "before": before,
                "position": position,
            }))?;
        }
        CardAction::Delete { id, yes } => {
            let card = ctx.get_card(id)?;
            if !yes && !confirm(&format!("Delete card '{}'?", card.title))? {
                output::output_success(serde_json::json!({"deleted": false, "id": id}))?;
                return Ok(());
            }
            ctx.execute(&RemoveCard { card_id: id }).await?;
            output::output_success(serde_json::json!({"deleted": true, "id": id}))?;
        }
    }
    Ok(())
}

/// Ask on stderr and read one line from stdin. Anything but y/yes declines.
fn confirm(prompt: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{} [y/N] ", prompt)?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn build_filters(args: &CardListArgs) -> CardFilters {
    CardFilters {
        status: args.status,
        priority: args.priority,
        owner: args.owner,
        tag: args.tag.clone(),
    }
}

fn build_card_update_from_add(args: CardAddArgs) -> CardUpdate {
    CardUpdate {
        title: None,
        status: None,
        priority: args.priority,
        owner: args.owner,
        tags: (!args.tags.is_empty()).then_some(args.tags),
        description: args.description.map(FieldUpdate::Set).unwrap_or_default(),
        notes: args.notes.map(FieldUpdate::Set).unwrap_or_default(),
        design_url: args
            .link
            .map(|link| FieldUpdate::Set(extract_embed_src(&link)))
            .unwrap_or_default(),
        due: args.due.map(FieldUpdate::Set).unwrap_or_default(),
        approved_by: args.approved_by.map(FieldUpdate::Set).unwrap_or_default(),
        platform: args.platform.map(FieldUpdate::Set).unwrap_or_default(),
        slides: args.slides.map(FieldUpdate::Set).unwrap_or_default(),
    }
}

fn build_card_update(args: CardUpdateArgs) -> CardUpdate {
    let tags = if args.clear_tags {
        Some(Vec::new())
    } else if args.tags.is_empty() {
        None
    } else {
        Some(args.tags)
    };

    CardUpdate {
        title: args.title,
        status: args.status,
        priority: args.priority,
        owner: args.owner,
        tags,
        description: FieldUpdate::from_input(args.description, args.clear_description),
        notes: FieldUpdate::from_input(args.notes, args.clear_notes),
        design_url: FieldUpdate::from_input(
            args.link.map(|link| extract_embed_src(&link)),
            args.clear_link,
        ),
        due: FieldUpdate::from_input(args.due, args.clear_due),
        approved_by: FieldUpdate::from_input(args.approved_by, args.clear_approved_by),
        platform: FieldUpdate::from_input(args.platform, args.clear_platform),
        slides: FieldUpdate::from_input(args.slides, args.clear_slides),
    }
}
