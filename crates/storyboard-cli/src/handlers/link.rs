use std::path::Path;

use crate::cli::LinkAction;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use storyboard_core::AppConfig;
use storyboard_domain::{extract_embed_src, normalize_embed_input, PreviewFrame};
use storyboard_persistence::{LinkMetadata, OEmbedClient};

#[derive(Serialize)]
struct NormalizedLink {
    input: String,
    extracted: String,
    normalized: String,
}

#[derive(Serialize)]
struct Preview {
    #[serde(flatten)]
    frame: PreviewFrame,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<LinkMetadata>,
}

/// `link normalize` is pure; `link preview` only opens the board when it
/// needs a card's stored link.
pub async fn handle(file: Option<&Path>, config: AppConfig, action: LinkAction) -> anyhow::Result<()> {
    match action {
        LinkAction::Normalize { input } => {
            output::output_success(NormalizedLink {
                extracted: extract_embed_src(&input),
                normalized: normalize_embed_input(&input),
                input,
            })?;
        }
        LinkAction::Preview {
            id,
            input,
            title,
            metadata,
        } => {
            let (title, raw) = match id {
                Some(id) => {
                    let ctx = CliContext::load(file, config.clone()).await?;
                    let card = ctx.get_card(id)?;
                    ctx.finish().await;
                    let link = card
                        .design_url
                        .ok_or_else(|| anyhow::anyhow!("Card {} has no design link", id))?;
                    (title.unwrap_or(card.title), link)
                }
                None => (title.unwrap_or_default(), input.unwrap_or_default()),
            };

            let frame = PreviewFrame::for_link(&title, &raw)
                .ok_or_else(|| anyhow::anyhow!("Nothing to preview: the link is empty"))?;

            let metadata = if metadata {
                OEmbedClient::lookup_with(&config.metadata, &extract_embed_src(&raw)).await
            } else {
                None
            };

            output::output_success(Preview {
                html: frame.to_html(),
                frame,
                metadata,
            })?;
        }
    }
    Ok(())
}
