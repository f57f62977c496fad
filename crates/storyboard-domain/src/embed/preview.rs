use serde::Serialize;

use super::normalize_embed_input;

/// Sandbox permissions for the preview frame. Never includes top-level
/// navigation.
pub const FRAME_SANDBOX: &str = "allow-scripts allow-same-origin allow-popups allow-presentation";
pub const FRAME_REFERRER_POLICY: &str = "no-referrer";

/// A restricted frame showing a design inside the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewFrame {
    pub title: String,
    pub src: String,
}

impl PreviewFrame {
    /// Build a preview for whatever the user pasted. Returns `None` when the
    /// input holds no link at all.
    pub fn for_link(title: &str, raw_link: &str) -> Option<Self> {
        let src = normalize_embed_input(raw_link);
        if src.is_empty() {
            return None;
        }
        let title = match title.trim() {
            "" => "Design preview",
            t => t,
        };
        Some(Self {
            title: title.to_string(),
            src,
        })
    }

    /// Markup for the preview overlay.
    pub fn to_html(&self) -> String {
        format!(
            r#"<iframe src="{}" title="{}" sandbox="{}" referrerpolicy="{}" allow="fullscreen" loading="lazy"></iframe>"#,
            html_escape::encode_double_quoted_attribute(&self.src),
            html_escape::encode_double_quoted_attribute(&self.title),
            FRAME_SANDBOX,
            FRAME_REFERRER_POLICY,
        )
    }
}
