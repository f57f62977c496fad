//! Design-tool link normalization.
//!
//! Users paste whatever the design tool gives them: a share link, an edit
//! link, or a whole `<iframe>` embed snippet. Everything here turns that into
//! one canonical embeddable URL. All functions are pure and never fail; input
//! that cannot be understood is handed back as-is.

mod preview;

pub use preview::PreviewFrame;

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Host suffix of the design tool whose links are rewritten.
pub const DESIGN_HOST: &str = "canva.com";

const EMBED_BASE: &str = "https://www.canva.com";
const DESIGN_SEGMENT: &str = "design";
const EMBED_FLAG: &str = "embed";

/// The entities embed snippets actually contain, in decode order. `&amp;`
/// goes first to match how the snippets are produced.
const ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&#x2F;", "/"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

static SRC_ATTR: OnceLock<Regex> = OnceLock::new();

fn src_attr() -> &'static Regex {
    SRC_ATTR.get_or_init(|| {
        Regex::new(r#"(?i)src=["']([^"']+)["']"#).expect("src attribute pattern is valid")
    })
}

/// Decode the fixed set of HTML entities found in embed snippets. Anything
/// else is left alone.
pub fn decode_html_entities(input: &str) -> String {
    ENTITIES
        .iter()
        .fold(input.to_string(), |acc, (entity, plain)| {
            acc.replace(entity, plain)
        })
}

fn looks_like_markup(input: &str) -> bool {
    input.contains("<iframe") || input.contains("src=")
}

/// Reduce pasted text to the link it carries.
///
/// Trims the input; for markup, decodes entities and returns the first quoted
/// `src=` value. Falls back to the trimmed input.
pub fn extract_embed_src(input: &str) -> String {
    let raw = input.trim();
    if raw.is_empty() {
        return String::new();
    }

    if looks_like_markup(raw) {
        let decoded = decode_html_entities(raw);
        if let Some(src) = src_attr().captures(&decoded).and_then(|c| c.get(1)) {
            return src.as_str().to_string();
        }
    }

    raw.to_string()
}

fn is_design_host(url: &Url) -> bool {
    url.host_str().is_some_and(|host| {
        let host = host.to_ascii_lowercase();
        host == DESIGN_HOST || host.ends_with(&format!(".{}", DESIGN_HOST))
    })
}

/// Rewrite a single link into its embeddable form.
///
/// Links on other hosts, and strings that do not parse as URLs, come back
/// unchanged.
pub fn embed_url(link: &str) -> String {
    let Ok(mut url) = Url::parse(link) else {
        tracing::debug!("Not a URL, keeping as-is: {}", link);
        return link.to_string();
    };

    if !is_design_host(&url) {
        return link.to_string();
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    if let Some(idx) = segments.iter().position(|s| *s == DESIGN_SEGMENT) {
        if let Some(design_id) = segments.get(idx + 1) {
            // A segment after the id that is not an action is a share token.
            return match segments.get(idx + 2) {
                Some(token) if *token != "view" && *token != "edit" => {
                    format!("{EMBED_BASE}/{DESIGN_SEGMENT}/{design_id}/{token}/view?{EMBED_FLAG}")
                }
                _ => format!("{EMBED_BASE}/{DESIGN_SEGMENT}/{design_id}/view?{EMBED_FLAG}"),
            };
        }
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != EMBED_FLAG)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair(EMBED_FLAG, "");
    url.to_string()
}

/// Turn anything a user pasted into a canonical embed link.
///
/// Empty or whitespace-only input gives an empty string.
pub fn normalize_embed_input(input: &str) -> String {
    let working = extract_embed_src(input);
    if working.is_empty() {
        return working;
    }
    embed_url(&working)
}
