use serde::{Deserialize, Serialize};

/// Coarse label for a response MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "XML")]
    Xml,
    JavaScript,
    #[serde(rename = "CSS")]
    Css,
    Image,
    Text,
    Other,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Json => "JSON",
            ResponseType::Html => "HTML",
            ResponseType::Xml => "XML",
            ResponseType::JavaScript => "JavaScript",
            ResponseType::Css => "CSS",
            ResponseType::Image => "Image",
            ResponseType::Text => "Text",
            ResponseType::Other => "Other",
        }
    }
}

/// Checked in order; the first substring hit wins.
const CONTENT_TYPE_MARKERS: [(&str, ResponseType); 7] = [
    ("json", ResponseType::Json),
    ("html", ResponseType::Html),
    ("xml", ResponseType::Xml),
    ("javascript", ResponseType::JavaScript),
    ("css", ResponseType::Css),
    ("image", ResponseType::Image),
    ("text", ResponseType::Text),
];

/// Request header name fragments that mark a header as important
const IMPORTANT_HEADER_MARKERS: [&str; 12] = [
    "authorization",
    "cookie",
    "content-type",
    "accept",
    "user-agent",
    "referer",
    "origin",
    "x-requested-with",
    "x-csrf-token",
    "x-api-key",
    "bearer",
    "token",
];

/// Classify a raw MIME string by substring, ignoring case
pub fn simplify_content_type(mime_type: &str) -> ResponseType {
    let lower = mime_type.to_lowercase();
    CONTENT_TYPE_MARKERS
        .iter()
        .find(|(marker, _)| lower.contains(marker))
        .map(|(_, kind)| *kind)
        .unwrap_or(ResponseType::Other)
}

/// Whether a request header is worth keeping in endpoint snapshots and templates.
///
/// Plain case-insensitive substring matching, except that `accept` only covers
/// the `Accept` header itself and not the `Accept-*` negotiation family.
pub fn is_important_header(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMPORTANT_HEADER_MARKERS.iter().any(|marker| match *marker {
        "accept" => !lower.starts_with("accept-") && lower.contains(marker),
        _ => lower.contains(marker),
    })
}
