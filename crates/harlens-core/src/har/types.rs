use serde::{Deserialize, Deserializer, Serialize};

/// Top-level HAR object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Har {
    pub log: Log,
}

/// Main HAR log object
///
/// Only `entries` is required; everything else falls back to its zero value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    #[serde(default, deserialize_with = "nullable")]
    pub version: String,
    #[serde(default, deserialize_with = "nullable")]
    pub creator: Creator,
    #[serde(default, deserialize_with = "nullable")]
    pub browser: Creator,
    #[serde(default, deserialize_with = "nullable")]
    pub pages: Vec<Page>,
    pub entries: Vec<Entry>,
}

/// Creator/Browser information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Creator {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub version: String,
}

impl Creator {
    /// `name version`, trimmed so an absent creator renders as an empty string
    pub fn display(&self) -> String {
        format!("{} {}", self.name, self.version).trim().to_string()
    }
}

/// Page information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    #[serde(deserialize_with = "nullable")]
    pub started_date_time: String,
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub page_timings: PageTimings,
}

/// Page timing information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageTimings {
    #[serde(deserialize_with = "nullable")]
    pub on_content_load: f64,
    #[serde(deserialize_with = "nullable")]
    pub on_load: f64,
}

/// Individual HTTP transaction entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entry {
    #[serde(rename = "pageref", deserialize_with = "nullable")]
    pub page_ref: String,
    #[serde(deserialize_with = "nullable")]
    pub started_date_time: String,
    #[serde(deserialize_with = "nullable")]
    pub time: f64,
    #[serde(deserialize_with = "nullable")]
    pub request: Request,
    #[serde(deserialize_with = "nullable")]
    pub response: Response,
    #[serde(deserialize_with = "nullable")]
    pub timings: Timings,
    #[serde(rename = "serverIPAddress", deserialize_with = "nullable")]
    pub server_ip_address: String,
}

/// HTTP request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Request {
    #[serde(deserialize_with = "nullable")]
    pub method: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub http_version: String,
    #[serde(deserialize_with = "nullable")]
    pub cookies: Vec<Cookie>,
    #[serde(deserialize_with = "nullable")]
    pub headers: Vec<Header>,
    #[serde(deserialize_with = "nullable")]
    pub query_string: Vec<QueryParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_data: Option<PostData>,
    #[serde(deserialize_with = "nullable")]
    pub headers_size: f64,
    #[serde(deserialize_with = "nullable")]
    pub body_size: f64,
}

impl Request {
    /// Request body text, if a non-empty one was captured
    pub fn body_text(&self) -> Option<&str> {
        self.post_data
            .as_ref()
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
    }
}

/// HTTP response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Response {
    #[serde(deserialize_with = "nullable")]
    pub status: i64,
    #[serde(deserialize_with = "nullable")]
    pub status_text: String,
    #[serde(deserialize_with = "nullable")]
    pub http_version: String,
    #[serde(deserialize_with = "nullable")]
    pub cookies: Vec<Cookie>,
    #[serde(deserialize_with = "nullable")]
    pub headers: Vec<Header>,
    #[serde(deserialize_with = "nullable")]
    pub content: Content,
    #[serde(rename = "redirectURL", deserialize_with = "nullable")]
    pub redirect_url: String,
    #[serde(deserialize_with = "nullable")]
    pub headers_size: f64,
    #[serde(deserialize_with = "nullable")]
    pub body_size: f64,
}

/// Cookie
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cookie {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

/// HTTP header
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

/// Query parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParam {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

/// POST data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostData {
    #[serde(deserialize_with = "nullable")]
    pub mime_type: String,
    #[serde(deserialize_with = "nullable")]
    pub params: Vec<Param>,
    #[serde(deserialize_with = "nullable")]
    pub text: String,
}

/// POST parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Param {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

/// Response content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Content {
    #[serde(deserialize_with = "nullable")]
    pub size: f64,
    #[serde(deserialize_with = "nullable")]
    pub mime_type: String,
    #[serde(deserialize_with = "nullable")]
    pub text: String,
    #[serde(deserialize_with = "nullable")]
    pub encoding: String,
}

/// Timing information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    #[serde(deserialize_with = "nullable")]
    pub blocked: f64,
    #[serde(deserialize_with = "nullable")]
    pub dns: f64,
    #[serde(deserialize_with = "nullable")]
    pub connect: f64,
    #[serde(deserialize_with = "nullable")]
    pub send: f64,
    #[serde(deserialize_with = "nullable")]
    pub wait: f64,
    #[serde(deserialize_with = "nullable")]
    pub receive: f64,
    #[serde(deserialize_with = "nullable")]
    pub ssl: f64,
}

/// Treat an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
