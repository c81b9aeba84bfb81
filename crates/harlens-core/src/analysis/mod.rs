mod aggregator;
mod classify;
mod params;
mod url;

pub use aggregator::TrafficAnalyzer;
pub use classify::{ResponseType, is_important_header, simplify_content_type};
pub use params::extract_body_parameters;
pub use url::{extract_host, extract_path};

use crate::har::Har;
use crate::templates::CodeTemplates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence count per category key. Sorted keys keep the JSON output stable.
pub type FrequencyMap = BTreeMap<String, usize>;

/// Everything learned from a single HAR file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub metadata: Metadata,
    pub hosts: Vec<HostInfo>,
    pub apis: Vec<ApiInfo>,
    pub extracted_data: ExtractedData,
    pub code_templates: CodeTemplates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub file_name: String,
    pub analysis_time: DateTime<Utc>,
    pub total_requests: usize,
    pub unique_hosts: usize,
    /// `HH:MM:SS - HH:MM:SS (N.N minutes)`, empty when no timestamp parsed
    pub time_span: String,
    pub browser_info: String,
    pub creator_info: String,
    pub har_version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    pub host: String,
    pub request_count: usize,
    pub methods: Vec<String>,
    pub paths: Vec<String>,
}

/// One endpoint, keyed by `(method, path)`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    pub method: String,
    pub url: String,
    pub host: String,
    pub path: String,
    pub parameters: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub response_type: ResponseType,
    pub status_code: i64,
    pub call_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    pub parameters: FrequencyMap,
    pub headers: FrequencyMap,
    pub response_types: FrequencyMap,
    pub status_codes: FrequencyMap,
    pub methods: FrequencyMap,
    pub content_types: FrequencyMap,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, har: &Har) -> crate::Result<Self::Output>;
}

/// Bump the counter for `key`, creating it on first sight
pub(crate) fn count(map: &mut FrequencyMap, key: impl Into<String>) {
    *map.entry(key.into()).or_insert(0) += 1;
}
