use crate::analysis::{AnalysisResult, is_important_header};
use serde::{Deserialize, Serialize};

/// Illustrative client-code snippets derived from an analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeTemplates {
    /// Data-transfer-object shapes commonly returned by JSON APIs
    pub dto_shapes: Vec<String>,
    /// One comment line per endpoint called more than once
    pub api_endpoints: Vec<String>,
    /// Header-setting snippets for recurring important headers
    pub headers: Vec<String>,
}

const API_RESPONSE_SHAPE: &str = r#"#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    pub message: String,
    pub data: T,
}"#;

const PAGED_RESPONSE_SHAPE: &str = r#"#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u64,
    pub number: u64,
}"#;

pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn generate(result: &AnalysisResult) -> CodeTemplates {
        CodeTemplates {
            dto_shapes: Self::dto_shapes(),
            api_endpoints: Self::api_endpoints(result),
            headers: Self::common_headers(result),
        }
    }

    fn dto_shapes() -> Vec<String> {
        vec![
            API_RESPONSE_SHAPE.to_string(),
            PAGED_RESPONSE_SHAPE.to_string(),
        ]
    }

    fn api_endpoints(result: &AnalysisResult) -> Vec<String> {
        result
            .apis
            .iter()
            .filter(|api| api.call_count > 1)
            .map(|api| {
                format!(
                    "// {} {} (called {} times)",
                    api.method, api.path, api.call_count
                )
            })
            .collect()
    }

    fn common_headers(result: &AnalysisResult) -> Vec<String> {
        let mut headers: Vec<(&String, usize)> = result
            .extracted_data
            .headers
            .iter()
            .filter(|(name, count)| **count > 1 && is_important_header(name))
            .map(|(name, count)| (name, *count))
            .collect();

        headers.sort_by(|a, b| b.1.cmp(&a.1));

        headers
            .into_iter()
            .map(|(name, count)| {
                format!(
                    ".header(\"{}\", \"your_value_here\") // seen {} times",
                    name, count
                )
            })
            .collect()
    }
}
