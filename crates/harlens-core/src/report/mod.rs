mod markdown;
mod table;

pub use markdown::{render_report, render_summary};
pub use table::{MAX_TABLE_ROWS, NO_DATA, Table};

use crate::Result;
use crate::analysis::AnalysisResult;

/// Pretty-printed JSON form of an analysis
pub fn to_json(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
