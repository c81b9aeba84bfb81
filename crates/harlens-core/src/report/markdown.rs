use super::table::{NO_DATA, Table, escape_cell};
use crate::analysis::AnalysisResult;
use chrono::{DateTime, Utc};

const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Only parameters seen more than this often are listed
const PARAMETER_MIN_COUNT: usize = 1;
/// Only headers seen more than this often are listed
const HEADER_MIN_COUNT: usize = 5;

/// Render the human-readable report for one analyzed file
pub fn render_report(result: &AnalysisResult) -> String {
    let meta = &result.metadata;
    let data = &result.extracted_data;
    let mut out = String::new();

    out.push_str(&format!("# HAR Analysis Report: {}\n\n", meta.file_name));
    out.push_str(&format!(
        "**Analyzed at**: {}\n\n",
        meta.analysis_time.format(DISPLAY_TIME_FORMAT)
    ));

    out.push_str("## Overview\n\n");
    out.push_str(&format!("- **Total requests**: {}\n", meta.total_requests));
    out.push_str(&format!("- **Unique hosts**: {}\n", meta.unique_hosts));
    out.push_str(&format!("- **Time span**: {}\n", meta.time_span));
    out.push_str(&format!("- **Browser**: {}\n", meta.browser_info));
    out.push_str(&format!("- **Creator**: {}\n", meta.creator_info));
    out.push_str(&format!("- **HAR version**: {}\n\n", meta.har_version));

    out.push_str("## Hosts\n\n");
    let mut hosts = Table::new(&["Host", "Requests", "Methods"]);
    for host in &result.hosts {
        hosts.push_row(vec![
            escape_cell(&host.host),
            host.request_count.to_string(),
            escape_cell(&host.methods.join(", ")),
        ]);
    }
    hosts.render_into(&mut out);

    out.push_str("## Frequently Called APIs (calls > 1)\n\n");
    let mut apis = Table::new(&["Method", "Path", "Host", "Calls", "Response Type"]);
    for api in result.apis.iter().filter(|api| api.call_count > 1) {
        apis.push_row(vec![
            escape_cell(&api.method),
            escape_cell(&api.path),
            escape_cell(&api.host),
            api.call_count.to_string(),
            api.response_type.as_str().to_string(),
        ]);
    }
    apis.render_into(&mut out);

    out.push_str(&format!(
        "## Common Parameters (count > {})\n\n",
        PARAMETER_MIN_COUNT
    ));
    Table::from_frequencies(&data.parameters, "Parameter", "Count", PARAMETER_MIN_COUNT)
        .render_into(&mut out);

    out.push_str(&format!(
        "## Common Request Headers (count > {})\n\n",
        HEADER_MIN_COUNT
    ));
    Table::from_frequencies(&data.headers, "Header", "Count", HEADER_MIN_COUNT)
        .render_into(&mut out);

    out.push_str("## HTTP Methods\n\n");
    Table::from_frequencies(&data.methods, "Method", "Requests", 0).render_into(&mut out);

    out.push_str("## Status Codes\n\n");
    Table::from_frequencies(&data.status_codes, "Status", "Count", 0).render_into(&mut out);

    out.push_str("## Response Types\n\n");
    Table::from_frequencies(&data.response_types, "Type", "Count", 0).render_into(&mut out);

    let templates = &result.code_templates;
    out.push_str("## Code Templates\n\n");

    out.push_str("### Data Transfer Objects\n\n");
    for shape in &templates.dto_shapes {
        push_code_block(&mut out, std::slice::from_ref(shape));
    }

    out.push_str("### Common Request Headers\n\n");
    push_code_block(&mut out, &templates.headers);

    out.push_str("### API Endpoints\n\n");
    push_code_block(&mut out, &templates.api_endpoints);

    out
}

fn push_code_block(out: &mut String, lines: &[String]) {
    if lines.is_empty() {
        out.push_str(NO_DATA);
        out.push_str("\n\n");
        return;
    }
    out.push_str("```rust\n");
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("```\n\n");
}

/// Render the cross-file index written once per run
pub fn render_summary(file_names: &[String], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("# HAR Analysis Summary\n\n");
    out.push_str(&format!(
        "**Generated at**: {}\n\n",
        generated_at.format(DISPLAY_TIME_FORMAT)
    ));
    out.push_str(&format!("**Files analyzed**: {}\n\n", file_names.len()));

    out.push_str("## Analyzed Files\n\n");
    for (idx, name) in file_names.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, name));
    }
    out.push('\n');

    out.push_str("## How to Use\n\n");
    out.push_str("1. Each HAR file has a matching JSON analysis and Markdown report\n");
    out.push_str("2. The JSON files hold the full structured data for further processing\n");
    out.push_str("3. The Markdown reports summarize each capture for human readers\n");
    out.push_str("4. The code templates can be copied into client code as a starting point\n\n");

    out.push_str("## Generated Files\n\n");
    out.push_str("- `*_analysis_*.json`: structured analysis data\n");
    out.push_str("- `*_report_*.md`: readable analysis report\n");
    out.push_str("- `summary_report.md`: this summary\n");

    out
}
