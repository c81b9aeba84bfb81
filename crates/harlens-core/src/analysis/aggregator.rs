use super::{
    AnalysisResult, Analyzer, ApiInfo, ExtractedData, HostInfo, Metadata, count,
    extract_body_parameters, extract_host, extract_path, is_important_header,
    simplify_content_type,
};
use crate::Result;
use crate::har::{Entry, Har};
use crate::templates::TemplateGenerator;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::{BTreeMap, HashMap};

/// Single-pass aggregation of a HAR capture into an [`AnalysisResult`]
pub struct TrafficAnalyzer {
    file_name: String,
    analysis_time: DateTime<Utc>,
}

impl TrafficAnalyzer {
    pub fn new(file_name: impl Into<String>, analysis_time: DateTime<Utc>) -> Self {
        Self {
            file_name: file_name.into(),
            analysis_time,
        }
    }
}

impl Analyzer for TrafficAnalyzer {
    type Output = AnalysisResult;

    fn analyze(&self, har: &Har) -> Result<Self::Output> {
        tracing::debug!(
            "Aggregating {} entries from {}",
            har.log.entries.len(),
            self.file_name
        );

        let mut acc = Accumulator::default();
        for entry in &har.log.entries {
            acc.record(entry);
        }

        // Vec::sort_by is stable, so ties keep first-seen order
        acc.hosts.sort_by(|a, b| b.request_count.cmp(&a.request_count));
        acc.apis.sort_by(|a, b| b.call_count.cmp(&a.call_count));

        let metadata = Metadata {
            file_name: self.file_name.clone(),
            analysis_time: self.analysis_time,
            total_requests: har.log.entries.len(),
            unique_hosts: acc.hosts.len(),
            time_span: acc.span.render(),
            browser_info: har.log.browser.display(),
            creator_info: har.log.creator.display(),
            har_version: har.log.version.clone(),
        };

        let mut result = AnalysisResult {
            metadata,
            hosts: acc.hosts,
            apis: acc.apis,
            extracted_data: acc.data,
            code_templates: Default::default(),
        };
        result.code_templates = TemplateGenerator::generate(&result);

        tracing::debug!(
            "Aggregation complete: {} hosts, {} endpoints",
            result.hosts.len(),
            result.apis.len()
        );

        Ok(result)
    }
}

#[derive(Default)]
struct Accumulator {
    hosts: Vec<HostInfo>,
    host_index: HashMap<String, usize>,
    apis: Vec<ApiInfo>,
    api_index: HashMap<(String, String), usize>,
    data: ExtractedData,
    span: TimeSpan,
}

impl Accumulator {
    fn record(&mut self, entry: &Entry) {
        let request = &entry.request;
        let url = request.url.as_str();
        let method = request.method.as_str();
        let host = extract_host(url);
        let path = extract_path(url);

        self.span.observe(&entry.started_date_time);

        if !host.is_empty() {
            let idx = *self.host_index.entry(host.clone()).or_insert_with(|| {
                self.hosts.push(HostInfo {
                    host: host.clone(),
                    ..Default::default()
                });
                self.hosts.len() - 1
            });
            let info = &mut self.hosts[idx];
            info.request_count += 1;
            push_unique(&mut info.methods, method);
            push_unique(&mut info.paths, &path);
        }

        count(&mut self.data.methods, method);
        count(&mut self.data.status_codes, entry.response.status.to_string());
        for header in &request.headers {
            count(&mut self.data.headers, header.name.as_str());
        }
        for param in &request.query_string {
            count(&mut self.data.parameters, param.name.as_str());
        }
        if let Some(body) = request.body_text() {
            extract_body_parameters(body, &mut self.data.parameters);
        }

        let mime_type = entry.response.content.mime_type.as_str();
        let response_type = simplify_content_type(mime_type);
        if !mime_type.is_empty() {
            count(&mut self.data.content_types, mime_type);
            count(&mut self.data.response_types, response_type.as_str());
        }

        let key = (method.to_string(), path.clone());
        if let Some(&idx) = self.api_index.get(&key) {
            let api = &mut self.apis[idx];
            api.call_count += 1;
            api.status_code = entry.response.status;
            return;
        }

        let mut parameters = BTreeMap::new();
        for param in &request.query_string {
            parameters
                .entry(param.name.clone())
                .or_insert_with(|| param.value.clone());
        }

        let mut headers = BTreeMap::new();
        for header in request.headers.iter().filter(|h| is_important_header(&h.name)) {
            headers
                .entry(header.name.clone())
                .or_insert_with(|| header.value.clone());
        }

        self.api_index.insert(key, self.apis.len());
        self.apis.push(ApiInfo {
            method: method.to_string(),
            url: url.to_string(),
            host,
            path,
            parameters,
            headers,
            response_type,
            status_code: entry.response.status,
            call_count: 1,
        });
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

/// Earliest and latest parseable entry start times
#[derive(Debug, Default)]
struct TimeSpan {
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
}

impl TimeSpan {
    fn observe(&mut self, started: &str) {
        let Ok(ts) = DateTime::parse_from_rfc3339(started) else {
            if !started.is_empty() {
                tracing::debug!("Skipping unparseable timestamp: {}", started);
            }
            return;
        };
        if self.start.is_none_or(|start| ts < start) {
            self.start = Some(ts);
        }
        if self.end.is_none_or(|end| ts > end) {
            self.end = Some(ts);
        }
    }

    fn render(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                let minutes = (end - start).num_milliseconds() as f64 / 60_000.0;
                format!(
                    "{} - {} ({:.1} minutes)",
                    start.format("%H:%M:%S"),
                    end.format("%H:%M:%S"),
                    minutes
                )
            }
            _ => String::new(),
        }
    }
}
