use crate::analysis::AnalysisResult;
use crate::report::{render_report, render_summary, to_json};
use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE_NAME: &str = "summary_report.md";

/// Source of "now" for analysis timestamps and artifact names
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Falls back to the epoch for out-of-range values
    pub fn from_unix(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Destination for generated documents
pub trait ArtifactStore {
    /// Store `contents` under `name`, returning where it ended up
    fn write(&self, name: &str, contents: &str) -> Result<PathBuf>;
}

/// Writes artifacts as files in a single output directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create the output directory (and parents) if needed
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| Error::Setup {
            path: root.clone(),
            source,
        })?;
        tracing::debug!("Output directory ready: {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for DirectoryStore {
    fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        std::fs::write(&path, contents).map_err(|source| Error::Save {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(path)
    }
}

/// Keeps artifacts in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.files.borrow().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl ArtifactStore for MemoryStore {
    fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        self.files
            .borrow_mut()
            .insert(name.to_string(), contents.to_string());
        Ok(PathBuf::from(name))
    }
}

/// File name without a trailing `.har`, matched case-insensitively
pub fn artifact_stem(file_name: &str) -> &str {
    let split = file_name.len().saturating_sub(4);
    match (file_name.get(..split), file_name.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(".har") => stem,
        _ => file_name,
    }
}

pub fn analysis_file_name(file_name: &str, timestamp: i64) -> String {
    format!("{}_analysis_{}.json", artifact_stem(file_name), timestamp)
}

pub fn report_file_name(file_name: &str, timestamp: i64) -> String {
    format!("{}_report_{}.md", artifact_stem(file_name), timestamp)
}

/// Paths of the two per-file artifacts
#[derive(Debug, Clone)]
pub struct SavedArtifacts {
    pub analysis: PathBuf,
    pub report: PathBuf,
}

/// Write the JSON analysis and the Markdown report for one file
pub fn save_analysis(
    result: &AnalysisResult,
    store: &dyn ArtifactStore,
    clock: &dyn Clock,
) -> Result<SavedArtifacts> {
    let timestamp = clock.now().timestamp();
    let file_name = &result.metadata.file_name;

    let analysis = store.write(
        &analysis_file_name(file_name, timestamp),
        &to_json(result)?,
    )?;
    let report = store.write(
        &report_file_name(file_name, timestamp),
        &render_report(result),
    )?;

    Ok(SavedArtifacts { analysis, report })
}

/// Write the run-wide summary listing every file name
pub fn save_summary(
    file_names: &[String],
    store: &dyn ArtifactStore,
    clock: &dyn Clock,
) -> Result<PathBuf> {
    store.write(SUMMARY_FILE_NAME, &render_summary(file_names, clock.now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Analyzer, TrafficAnalyzer};
    use crate::har::HarReader;

    #[test]
    fn test_artifact_stem() {
        assert_eq!(artifact_stem("capture.har"), "capture");
        assert_eq!(artifact_stem("CAPTURE.HAR"), "CAPTURE");
        assert_eq!(artifact_stem("archive.har.har"), "archive.har");
        assert_eq!(artifact_stem("notes.txt"), "notes.txt");
        assert_eq!(artifact_stem("har"), "har");
        assert_eq!(artifact_stem("ünï.har"), "ünï");
    }

    #[test]
    fn test_artifact_names() {
        assert_eq!(
            analysis_file_name("site.har", 1700000000),
            "site_analysis_1700000000.json"
        );
        assert_eq!(report_file_name("site.har", 1700000000), "site_report_1700000000.md");
    }

    #[test]
    fn test_save_analysis_uses_clock_timestamp() {
        let clock = FixedClock::from_unix(1_700_000_000);
        let har = HarReader::from_str(r#"{"log": {"entries": []}}"#).unwrap();
        let result = TrafficAnalyzer::new("site.har", clock.now())
            .analyze(&har)
            .unwrap();

        let store = MemoryStore::new();
        save_analysis(&result, &store, &clock).unwrap();

        assert_eq!(
            store.names(),
            vec!["site_analysis_1700000000.json", "site_report_1700000000.md"]
        );
        let json: serde_json::Value =
            serde_json::from_str(&store.get("site_analysis_1700000000.json").unwrap()).unwrap();
        assert_eq!(json["metadata"]["fileName"], "site.har");
        assert_eq!(json["metadata"]["totalRequests"], 0);
        assert!(json["extractedData"]["statusCodes"].is_object());
        assert!(json["codeTemplates"]["dtoShapes"].is_array());
    }

    #[test]
    fn test_directory_store_writes_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = DirectoryStore::create(dir.path().join("nested").join("out")).unwrap();

        let path = store.write("a.md", "hello").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");

        let summary = save_summary(&["x.har".to_string()], &store, &FixedClock::from_unix(0))
            .unwrap();
        assert!(summary.ends_with(SUMMARY_FILE_NAME));
    }

    #[test]
    fn test_directory_store_setup_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let err = DirectoryStore::create(blocker.join("out")).unwrap_err();
        assert!(matches!(err, Error::Setup { .. }));
    }

    #[test]
    fn test_directory_store_save_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = DirectoryStore::create(dir.path()).unwrap();

        let err = store.write("missing/child.md", "x").unwrap_err();
        assert!(matches!(err, Error::Save { .. }));
        assert!(err.to_string().contains("child.md"));
    }
}
