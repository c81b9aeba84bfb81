use harlens_cli::commands::analyze::{analyze_har, execute, run_batch};
use harlens_core::Error;
use harlens_core::output::{ArtifactStore, FixedClock, MemoryStore, SUMMARY_FILE_NAME};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn clock() -> FixedClock {
    FixedClock::from_unix(1_706_778_000)
}

/// Only accepts the summary; every per-file artifact write fails
struct SummaryOnlyStore {
    inner: MemoryStore,
}

impl ArtifactStore for SummaryOnlyStore {
    fn write(&self, name: &str, contents: &str) -> harlens_core::Result<PathBuf> {
        if name == SUMMARY_FILE_NAME {
            return self.inner.write(name, contents);
        }
        Err(Error::Save {
            path: PathBuf::from(name),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

#[test]
fn test_analyze_sample_har() {
    let result = analyze_har(&fixture_path("sample.har"), &clock()).unwrap();

    assert_eq!(result.metadata.file_name, "sample.har");
    assert_eq!(result.metadata.total_requests, 3);
    assert_eq!(result.metadata.unique_hosts, 1);
    assert_eq!(result.metadata.har_version, "1.2");
    assert_eq!(result.metadata.browser_info, "Chrome 124.0.6367.91");
    assert_eq!(
        result.metadata.time_span,
        "09:00:00 - 09:02:30 (2.5 minutes)"
    );

    assert_eq!(result.hosts[0].host, "a.com");
    assert_eq!(result.hosts[0].request_count, 3);
    assert_eq!(result.hosts[0].methods, vec!["GET", "POST"]);

    assert_eq!(result.apis.len(), 2);
    assert_eq!((result.apis[0].method.as_str(), result.apis[0].path.as_str()), ("GET", "/x"));
    assert_eq!(result.apis[0].call_count, 2);
    assert_eq!((result.apis[1].method.as_str(), result.apis[1].path.as_str()), ("POST", "/y"));
    assert_eq!(result.apis[1].call_count, 1);

    let data = &result.extracted_data;
    assert_eq!(data.methods.get("GET"), Some(&2));
    assert_eq!(data.methods.get("POST"), Some(&1));
    assert_eq!(data.status_codes.get("200"), Some(&2));
    assert_eq!(data.status_codes.get("201"), Some(&1));
    assert_eq!(data.response_types.get("JSON"), Some(&2));
    assert_eq!(data.response_types.get("HTML"), Some(&1));
    assert_eq!(data.parameters.get("page"), Some(&2));
    assert_eq!(data.parameters.get("profile.age"), Some(&1));
    assert_eq!(data.parameters.get("roles[1]"), Some(&1));
    assert_eq!(data.parameters.get("roles"), None);
    assert_eq!(data.headers.get("Cookie"), Some(&3));

    let templates = &result.code_templates;
    assert_eq!(templates.api_endpoints, vec!["// GET /x (called 2 times)"]);
    assert_eq!(templates.headers.len(), 3);
    assert!(templates.headers[0].contains("\"Cookie\""));
    assert!(templates.headers[1].contains("\"User-Agent\""));
    assert!(templates.headers[2].contains("\"Accept\""));
}

#[test]
fn test_analyze_missing_file_is_read_error() {
    let err = analyze_har(&fixture_path("does-not-exist.har"), &clock()).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert!(err.to_string().contains("does-not-exist.har"));
}

#[test]
fn test_batch_continues_after_decode_failure() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.har");
    std::fs::write(&broken, "{ not json").unwrap();

    let files = vec![broken.clone(), fixture_path("sample.har")];
    let store = MemoryStore::new();
    let outcome = run_batch(&files, &store, &clock());

    assert_eq!(outcome.discovered, 2);
    assert_eq!(outcome.analyzed, 1);
    assert_eq!(outcome.saved, 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].file, broken);
    assert!(matches!(outcome.failures[0].error, Error::Decode { .. }));

    assert_eq!(
        store.names(),
        vec![
            "sample_analysis_1706778000.json",
            "sample_report_1706778000.md",
            "summary_report.md",
        ]
    );

    let summary = store.get(SUMMARY_FILE_NAME).unwrap();
    assert!(summary.contains("1. broken.har\n2. sample.har\n"));

    let report = store.get("sample_report_1706778000.md").unwrap();
    assert!(report.starts_with("# HAR Analysis Report: sample.har"));
}

#[test]
fn test_batch_writes_summary_when_every_save_fails() {
    let store = SummaryOnlyStore {
        inner: MemoryStore::new(),
    };
    let outcome = run_batch(&[fixture_path("sample.har")], &store, &clock());

    assert_eq!(outcome.analyzed, 1);
    assert_eq!(outcome.saved, 0);
    assert!(matches!(outcome.failures[0].error, Error::Save { .. }));
    assert!(outcome.summary.is_some());
    assert_eq!(store.inner.names(), vec![SUMMARY_FILE_NAME]);
}

fn copy_fixture(into: &Path, name: &str) {
    std::fs::create_dir_all(into).unwrap();
    std::fs::copy(fixture_path("sample.har"), into.join(name)).unwrap();
}

#[test]
fn test_execute_writes_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("captures");
    let output = temp_dir.path().join("out");
    copy_fixture(&input, "site.har");
    copy_fixture(&input.join("nested"), "OTHER.HAR");

    let outcome = execute(&input, &output).unwrap();

    assert_eq!(outcome.discovered, 2);
    assert_eq!(outcome.saved, 2);
    assert!(outcome.failures.is_empty());

    let names: Vec<String> = std::fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 5);
    assert!(names.iter().any(|n| n.starts_with("site_analysis_") && n.ends_with(".json")));
    assert!(names.iter().any(|n| n.starts_with("site_report_") && n.ends_with(".md")));
    assert!(names.iter().any(|n| n.starts_with("OTHER_analysis_")));
    assert!(names.iter().any(|n| n == SUMMARY_FILE_NAME));

    let json_name = names
        .iter()
        .find(|n| n.starts_with("site_analysis_"))
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join(json_name)).unwrap()).unwrap();
    assert_eq!(json["metadata"]["totalRequests"], 3);
    assert_eq!(json["apis"][0]["callCount"], 2);
    assert_eq!(json["extractedData"]["methods"]["GET"], 2);
}

#[test]
fn test_execute_without_har_files_is_ok() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out");

    let outcome = execute(temp_dir.path(), &output).unwrap();

    assert_eq!(outcome.discovered, 0);
    assert!(outcome.summary.is_none());
    assert!(output.is_dir());
}

#[test]
fn test_execute_fails_when_output_dir_cannot_be_created() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let err = execute(temp_dir.path(), &blocker.join("out")).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to create output directory"));
}
