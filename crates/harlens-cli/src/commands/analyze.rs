use anyhow::{Context, Result};
use console::style;
use harlens_core::analysis::{AnalysisResult, Analyzer, TrafficAnalyzer};
use harlens_core::har::HarReader;
use harlens_core::output::{
    ArtifactStore, Clock, DirectoryStore, SystemClock, save_analysis, save_summary,
};
use std::path::{Path, PathBuf};

use super::scan::find_har_files;

pub const DEFAULT_OUTPUT_DIR: &str = "har_analysis";

/// A file that could not be analyzed or whose artifacts could not be saved
#[derive(Debug)]
pub struct FileFailure {
    pub file: PathBuf,
    pub error: harlens_core::Error,
}

/// What happened over one run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub discovered: usize,
    pub analyzed: usize,
    pub saved: usize,
    pub failures: Vec<FileFailure>,
    pub summary: Option<PathBuf>,
}

/// Base name used for reports and artifact names
pub fn display_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

/// Read, decode and aggregate a single HAR file
pub fn analyze_har(file: &Path, clock: &dyn Clock) -> harlens_core::Result<AnalysisResult> {
    tracing::debug!("Analyzing HAR file: {}", file.display());

    let har = HarReader::from_file(file)?;
    TrafficAnalyzer::new(display_name(file), clock.now()).analyze(&har)
}

/// Analyze and save every file in order; per-file failures are reported and skipped
pub fn run_batch(files: &[PathBuf], store: &dyn ArtifactStore, clock: &dyn Clock) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        discovered: files.len(),
        ..Default::default()
    };

    for (idx, file) in files.iter().enumerate() {
        println!(
            "\n{} Analyzing {}",
            style(format!("[{}/{}]", idx + 1, files.len())).dim(),
            display_name(file)
        );

        let result = match analyze_har(file, clock) {
            Ok(result) => result,
            Err(error) => {
                println!("  {} Analysis failed: {}", style("✗").red(), error);
                tracing::debug!("Skipping {}: {}", file.display(), error);
                outcome.failures.push(FileFailure {
                    file: file.clone(),
                    error,
                });
                continue;
            }
        };
        outcome.analyzed += 1;

        match save_analysis(&result, store, clock) {
            Ok(saved) => {
                outcome.saved += 1;
                println!(
                    "  {} {} requests, {} hosts, {} APIs",
                    style("✓").green(),
                    result.metadata.total_requests,
                    result.metadata.unique_hosts,
                    result.apis.len()
                );
                tracing::info!(
                    "Saved {} and {}",
                    saved.analysis.display(),
                    saved.report.display()
                );
            }
            Err(error) => {
                println!("  {} Failed to save results: {}", style("!").yellow(), error);
                tracing::debug!("Could not save results for {}: {}", file.display(), error);
                outcome.failures.push(FileFailure {
                    file: file.clone(),
                    error,
                });
            }
        }
    }

    let names: Vec<String> = files.iter().map(|f| display_name(f)).collect();
    match save_summary(&names, store, clock) {
        Ok(path) => outcome.summary = Some(path),
        Err(error) => {
            println!(
                "{} Failed to write summary report: {}",
                style("!").yellow(),
                error
            );
            tracing::debug!("Could not write summary report: {}", error);
        }
    }

    outcome
}

/// Scan `dir` for HAR files and write all artifacts into `output_dir`
pub fn execute(dir: &Path, output_dir: &Path) -> Result<BatchOutcome> {
    tracing::info!("Analyzing HAR files under: {}", dir.display());

    let store = DirectoryStore::create(output_dir).context("Setup failed")?;
    let files = find_har_files(dir).context("Scan failed")?;

    if files.is_empty() {
        println!("{} No HAR files found under {}", style("✗").red(), dir.display());
        return Ok(BatchOutcome::default());
    }

    println!(
        "Found {} HAR file{}",
        style(files.len()).bold(),
        if files.len() == 1 { "" } else { "s" }
    );

    let outcome = run_batch(&files, &store, &SystemClock);

    println!(
        "\n{} {}/{} files analyzed, results saved in {}",
        style("Done:").bold().green(),
        outcome.saved,
        outcome.discovered,
        store.root().display()
    );

    Ok(outcome)
}
