use harlens_core::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect every regular file under `root` ending in `.har`
/// (any case), in lexical order. Symlinked directories are not descended into.
pub fn find_har_files(root: &Path) -> Result<Vec<PathBuf>> {
    tracing::debug!("Scanning for HAR files under: {}", root.display());

    if !root.is_dir() {
        return Err(Error::Scan(format!("{} is not a directory", root.display())));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Scan(e.to_string()))?;
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && has_har_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!("Found {} HAR files", files.len());
    Ok(files)
}

fn has_har_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("har"))
}
