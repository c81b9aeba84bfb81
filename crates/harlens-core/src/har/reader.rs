use super::types::Har;
use crate::{Error, Result};
use std::path::Path;

pub struct HarReader;

impl HarReader {
    /// Read and parse a HAR file from the given path
    pub fn from_file(path: &Path) -> Result<Har> {
        tracing::debug!("Reading HAR file from: {}", path.display());

        let data = std::fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_slice(&data, path)
    }

    /// Parse HAR bytes, attributing any failure to `origin`
    pub fn from_slice(data: &[u8], origin: &Path) -> Result<Har> {
        let har: Har = serde_json::from_slice(data).map_err(|source| Error::Decode {
            path: origin.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            "Successfully parsed {} with {} entries",
            origin.display(),
            har.log.entries.len()
        );

        Ok(har)
    }

    /// Parse a HAR document from a JSON string
    pub fn from_str(content: &str) -> Result<Har> {
        Self::from_slice(content.as_bytes(), Path::new("<inline>"))
    }
}
