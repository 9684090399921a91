use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::utils::expand_tilde;

// Maximum size for a snapshot document: 50MB
const MAX_DOCUMENT_SIZE_BYTES: u64 = 50 * 1024 * 1024;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the snapshot documents live: a local directory or an HTTP base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Dir(PathBuf),
    Http(String),
}

impl DataSource {
    /// Interpret a location string. Anything starting with `http://` or
    /// `https://` is a base URL; everything else is a directory path with
    /// `~` expansion applied.
    pub fn parse(location: &str) -> DataSource {
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Http(location.trim_end_matches('/').to_string())
        } else {
            DataSource::Dir(expand_tilde(location))
        }
    }

    /// Human-readable location for error and status messages.
    pub fn describe(&self) -> String {
        match self {
            DataSource::Dir(path) => path.display().to_string(),
            DataSource::Http(base) => base.clone(),
        }
    }

    /// Fetch one named document as text.
    pub fn fetch(&self, name: &str) -> Result<String> {
        match self {
            DataSource::Dir(path) => read_document(&path.join(name)),
            DataSource::Http(base) => fetch_document(&format!("{}/{}", base, name)),
        }
    }
}

/// Read a local document, rejecting oversized files. The size check runs on
/// the open handle so the file cannot be swapped between check and read.
fn read_document(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    if metadata.len() > MAX_DOCUMENT_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_DOCUMENT_SIZE_BYTES
        );
    }

    let mut text = String::new();
    std::io::BufReader::new(file)
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text)
}

fn fetch_document(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Server returned {} for {}", status, url);
    }

    response.text().with_context(|| format!("Failed to read response body from {}", url))
}
