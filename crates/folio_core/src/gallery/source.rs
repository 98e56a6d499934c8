//! Manifest sources for the gallery.
//!
//! # Responsibility
//! - Fetch the raw manifest from disk or over HTTP.
//! - Decode it into `ProjectRecord` values.
//!
//! # Invariants
//! - One fetch per call; no retry and no caching.

use crate::model::project::ProjectRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type LoadResult<T> = Result<T, LoadError>;

/// Manifest fetch or decode failure.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Http(reqwest::Error),
    /// Server answered with a non-success status.
    Status(u16),
    /// Body is not a JSON array of project records.
    Parse(serde_json::Error),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read manifest `{}`: {source}", path.display())
            }
            Self::Http(err) => write!(f, "manifest request failed: {err}"),
            Self::Status(status) => write!(f, "manifest request failed: {status}"),
            Self::Parse(err) => write!(f, "manifest is not valid JSON: {err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Http(err) => Some(err),
            Self::Status(_) => None,
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Where the gallery manifest comes from.
pub trait ManifestSource {
    /// Fetches and decodes the full manifest, unsorted.
    fn fetch(&self) -> LoadResult<Vec<ProjectRecord>>;

    /// Human-readable origin used in diagnostics.
    fn describe(&self) -> String;
}

/// Decodes a manifest document.
pub fn parse_manifest(bytes: &[u8]) -> LoadResult<Vec<ProjectRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Manifest stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileManifest {
    path: PathBuf,
}

impl FileManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestSource for FileManifest {
    fn fetch(&self) -> LoadResult<Vec<ProjectRecord>> {
        let bytes = std::fs::read(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_manifest(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Manifest served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpManifest {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpManifest {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::blocking::Client::new(), url)
    }

    pub fn with_client(client: reqwest::blocking::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl ManifestSource for HttpManifest {
    fn fetch(&self) -> LoadResult<Vec<ProjectRecord>> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        let bytes = response.bytes()?;
        parse_manifest(&bytes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise.
pub fn source_for(location: &str) -> Box<dyn ManifestSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpManifest::new(location))
    } else {
        Box::new(FileManifest::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        parse_manifest, source_for, FileManifest, HttpManifest, LoadError, ManifestSource,
    };
    use std::io::Write;

    #[test]
    fn parse_manifest_rejects_non_array_documents() {
        let err = parse_manifest(br#"{"slug":"a"}"#).expect_err("object is not a manifest");
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn parse_manifest_rejects_html_bodies() {
        let err = parse_manifest(b"<!doctype html><p>404</p>").expect_err("html body");
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn file_manifest_reads_records() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"[{"slug":"a","title":"Alpha"},{"slug":"b","title":"Beta"}]"#)
            .expect("write manifest");

        let records = FileManifest::new(file.path()).fetch().expect("manifest loads");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "Beta");
    }

    #[test]
    fn file_manifest_reports_missing_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = FileManifest::new(dir.path().join("missing.json"))
            .fetch()
            .expect_err("missing file");
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn http_manifest_debug_shows_url() {
        let source = HttpManifest::new("https://example.com/projects.json");
        assert!(format!("{source:?}").contains("https://example.com/projects.json"));
    }

    #[test]
    fn source_for_picks_by_scheme() {
        assert_eq!(
            source_for("https://example.com/projects.json").describe(),
            "https://example.com/projects.json"
        );
        assert_eq!(source_for("projects.json").describe(), "projects.json");
    }
}
