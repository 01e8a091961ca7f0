//! Loading documents by URL.
//!
//! [`DocumentSource`] is the seam to whatever transport serves result
//! documents. Loads are blocking: once `fetch` returns, everything that
//! follows (validation, store construction, first selection) runs in order
//! before any event is handled.

use std::path::{Component, Path, PathBuf};

use crate::document::{ComparisonDocument, SweepDocument};
use crate::error::{Error, Result};

/// Something that can return the text of a document given its URL.
pub trait DocumentSource {
    /// Fetch the document at `url`.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Serves URLs from files under a root directory.
///
/// `/results/generated/a-b-psnr.json` maps to
/// `<root>/results/generated/a-b-psnr.json`. Query strings and fragments are
/// ignored, and parent-directory components are rejected.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Serve files under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for `url`.
    pub fn resolve(&self, url: &str) -> Result<PathBuf> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(Error::Fetch {
                url: url.to_string(),
                reason: "path escapes the results root".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl DocumentSource for DirSource {
    fn fetch(&self, url: &str) -> Result<String> {
        let path = self.resolve(url)?;
        tracing::debug!(url, path = %path.display(), "fetching document");
        std::fs::read_to_string(&path).map_err(|e| Error::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Fetch and validate a comparison document.
pub fn load_comparison(source: &dyn DocumentSource, url: &str) -> Result<ComparisonDocument> {
    let text = source.fetch(url)?;
    ComparisonDocument::from_json(&text, url)
}

/// Fetch and parse a sweep document.
pub fn load_sweep(source: &dyn DocumentSource, url: &str) -> Result<SweepDocument> {
    let text = source.fetch(url)?;
    SweepDocument::from_json(&text, url)
}
