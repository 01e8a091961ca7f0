//! Read-only access to a loaded comparison document.

use crate::document::{CodecIdentity, ComparisonDocument, DetailRecord, OverallRow};
use crate::error::{Error, Result};

/// Holds one validated [`ComparisonDocument`].
///
/// The store never changes after construction; series construction works on
/// stamped copies of its records.
#[derive(Debug, Clone)]
pub struct ResultStore {
    doc: ComparisonDocument,
}

impl ResultStore {
    /// Wrap a document that has already passed validation.
    #[must_use]
    pub fn new(doc: ComparisonDocument) -> Self {
        Self { doc }
    }

    /// Parse, validate and wrap a document loaded from `url`.
    pub fn from_json(text: &str, url: &str) -> Result<Self> {
        ComparisonDocument::from_json(text, url).map(Self::new)
    }

    /// The two codecs, baseline codec first.
    #[must_use]
    pub fn codecs(&self) -> &[CodecIdentity; 2] {
        &self.doc.codecs
    }

    /// Per-file overall rows, from `overall.avg`.
    #[must_use]
    pub fn overall_rows(&self) -> &[OverallRow] {
        &self.doc.overall.avg
    }

    /// The `overall.drate` row paired with `overall_rows()[index]`.
    #[must_use]
    pub fn drate_row(&self, index: usize) -> Option<&OverallRow> {
        self.doc.overall.drate.get(index)
    }

    /// Tuned records for a codec and file.
    pub fn detail_for(&self, codec: &str, file: &str) -> Result<&[DetailRecord]> {
        self.doc
            .detailed
            .get(codec)
            .and_then(|files| files.get(file))
            .map(Vec::as_slice)
            .ok_or_else(|| Error::NotFound {
                codec: codec.to_string(),
                file: file.to_string(),
            })
    }

    /// Whether `file` appears in either compared codec's detailed results.
    ///
    /// Other codec keys in `detailed` are ignored.
    #[must_use]
    pub fn has_file(&self, file: &str) -> bool {
        self.codecs()
            .iter()
            .any(|codec| self.detail_for(&codec.id, file).is_ok())
    }

    /// Whether the document carries a baseline section at all.
    #[must_use]
    pub fn has_baseline(&self) -> bool {
        self.doc.baseline.is_some()
    }

    /// Baseline records for a codec and file.
    ///
    /// `None` only when the document has no baseline section; a baseline
    /// section lacking this codec or file yields an empty slice.
    #[must_use]
    pub fn baseline_for(&self, codec: &str, file: &str) -> Option<&[DetailRecord]> {
        let baseline = self.doc.baseline.as_ref()?;
        Some(
            baseline
                .get(codec)
                .and_then(|files| files.get(file))
                .map_or(&[][..], Vec::as_slice),
        )
    }

    /// The underlying document.
    #[must_use]
    pub fn document(&self) -> &ComparisonDocument {
        &self.doc
    }
}
