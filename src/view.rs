//! The comparison page controller.
//!
//! [`ComparisonView`] owns every piece of mutable page state: the loaded
//! store, the selection, the configuration registry, and the series and rows
//! currently on the chart. Handlers take `&mut self`, so table selections and
//! chart hovers are applied one at a time and never see a half-built page.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ViewerConfig;
use crate::document::{CodecIdentity, ComparisonDocument, DetailRecord, EncodingResult};
use crate::error::{Error, Result};
use crate::fetch::{self, DocumentSource};
use crate::metric;
use crate::query::Query;
use crate::registry::ConfigRegistry;
use crate::rows::RowIndex;
use crate::selection::{SelectionPhase, SelectionState};
use crate::series::{self, SeriesDefinition, SeriesStyle};
use crate::store::ResultStore;
use crate::summary::{self, SummaryTable};
use crate::sweep::SweepParams;

/// State of the comparison page.
#[derive(Debug, Clone)]
pub struct ComparisonView {
    config: ViewerConfig,
    store: ResultStore,
    selection: SelectionState,
    registry: ConfigRegistry,
    series: Vec<SeriesDefinition>,
    rows: RowIndex,
}

impl ComparisonView {
    /// Load the document named by `codec1`, `codec2` and `criterion` in
    /// `query`, then display its first file.
    pub fn open(config: ViewerConfig, source: &dyn DocumentSource, query: &Query) -> Result<Self> {
        let codec1 = query.require("codec1")?;
        let codec2 = query.require("codec2")?;
        let criterion = query.require("criterion")?;

        let url = config.comparison_url(codec1, codec2, criterion);
        let doc = fetch::load_comparison(source, &url)?;
        tracing::debug!(%url, files = doc.overall.avg.len(), "loaded comparison");
        Ok(Self::from_document(config, doc, criterion))
    }

    /// Build the page for an already validated document.
    #[must_use]
    pub fn from_document(config: ViewerConfig, doc: ComparisonDocument, criterion: &str) -> Self {
        let mut view = Self {
            config,
            store: ResultStore::new(doc),
            selection: SelectionState::new(criterion),
            registry: ConfigRegistry::new(),
            series: Vec::new(),
            rows: RowIndex::default(),
        };
        if let Some(first) = view.store.overall_rows().first() {
            let file = first.file.clone();
            view.show(0, file);
        }
        view
    }

    fn show(&mut self, table_row: usize, file: String) {
        self.series = series::build(&self.store, &file, &mut self.registry);
        self.rows = RowIndex::flatten(&self.series, &self.config.metric);
        tracing::debug!(
            file = %file,
            series = self.series.len(),
            rows = self.rows.len(),
            "displaying file"
        );
        self.selection.select_file(table_row, file);
    }

    /// Handle a selection in the summary table.
    pub fn select_table_row(&mut self, row: usize) -> Result<()> {
        let rows = self.store.overall_rows();
        let file = rows
            .get(row)
            .ok_or(Error::RowOutOfRange {
                row,
                len: rows.len(),
            })?
            .file
            .clone();
        self.show(row, file);
        Ok(())
    }

    /// Select the summary table row for `file`.
    pub fn select_file(&mut self, file: &str) -> Result<()> {
        let row = self
            .store
            .overall_rows()
            .iter()
            .position(|r| r.file == file)
            .ok_or_else(|| Error::UnknownFile(file.to_string()))?;
        self.select_table_row(row)
    }

    /// Handle a chart hover event.
    ///
    /// An event without a row is ignored and the previous hover stays. A row
    /// outside the current chart is rejected without changing state.
    pub fn hover(&mut self, row: Option<usize>) -> Result<Option<&DetailRecord>> {
        if let Some(row) = row {
            self.rows.resolve(row)?;
            self.selection.hover(Some(row));
            tracing::debug!(row, "hovered");
        }
        Ok(self.hovered_detail())
    }

    /// Record behind the hovered row.
    #[must_use]
    pub fn hovered_detail(&self) -> Option<&DetailRecord> {
        self.selection
            .hovered_row()
            .and_then(|row| self.rows.details().get(row))
    }

    /// Detail panel for the hovered record.
    #[must_use]
    pub fn detail_panel(&self) -> Option<DetailPanel<'_>> {
        self.hovered_detail().map(DetailPanel::new)
    }

    /// Sweep page link for the hovered record.
    ///
    /// Carries every configuration drawn for the record's codec on the
    /// current file.
    #[must_use]
    pub fn sweep_link(&self) -> Option<String> {
        let record = self.hovered_detail()?;
        let codec = record.codec_id.as_deref()?;
        let file = self.selection.selected_file()?;
        let criterion = self.selection.criterion();
        let params = SweepParams::for_codec(codec, file, criterion, &self.registry);
        Some(params.to_url(&self.config.sweep_page))
    }

    /// Summary table for the file list.
    #[must_use]
    pub fn summary(&self) -> SummaryTable {
        SummaryTable::from_store(&self.store)
    }

    /// Page heading lines.
    #[must_use]
    pub fn heading(&self) -> Vec<String> {
        summary::heading(&self.store, self.selection.criterion())
    }

    /// Serializable picture of what is on screen.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            generated_at: Utc::now(),
            codecs: self.store.codecs().clone(),
            file: self.selection.selected_file().map(str::to_string),
            criterion: self.selection.criterion().to_string(),
            metric: self.config.metric.clone(),
            metric_units: metric::units_for(&self.config.metric),
            series: self
                .series
                .iter()
                .map(|s| SeriesSnapshot {
                    title: s.title.clone(),
                    points: s.len(),
                    style: s.style.clone(),
                })
                .collect(),
            rows: self.rows.clone(),
        }
    }

    /// Loaded results.
    #[must_use]
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Selection state.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current selection phase.
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.selection.phase()
    }

    /// Configuration ids drawn for the displayed file.
    #[must_use]
    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    /// Series on the chart.
    #[must_use]
    pub fn series(&self) -> &[SeriesDefinition] {
        &self.series
    }

    /// Rows on the chart.
    #[must_use]
    pub fn rows(&self) -> &RowIndex {
        &self.rows
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

/// Detail panel contents for one record.
#[derive(Debug, Clone, Copy)]
pub struct DetailPanel<'a> {
    /// Configuration that produced the encode.
    pub config_id: &'a str,
    /// Optimizer score.
    pub score: Option<f64>,
    /// Encode command line.
    pub encode_command: &'a str,
    /// Measured result.
    pub result: &'a EncodingResult,
}

impl<'a> DetailPanel<'a> {
    /// Panel for `record`.
    #[must_use]
    pub fn new(record: &'a DetailRecord) -> Self {
        Self {
            config_id: &record.config_id,
            score: record.score,
            encode_command: &record.encode_command,
            result: &record.result,
        }
    }
}

impl fmt::Display for DetailPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration ID: {}", self.config_id)?;
        match self.score {
            Some(score) => writeln!(f, "Score: {score}")?,
            None => writeln!(f, "Score: -")?,
        }
        writeln!(f, "Encode command: {}", self.encode_command)?;
        writeln!(f, "Results:")?;
        let result = serde_json::to_string_pretty(self.result).map_err(|_| fmt::Error)?;
        write!(f, "{result}")
    }
}

/// Series summary inside a [`ViewSnapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct SeriesSnapshot {
    /// Legend title.
    pub title: String,
    /// Number of points.
    pub points: usize,
    /// Drawing style.
    pub style: SeriesStyle,
}

/// What the comparison page shows at one moment.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    /// When the snapshot was taken.
    pub generated_at: DateTime<Utc>,
    /// Codecs compared.
    pub codecs: [CodecIdentity; 2],
    /// File displayed.
    pub file: Option<String>,
    /// Criterion the document was generated for.
    pub criterion: String,
    /// Metric graphed.
    pub metric: String,
    /// Axis label for the metric, if recognized.
    pub metric_units: Option<&'static str>,
    /// Series on the chart.
    pub series: Vec<SeriesSnapshot>,
    /// Flattened rows.
    pub rows: RowIndex,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_doc;

    fn view(with_baseline: bool) -> ComparisonView {
        ComparisonView::from_document(
            ViewerConfig::default(),
            sample_doc(&["a.y4m", "b.y4m"], with_baseline),
            "psnr",
        )
    }

    #[test]
    fn test_first_file_selected_on_load() {
        let view = view(false);
        assert_eq!(view.phase(), SelectionPhase::FileSelected);
        assert_eq!(view.selection().selected_file(), Some("a.y4m"));
        assert_eq!(view.series().len(), 2);
        assert_eq!(view.rows().len(), 4);
        assert!(view.hovered_detail().is_none());
    }

    #[test]
    fn test_empty_document_selects_nothing() {
        let mut doc = sample_doc(&[], false);
        doc.detailed.clear();
        let view = ComparisonView::from_document(ViewerConfig::default(), doc, "psnr");
        assert_eq!(view.phase(), SelectionPhase::NoFileSelected);
        assert!(view.rows().is_empty());
    }

    #[test]
    fn test_hover_resolves_record() {
        let mut view = view(true);
        let record = view.hover(Some(5)).unwrap().unwrap();
        assert_eq!(record.config_id, "t-vp9-1");
        assert_eq!(view.phase(), SelectionPhase::RowHovered);

        // Mouse-out keeps the last hovered record.
        let again = view.hover(None).unwrap().map(|r| r.config_id.clone());
        assert_eq!(again.as_deref(), Some("t-vp9-1"));
    }

    #[test]
    fn test_hover_out_of_range_rejected() {
        let mut view = view(false);
        view.hover(Some(1)).unwrap();
        assert!(matches!(
            view.hover(Some(4)),
            Err(Error::RowOutOfRange { row: 4, len: 4 })
        ));
        assert_eq!(view.selection().hovered_row(), Some(1));
    }

    #[test]
    fn test_reselect_invalidates_hover() {
        let mut view = view(false);
        view.select_table_row(1).unwrap();
        assert_eq!(view.rows().len(), 6);
        view.hover(Some(5)).unwrap();

        view.select_table_row(0).unwrap();
        assert_eq!(view.selection().hovered_row(), None);
        assert!(view.hovered_detail().is_none());
        assert!(view.sweep_link().is_none());
        assert!(view.hover(Some(5)).is_err());
    }

    #[test]
    fn test_select_unknown_rows() {
        let mut view = view(false);
        assert!(matches!(
            view.select_table_row(2),
            Err(Error::RowOutOfRange { row: 2, len: 2 })
        ));
        assert!(matches!(view.select_file("z.y4m"), Err(Error::UnknownFile(_))));
        view.select_file("b.y4m").unwrap();
        assert_eq!(view.selection().selected_row(), Some(1));
    }

    #[test]
    fn test_sweep_link_for_hovered_codec() {
        let mut view = view(true);
        // Rows: vp9 uniform (2), x264 uniform (2), vp9 tuned (2), x264 tuned (2).
        view.hover(Some(7)).unwrap();
        assert_eq!(
            view.sweep_link().as_deref(),
            Some(
                "/results/sweepdata.html?codec=x264&filename=a.y4m&criterion=psnr\
                 &configs=t-x264-0,t-x264-1,u-x264-0,u-x264-1"
            )
        );
    }

    #[test]
    fn test_detail_panel_text() {
        let mut view = view(false);
        view.hover(Some(0)).unwrap();
        let text = view.detail_panel().unwrap().to_string();
        assert!(text.starts_with("Configuration ID: t-vp9-0\n"));
        assert!(text.contains("Score: 30\n"));
        assert!(text.contains("Encode command: encode --config t-vp9-0\n"));
        assert!(text.contains("\"bitrate\": 100.0"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let view = view(true);
        let json = serde_json::to_value(view.snapshot()).unwrap();
        assert_eq!(json["file"], "a.y4m");
        assert_eq!(json["codecs"][0][0], "vp9");
        assert_eq!(json["metric_units"], "Quality in decibels PSNR");
        assert_eq!(json["series"][2]["title"], "vp9 tuned");
        assert_eq!(json["rows"]["columns"][0], "bitrate");
    }
}
