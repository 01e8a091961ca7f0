//! Sweep drill-down: every encode behind a set of configurations.
//!
//! The comparison page links here with the hovered record's codec, the file
//! on screen, and every configuration id drawn for that codec. The sweep page
//! rebuilds one series per configuration from the sweep document and feeds
//! them through the same [`RowIndex`] flattening as the comparison chart.

use serde::Serialize;

use crate::config::ViewerConfig;
use crate::document::{DetailRecord, SweepDocument};
use crate::error::{Error, Result};
use crate::fetch::{self, DocumentSource};
use crate::query::Query;
use crate::registry::ConfigRegistry;
use crate::rows::RowIndex;
use crate::series::{SeriesDefinition, SeriesStyle};
use crate::view::DetailPanel;

/// Parameters of a sweep page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepParams {
    /// Codec whose sweeps are shown.
    pub codec: String,
    /// Criterion of the originating comparison, for display only.
    pub criterion: String,
    /// File the sweeps were run on.
    pub filename: String,
    /// Configuration ids to show, in link order.
    pub configs: Vec<String>,
}

impl SweepParams {
    /// Link parameters for `codec` using every configuration in `registry`.
    #[must_use]
    pub fn for_codec(
        codec: &str,
        filename: &str,
        criterion: &str,
        registry: &ConfigRegistry,
    ) -> Self {
        Self {
            codec: codec.to_string(),
            criterion: criterion.to_string(),
            filename: filename.to_string(),
            configs: registry.records_for(codec).map(str::to_string).collect(),
        }
    }

    /// Read parameters from a sweep page query.
    ///
    /// `configs` is comma-separated; empty ids are skipped and a bare
    /// `configs` flag means no configurations.
    pub fn from_query(query: &Query) -> Result<Self> {
        if !query.contains("configs") {
            return Err(Error::MissingParameter("configs".to_string()));
        }
        let configs = query
            .get_str("configs")
            .unwrap_or_default()
            .split(',')
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            codec: query.require("codec")?.to_string(),
            criterion: query.get_str("criterion").unwrap_or_default().to_string(),
            filename: query.require("filename")?.to_string(),
            configs,
        })
    }

    /// Deep link to `page` carrying these parameters.
    #[must_use]
    pub fn to_url(&self, page: &str) -> String {
        format!(
            "{page}?codec={}&filename={}&criterion={}&configs={}",
            self.codec,
            self.filename,
            self.criterion,
            self.configs.join(",")
        )
    }
}

/// One series per requested configuration, titled with its id.
///
/// A configuration missing from the sweep document gives an empty series, so
/// a partially stale link still renders.
#[must_use]
pub fn build_sweep_selection(params: &SweepParams, sweep: &SweepDocument) -> Vec<SeriesDefinition> {
    let available = sweep.configs_for(&params.codec, &params.filename);
    if available.is_none() {
        tracing::warn!(
            codec = %params.codec,
            filename = %params.filename,
            "no sweep data for codec and file"
        );
    }

    params
        .configs
        .iter()
        .map(|id| {
            let records = match available.and_then(|configs| configs.get(id)) {
                Some(records) => records.iter().map(|r| r.stamped(&params.codec)).collect(),
                None => {
                    tracing::warn!(config = %id, "configuration missing from sweep data");
                    Vec::new()
                }
            };
            SeriesDefinition::new(id.clone(), records, SeriesStyle::default())
        })
        .collect()
}

/// State of the sweep page.
#[derive(Debug, Clone)]
pub struct SweepView {
    params: SweepParams,
    metric: String,
    series: Vec<SeriesDefinition>,
    rows: RowIndex,
    hovered_row: Option<usize>,
}

impl SweepView {
    /// Load the sweep document and build the page for `query`.
    pub fn open(
        config: &ViewerConfig,
        source: &dyn DocumentSource,
        query: &Query,
        metric: &str,
    ) -> Result<Self> {
        let params = SweepParams::from_query(query)?;
        let sweep = fetch::load_sweep(source, &config.sweep_document)?;
        Ok(Self::new(params, &sweep, metric))
    }

    /// Build the page from an already loaded sweep document.
    #[must_use]
    pub fn new(params: SweepParams, sweep: &SweepDocument, metric: &str) -> Self {
        let series = build_sweep_selection(&params, sweep);
        let rows = RowIndex::flatten(&series, metric);
        Self {
            params,
            metric: metric.to_string(),
            series,
            rows,
            hovered_row: None,
        }
    }

    /// Handle a chart hover event, as on the comparison page.
    ///
    /// An event without a row keeps the previous hover. A row outside the
    /// chart is rejected without changing state.
    pub fn hover(&mut self, row: Option<usize>) -> Result<Option<&DetailRecord>> {
        if let Some(row) = row {
            self.rows.resolve(row)?;
            self.hovered_row = Some(row);
            tracing::debug!(row, "hovered sweep point");
        }
        Ok(self.hovered_detail())
    }

    /// Record behind the hovered row.
    #[must_use]
    pub fn hovered_detail(&self) -> Option<&DetailRecord> {
        self.hovered_row.and_then(|row| self.rows.details().get(row))
    }

    /// Detail panel for the hovered record.
    #[must_use]
    pub fn detail_panel(&self) -> Option<DetailPanel<'_>> {
        self.hovered_detail().map(DetailPanel::new)
    }

    /// Page parameters.
    #[must_use]
    pub fn params(&self) -> &SweepParams {
        &self.params
    }

    /// Metric graphed.
    #[must_use]
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Series, one per requested configuration.
    #[must_use]
    pub fn series(&self) -> &[SeriesDefinition] {
        &self.series
    }

    /// Flattened rows.
    #[must_use]
    pub fn rows(&self) -> &RowIndex {
        &self.rows
    }

    /// Description lines: codec, file, metric, then encodes per configuration.
    #[must_use]
    pub fn info_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Codec: {}", self.params.codec),
            format!("Filename: {}", self.params.filename),
            format!("Metric graphed: {}", self.metric),
        ];
        lines.extend(
            self.series
                .iter()
                .map(|s| format!("{} - {} encodings", s.title, s.len())),
        );
        lines
    }
}
