//! Flattening series into a chartable row matrix with a reverse index.
//!
//! Each point of each series becomes its own row: column 0 holds the bitrate,
//! the series' own column holds the metric value, and every other column is
//! absent (`None`). Series therefore never need to share bitrates. The record
//! that produced row `k` is kept at `details[k]` so a hovered row can be traced
//! back to its encode.

use std::io::Write;

use serde::Serialize;

use crate::document::DetailRecord;
use crate::error::{Error, Result};
use crate::series::SeriesDefinition;

/// One chart row: bitrate, then one cell per series; `None` means no value.
pub type TableRow = Vec<Option<f64>>;

/// Row matrix plus the record behind every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowIndex {
    columns: Vec<String>,
    rows: Vec<TableRow>,
    #[serde(skip)]
    details: Vec<DetailRecord>,
}

impl RowIndex {
    /// Flatten `series` for `metric`.
    ///
    /// A metric missing from both the record and its nested result leaves the
    /// cell absent; nothing fails.
    #[must_use]
    pub fn flatten(series: &[SeriesDefinition], metric: &str) -> Self {
        let width = series.len() + 1;
        let total: usize = series.iter().map(SeriesDefinition::len).sum();

        let mut columns = Vec::with_capacity(width);
        columns.push("bitrate".to_string());
        columns.extend(series.iter().map(|s| s.title.clone()));

        let mut rows = Vec::with_capacity(total);
        let mut details = Vec::with_capacity(total);

        for (i, line) in series.iter().enumerate() {
            for record in &line.records {
                let mut row = vec![None; width];
                row[0] = Some(record.result.bitrate);
                row[i + 1] = record.metric_value(metric);
                rows.push(row);
                details.push(record.clone());
            }
        }

        Self {
            columns,
            rows,
            details,
        }
    }

    /// Column titles: `bitrate` then one per series.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Records, parallel to [`rows`](Self::rows).
    #[must_use]
    pub fn details(&self) -> &[DetailRecord] {
        &self.details
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record that produced `row`.
    pub fn resolve(&self, row: usize) -> Result<&DetailRecord> {
        self.details.get(row).ok_or(Error::RowOutOfRange {
            row,
            len: self.details.len(),
        })
    }

    /// Points of series `index` as `(bitrate, value)`, skipping absent cells.
    pub fn points(&self, index: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| Some((row[0]?, (*row.get(index + 1)?)?)))
    }

    /// Write the matrix as CSV; absent cells are empty.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(&self.columns)?;
        for row in &self.rows {
            csv.write_record(row.iter().map(|c| c.map(|v| v.to_string()).unwrap_or_default()))?;
        }
        csv.flush()?;
        Ok(())
    }
}
