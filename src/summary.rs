//! Per-file size summary and page heading.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::store::ResultStore;

/// One line of the file table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// File name (or aggregate label).
    pub file: String,
    /// Average size difference for the subject codec.
    pub size_avg: Option<f64>,
    /// BD-rate for the subject codec.
    pub size_drate: Option<f64>,
}

/// File table shown above the chart; selecting row `i` displays file `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    /// Codec whose values are shown.
    pub codec: String,
    /// Rows in document order.
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Build the table for the store's subject codec.
    #[must_use]
    pub fn from_store(store: &ResultStore) -> Self {
        // Values are for the compared codec, not the baseline.
        let codec = store.codecs()[1].id.clone();
        let rows = store
            .overall_rows()
            .iter()
            .enumerate()
            .map(|(i, avg)| SummaryRow {
                file: avg.file.clone(),
                size_avg: avg.value(&codec),
                size_drate: store.drate_row(i).and_then(|d| d.value(&codec)),
            })
            .collect();
        Self { codec, rows }
    }

    /// Render as aligned text, values to 2 decimals.
    #[must_use]
    pub fn to_text(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|r| r.file.len())
            .max()
            .unwrap_or(0)
            .max("Filename".len());
        let mut out = format!("{:<width$} {:>12} {:>12}\n", "Filename", "Size AVG", "Size DRATE");
        out.push_str(&"-".repeat(width + 26));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format!(
                "{:<width$} {:>12} {:>12}\n",
                row.file,
                format_value(row.size_avg),
                format_value(row.size_drate)
            ));
        }
        out
    }

    /// Write as CSV with columns `Filename, Size AVG, Size DRATE`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Filename", "Size AVG", "Size DRATE"])?;
        for row in &self.rows {
            csv.write_record([
                row.file.clone(),
                row.size_avg.map(|v| format!("{v:.2}")).unwrap_or_default(),
                row.size_drate.map(|v| format!("{v:.2}")).unwrap_or_default(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// Heading lines naming the codecs and criterion.
///
/// `codecs[0]` is labelled "Baseline" and `codecs[1]` "Compared to", the same
/// roles [`SummaryTable::from_store`] assumes when it reads `codecs[1]`'s
/// values. The document URL lists the codecs in that order (`codec1`, then
/// `codec2`).
///
/// When the document has a baseline section, a note explains the solid and
/// dashed lines.
#[must_use]
pub fn heading(store: &ResultStore, criterion: &str) -> Vec<String> {
    let [baseline, subject] = store.codecs();
    let mut lines = vec![
        format!("Baseline: {}", baseline.display_name),
        format!("Compared to: {}", subject.display_name),
        format!("Criterion: {criterion}"),
    ];
    if store.has_baseline() {
        lines.push(
            "The solid lines show the best found single configuration. \
             Dashed lines show the best configuration found for each file. \
             Hover over to see the command lines used."
                .to_string(),
        );
        lines.push("Size differences are computed on the tuned results.".to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_doc;

    #[test]
    fn test_rows_follow_subject_codec() {
        let store = ResultStore::new(sample_doc(&["a.y4m", "b.y4m"], false));
        let table = SummaryTable::from_store(&store);
        assert_eq!(table.codec, "x264");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].file, "b.y4m");
        assert_eq!(table.rows[1].size_avg, Some(4.25));
        assert_eq!(table.rows[1].size_drate, Some(-1.5));
    }

    #[test]
    fn test_text_and_csv() {
        let store = ResultStore::new(sample_doc(&["a.y4m"], false));
        let table = SummaryTable::from_store(&store);

        let text = table.to_text();
        assert!(text.starts_with("Filename"));
        assert!(text.contains("4.25"));
        assert!(text.contains("-1.50"));

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Filename,Size AVG,Size DRATE\na.y4m,4.25,-1.50\n"
        );
    }

    #[test]
    fn test_heading() {
        let plain = ResultStore::new(sample_doc(&["a.y4m"], false));
        assert_eq!(
            heading(&plain, "psnr"),
            ["Baseline: VP9", "Compared to: x264", "Criterion: psnr"]
        );

        let tuned = ResultStore::new(sample_doc(&["a.y4m"], true));
        let lines = heading(&tuned, "psnr");
        assert_eq!(lines.len(), 5);
        assert!(lines[3].starts_with("The solid lines"));
    }
}
