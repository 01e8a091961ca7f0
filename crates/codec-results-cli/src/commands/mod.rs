//! Subcommand implementations.

pub mod detail;
pub mod graph;
pub mod summary;
pub mod sweep;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codec_results::{ComparisonView, DirSource, Query, RowIndex, ViewerConfig, metric};

use crate::PageArgs;

/// Load the comparison page described by `page`.
pub fn open_view(root: &Path, page: &PageArgs, verbose: bool) -> Result<ComparisonView> {
    if metric::units_for(&page.metric).is_none() {
        tracing::warn!(
            metric = %page.metric,
            "unrecognized metric; cells without it will be empty"
        );
    }

    let config = ViewerConfig::builder()
        .results_root(root)
        .generated_dir(page.generated_dir.clone())
        .metric(page.metric.clone())
        .sweep_page(page.sweep_page.clone())
        .build();
    let source = DirSource::new(root);
    let query = Query::parse(&page.query);

    if verbose {
        eprintln!("Loading results from: {}", root.display());
    }

    ComparisonView::open(config, &source, &query)
        .with_context(|| format!("Failed to load comparison for {}", page.query))
}

/// Print rows as an aligned table, absent cells as `-`.
pub fn print_rows(rows: &RowIndex) {
    let header: Vec<String> = rows.columns().iter().map(|c| format!("{:>14}", c)).collect();
    println!("{:>5} {}", "row", header.join(" "));
    println!("{:-<1$}", "", 6 + 15 * rows.columns().len());
    for (i, row) in rows.rows().iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|c| c.map_or_else(|| format!("{:>14}", "-"), |v| format!("{:>14.2}", v)))
            .collect();
        println!("{:>5} {}", i, cells.join(" "));
    }
}

/// Write rows as CSV to `path`.
pub fn write_rows_csv(rows: &RowIndex, path: &PathBuf) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    rows.write_csv(BufWriter::new(file))
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    println!("Saved to: {}", path.display());
    Ok(())
}

/// Write `content` to `path`.
pub fn write_text(content: &str, path: &PathBuf) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    println!("Saved to: {}", path.display());
    Ok(())
}
