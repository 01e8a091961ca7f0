//! Per-file graph command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use codec_results::{ChartConfig, ComparisonView, render_svg};

use crate::PageArgs;

/// Which file to display.
pub struct Selection {
    pub file: Option<String>,
    pub row: Option<usize>,
}

impl Selection {
    /// Apply to a freshly opened view; the first file stays selected otherwise.
    pub fn apply(&self, view: &mut ComparisonView) -> Result<()> {
        if let Some(file) = &self.file {
            view.select_file(file)?;
        } else if let Some(row) = self.row {
            view.select_table_row(row)?;
        }
        Ok(())
    }
}

pub fn run(
    root: &Path,
    page: &PageArgs,
    selection: Selection,
    csv: Option<PathBuf>,
    svg: Option<PathBuf>,
    json: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let mut view = super::open_view(root, page, verbose)?;
    selection.apply(&mut view)?;

    let file = view.selection().selected_file().unwrap_or_default().to_string();
    println!("File: {}", file);
    println!("Metric: {}", page.metric);
    println!();

    if view.series().is_empty() {
        println!("No data for this file.");
        return Ok(());
    }

    println!("Series:");
    for s in view.series() {
        let style = if s.style.is_dashed() { "dashed" } else { "solid" };
        println!(
            "  {:<20} {:>4} points  {} {}",
            s.title,
            s.len(),
            s.style.color.as_deref().unwrap_or("auto"),
            style
        );
    }
    println!();

    super::print_rows(view.rows());

    if let Some(path) = csv {
        println!();
        super::write_rows_csv(view.rows(), &path)?;
    }

    if let Some(path) = svg {
        let config = ChartConfig::for_metric(&page.metric).with_title(file.clone());
        let chart = render_svg(view.series(), view.rows(), &config);
        super::write_text(&chart, &path)?;
    }

    if let Some(path) = json {
        let snapshot = serde_json::to_string_pretty(&view.snapshot())?;
        super::write_text(&snapshot, &path)?;
    }

    Ok(())
}
