//! Sweep drill-down command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codec_results::{ChartConfig, DirSource, Query, SweepView, ViewerConfig, render_svg};

/// What to print or write besides the info lines and rows.
pub struct Output {
    pub hover: Option<usize>,
    pub csv: Option<PathBuf>,
    pub svg: Option<PathBuf>,
}

pub fn run(
    root: &Path,
    query: &str,
    sweep_document: String,
    metric: &str,
    output: Output,
    verbose: bool,
) -> Result<()> {
    let config = ViewerConfig::builder()
        .results_root(root)
        .sweep_document(sweep_document)
        .build();
    let source = DirSource::new(root);

    if verbose {
        eprintln!("Loading sweeps from: {}", config.sweep_document);
    }

    let mut view = SweepView::open(&config, &source, &Query::parse(query), metric)
        .with_context(|| format!("Failed to load sweep data for {}", query))?;

    for line in view.info_lines() {
        println!("{}", line);
    }
    println!();

    super::print_rows(view.rows());

    if let Some(row) = output.hover {
        view.hover(Some(row))
            .with_context(|| format!("Row {} is not on the chart", row))?;
        if let Some(panel) = view.detail_panel() {
            println!();
            println!("{}", panel);
        }
    }

    if let Some(path) = output.csv {
        println!();
        super::write_rows_csv(view.rows(), &path)?;
    }

    if let Some(path) = output.svg {
        let title = format!("{} {}", view.params().codec, view.params().filename);
        let chart = render_svg(
            view.series(),
            view.rows(),
            &ChartConfig::for_metric(metric).with_title(title),
        );
        super::write_text(&chart, &path)?;
    }

    Ok(())
}
