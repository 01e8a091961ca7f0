//! Hover detail command.

use std::path::Path;

use anyhow::{Context, Result};

use crate::PageArgs;

pub fn run(
    root: &Path,
    page: &PageArgs,
    file: Option<String>,
    hover: usize,
    verbose: bool,
) -> Result<()> {
    let mut view = super::open_view(root, page, verbose)?;
    if let Some(file) = file {
        view.select_file(&file)?;
    }

    if verbose {
        eprintln!(
            "{} rows for {}",
            view.rows().len(),
            view.selection().selected_file().unwrap_or("-")
        );
    }

    view.hover(Some(hover))
        .with_context(|| format!("Row {} is not on the chart", hover))?;

    if let Some(panel) = view.detail_panel() {
        println!("{}", panel);
    }

    if let Some(link) = view.sweep_link() {
        println!();
        println!("Sweep data: {}", link);
    }

    Ok(())
}
