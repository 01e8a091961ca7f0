//! Summary table command.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::PageArgs;

pub fn run(root: &Path, page: &PageArgs, csv: Option<PathBuf>, verbose: bool) -> Result<()> {
    let view = super::open_view(root, page, verbose)?;

    for line in view.heading() {
        println!("{}", line);
    }
    println!();

    let table = view.summary();
    print!("{}", table.to_text());

    if verbose {
        eprintln!("{} files, values for {}", table.rows.len(), table.codec);
    }

    if let Some(output_path) = csv {
        let file = File::create(&output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        table
            .write_csv(BufWriter::new(file))
            .with_context(|| format!("Failed to write to {}", output_path.display()))?;
        println!();
        println!("Saved to: {}", output_path.display());
    }

    Ok(())
}
