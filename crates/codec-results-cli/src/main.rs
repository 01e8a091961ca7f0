//! codec-results CLI - browse codec comparison results

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Codec comparison results browser.
#[derive(Parser)]
#[command(name = "codec-results")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory that result URLs resolve against
    #[arg(long, global = true, env = "CODEC_RESULTS_ROOT", default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every comparison page command.
#[derive(Args)]
pub struct PageArgs {
    /// Page query, e.g. "?codec1=vp9&codec2=x264&criterion=psnr"
    #[arg(short, long)]
    query: String,

    /// URL prefix of generated comparison documents
    #[arg(long, default_value = "/results/generated")]
    generated_dir: String,

    /// Metric to graph (score, psnr, encode_cputime)
    #[arg(long, default_value = "psnr")]
    metric: String,

    /// Page that sweep links point at
    #[arg(long, default_value = "/results/sweepdata.html")]
    sweep_page: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the heading and per-file size summary
    Summary {
        #[command(flatten)]
        page: PageArgs,

        /// Write the summary table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show the series and rows for one file
    Graph {
        #[command(flatten)]
        page: PageArgs,

        /// File to display (defaults to the first file)
        #[arg(long, conflicts_with = "row")]
        file: Option<String>,

        /// Summary table row to display
        #[arg(long)]
        row: Option<usize>,

        /// Write the rows as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the chart as SVG
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Write a JSON snapshot of the view
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Show the encode behind a chart row and its sweep link
    Detail {
        #[command(flatten)]
        page: PageArgs,

        /// File to display (defaults to the first file)
        #[arg(long)]
        file: Option<String>,

        /// Chart row to inspect
        #[arg(long)]
        hover: usize,
    },

    /// Show the parameter sweeps named by a sweep link
    Sweep {
        /// Sweep page query, e.g. "?codec=vp9&filename=a.y4m&configs=c1,c2"
        #[arg(short, long)]
        query: String,

        /// URL of the sweep document
        #[arg(long, default_value = "/results/sweepdata.json")]
        sweep_document: String,

        /// Metric to graph
        #[arg(long, default_value = "psnr")]
        metric: String,

        /// Chart row whose encode details to show
        #[arg(long)]
        hover: Option<usize>,

        /// Write the rows as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the chart as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Summary { page, csv } => {
            commands::summary::run(&cli.root, &page, csv, cli.verbose)
        }
        Commands::Graph {
            page,
            file,
            row,
            csv,
            svg,
            json,
        } => {
            let selection = commands::graph::Selection { file, row };
            commands::graph::run(&cli.root, &page, selection, csv, svg, json, cli.verbose)
        }
        Commands::Detail { page, file, hover } => {
            commands::detail::run(&cli.root, &page, file, hover, cli.verbose)
        }
        Commands::Sweep {
            query,
            sweep_document,
            metric,
            hover,
            csv,
            svg,
        } => {
            let output = commands::sweep::Output { hover, csv, svg };
            commands::sweep::run(&cli.root, &query, sweep_document, &metric, output, cli.verbose)
        }
    }
}
