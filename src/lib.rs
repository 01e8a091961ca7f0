//! # codec-results
//!
//! Data model and drill-down indexing for codec rate-distortion comparisons.
//!
//! A comparison document pits two codecs against each other over a set of
//! files. This crate turns it into the projections a results viewer needs:
//!
//! - a per-file summary table ([`SummaryTable`]),
//! - named series for one file, tuned and (when present) uniform
//!   ([`series::build`]),
//! - a row matrix with a reverse index from row to record ([`RowIndex`]),
//! - a deep link to the parameter sweep behind a hovered point
//!   ([`SweepParams`]).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use codec_results::{ComparisonView, DirSource, Query, ViewerConfig};
//!
//! let config = ViewerConfig::builder().results_root("./site").build();
//! let source = DirSource::new(&config.results_root);
//! let query = Query::parse("?codec1=vp9&codec2=x264&criterion=psnr");
//!
//! let mut view = ComparisonView::open(config, &source, &query)?;
//! view.select_table_row(2)?;
//! if let Some(record) = view.hover(Some(5))? {
//!     println!("{}", record.config_id);
//! }
//! println!("{:?}", view.sweep_link());
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`query`]: Query string parsing
//! - [`document`]: Typed comparison and sweep documents
//! - [`store`]: Read-only access to a loaded comparison
//! - [`series`]: Series construction for one file
//! - [`rows`]: Row flattening and reverse lookup
//! - [`registry`]: Configuration ids drawn for the displayed file
//! - [`selection`]: File/hover selection state
//! - [`view`]: Comparison page controller
//! - [`sweep`]: Sweep drill-down
//! - [`summary`]: File table and heading
//! - [`chart`]: SVG rendering
//! - [`fetch`]: Document loading

pub mod chart;
pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod metric;
pub mod query;
pub mod registry;
pub mod rows;
pub mod selection;
pub mod series;
pub mod store;
pub mod summary;
pub mod sweep;
pub mod view;

// Re-export commonly used types
pub use chart::{ChartConfig, render_svg};
pub use config::ViewerConfig;
pub use document::{
    CodecIdentity, ComparisonDocument, DetailRecord, EncodingResult, OverallRow, SweepDocument,
};
pub use error::{Error, Result};
pub use fetch::{DirSource, DocumentSource};
pub use metric::Metric;
pub use query::{ParamValue, Query};
pub use registry::ConfigRegistry;
pub use rows::{RowIndex, TableRow};
pub use selection::{SelectionPhase, SelectionState};
pub use series::{PointShape, SeriesDefinition, SeriesStyle};
pub use store::ResultStore;
pub use summary::{SummaryRow, SummaryTable};
pub use sweep::{SweepParams, SweepView, build_sweep_selection};
pub use view::{ComparisonView, DetailPanel, ViewSnapshot};
