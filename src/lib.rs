//! Allotaxonometer dashboards.
//!
//! Compares two frequency-count datasets ("systems") by rank-turbulence
//! divergence and draws the result as a dashboard: a diamond plot of rank
//! pairs, a word-shift chart of the largest contributions, a balance chart
//! and a color legend.
//!
//! # Overview
//!
//! - **data**: Input datasets, the alpha parameter and the JSON input bundle
//! - **analytics**: Combined ranks, divergence, diamond binning, word-shift and balance rows
//! - **render**: SVG panels and the HTML dashboard
//! - **pipeline**: Runs the analytics stages on a bundle
//! - **export**: HTML, PDF and raw divergence output
//!
//! # Example
//!
//! ```no_run
//! use allotax::prelude::*;
//!
//! let bundle = InputBundle::from_pair(
//!     "boys_1895.json",
//!     "boys_1968.json",
//!     Alpha::Finite(0.17),
//!     None,
//!     None,
//! )
//! .unwrap();
//! let graph = Pipeline::new().run(&bundle).unwrap();
//! println!("divergence = {:.4}", graph.divergence());
//!
//! let exporter = Exporter::new(ExportConfig::default());
//! exporter
//!     .export_bundle(&bundle, "dashboard.pdf".as_ref(), OutputMode::Pdf)
//!     .unwrap();
//! ```

pub mod analytics;
pub mod data;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod render;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::analytics::{
        balance_data, combine_elements, diamond_count, rank_turbulence_divergence,
        wordshift_data, BalanceRow, DiamondCounts, MixedElements, RtdResult, WordShiftRow,
    };
    pub use crate::data::{Alpha, Dataset, InputBundle, TypeCount};
    pub use crate::error::{AllotaxError, Result};
    pub use crate::export::{
        ExportConfig, ExportReport, ExportRequest, Exporter, HeadlessChrome, OutputMode,
        PdfOptions, PdfRenderer,
    };
    pub use crate::pipeline::{Allotaxonograph, Pipeline, PipelineConfig};
    pub use crate::render::DashboardLayout;
}
