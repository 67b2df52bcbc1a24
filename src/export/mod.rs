//! Export of allotaxonographs to HTML, PDF and raw divergence dumps.
//!
//! A single [`Exporter`] handles every [`OutputMode`]. PDF printing goes
//! through the [`PdfRenderer`] trait so the browser can be swapped out.

mod config;
mod driver;
mod mode;
mod pdf;
mod rtd;

pub use config::ExportConfig;
pub use driver::{html_output, html_sibling, ExportReport, ExportRequest, Exporter};
pub use mode::OutputMode;
pub use pdf::{file_url, HeadlessChrome, PaperSize, PdfOptions, PdfRenderer};
pub use rtd::{rtd_console, rtd_csv, rtd_csv_row_count, rtd_json, RtdMetadata};
