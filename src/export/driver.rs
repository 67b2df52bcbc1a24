//! The export driver: one input bundle in, the requested files out.

use super::config::ExportConfig;
use super::mode::OutputMode;
use super::pdf::{HeadlessChrome, PdfRenderer};
use super::rtd::{rtd_console, rtd_csv, rtd_json, RtdMetadata};
use crate::data::InputBundle;
use crate::error::{AllotaxError, Result};
use crate::pipeline::{Allotaxonograph, Pipeline};
use chrono::Utc;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

/// The HTML file written next to `output`: same stem, `.html` extension.
pub fn html_sibling(output: &Path) -> PathBuf {
    match output.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("html") => output.to_path_buf(),
        _ => output.with_extension("html"),
    }
}

/// Where HTML mode writes: `output` itself, unless it names a PDF, in which
/// case its HTML sibling.
pub fn html_output(output: &Path) -> PathBuf {
    match output.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => html_sibling(output),
        _ => output.to_path_buf(),
    }
}

/// One export job.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// JSON input bundle.
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: OutputMode,
}

impl ExportRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, mode: OutputMode) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            mode,
        }
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub mode: OutputMode,
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
    pub divergence: f64,
}

/// Runs the pipeline and writes one output mode.
///
/// PDF mode writes the HTML sibling first and prints it; if printing fails
/// the HTML stays on disk.
#[derive(Debug, Clone)]
pub struct Exporter<R = HeadlessChrome> {
    config: ExportConfig,
    renderer: R,
}

impl Exporter<HeadlessChrome> {
    pub fn new(config: ExportConfig) -> Self {
        Self::with_renderer(config, HeadlessChrome::new())
    }
}

impl Default for Exporter<HeadlessChrome> {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

impl<R: PdfRenderer> Exporter<R> {
    pub fn with_renderer(config: ExportConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Load the bundle at `request.input` and export it.
    ///
    /// A missing input fails with [`AllotaxError::InputNotFound`] before
    /// anything is written.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportReport> {
        if !request.input.exists() {
            return Err(AllotaxError::InputNotFound(request.input.clone()));
        }
        let bundle = InputBundle::from_json_file(&request.input)?;
        self.export_bundle(&bundle, &request.output, request.mode)
    }

    /// Export an already loaded bundle.
    pub fn export_bundle(
        &self,
        bundle: &InputBundle,
        output: &Path,
        mode: OutputMode,
    ) -> Result<ExportReport> {
        let graph = Pipeline::from_config(&self.config.pipeline).run(bundle)?;

        let written = match mode {
            OutputMode::Html => vec![self.write_html(&graph, html_output(output))?],
            OutputMode::Pdf => {
                let html_path = self.write_html(&graph, html_sibling(output))?;
                self.renderer.render(&html_path, output, &self.config.pdf)?;
                vec![html_path, output.to_path_buf()]
            }
            OutputMode::RtdJson => {
                let metadata = RtdMetadata::new(&graph, Utc::now());
                fs::write(output, rtd_json(&graph.rtd, &metadata)?)?;
                info!("Divergence JSON saved to {}", output.display());
                vec![output.to_path_buf()]
            }
            OutputMode::RtdCsv => {
                rtd_csv(&graph.rtd, BufWriter::new(File::create(output)?))?;
                info!("Divergence CSV saved to {}", output.display());
                vec![output.to_path_buf()]
            }
            OutputMode::RtdConsole => {
                let metadata = RtdMetadata::new(&graph, Utc::now());
                let json = rtd_console(&graph.rtd, &metadata, io::stdout().lock())?;
                fs::write(output, json)?;
                vec![output.to_path_buf()]
            }
        };

        Ok(ExportReport {
            mode,
            written,
            divergence: graph.divergence(),
        })
    }

    fn write_html(&self, graph: &Allotaxonograph, html_path: PathBuf) -> Result<PathBuf> {
        let html = graph.render_html(&self.config.layout);
        fs::write(&html_path, html)?;
        info!("HTML saved to {}", html_path.display());
        Ok(html_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_sibling() {
        assert_eq!(html_sibling(Path::new("out/dash.pdf")), PathBuf::from("out/dash.html"));
        assert_eq!(html_sibling(Path::new("dash.html")), PathBuf::from("dash.html"));
        assert_eq!(html_sibling(Path::new("dash")), PathBuf::from("dash.html"));
        assert_eq!(html_sibling(Path::new("a.b.json")), PathBuf::from("a.b.html"));
    }

    #[test]
    fn test_html_output() {
        assert_eq!(html_output(Path::new("out/dash.pdf")), PathBuf::from("out/dash.html"));
        assert_eq!(html_output(Path::new("DASH.PDF")), PathBuf::from("DASH.html"));
        assert_eq!(html_output(Path::new("report.htm")), PathBuf::from("report.htm"));
        assert_eq!(html_output(Path::new("dash.out")), PathBuf::from("dash.out"));
        assert_eq!(html_output(Path::new("dash")), PathBuf::from("dash"));
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pdf");
        let request = ExportRequest::new(dir.path().join("missing.json"), &output, OutputMode::Pdf);

        let err = Exporter::new(ExportConfig::default())
            .export(&request)
            .unwrap_err();
        assert!(matches!(err, AllotaxError::InputNotFound(_)));
        assert!(err.to_string().starts_with("File not found: "));
        assert!(!output.exists());
        assert!(!html_sibling(&output).exists());
    }
}
