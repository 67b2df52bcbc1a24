//! PDF printing of a rendered dashboard through a headless Chromium.

use crate::error::{AllotaxError, Result};
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const MM_PER_INCH: f64 = 25.4;

/// Paper sizes, portrait width and height in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A3,
    A4,
    Letter,
}

impl PaperSize {
    pub fn inches(&self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (11.69, 16.54),
            PaperSize::A4 => (8.27, 11.69),
            PaperSize::Letter => (8.5, 11.0),
        }
    }
}

/// Print settings handed to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    pub paper: PaperSize,
    pub landscape: bool,
    pub print_background: bool,
    pub prefer_css_page_size: bool,
    pub scale: f64,
    pub margin_top_mm: f64,
    pub margin_right_mm: f64,
    pub margin_bottom_mm: f64,
    pub margin_left_mm: f64,
    /// Page load and print timeout.
    pub timeout_secs: u64,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::A3,
            landscape: true,
            print_background: true,
            prefer_css_page_size: false,
            scale: 0.8,
            margin_top_mm: 10.0,
            margin_right_mm: 10.0,
            margin_bottom_mm: 10.0,
            margin_left_mm: 10.0,
            timeout_secs: 30,
        }
    }
}

impl PdfOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Chrome accepts scales in `[0.1, 2]`.
    pub fn validate(&self) -> Result<()> {
        if !(0.1..=2.0).contains(&self.scale) {
            return Err(AllotaxError::InvalidParameter(format!(
                "pdf scale must be within [0.1, 2], got {}",
                self.scale
            )));
        }
        let margins = [
            self.margin_top_mm,
            self.margin_right_mm,
            self.margin_bottom_mm,
            self.margin_left_mm,
        ];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(AllotaxError::InvalidParameter(
                "pdf margins must be non-negative".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AllotaxError::InvalidParameter(
                "pdf timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    fn to_print_options(&self) -> PrintToPdfOptions {
        let (width, height) = self.paper.inches();
        PrintToPdfOptions {
            landscape: Some(self.landscape),
            print_background: Some(self.print_background),
            prefer_css_page_size: Some(self.prefer_css_page_size),
            scale: Some(self.scale),
            paper_width: Some(width),
            paper_height: Some(height),
            margin_top: Some(self.margin_top_mm / MM_PER_INCH),
            margin_right: Some(self.margin_right_mm / MM_PER_INCH),
            margin_bottom: Some(self.margin_bottom_mm / MM_PER_INCH),
            margin_left: Some(self.margin_left_mm / MM_PER_INCH),
            ..Default::default()
        }
    }
}

/// Turns an HTML file on disk into a PDF file.
pub trait PdfRenderer {
    fn render(&self, html_path: &Path, pdf_path: &Path, options: &PdfOptions) -> Result<()>;
}

/// Prints through a headless Chrome or Chromium.
///
/// The browser lives only for the duration of one [`PdfRenderer::render`]
/// call and is shut down when it goes out of scope, on error paths too.
#[derive(Debug, Clone, Default)]
pub struct HeadlessChrome {
    executable: Option<PathBuf>,
}

impl HeadlessChrome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific browser binary instead of searching for one.
    pub fn with_executable(path: impl Into<PathBuf>) -> Self {
        Self {
            executable: Some(path.into()),
        }
    }
}

fn browser_err<E: std::fmt::Display>(e: E) -> AllotaxError {
    AllotaxError::Browser(e.to_string())
}

/// `file://` URL of an existing file.
pub fn file_url(path: &Path) -> Result<String> {
    let absolute = fs::canonicalize(path)?;
    Ok(format!("file://{}", absolute.display()))
}

impl PdfRenderer for HeadlessChrome {
    fn render(&self, html_path: &Path, pdf_path: &Path, options: &PdfOptions) -> Result<()> {
        options.validate()?;
        let url = file_url(html_path)?;

        info!("Launching browser...");
        let launch = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .path(self.executable.clone())
            .idle_browser_timeout(options.timeout())
            .build()
            .map_err(browser_err)?;
        let browser = Browser::new(launch).map_err(browser_err)?;

        let tab = browser.new_tab().map_err(browser_err)?;
        tab.set_default_timeout(options.timeout());
        debug!(%url, "loading dashboard");
        tab.navigate_to(&url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(browser_err)?;

        info!("Generating PDF...");
        let bytes = tab
            .print_to_pdf(Some(options.to_print_options()))
            .map_err(browser_err)?;
        fs::write(pdf_path, bytes)?;
        info!("PDF successfully generated: {}", pdf_path.display());
        Ok(())
    }
}
