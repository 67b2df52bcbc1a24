//! allotax-pair - compare two dataset files without writing a bundle first.

use allotax::data::{Alpha, InputBundle};
use allotax::error::Result;
use allotax::export::{ExportConfig, Exporter, HeadlessChrome, OutputMode};
use clap::Parser;
use std::path::PathBuf;

/// Build an allotaxonometer dashboard from two dataset files
#[derive(Parser)]
#[command(name = "allotax-pair")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First dataset (JSON array of {types, counts} or TSV with types/counts columns)
    data1: PathBuf,

    /// Second dataset
    data2: PathBuf,

    /// Output path
    output: PathBuf,

    /// Divergence parameter; a non-negative number or "inf"
    alpha: Alpha,

    /// Title of the first system
    title1: Option<String>,

    /// Title of the second system
    title2: Option<String>,

    /// Output mode
    #[arg(short, long, value_enum, default_value_t = OutputMode::Pdf)]
    format: OutputMode,

    /// Export configuration (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chrome or Chromium executable used for PDF export
    #[arg(long, value_name = "PATH")]
    chrome: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };
    allotax::logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ExportConfig::from_path(path)?,
        None => ExportConfig::default(),
    };
    let renderer = match &cli.chrome {
        Some(path) => HeadlessChrome::with_executable(path),
        None => HeadlessChrome::new(),
    };

    let bundle = InputBundle::from_pair(&cli.data1, &cli.data2, cli.alpha, cli.title1, cli.title2)?;
    let report = Exporter::with_renderer(config, renderer).export_bundle(
        &bundle,
        &cli.output,
        cli.format,
    )?;

    for path in &report.written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
