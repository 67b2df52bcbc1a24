//! allotax - render an allotaxonometer dashboard from a JSON input bundle.

use allotax::error::{AllotaxError, Result};
use allotax::export::{ExportConfig, ExportRequest, Exporter, HeadlessChrome, OutputMode};
use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Allotaxonometer dashboard export
#[derive(Parser)]
#[command(name = "allotax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input bundle JSON (data1, data2, alpha, title1, title2)
    #[arg(required_unless_present = "example_config")]
    input: Option<PathBuf>,

    /// Output path; PDF mode also writes an .html sibling
    #[arg(required_unless_present = "example_config")]
    output: Option<PathBuf>,

    /// Output mode
    #[arg(value_enum, default_value_t = OutputMode::Pdf)]
    mode: OutputMode,

    /// Export configuration (YAML or JSON): layout, pipeline and pdf settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write an example configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    example_config: Option<PathBuf>,

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

    let result = match (&cli.example_config, &cli.input, &cli.output) {
        (Some(path), _, _) => cmd_example_config(path),
        (None, Some(input), Some(output)) => cmd_export(&cli, input, output),
        _ => Err(AllotaxError::InvalidParameter(
            "INPUT and OUTPUT are required".to_string(),
        )),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}

fn report(e: &AllotaxError) {
    eprintln!("Error: {}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ExportConfig> {
    match path {
        Some(path) => ExportConfig::from_path(path),
        None => Ok(ExportConfig::default()),
    }
}

fn cmd_export(cli: &Cli, input: &Path, output: &Path) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let renderer = match &cli.chrome {
        Some(path) => HeadlessChrome::with_executable(path),
        None => HeadlessChrome::new(),
    };
    let exporter = Exporter::with_renderer(config, renderer);

    let request = ExportRequest::new(input, output, cli.mode);
    let report = exporter.export(&request)?;

    eprintln!(
        "Done! {} output, divergence {:.6}",
        report.mode, report.divergence
    );
    for path in &report.written {
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_example_config(path: &Path) -> Result<()> {
    ExportConfig::write_example(path)?;
    eprintln!("Example configuration written to {}", path.display());
    Ok(())
}
