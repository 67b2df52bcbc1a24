//! Integration tests for every export mode of the driver.

use allotax::prelude::*;
use allotax::export::html_sibling;
use allotax::export::rtd_csv_row_count;
use serde_json::Value;
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Writes a minimal PDF instead of launching a browser.
#[derive(Default)]
struct StubRenderer {
    calls: Cell<usize>,
}

impl PdfRenderer for StubRenderer {
    fn render(&self, html_path: &Path, pdf_path: &Path, _options: &PdfOptions) -> Result<()> {
        assert!(html_path.exists(), "html must be written before printing");
        self.calls.set(self.calls.get() + 1);
        fs::write(pdf_path, b"%PDF-1.4\n%stub\n")?;
        Ok(())
    }
}

/// Fails like a browser that never starts.
struct BrokenRenderer;

impl PdfRenderer for BrokenRenderer {
    fn render(&self, _: &Path, _: &Path, _: &PdfOptions) -> Result<()> {
        Err(AllotaxError::Browser("no browser available".to_string()))
    }
}

/// Two Zipf-like name distributions with partial overlap.
fn create_bundle(n: usize, alpha: Alpha) -> InputBundle {
    let mut seed = 42u64;
    let mut simple_rand = move || -> f64 {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        ((seed >> 16) & 0x7FFF) as f64 / 32768.0
    };

    let data1 = Dataset::from_pairs(
        (0..n).map(|i| (format!("name{}", i), (10_000.0 / (i as f64 + 1.0)).round())),
    )
    .unwrap();
    let data2 = Dataset::from_pairs((0..n).map(|i| {
        let shift = n / 4;
        let noise = 0.8 + 0.4 * simple_rand();
        (
            format!("name{}", i + shift),
            (8_000.0 * noise / (i as f64 + 1.0)).round().max(1.0),
        )
    }))
    .unwrap();

    InputBundle::new(data1, data2, alpha).titles("Boys 1895", "Boys 1968")
}

fn write_bundle(dir: &TempDir, bundle: &InputBundle) -> std::path::PathBuf {
    let path = dir.path().join("bundle.json");
    bundle.to_json_file(&path).unwrap();
    path
}

fn stub_exporter(config: ExportConfig) -> Exporter<StubRenderer> {
    Exporter::with_renderer(config, StubRenderer::default())
}

#[test]
fn test_html_mode_has_one_svg_per_panel() {
    let dir = TempDir::new().unwrap();
    let input = write_bundle(&dir, &create_bundle(200, Alpha::Finite(0.17)));
    let output = dir.path().join("dashboard.pdf");

    let report = stub_exporter(ExportConfig::default())
        .export(&ExportRequest::new(&input, &output, OutputMode::Html))
        .unwrap();

    let html_path = html_sibling(&output);
    assert_eq!(report.written, vec![html_path.clone()]);
    assert!(!output.exists());

    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.ends_with("</body></html>"));
    assert_eq!(html.matches("class=\"allotax-dashboard\"").count(), 1);
    assert_eq!(html.matches("<svg").count(), 4);
    assert_eq!(html.matches("<svg").count(), html.matches("</svg>").count());
}

#[test]
fn test_html_mode_writes_requested_path() {
    let dir = TempDir::new().unwrap();
    let input = write_bundle(&dir, &create_bundle(60, Alpha::Finite(0.17)));

    for name in ["report.htm", "dash.out", "dashboard"] {
        let output = dir.path().join(name);
        let report = stub_exporter(ExportConfig::default())
            .export(&ExportRequest::new(&input, &output, OutputMode::Html))
            .unwrap();

        assert_eq!(report.written, vec![output.clone()]);
        let html = fs::read_to_string(&output).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
    assert!(!dir.path().join("report.html").exists());
    assert!(!dir.path().join("dash.html").exists());
}

#[test]
fn test_html_mode_respects_show_flags() {
    let dir = TempDir::new().unwrap();
    let input = write_bundle(&dir, &create_bundle(50, Alpha::default()));
    let output = dir.path().join("dashboard.html");

    let config = ExportConfig::from_yaml("layout:\n  show_wordshift: false\n  show_legend: false\n")
        .unwrap();
    let expected = config.layout.panel_count();
    stub_exporter(config)
        .export(&ExportRequest::new(&input, &output, OutputMode::Html))
        .unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert_eq!(html.matches("<svg").count(), expected);
    assert_eq!(expected, 2);
}

#[test]
fn test_rtd_json_metadata() {
    let dir = TempDir::new().unwrap();
    let input = write_bundle(&dir, &create_bundle(120, Alpha::Finite(0.17)));
    let output = dir.path().join("rtd.json");

    stub_exporter(ExportConfig::default())
        .export(&ExportRequest::new(&input, &output, OutputMode::RtdJson))
        .unwrap();

    let doc: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(doc["metadata"]["alpha"], 0.17);
    assert_eq!(doc["metadata"]["title1"], "Boys 1895");
    let ts = doc["metadata"]["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    assert!(doc["rtd"]["normalization"].as_f64().unwrap() > 0.0);
    assert!(doc["rtd"]["divergence_elements"].is_array());
}

#[test]
fn test_rtd_json_infinite_alpha() {
    let dir = TempDir::new().unwrap();
    let input = write_bundle(&dir, &create_bundle(40, Alpha::Infinite));
    let output = dir.path().join("rtd.json");

    stub_exporter(ExportConfig::default())
        .export(&ExportRequest::new(&input, &output, OutputMode::RtdJson))
        .unwrap();

    let doc: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(doc["metadata"]["alpha"], "inf");
}

#[test]
fn test_rtd_csv_line_count() {
    let dir = TempDir::new().unwrap();
    let bundle = create_bundle(80, Alpha::Finite(0.17));
    let input = write_bundle(&dir, &bundle);
    let output = dir.path().join("rtd.csv");

    stub_exporter(ExportConfig::default())
        .export(&ExportRequest::new(&input, &output, OutputMode::RtdCsv))
        .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "metric,value");

    let graph = Pipeline::new().run(&bundle).unwrap();
    // one scalar plus one row per union type
    assert_eq!(lines.len() - 1, rtd_csv_row_count(&graph.rtd));
    assert_eq!(lines.len() - 1, 1 + graph.mixed.len());
    for line in &lines[1..] {
        let (key, value) = line.split_once(',').unwrap();
        assert!(!key.is_empty());
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        assert!(value.parse::<f64>().is_ok(), "not a number: {}", value);
    }
}

#[test]
fn test_rtd_console_writes_json() {
    let dir = TempDir::new().unwrap();
    let input = write_bundle(&dir, &create_bundle(30, Alpha::Finite(0.5)));
    let output = dir.path().join("rtd.txt");

    stub_exporter(ExportConfig::default())
        .export(&ExportRequest::new(&input, &output, OutputMode::RtdConsole))
        .unwrap();

    let rtd: RtdResult = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(!rtd.divergence_elements.is_empty());
}

#[test]
fn test_pdf_mode_writes_pdf_and_html_sibling() {
    let dir = TempDir::new().unwrap();
    let input = write_bundle(&dir, &create_bundle(100, Alpha::Finite(0.17)));
    let output = dir.path().join("dashboard.pdf");

    let exporter = stub_exporter(ExportConfig::default());
    let report = exporter
        .export(&ExportRequest::new(&input, &output, OutputMode::Pdf))
        .unwrap();

    let html_path = dir.path().join("dashboard.html");
    assert_eq!(report.written, vec![html_path.clone(), output.clone()]);
    assert!(html_path.exists());
    let bytes = fs::read(&output).unwrap();
    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_failed_print_leaves_html() {
    let dir = TempDir::new().unwrap();
    let input = write_bundle(&dir, &create_bundle(20, Alpha::default()));
    let output = dir.path().join("dashboard.pdf");

    let err = Exporter::with_renderer(ExportConfig::default(), BrokenRenderer)
        .export(&ExportRequest::new(&input, &output, OutputMode::Pdf))
        .unwrap_err();

    assert!(matches!(err, AllotaxError::Browser(_)));
    assert!(dir.path().join("dashboard.html").exists());
    assert!(!output.exists());
}

#[test]
fn test_missing_input_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("dashboard.pdf");

    for mode in OutputMode::ALL {
        let err = stub_exporter(ExportConfig::default())
            .export(&ExportRequest::new(dir.path().join("nope.json"), &output, mode))
            .unwrap_err();
        assert!(matches!(err, AllotaxError::InputNotFound(_)));
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_wordshift_truncated_to_thirty_rows() {
    let bundle = create_bundle(300, Alpha::Finite(0.17));
    let graph = Pipeline::new().run(&bundle).unwrap();
    assert!(graph.mixed.len() > 30);
    assert_eq!(graph.bar_data.len(), 30);

    let html = graph.render_html(&DashboardLayout::default());
    let wordshift = html
        .split("allotax-wordshift")
        .nth(1)
        .and_then(|rest| rest.split("</svg>").next())
        .unwrap();
    assert_eq!(wordshift.matches("<rect").count(), 30);
}

#[test]
fn test_bundle_from_tsv_pair() {
    let dir = TempDir::new().unwrap();
    let p1 = dir.path().join("a.tsv");
    let p2 = dir.path().join("b.tsv");
    fs::write(&p1, "types\tcounts\nLiam\t20\nNoah\t10\n").unwrap();
    fs::write(&p2, "types\tcounts\nNoah\t15\nOliver\t5\n").unwrap();

    let bundle = InputBundle::from_pair(&p1, &p2, Alpha::Finite(0.17), None, None).unwrap();
    let output = dir.path().join("out.html");
    let report = stub_exporter(ExportConfig::default())
        .export_bundle(&bundle, &output, OutputMode::Html)
        .unwrap();
    assert_eq!(report.written, vec![output.clone()]);
    assert!(fs::read_to_string(&output).unwrap().contains("System 1"));
}

#[test]
fn test_sample_bundle_renders() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("example_data/sample_bundle.json");
    let bundle = InputBundle::from_json_file(&path).unwrap();
    assert_eq!(bundle.alpha, Alpha::Finite(0.17));

    let graph = Pipeline::new().run(&bundle).unwrap();
    assert!(graph.divergence() > 0.0 && graph.divergence() < 1.0);
    assert!(graph.bar_data.iter().all(|row| row.type_label.contains(" ⇋ ")));

    let html = graph.render_html(&DashboardLayout::default());
    assert!(html.contains("Boys 1895"));
    assert_eq!(html.matches("<svg").count(), 4);
}
