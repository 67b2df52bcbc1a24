//! Export configuration: dashboard layout, pipeline settings and print
//! settings in one YAML (or JSON) file.

use super::pdf::PdfOptions;
use crate::error::{AllotaxError, Result};
use crate::pipeline::PipelineConfig;
use crate::render::DashboardLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything the export driver can be tuned with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub layout: DashboardLayout,
    pub pipeline: PipelineConfig,
    pub pdf: PdfOptions,
}

impl ExportConfig {
    /// Load from YAML string. JSON is valid YAML and is accepted too.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AllotaxError::InputNotFound(path.to_path_buf()));
        }
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.pdf.validate()?;
        if self.pipeline.wordshift_rows == 0 {
            return Err(AllotaxError::InvalidParameter(
                "pipeline.wordshift_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The default configuration as commented YAML, for `--example-config`.
    pub fn example() -> Result<String> {
        let body = Self::default().to_yaml()?;
        Ok(format!(
            "# allotax export configuration\n\
             # layout: panel sizes in px and which panels to draw\n\
             # pipeline: optional alpha override and number of word-shift rows\n\
             # pdf: print settings, margins in mm\n{}",
            body
        ))
    }

    pub fn write_example<P: AsRef<Path>>(path: P) -> Result<()> {
        fs::write(path, Self::example()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ExportConfig::from_yaml(
            "layout:\n  show_legend: false\npdf:\n  scale: 1.0\npipeline:\n  wordshift_rows: 10\n",
        )
        .unwrap();
        assert!(!config.layout.show_legend);
        assert_eq!(config.layout.width, 1200.0);
        assert_eq!(config.pdf.scale, 1.0);
        assert_eq!(config.pdf.timeout_secs, 30);
        assert_eq!(config.pipeline.wordshift_rows, 10);
    }

    #[test]
    fn test_example_parses_back_to_default() {
        let example = ExportConfig::example().unwrap();
        assert!(example.starts_with("# allotax"));
        assert_eq!(ExportConfig::from_yaml(&example).unwrap(), ExportConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ExportConfig::from_yaml("pipeline:\n  wordshift_rows: 0\n").is_err());
        assert!(ExportConfig::from_yaml("pdf:\n  scale: 0\n").is_err());
        assert!(ExportConfig::from_yaml("layout:\n  width: -5\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ExportConfig::from_path("/nonexistent/allotax.yaml").unwrap_err();
        assert!(matches!(err, AllotaxError::InputNotFound(_)));
    }
}
