//! Output modes of the export driver.

use crate::error::AllotaxError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the export driver writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// HTML dashboard plus its PDF print.
    #[default]
    Pdf,
    /// HTML dashboard only.
    Html,
    /// Divergence result with metadata, as JSON.
    RtdJson,
    /// Divergence result flattened to `metric,value` rows.
    RtdCsv,
    /// Divergence result printed to stdout and saved as JSON.
    RtdConsole,
}

impl OutputMode {
    pub const ALL: [OutputMode; 5] = [
        OutputMode::Pdf,
        OutputMode::Html,
        OutputMode::RtdJson,
        OutputMode::RtdCsv,
        OutputMode::RtdConsole,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Pdf => "pdf",
            OutputMode::Html => "html",
            OutputMode::RtdJson => "rtd-json",
            OutputMode::RtdCsv => "rtd-csv",
            OutputMode::RtdConsole => "rtd-console",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = AllotaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                AllotaxError::InvalidParameter(format!(
                    "unknown output mode '{}', expected one of pdf, html, rtd-json, rtd-csv, rtd-console",
                    s
                ))
            })
    }
}
