//! Input bundle: everything one dashboard needs, in a single JSON file.

use super::{Alpha, Dataset};
use crate::error::{AllotaxError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_title1() -> String {
    "System 1".to_string()
}

fn default_title2() -> String {
    "System 2".to_string()
}

/// Two populations to compare, the divergence parameter and their titles.
///
/// On disk this is a JSON object with the fixed schema
/// `{ "data1": [...], "data2": [...], "alpha": 0.17, "title1": "...", "title2": "..." }`.
/// `alpha` may also be the string `"inf"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBundle {
    pub data1: Dataset,
    pub data2: Dataset,
    pub alpha: Alpha,
    #[serde(default = "default_title1")]
    pub title1: String,
    #[serde(default = "default_title2")]
    pub title2: String,
}

impl InputBundle {
    pub fn new(data1: Dataset, data2: Dataset, alpha: Alpha) -> Self {
        Self {
            data1,
            data2,
            alpha,
            title1: default_title1(),
            title2: default_title2(),
        }
    }

    /// Set both system titles.
    pub fn titles(mut self, title1: impl Into<String>, title2: impl Into<String>) -> Self {
        self.title1 = title1.into();
        self.title2 = title2.into();
        self
    }

    /// Read a bundle from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AllotaxError::InputNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Assemble a bundle from two standalone dataset files.
    pub fn from_pair<P: AsRef<Path>, Q: AsRef<Path>>(
        path1: P,
        path2: Q,
        alpha: Alpha,
        title1: Option<String>,
        title2: Option<String>,
    ) -> Result<Self> {
        let data1 = Dataset::from_path(path1)?;
        let data2 = Dataset::from_path(path2)?;
        Ok(Self {
            data1,
            data2,
            alpha,
            title1: title1.unwrap_or_else(default_title1),
            title2: title2.unwrap_or_else(default_title2),
        })
    }

    /// Write the bundle as JSON.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }
}
