//! Frequency datasets: one population's (type, count) observations.

use crate::error::{AllotaxError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single observation of a type and how often it occurs.
///
/// Field names follow the JSON layout used by allotaxonometer data files
/// (`types`, `counts`, `totalunique`, `probs`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    /// The item being counted (a name, a word, a hashtag, ...).
    pub types: String,
    /// Raw frequency.
    pub counts: f64,
    /// Number of unique types in the source population, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totalunique: Option<f64>,
    /// Precomputed probability, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probs: Option<f64>,
}

impl TypeCount {
    pub fn new(types: impl Into<String>, counts: f64) -> Self {
        Self {
            types: types.into(),
            counts,
            totalunique: None,
            probs: None,
        }
    }
}

/// An ordered collection of observations for one population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TypeCount>", into = "Vec<TypeCount>")]
pub struct Dataset {
    elements: Vec<TypeCount>,
}

/// Accepted top-level JSON layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetRepr {
    Bare(Vec<TypeCount>),
    Wrapped { data: Vec<TypeCount> },
}

impl Dataset {
    /// Create a dataset, rejecting empty input and negative or non-finite counts.
    pub fn new(elements: Vec<TypeCount>) -> Result<Self> {
        if elements.is_empty() {
            return Err(AllotaxError::EmptyData("dataset has no types".to_string()));
        }
        if let Some(bad) = elements
            .iter()
            .find(|e| !e.counts.is_finite() || e.counts < 0.0)
        {
            return Err(AllotaxError::InvalidParameter(format!(
                "count for '{}' must be a finite non-negative number, got {}",
                bad.types, bad.counts
            )));
        }
        Ok(Self { elements })
    }

    /// Build a dataset from `(type, count)` pairs.
    pub fn from_pairs<S, I>(pairs: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(t, c)| TypeCount::new(t, c))
                .collect(),
        )
    }

    /// Parse JSON text. A leading `export const data =` module header and a
    /// trailing semicolon are tolerated, as are `{"data": [...]}` wrappers.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let body = strip_export_statement(text);
        let elements = match serde_json::from_str::<DatasetRepr>(body)? {
            DatasetRepr::Bare(elements) => elements,
            DatasetRepr::Wrapped { data } => data,
        };
        Self::new(elements)
    }

    /// Load a two-column TSV file (`type<TAB>count`) with a header row.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_path(path)?;

        let mut elements = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let (Some(name), Some(value)) = (record.get(0), record.get(1)) else {
                continue;
            };
            let counts: f64 = value.trim().parse().map_err(|_| AllotaxError::InvalidCount {
                value: value.to_string(),
                line: idx + 2,
            })?;
            elements.push(TypeCount::new(name, counts));
        }
        Self::new(elements)
    }

    /// Load a dataset, choosing the parser from the file extension.
    ///
    /// `.tsv` and `.txt` are read as TSV, everything else (`.json`, `.js`) as JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AllotaxError::InputNotFound(path.to_path_buf()));
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsv") | Some("txt") => Self::from_tsv(path),
            _ => Self::from_json_str(&fs::read_to_string(path)?),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn elements(&self) -> &[TypeCount] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeCount> {
        self.elements.iter()
    }

    /// Type names in input order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.types.as_str())
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> f64 {
        self.elements.iter().map(|e| e.counts).sum()
    }

    /// Per-element probabilities.
    ///
    /// Uses the recorded `probs` when every element carries one, otherwise
    /// normalizes the counts.
    pub fn probabilities(&self) -> Vec<f64> {
        if let Some(probs) = self
            .elements
            .iter()
            .map(|e| e.probs)
            .collect::<Option<Vec<f64>>>()
        {
            return probs;
        }
        let total = self.total_count();
        self.elements
            .iter()
            .map(|e| if total > 0.0 { e.counts / total } else { 0.0 })
            .collect()
    }
}

impl TryFrom<Vec<TypeCount>> for Dataset {
    type Error = AllotaxError;

    fn try_from(elements: Vec<TypeCount>) -> Result<Self> {
        Self::new(elements)
    }
}

impl From<Dataset> for Vec<TypeCount> {
    fn from(dataset: Dataset) -> Self {
        dataset.elements
    }
}

/// Strip an ES module header (`export const data = ...;`) from JSON text.
pub fn strip_export_statement(text: &str) -> &str {
    let trimmed = text.trim();
    let body = match trimmed.strip_prefix("export") {
        Some(rest) => match rest.find('=') {
            Some(eq) => &rest[eq + 1..],
            None => rest,
        },
        None => trimmed,
    };
    body.trim().trim_end_matches(';').trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_strip_export_statement() {
        let text = "export const data = [{\"types\": \"a\", \"counts\": 1}];\n";
        assert_eq!(strip_export_statement(text), "[{\"types\": \"a\", \"counts\": 1}]");
        assert_eq!(strip_export_statement("  [1, 2]  "), "[1, 2]");
    }

    #[test]
    fn test_from_json_variants() {
        let bare = Dataset::from_json_str(
            r#"[{"types": "Liam", "counts": 20, "totalunique": 2, "probs": 0.8},
                {"types": "Noah", "counts": 5}]"#,
        )
        .unwrap();
        assert_eq!(bare.len(), 2);
        assert_eq!(bare.elements()[0].probs, Some(0.8));

        let wrapped =
            Dataset::from_json_str(r#"{"data": [{"types": "Liam", "counts": 20}]}"#).unwrap();
        assert_eq!(wrapped.types().collect::<Vec<_>>(), vec!["Liam"]);

        let module = Dataset::from_json_str(
            "export const data = [{\"types\": \"Liam\", \"counts\": 3}];",
        )
        .unwrap();
        assert_eq!(module.total_count(), 3.0);
    }

    #[test]
    fn test_rejects_empty_and_negative() {
        assert!(matches!(
            Dataset::from_json_str("[]"),
            Err(AllotaxError::EmptyData(_))
        ));
        assert!(matches!(
            Dataset::from_pairs(vec![("a", -1.0)]),
            Err(AllotaxError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_probabilities_fallback() {
        let ds = Dataset::from_pairs(vec![("a", 3.0), ("b", 1.0)]).unwrap();
        assert_eq!(ds.probabilities(), vec![0.75, 0.25]);
    }

    #[test]
    fn test_from_tsv() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "type\tcount").unwrap();
        writeln!(file, "Emma\t12").unwrap();
        writeln!(file, "Olivia\t7").unwrap();
        file.flush().unwrap();

        let ds = Dataset::from_path(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.elements()[1], TypeCount::new("Olivia", 7.0));
    }

    #[test]
    fn test_from_tsv_bad_count() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "type\tcount").unwrap();
        writeln!(file, "Emma\tmany").unwrap();
        file.flush().unwrap();

        let err = Dataset::from_tsv(file.path()).unwrap_err();
        assert!(matches!(err, AllotaxError::InvalidCount { line: 2, .. }));
    }
}
