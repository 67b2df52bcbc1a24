//! Writers for the raw divergence result: JSON with metadata, flattened CSV
//! and a console dump.

use crate::analytics::RtdResult;
use crate::data::Alpha;
use crate::error::{AllotaxError, Result};
use crate::pipeline::Allotaxonograph;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

/// Provenance stored next to an exported divergence result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtdMetadata {
    pub title1: String,
    pub title2: String,
    pub alpha: Alpha,
    /// RFC 3339 export time.
    pub timestamp: String,
}

impl RtdMetadata {
    pub fn new(graph: &Allotaxonograph, timestamp: DateTime<Utc>) -> Self {
        Self {
            title1: graph.title1.clone(),
            title2: graph.title2.clone(),
            alpha: graph.alpha,
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Serialize)]
struct RtdDocument<'a> {
    metadata: &'a RtdMetadata,
    rtd: &'a RtdResult,
}

/// `{ "metadata": {...}, "rtd": {...} }`, pretty printed.
pub fn rtd_json(rtd: &RtdResult, metadata: &RtdMetadata) -> Result<String> {
    Ok(serde_json::to_string_pretty(&RtdDocument { metadata, rtd })?)
}

/// Flatten `rtd` into `metric,value` rows.
///
/// Scalar fields become one row each, array fields one `<key>_<index>` row
/// per element.
pub fn rtd_csv<W: Write>(rtd: &RtdResult, writer: W) -> Result<()> {
    let fields = match serde_json::to_value(rtd)? {
        Value::Object(fields) => fields,
        other => {
            return Err(AllotaxError::InvalidParameter(format!(
                "divergence result is not an object: {}",
                other
            )))
        }
    };

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["metric", "value"])?;
    for (key, value) in &fields {
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let name = format!("{}_{}", key, i);
                    let number = numeric(&name, item)?;
                    out.write_record([name, number])?;
                }
            }
            other => {
                let number = numeric(key, other)?;
                out.write_record([key.clone(), number])?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Non-finite floats serialize as `null`; those are rejected here.
fn numeric(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        other => Err(AllotaxError::InvalidParameter(format!(
            "divergence field {} is not a finite number: {}",
            name, other
        ))),
    }
}

/// Rows `rtd_csv` writes after the header.
pub fn rtd_csv_row_count(rtd: &RtdResult) -> usize {
    1 + rtd.divergence_elements.len()
}

/// Print a summary and the result as JSON to `console`, returning the JSON.
pub fn rtd_console<W: Write>(
    rtd: &RtdResult,
    metadata: &RtdMetadata,
    mut console: W,
) -> Result<String> {
    let json = serde_json::to_string_pretty(rtd)?;
    writeln!(
        console,
        "Rank-turbulence divergence ({} vs {}, alpha = {}): {:.6}",
        metadata.title1,
        metadata.title2,
        metadata.alpha,
        rtd.divergence()
    )?;
    writeln!(console, "{}", json)?;
    Ok(json)
}
