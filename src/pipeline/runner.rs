//! Pipeline runner: turns an input bundle into everything the dashboard
//! and the divergence exports need.

use crate::analytics::{
    balance_data, combine_elements, diamond_count, max_log10_rank, rank_turbulence_divergence,
    wordshift_data, BalanceRow, DiamondCounts, MixedElements, RtdResult, WordShiftRow,
};
use crate::data::{Alpha, InputBundle};
use crate::error::{AllotaxError, Result};
use crate::render::{render_dashboard, render_document, DashboardLayout, DashboardProps};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Word-shift rows kept for the chart.
pub const DEFAULT_WORDSHIFT_ROWS: usize = 30;

fn default_wordshift_rows() -> usize {
    DEFAULT_WORDSHIFT_ROWS
}

/// Pipeline configuration for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Overrides the bundle's alpha when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Alpha>,
    #[serde(default = "default_wordshift_rows")]
    pub wordshift_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alpha: None,
            wordshift_rows: DEFAULT_WORDSHIFT_ROWS,
        }
    }
}

impl PipelineConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(AllotaxError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(AllotaxError::from)
    }
}

/// Builder for the allotaxonometry pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    alpha: Option<Alpha>,
    wordshift_rows: usize,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            alpha: None,
            wordshift_rows: DEFAULT_WORDSHIFT_ROWS,
        }
    }

    /// Create from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            alpha: config.alpha,
            wordshift_rows: config.wordshift_rows,
        }
    }

    /// Use `alpha` instead of the bundle's value.
    pub fn alpha(mut self, alpha: Alpha) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Number of word-shift rows handed to the chart.
    pub fn wordshift_rows(mut self, rows: usize) -> Self {
        self.wordshift_rows = rows;
        self
    }

    /// Convert to config for serialization.
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            alpha: self.alpha,
            wordshift_rows: self.wordshift_rows,
        }
    }

    /// Run every analytics stage on `bundle`.
    pub fn run(&self, bundle: &InputBundle) -> Result<Allotaxonograph> {
        if self.wordshift_rows == 0 {
            return Err(AllotaxError::InvalidParameter(
                "wordshift_rows must be at least 1".to_string(),
            ));
        }
        let alpha = self.alpha.unwrap_or(bundle.alpha);

        info!("Processing data...");
        debug!(
            types1 = bundle.data1.len(),
            types2 = bundle.data2.len(),
            %alpha,
            "input sizes"
        );

        let mixed = combine_elements(&bundle.data1, &bundle.data2);
        let rtd = rank_turbulence_divergence(&mixed, alpha);
        let diamond = diamond_count(&mixed, &rtd);

        let mut bar_data = wordshift_data(&mixed, &diamond);
        bar_data.truncate(self.wordshift_rows);
        let balance = balance_data(&bundle.data1, &bundle.data2);

        let maxlog10 = max_log10_rank(&mixed);
        let max_count_log = max_count_log(&diamond);
        let max_shift = bar_data.iter().map(|r| r.metric.abs()).fold(0.0, f64::max);

        debug!(
            union = mixed.len(),
            cells = diamond.counts.len(),
            divergence = rtd.divergence(),
            normalization = rtd.normalization,
            maxlog10,
            max_count_log,
            max_shift,
            "derived values"
        );

        Ok(Allotaxonograph {
            alpha,
            title1: bundle.title1.clone(),
            title2: bundle.title2.clone(),
            mixed,
            rtd,
            diamond,
            bar_data,
            balance,
            maxlog10,
            max_count_log,
            max_shift,
        })
    }
}

/// `ceil(log10(fullest cell)) + 1`, the number of decades on the legend.
fn max_count_log(diamond: &DiamondCounts) -> u32 {
    let max_value = diamond.max_value().max(1) as f64;
    max_value.log10().ceil() as u32 + 1
}

/// Run the pipeline with default settings.
pub fn run_bundle(bundle: &InputBundle) -> Result<Allotaxonograph> {
    Pipeline::new().run(bundle)
}

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct Allotaxonograph {
    pub alpha: Alpha,
    pub title1: String,
    pub title2: String,
    pub mixed: MixedElements,
    pub rtd: RtdResult,
    pub diamond: DiamondCounts,
    /// Largest word-shift rows, at most the configured count.
    pub bar_data: Vec<WordShiftRow>,
    pub balance: Vec<BalanceRow>,
    pub maxlog10: f64,
    pub max_count_log: u32,
    /// Largest absolute contribution among `bar_data`.
    pub max_shift: f64,
}

impl Allotaxonograph {
    pub fn divergence(&self) -> f64 {
        self.rtd.divergence()
    }

    /// Word-shift axis extent, `1.5` times the largest shift either way.
    pub fn x_domain(&self) -> (f64, f64) {
        if self.max_shift > 0.0 {
            (-1.5 * self.max_shift, 1.5 * self.max_shift)
        } else {
            (-1.0, 1.0)
        }
    }

    pub fn props(&self) -> DashboardProps<'_> {
        DashboardProps {
            diamond: &self.diamond,
            alpha: self.alpha,
            divnorm: self.rtd.normalization,
            bar_data: &self.bar_data,
            balance: &self.balance,
            title1: &self.title1,
            title2: &self.title2,
            maxlog10: self.maxlog10,
            max_count_log: self.max_count_log,
            x_domain: self.x_domain(),
        }
    }

    /// Render the complete HTML document.
    pub fn render_html(&self, layout: &DashboardLayout) -> String {
        info!("Generating HTML...");
        render_document(&render_dashboard(&self.props(), layout))
    }
}
