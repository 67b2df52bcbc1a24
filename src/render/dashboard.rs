//! Dashboard composition: lays out the four panels and wraps them in a
//! standalone HTML document.

use super::balance::{render_balance, BalanceOptions};
use super::diamond::{render_diamond, DiamondOptions};
use super::legend::{render_legend, LegendOptions};
use super::svg::escape;
use super::wordshift::{render_wordshift, WordShiftOptions};
use crate::analytics::{BalanceRow, DiamondCounts, WordShiftRow};
use crate::data::Alpha;
use crate::error::{AllotaxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Panel sizes and which panels to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardLayout {
    pub height: f64,
    pub width: f64,
    pub diamond_height: f64,
    pub diamond_width: f64,
    pub margin_inner: f64,
    pub margin_diamond: f64,
    pub show_diamond: bool,
    pub show_wordshift: bool,
    pub show_diverging_bar: bool,
    pub show_legend: bool,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            height: 815.0,
            width: 1200.0,
            diamond_height: 600.0,
            diamond_width: 600.0,
            margin_inner: 160.0,
            margin_diamond: 40.0,
            show_diamond: true,
            show_wordshift: true,
            show_diverging_bar: true,
            show_legend: true,
        }
    }
}

impl DashboardLayout {
    /// Parse a layout from YAML. JSON is accepted as well.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let layout: Self = serde_yaml::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a layout file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AllotaxError::InputNotFound(path.to_path_buf()));
        }
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Reject sizes that cannot be drawn.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("height", self.height),
            ("width", self.width),
            ("diamond_height", self.diamond_height),
            ("diamond_width", self.diamond_width),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(AllotaxError::Render(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.margin_inner < 0.0 || self.margin_diamond < 0.0 {
            return Err(AllotaxError::Render("margins must not be negative".to_string()));
        }
        if 2.0 * self.margin_diamond >= self.diamond_width.min(self.diamond_height) {
            return Err(AllotaxError::Render(
                "margin_diamond leaves no room for the diamond".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of panels that will be drawn.
    pub fn panel_count(&self) -> usize {
        [
            self.show_diamond,
            self.show_wordshift,
            self.show_diverging_bar,
            self.show_legend,
        ]
        .iter()
        .filter(|&&shown| shown)
        .count()
    }
}

/// Everything the dashboard draws, as derived by the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct DashboardProps<'a> {
    pub diamond: &'a DiamondCounts,
    pub alpha: Alpha,
    /// Divergence normalization.
    pub divnorm: f64,
    pub bar_data: &'a [WordShiftRow],
    pub balance: &'a [BalanceRow],
    pub title1: &'a str,
    pub title2: &'a str,
    pub maxlog10: f64,
    pub max_count_log: u32,
    pub x_domain: (f64, f64),
}

fn panel(left: f64, top: f64, svg: &str) -> String {
    format!(
        "<div class=\"allotax-panel\" style=\"position: absolute; left: {}px; top: {}px;\">{}</div>",
        left, top, svg
    )
}

/// Render the dashboard body: a header and one `<svg>` per enabled panel.
pub fn render_dashboard(props: &DashboardProps<'_>, layout: &DashboardLayout) -> String {
    let mut html = String::new();
    // writing into a String cannot fail
    let _ = write!(
        html,
        "<div class=\"allotax-dashboard\" style=\"width: {}px;\">",
        layout.width
    );
    let _ = write!(
        html,
        "<div class=\"allotax-header\"><h2>{} · {}</h2>\
         <p>α = {} · divergence normalization = {:.4}</p></div>",
        escape(props.title1),
        escape(props.title2),
        props.alpha,
        props.divnorm
    );
    let _ = write!(
        html,
        "<div class=\"allotax-panels\" style=\"position: relative; width: {}px; height: {}px;\">",
        layout.width, layout.height
    );

    let lower_top = layout.diamond_height + layout.margin_diamond / 2.0;

    if layout.show_diamond {
        let opts = DiamondOptions {
            width: layout.diamond_width,
            height: layout.diamond_height,
            margin: layout.margin_diamond,
            ..Default::default()
        };
        let svg = render_diamond(
            props.diamond,
            props.maxlog10,
            props.max_count_log,
            props.title1,
            props.title2,
            &opts,
        );
        html.push_str(&panel(0.0, 0.0, &svg));
    }

    if layout.show_wordshift {
        let left = layout.diamond_width + layout.margin_diamond;
        let opts = WordShiftOptions {
            width: (layout.width - left).max(layout.margin_inner),
            x_domain: Some(props.x_domain),
            ..Default::default()
        };
        let svg = render_wordshift(props.bar_data, &opts);
        html.push_str(&panel(left, 0.0, &svg));
    }

    if layout.show_legend {
        let svg = render_legend(props.max_count_log, &LegendOptions::default());
        html.push_str(&panel(layout.margin_diamond, lower_top, &svg));
    }

    if layout.show_diverging_bar {
        let opts = BalanceOptions {
            width: layout.margin_inner + layout.margin_diamond,
            ..Default::default()
        };
        let left = layout.diamond_width - opts.width - layout.margin_diamond;
        let svg = render_balance(props.balance, &opts);
        html.push_str(&panel(left.max(0.0), lower_top, &svg));
    }

    html.push_str("</div></div>");
    html
}

/// Wrap a dashboard body in a complete HTML document.
pub fn render_document(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>Allotaxonometer Dashboard</title>\
         <style>body {{ margin: 0; padding: 20px; font-family: system-ui, sans-serif; }}</style>\
         </head><body>{}</body></html>",
        body
    )
}
