//! Word-shift chart: a horizontal diverging bar per type, system 1 on the
//! left and system 2 on the right.

use super::aesthetics::{Rgb, DARKERGREY, LABEL_FONT, LIGHTGREY, PALEBLUE, VERYDARKGREY};
use super::scale::{format_percent, BandScale, LinearScale};
use super::svg::Element;
use crate::analytics::WordShiftRow;

/// Height of one bar band in pixels.
pub const BAND_HEIGHT: f64 = 18.0;

/// Space between the top axis and the first band.
const X_AXIS_Y_OFFSET: f64 = 10.0;

/// Lifts the chart to line up with the system titles.
const SHIFT_UP: f64 = 12.0;

const BAR_HEIGHT_FACTOR: f64 = 0.7;

/// Layout and styling of the word-shift chart.
#[derive(Debug, Clone, PartialEq)]
pub struct WordShiftOptions {
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub width: f64,
    /// Derived from the number of rows when unset.
    pub height: Option<f64>,
    /// Extent of the metrics when unset.
    pub x_domain: Option<(f64, f64)>,
    pub x_label: String,
    /// Fill for bars at or below zero, then above zero.
    pub colors: [Rgb; 2],
    pub y_padding: f64,
}

impl Default for WordShiftOptions {
    fn default() -> Self {
        Self {
            margin_top: 50.0,
            margin_right: 60.0,
            margin_bottom: 40.0,
            margin_left: 70.0,
            width: 360.0,
            height: None,
            x_domain: None,
            x_label: "← System 1 · Divergence contribution · System 2 →".to_string(),
            colors: [LIGHTGREY, PALEBLUE],
            y_padding: 0.0,
        }
    }
}

impl WordShiftOptions {
    /// Total height for `n` distinct labels when no explicit height is set.
    pub fn height_for(&self, n: usize) -> f64 {
        self.height.unwrap_or_else(|| {
            n as f64 * BAND_HEIGHT + X_AXIS_Y_OFFSET + self.margin_top + self.margin_bottom
        })
    }
}

/// Split `"Grover (413.5 ⇋ 20)"` into `("Grover", "413.5 ⇋ 20")`.
///
/// The split happens at the last `" ("` so names containing spaces stay
/// whole; labels without one split at the first space. The outer
/// characters of the remainder are dropped when it is longer than two
/// characters.
pub fn split_tick_label(label: &str) -> (&str, &str) {
    let split = label
        .rfind(" (")
        .or_else(|| label.find(' '))
        .map(|i| (&label[..i], label[i + 1..].trim()));

    match split {
        None => (label, ""),
        Some((name, rest)) if rest.chars().count() > 2 => {
            let mut chars = rest.chars();
            chars.next();
            chars.next_back();
            (name, chars.as_str())
        }
        Some((name, rest)) => (name, rest),
    }
}

/// Render word-shift rows in the order given.
pub fn render_wordshift(rows: &[WordShiftRow], opts: &WordShiftOptions) -> String {
    // y domain: distinct labels, first occurrence wins
    let mut labels: Vec<(&str, f64)> = Vec::with_capacity(rows.len());
    for row in rows {
        if !labels.iter().any(|(l, _)| *l == row.type_label) {
            labels.push((row.type_label.as_str(), row.metric));
        }
    }
    let index_of = |label: &str| labels.iter().position(|(l, _)| *l == label).unwrap_or(0);

    let n = labels.len();
    let compact_height = n as f64 * BAND_HEIGHT;
    let inner_width = opts.width - opts.margin_left - opts.margin_right;
    let inner_height = compact_height + X_AXIS_Y_OFFSET;
    let height = opts.height_for(n);

    let x_domain = opts.x_domain.unwrap_or_else(|| metric_extent(rows));
    let x = LinearScale::new(x_domain, (0.0, inner_width));
    let y = BandScale::new(n, (X_AXIS_Y_OFFSET, X_AXIS_Y_OFFSET + compact_height))
        .padding(opts.y_padding);
    let x0 = x.apply(0.0);
    let title_step = x.tick_step(100.0);

    let axis_step = x.tick_step(opts.width / 80.0);
    let ticks = x.ticks(opts.width / 80.0).into_iter().map(|t| {
        Element::new("g")
            .attr("class", "tick")
            .translate(x.apply(t), 0.0)
            .child(Element::new("line").attr("stroke", "currentColor").attr_num("y2", -6.0))
            .child(
                Element::new("line")
                    .attr("stroke", "currentColor")
                    .attr_num("y2", inner_height - X_AXIS_Y_OFFSET)
                    .attr("stroke-opacity", 0.1),
            )
            .child(
                Element::new("text")
                    .attr("fill", "currentColor")
                    .attr_num("y", -9.0)
                    .attr("text-anchor", "middle")
                    .text(format_percent(t, axis_step)),
            )
    });

    let x_axis = Element::new("g")
        .attr("class", "x-axis")
        .translate(0.0, X_AXIS_Y_OFFSET)
        .attr("font-family", LABEL_FONT)
        .attr("font-size", 16)
        .attr("fill", VERYDARKGREY.css())
        .children(ticks)
        .child(
            Element::new("text")
                .attr_num("x", x0)
                .attr_num("y", -35.0)
                .attr("fill", "currentColor")
                .attr("text-anchor", "middle")
                .text(opts.x_label.as_str()),
        );

    let bandwidth = y.bandwidth();
    let bar_height = bandwidth * BAR_HEIGHT_FACTOR;
    let bars = rows.iter().map(|row| {
        let xv = x.apply(row.metric);
        let color = opts.colors[usize::from(row.metric > 0.0)];
        Element::new("rect")
            .attr("fill", color.css())
            .attr_num("x", x0.min(xv))
            .attr_num("width", (xv - x0).abs())
            .attr_num("height", bar_height)
            .attr_num(
                "y",
                y.position(index_of(&row.type_label)) + (bandwidth - bar_height) / 2.0,
            )
            .title(format!(
                "{}\n{}",
                row.type_label,
                format_percent(row.metric, title_step)
            ))
    });

    let y_ticks = labels.iter().enumerate().map(|(i, &(label, value))| {
        let (name, numbers) = split_tick_label(label);
        let side = if value > 0.0 { 1.0 } else { -1.0 };
        let anchor = |s: f64| if s > 0.0 { "start" } else { "end" };

        let mut tick = Element::new("g")
            .attr("class", "tick")
            .translate(0.0, y.center(i))
            .child(
                Element::new("text")
                    .attr("fill", VERYDARKGREY.css())
                    .attr("dy", "0.32em")
                    .attr_num("x", 6.0 * side)
                    .attr("text-anchor", anchor(side))
                    .text(name),
            );
        if !numbers.is_empty() {
            tick.push(
                Element::new("text")
                    .attr("opacity", 0.5)
                    .attr("fill", DARKERGREY.css())
                    .attr("dy", "0.32em")
                    .attr_num("x", -6.0 * side)
                    .attr("text-anchor", anchor(-side))
                    .text(numbers),
            );
        }
        tick
    });

    let y_axis = Element::new("g")
        .attr("class", "y-axis")
        .translate(x0, 0.0)
        .attr("font-family", LABEL_FONT)
        .attr("font-size", 14)
        .children(y_ticks);

    Element::svg(opts.width, height)
        .attr("viewBox", format!("0 0 {} {}", opts.width, height))
        .attr("class", "allotax-wordshift")
        .child(
            Element::new("g")
                .translate(opts.margin_left, opts.margin_top - SHIFT_UP)
                .child(x_axis)
                .child(Element::new("g").attr("class", "bars").children(bars))
                .child(y_axis),
        )
        .render()
}

fn metric_extent(rows: &[WordShiftRow]) -> (f64, f64) {
    let lo = rows.iter().map(|r| r.metric).fold(f64::INFINITY, f64::min);
    let hi = rows.iter().map(|r| r.metric).fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (-1.0, 1.0)
    }
}
