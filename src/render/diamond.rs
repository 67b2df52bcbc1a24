//! Diamond plot: the rank-rank histogram drawn as a square grid turned 45
//! degrees, top rank at the top vertex.

use super::aesthetics::{Rgb, DARKERGREY, FONT_STACK, GREY, LIGHTERGREY, VERYDARKGREY};
use super::scale::{inferno_ramp, power_of_ten_label};
use super::svg::{num, Element};
use crate::analytics::{DiamondCounts, CELLS};
use std::f64::consts::SQRT_2;

/// Size of the diamond panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DiamondOptions {
    pub width: f64,
    pub height: f64,
    /// Space kept around the diamond for titles and rank labels.
    pub margin: f64,
    /// Number of color buckets, shared with the legend.
    pub n_categories: usize,
}

impl Default for DiamondOptions {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            margin: 40.0,
            n_categories: 20,
        }
    }
}

/// Geometry of the turned grid in panel coordinates.
struct Frame {
    cx: f64,
    top: f64,
    /// Side of the unturned square.
    side: f64,
}

impl Frame {
    fn new(opts: &DiamondOptions) -> Self {
        let span = (opts.width.min(opts.height) - 2.0 * opts.margin).max(0.0);
        Self {
            cx: opts.width / 2.0,
            top: opts.margin,
            side: span / SQRT_2,
        }
    }

    fn cell(&self) -> f64 {
        self.side / CELLS as f64
    }

    /// Panel position of grid point `(u, v)`, where `u` runs along the
    /// system-1 axis and `v` along the system-2 axis.
    fn project(&self, u: f64, v: f64) -> (f64, f64) {
        (self.cx + (u - v) / SQRT_2, self.top + (u + v) / SQRT_2)
    }
}

/// Bucket of the inferno ramp for a cell holding `value` types.
pub fn color_bucket(value: usize, max_count_log: u32, n_categories: usize) -> usize {
    if n_categories == 0 || value == 0 {
        return 0;
    }
    let top = f64::from(max_count_log.saturating_sub(1).max(1));
    let t = ((value as f64).log10() / top).clamp(0.0, 1.0);
    ((t * (n_categories - 1) as f64).round() as usize).min(n_categories - 1)
}

/// Render the diamond for `counts`, with system titles on the upper edges
/// and rank axes spanning `maxlog10` decades.
pub fn render_diamond(
    counts: &DiamondCounts,
    maxlog10: f64,
    max_count_log: u32,
    title1: &str,
    title2: &str,
    opts: &DiamondOptions,
) -> String {
    let frame = Frame::new(opts);
    let cell = frame.cell();
    let side = frame.side;
    let ramp: Vec<Rgb> = inferno_ramp(opts.n_categories.max(1));

    let cells = counts.counts.iter().map(|c| {
        let fill = ramp[color_bucket(c.value, max_count_log, ramp.len())];
        Element::new("rect")
            .attr("class", "cell")
            .attr_num("x", c.x1 as f64 * cell)
            .attr_num("y", c.y1 as f64 * cell)
            .attr_num("width", cell)
            .attr_num("height", cell)
            .attr("fill", fill.hex())
            .title(format!("{}\n{} types", c.types, c.value))
    });

    let grid = Element::new("g")
        .attr(
            "transform",
            format!(
                "translate({},{}) rotate(45)",
                num(frame.cx),
                num(frame.top)
            ),
        )
        .child(
            Element::new("rect")
                .attr_num("width", side)
                .attr_num("height", side)
                .attr("fill", LIGHTERGREY.css()),
        )
        .child(
            Element::new("line")
                .attr_num("x2", side)
                .attr_num("y2", side)
                .attr("stroke", GREY.css())
                .attr("stroke-dasharray", "4 3"),
        )
        .children(cells)
        .child(
            Element::new("rect")
                .attr_num("width", side)
                .attr_num("height", side)
                .attr("fill", "none")
                .attr("stroke", DARKERGREY.css()),
        );

    Element::svg(opts.width, opts.height)
        .attr("viewBox", format!("0 0 {} {}", opts.width, opts.height))
        .attr("class", "allotax-diamond")
        .attr("font-family", FONT_STACK)
        .attr("fill", VERYDARKGREY.css())
        .child(grid)
        .child(system_titles(&frame, title1, title2))
        .child(rank_axes(&frame, maxlog10))
        .render()
}

fn system_titles(frame: &Frame, title1: &str, title2: &str) -> Element {
    let offset = 18.0;
    let title = |text: &str, (x, y): (f64, f64), angle: i32| {
        Element::new("text")
            .attr_num("x", x)
            .attr_num("y", y)
            .attr(
                "transform",
                format!("rotate({},{},{})", angle, num(x), num(y)),
            )
            .attr("text-anchor", "middle")
            .attr("font-size", 16)
            .text(text)
    };

    // midpoints of the two upper edges, pushed outwards
    let (x1, y1) = frame.project(0.0, frame.side / 2.0);
    let (x2, y2) = frame.project(frame.side / 2.0, 0.0);
    let shift = offset / SQRT_2;
    Element::new("g")
        .attr("class", "system-titles")
        .child(title(title1, (x1 - shift, y1 - shift), -45))
        .child(title(title2, (x2 + shift, y2 - shift), 45))
}

fn rank_axes(frame: &Frame, maxlog10: f64) -> Element {
    let decades = maxlog10.max(1.0).round() as u32;
    let pad = 14.0;
    let mut axes = Element::new("g")
        .attr("class", "rank-axes")
        .attr("font-size", 12)
        .attr("text-anchor", "middle");

    for k in 0..=decades {
        let along = frame.side * f64::from(k) / f64::from(decades);
        let label = power_of_ten_label(k);
        // system 1 on the lower-left edge, system 2 on the lower-right
        let (x1, y1) = frame.project(along, frame.side + pad);
        let (x2, y2) = frame.project(frame.side + pad, along);
        axes.push(
            Element::new("text")
                .attr_num("x", x1)
                .attr_num("y", y1)
                .attr("dy", "0.32em")
                .text(label.as_str()),
        );
        axes.push(
            Element::new("text")
                .attr_num("x", x2)
                .attr_num("y", y2)
                .attr("dy", "0.32em")
                .text(label),
        );
    }
    axes
}
