//! Color legend for the diamond plot: the inferno ramp plus a
//! powers-of-ten axis labelled "Counts per cell".

use super::aesthetics::{FONT_STACK, VERYDARKGREY};
use super::scale::{inferno_ramp, power_of_ten_label, BandScale};
use super::svg::Element;

/// Layout of the legend strip.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendOptions {
    pub tick_size: f64,
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    /// Number of color buckets.
    pub n_categories: usize,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            tick_size: 0.0,
            width: 300.0,
            height: 44.0,
            margin_top: 13.0,
            margin_bottom: 16.0,
            margin_left: 0.0,
            n_categories: 20,
        }
    }
}

/// Render the legend for a grid whose fullest cell holds about
/// `10^(max_count_log - 1)` types.
pub fn render_legend(max_count_log: u32, opts: &LegendOptions) -> String {
    let width = opts.width;
    let height = opts.height + opts.tick_size;
    let margin_bottom = opts.margin_bottom + opts.tick_size;

    let ramp = inferno_ramp(opts.n_categories);
    let x = BandScale::new(ramp.len(), (opts.margin_left, width - 100.0)).round();
    let side = x.bandwidth().max(0.0);

    let swatches = ramp.iter().enumerate().map(|(i, color)| {
        Element::new("rect")
            .attr_num("x", x.position(i))
            .attr_num("y", opts.margin_top)
            .attr_num("width", side)
            .attr_num("height", side)
            .attr("fill", color.hex())
            .attr("transform", "rotate(-90) translate(-70,0)")
            .attr("stroke", "black")
            .attr("stroke-width", 0.65)
            .attr("shape-rendering", "crispEdges")
    });

    // largest power first
    let labels: Vec<String> = (0..max_count_log.max(1))
        .rev()
        .map(power_of_ten_label)
        .collect();
    let x2 = BandScale::new(labels.len(), (opts.margin_left - 40.0, width - 90.0)).round();

    let ticks = labels.iter().enumerate().map(|(i, label)| {
        Element::new("g")
            .attr("class", "tick")
            .translate(x2.center(i), 0.0)
            .child(
                Element::new("text")
                    .attr_num("y", opts.tick_size.max(0.0) + 3.0)
                    .attr_num("dx", 30.0)
                    .attr_num("dy", -5.0)
                    .attr("transform", "rotate(90)")
                    .attr("font-size", "14px")
                    .text(label.as_str()),
            )
    });

    let title = Element::new("text")
        .attr("class", "title")
        .attr_num("x", opts.margin_left - 25.0)
        .attr_num("y", opts.margin_top + margin_bottom)
        .attr_num("dx", 30.0)
        .attr_num("dy", -5.0)
        .attr("transform", "rotate(90)")
        .attr("fill", "currentColor")
        .attr("text-anchor", "start")
        .attr("font-size", 14)
        .text("Counts per cell");

    let axis = Element::new("g")
        .attr("text-anchor", "start")
        .attr("font-family", FONT_STACK)
        .attr("fill", VERYDARKGREY.css())
        .attr("transform", "rotate(-90) translate(-60,5)")
        .children(ticks)
        .child(title);

    Element::svg(width, height)
        .attr("viewBox", format!("0 0 {} {}", width, height))
        .attr("style", "overflow: visible; display: block")
        .attr("class", "allotax-legend")
        .child(Element::new("g").children(swatches))
        .child(axis)
        .render()
}
