//! Balance chart: one pair of diverging bars per balance category.

use super::aesthetics::{Rgb, DARKERGREY, FONT_STACK, LIGHTGREY, PALEBLUE, VERYDARKGREY};
use super::scale::{format_percent, BandScale, LinearScale};
use super::svg::Element;
use crate::analytics::BalanceRow;

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceOptions {
    pub width: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    /// Height of one category band.
    pub band_height: f64,
    /// System 1 fill, then system 2.
    pub colors: [Rgb; 2],
}

impl Default for BalanceOptions {
    fn default() -> Self {
        Self {
            width: 200.0,
            margin_top: 10.0,
            margin_right: 40.0,
            margin_bottom: 10.0,
            margin_left: 40.0,
            band_height: 34.0,
            colors: [LIGHTGREY, PALEBLUE],
        }
    }
}

/// Render balance rows. Positive frequencies (system 1) grow to the left of
/// the centre line, negative ones (system 2) to the right.
pub fn render_balance(rows: &[BalanceRow], opts: &BalanceOptions) -> String {
    let mut categories: Vec<&str> = Vec::new();
    for row in rows {
        if !categories.contains(&row.y_coord.as_str()) {
            categories.push(&row.y_coord);
        }
    }

    let height = opts.margin_top + opts.margin_bottom + categories.len() as f64 * opts.band_height;
    // reversed domain puts system 1 on the left
    let x = LinearScale::new((1.0, -1.0), (opts.margin_left, opts.width - opts.margin_right));
    let y = BandScale::new(
        categories.len(),
        (opts.margin_top, height - opts.margin_bottom),
    )
    .padding(0.2);
    let x0 = x.apply(0.0);
    let bar_height = y.bandwidth() / 2.0;

    let mut bars = Element::new("g").attr("class", "bars");
    let mut labels = Element::new("g")
        .attr("class", "labels")
        .attr("font-size", 11)
        .attr("fill", DARKERGREY.css());
    for row in rows {
        let band = categories
            .iter()
            .position(|c| *c == row.y_coord)
            .unwrap_or(0);
        let xv = x.apply(row.frequency);
        let system1 = row.frequency > 0.0;
        let top = y.position(band) + y.bandwidth() - bar_height;

        bars.push(
            Element::new("rect")
                .attr_num("x", x0.min(xv))
                .attr_num("y", top)
                .attr_num("width", (xv - x0).abs())
                .attr_num("height", bar_height)
                .attr("fill", opts.colors[usize::from(!system1)].css())
                .title(format!("{}: {}", row.y_coord, row.frequency)),
        );
        let (lx, anchor) = if system1 {
            (xv - 3.0, "end")
        } else {
            (xv + 3.0, "start")
        };
        labels.push(
            Element::new("text")
                .attr_num("x", lx)
                .attr_num("y", top + bar_height / 2.0)
                .attr("dy", "0.32em")
                .attr("text-anchor", anchor)
                .text(format_percent(row.frequency.abs(), 0.01)),
        );
    }

    let names = categories.iter().enumerate().map(|(i, name)| {
        Element::new("text")
            .attr_num("x", x0)
            .attr_num("y", y.position(i) + y.bandwidth() / 2.0 - 4.0)
            .attr("text-anchor", "middle")
            .attr("font-size", 13)
            .text(*name)
    });

    Element::svg(opts.width, height)
        .attr("viewBox", format!("0 0 {} {}", opts.width, height))
        .attr("class", "allotax-balance")
        .attr("font-family", FONT_STACK)
        .attr("fill", VERYDARKGREY.css())
        .child(bars)
        .child(
            Element::new("line")
                .attr_num("x1", x0)
                .attr_num("x2", x0)
                .attr_num("y1", opts.margin_top)
                .attr_num("y2", height - opts.margin_bottom)
                .attr("stroke", DARKERGREY.css())
                .attr("stroke-width", 0.5),
        )
        .child(labels)
        .child(Element::new("g").attr("class", "categories").children(names))
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<BalanceRow> {
        [
            ("total count", 0.6),
            ("total count", -0.4),
            ("all names", 0.75),
            ("all names", -0.5),
            ("exclusive", 0.667),
            ("exclusive", -0.5),
        ]
        .into_iter()
        .map(|(y, f)| BalanceRow {
            y_coord: y.to_string(),
            frequency: f,
        })
        .collect()
    }

    #[test]
    fn test_six_bars_three_categories() {
        let svg = render_balance(&rows(), &BalanceOptions::default());
        assert_eq!(svg.matches("<rect").count(), 6);
        for name in ["total count", "all names", "exclusive"] {
            assert_eq!(svg.matches(&format!(">{}</text>", name)).count(), 1);
        }
        assert!(svg.contains(">67%</text>"));
        assert!(svg.contains(">75%</text>"));
    }

    #[test]
    fn test_system_one_grows_left() {
        let opts = BalanceOptions::default();
        let svg = render_balance(&rows()[..1], &opts);
        // centre is at 100, 0.6 maps to 100 - 0.6 * 60 = 64
        assert!(svg.contains("x=\"64\""));
        assert!(svg.contains(&format!("fill=\"{}\"", LIGHTGREY.css())));
    }
}
