//! SVG and HTML rendering of the allotaxonometer dashboard.
//!
//! Every renderer is a pure function of its inputs and options and returns
//! markup as a `String`, so the same data always yields the same bytes.

pub mod aesthetics;
pub mod balance;
pub mod dashboard;
pub mod diamond;
pub mod legend;
pub mod scale;
pub mod svg;
pub mod wordshift;

pub use balance::{render_balance, BalanceOptions};
pub use dashboard::{render_dashboard, render_document, DashboardLayout, DashboardProps};
pub use diamond::{render_diamond, DiamondOptions};
pub use legend::{render_legend, LegendOptions};
pub use wordshift::{render_wordshift, split_tick_label, WordShiftOptions};
