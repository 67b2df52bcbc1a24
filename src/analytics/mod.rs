//! Allotaxonometry analytics.
//!
//! The five operations every dashboard is built from:
//!
//! - [`combine_elements`]: align two datasets over the union of their types
//! - [`rank_turbulence_divergence`]: per-type divergence contributions
//! - [`diamond_count`]: bin rank pairs into the diamond grid
//! - [`wordshift_data`]: signed contributions for the word-shift chart
//! - [`balance_data`]: size and overlap summary of the two systems
//!
//! Rendering and export treat their outputs as opaque records: they slice
//! them and derive scalars, nothing more.

mod balance;
mod combine;
mod diamond;
mod rtd;
mod wordshift;

pub use balance::{balance_data, BalanceRow};
pub use combine::{combine_elements, tied_ranks, MixedElements, SystemElements};
pub use diamond::{
    diamond_count, max_log10_rank, rank_bin, DiamondCell, DiamondCounts, WhichSys, CELLS,
};
pub use rtd::{rank_contribution, rank_turbulence_divergence, RtdResult};
pub use wordshift::{wordshift_data, WordShiftRow};
