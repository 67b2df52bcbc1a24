//! Binning rank pairs into the cells of the diamond plot.

use super::combine::MixedElements;
use super::rtd::RtdResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of cells along each side of the diamond grid.
pub const CELLS: usize = 60;

/// Maximum number of type names kept as a cell label.
const LABEL_TYPES: usize = 3;

/// Which system a cell's types rank higher in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhichSys {
    /// Higher in system 1 (drawn on the left half).
    Left,
    /// Higher in system 2 (drawn on the right half).
    Right,
    /// On the diagonal.
    None,
}

/// One occupied cell of the diamond grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiamondCell {
    /// Bin of the system-1 rank, 0 = rank 1.
    pub x1: usize,
    /// Bin of the system-2 rank.
    pub y1: usize,
    /// Number of types in the cell.
    pub value: usize,
    /// Up to three representative type names, most prominent first.
    pub types: String,
    pub which_sys: WhichSys,
    /// Position along the diagonal, in cells.
    pub coord_on_diag: f64,
    /// Distance from the diagonal, in cells.
    pub cos_dist: f64,
    /// Summed divergence contribution of the cell's types.
    pub delta: f64,
}

/// Diamond-binned counts plus the per-type contributions they were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiamondCounts {
    /// Occupied cells ordered by `(x1, y1)`.
    pub counts: Vec<DiamondCell>,
    /// Per-type contributions in union order.
    pub deltas: Vec<f64>,
    pub max_delta_loss: f64,
    /// Order of magnitude spanned by the grid (at least 1).
    pub maxlog10: f64,
}

impl DiamondCounts {
    /// Largest number of types in a single cell.
    pub fn max_value(&self) -> usize {
        self.counts.iter().map(|c| c.value).max().unwrap_or(0)
    }

    /// Total number of binned types.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.value).sum()
    }
}

/// Orders of magnitude needed to cover the largest rank in either system.
pub fn max_log10_rank(mixed: &MixedElements) -> f64 {
    mixed
        .sys1
        .max_rank()
        .log10()
        .max(mixed.sys2.max_rank().log10())
        .ceil()
}

/// Bin a rank into `[0, CELLS)` on a log10 axis spanning `[1, 10^maxlog10]`.
pub fn rank_bin(rank: f64, maxlog10: f64) -> usize {
    let pos = (rank.log10() / maxlog10 * CELLS as f64).floor();
    (pos.max(0.0) as usize).min(CELLS - 1)
}

/// Bin every type of `mixed` into the diamond grid.
pub fn diamond_count(mixed: &MixedElements, rtd: &RtdResult) -> DiamondCounts {
    let maxlog10 = max_log10_rank(mixed).max(1.0);
    let r1 = &mixed.sys1.ranks;
    let r2 = &mixed.sys2.ranks;

    let mut cells: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
    for idx in 0..mixed.len() {
        let key = (rank_bin(r1[idx], maxlog10), rank_bin(r2[idx], maxlog10));
        cells.entry(key).or_default().push(idx);
    }

    let counts = cells
        .into_iter()
        .map(|((x1, y1), mut members)| {
            members.sort_by(|&a, &b| r1[a].min(r2[a]).total_cmp(&r1[b].min(r2[b])));
            let types = members
                .iter()
                .take(LABEL_TYPES)
                .map(|&i| mixed.type_name(i))
                .collect::<Vec<_>>()
                .join(", ");
            let which_sys = match x1.cmp(&y1) {
                std::cmp::Ordering::Less => WhichSys::Left,
                std::cmp::Ordering::Greater => WhichSys::Right,
                std::cmp::Ordering::Equal => WhichSys::None,
            };
            DiamondCell {
                x1,
                y1,
                value: members.len(),
                types,
                which_sys,
                coord_on_diag: (x1 + y1) as f64 / 2.0,
                cos_dist: x1.abs_diff(y1) as f64 / std::f64::consts::SQRT_2,
                delta: members.iter().map(|&i| rtd.divergence_elements[i]).sum(),
            }
        })
        .collect();

    DiamondCounts {
        counts,
        deltas: rtd.divergence_elements.clone(),
        max_delta_loss: rtd.max_element(),
        maxlog10,
    }
}
