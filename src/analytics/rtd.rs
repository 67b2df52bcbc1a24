//! Rank-turbulence divergence.
//!
//! For a type ranked `r1` in system 1 and `r2` in system 2 the contribution is
//!
//! ```text
//! (alpha + 1) / alpha * | r1^-alpha - r2^-alpha |^(1 / (alpha + 1))
//! ```
//!
//! with the `alpha = 0` limit `log10(max(1/r1, 1/r2) / min(1/r1, 1/r2))` and
//! the `alpha = inf` limit `max(1/r1, 1/r2)` (zero when the ranks agree).
//! Contributions are normalized so that two disjoint systems score 1.

use super::combine::MixedElements;
use crate::data::Alpha;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Normalized per-type contributions and the normalization used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtdResult {
    /// Contribution of each type, in union order, already divided by `normalization`.
    pub divergence_elements: Vec<f64>,
    pub normalization: f64,
}

impl RtdResult {
    /// The divergence score: sum of all normalized contributions.
    pub fn divergence(&self) -> f64 {
        self.divergence_elements.iter().sum()
    }

    /// Largest single contribution.
    pub fn max_element(&self) -> f64 {
        self.divergence_elements.iter().copied().fold(0.0, f64::max)
    }
}

/// Unnormalized contribution of one rank pair.
pub fn rank_contribution(r1: f64, r2: f64, alpha: Alpha) -> f64 {
    let inv1 = 1.0 / r1;
    let inv2 = 1.0 / r2;
    match alpha {
        Alpha::Infinite => {
            if r1 == r2 {
                0.0
            } else {
                inv1.max(inv2)
            }
        }
        Alpha::Finite(_) if alpha.is_zero_limit() => (inv1.max(inv2) / inv1.min(inv2)).log10(),
        Alpha::Finite(a) => {
            (a + 1.0) / a * (inv1.powf(a) - inv2.powf(a)).abs().powf(1.0 / (a + 1.0))
        }
    }
}

/// Compute rank-turbulence divergence between the two systems of `mixed`.
pub fn rank_turbulence_divergence(mixed: &MixedElements, alpha: Alpha) -> RtdResult {
    let r1 = &mixed.sys1.ranks;
    let r2 = &mixed.sys2.ranks;

    let raw: Vec<f64> = r1
        .par_iter()
        .zip(r2.par_iter())
        .map(|(&a, &b)| rank_contribution(a, b, alpha))
        .collect();

    let normalization = disjoint_normalization(mixed, alpha);
    let divergence_elements = if normalization > 0.0 {
        raw.into_iter().map(|d| d / normalization).collect()
    } else {
        vec![0.0; raw.len()]
    };

    RtdResult {
        divergence_elements,
        normalization,
    }
}

/// The divergence the two systems would have if they shared no types.
///
/// In that case every type of system 1 sits in the tied zero block of
/// system 2, at rank `N2 + (N1 + 1) / 2`, and symmetrically for system 2.
fn disjoint_normalization(mixed: &MixedElements, alpha: Alpha) -> f64 {
    let n1 = mixed.sys1.total_unique as f64;
    let n2 = mixed.sys2.total_unique as f64;
    let r1_disjoint = n1 + (n2 + 1.0) / 2.0;
    let r2_disjoint = n2 + (n1 + 1.0) / 2.0;

    let term = |counts: &[f64], ranks: &[f64], r_disjoint: f64| -> f64 {
        counts
            .par_iter()
            .zip(ranks.par_iter())
            .filter(|(&c, _)| c > 0.0)
            .map(|(_, &r)| rank_contribution(r, r_disjoint, alpha))
            .sum::<f64>()
    };

    term(&mixed.sys1.counts, &mixed.sys1.ranks, r2_disjoint)
        + term(&mixed.sys2.counts, &mixed.sys2.ranks, r1_disjoint)
}
