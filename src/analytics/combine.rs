//! Aligning two datasets over the union of their types.

use crate::data::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One system's view of the combined type list.
///
/// All vectors are indexed by the shared union order of [`MixedElements`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemElements {
    pub types: Vec<String>,
    /// Counts, 0 for types absent from this system.
    pub counts: Vec<f64>,
    /// Tied ranks by descending count (1 = most frequent).
    pub ranks: Vec<f64>,
    pub probs: Vec<f64>,
    /// Number of types with a non-zero count.
    pub total_unique: usize,
}

impl SystemElements {
    /// Largest rank, i.e. the rank of the least frequent block.
    pub fn max_rank(&self) -> f64 {
        self.ranks.iter().copied().fold(0.0, f64::max)
    }
}

/// Two systems aligned over the union of their types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedElements {
    pub sys1: SystemElements,
    pub sys2: SystemElements,
}

impl MixedElements {
    /// Number of types in the union.
    #[inline]
    pub fn len(&self) -> usize {
        self.sys1.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sys1.types.is_empty()
    }

    /// Type name at a union index.
    #[inline]
    pub fn type_name(&self, idx: usize) -> &str {
        &self.sys1.types[idx]
    }
}

/// Combine two datasets over the union of their types.
///
/// Union order is every type of `data1` in input order followed by the
/// types only present in `data2`, in their input order. Repeated types
/// within one dataset have their counts summed.
pub fn combine_elements(data1: &Dataset, data2: &Dataset) -> MixedElements {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut types: Vec<String> = Vec::new();
    for name in data1.types().chain(data2.types()) {
        if !index.contains_key(name) {
            index.insert(name, types.len());
            types.push(name.to_string());
        }
    }

    let sys1 = align(data1, &index, &types);
    let sys2 = align(data2, &index, &types);
    MixedElements { sys1, sys2 }
}

fn align(data: &Dataset, index: &HashMap<&str, usize>, types: &[String]) -> SystemElements {
    let n = types.len();
    let mut counts = vec![0.0; n];
    let mut probs = vec![0.0; n];

    for (element, prob) in data.iter().zip(data.probabilities()) {
        let idx = index[element.types.as_str()];
        counts[idx] += element.counts;
        probs[idx] += prob;
    }

    let ranks = tied_ranks(&counts);
    let total_unique = counts.iter().filter(|&&c| c > 0.0).count();

    SystemElements {
        types: types.to_vec(),
        counts,
        ranks,
        probs,
        total_unique,
    }
}

/// Rank values in descending order, giving tied values the mean of the
/// positions they occupy.
pub fn tied_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start+1..=end share their mean
        let mean = (start + 1 + end) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = mean;
        }
        start = end;
    }
    ranks
}
