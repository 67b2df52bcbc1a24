//! Balance rows: how the two systems compare in size and overlap.

use crate::data::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One bar of the balance chart. System 1 is positive, system 2 negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub y_coord: String,
    pub frequency: f64,
}

impl BalanceRow {
    fn new(y_coord: &str, frequency: f64) -> Self {
        Self {
            y_coord: y_coord.to_string(),
            frequency: round3(frequency),
        }
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Six balance rows: `total count`, `all names` and `exclusive`, one pair each.
///
/// - `total count`: each system's share of the combined number of types;
/// - `all names`: each system's share of the union of types;
/// - `exclusive`: fraction of each system's types absent from the other.
pub fn balance_data(data1: &Dataset, data2: &Dataset) -> Vec<BalanceRow> {
    let types1: HashSet<&str> = data1.types().collect();
    let types2: HashSet<&str> = data2.types().collect();
    let union = types1.union(&types2).count();
    let total = types1.len() + types2.len();
    let only1 = types1.difference(&types2).count();
    let only2 = types2.difference(&types1).count();

    vec![
        BalanceRow::new("total count", ratio(types1.len(), total)),
        BalanceRow::new("total count", -ratio(types2.len(), total)),
        BalanceRow::new("all names", ratio(types1.len(), union)),
        BalanceRow::new("all names", -ratio(types2.len(), union)),
        BalanceRow::new("exclusive", ratio(only1, types1.len())),
        BalanceRow::new("exclusive", -ratio(only2, types2.len())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_rows() {
        let d1 = Dataset::from_pairs(vec![("a", 3.0), ("b", 2.0), ("c", 1.0)]).unwrap();
        let d2 = Dataset::from_pairs(vec![("c", 5.0), ("d", 1.0)]).unwrap();
        let rows = balance_data(&d1, &d2);

        let freqs: Vec<f64> = rows.iter().map(|r| r.frequency).collect();
        assert_eq!(freqs, vec![0.6, -0.4, 0.75, -0.5, 0.667, -0.5]);
        assert_eq!(rows[0].y_coord, "total count");
        assert_eq!(rows[2].y_coord, "all names");
        assert_eq!(rows[5].y_coord, "exclusive");
    }

    #[test]
    fn test_identical_systems_have_no_exclusive_types() {
        let d = Dataset::from_pairs(vec![("a", 3.0), ("b", 2.0)]).unwrap();
        let rows = balance_data(&d, &d);
        assert_eq!(rows[4].frequency, 0.0);
        assert_eq!(rows[5].frequency, 0.0);
        assert_eq!(rows[2].frequency, 1.0);
    }
}
