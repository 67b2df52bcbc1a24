//! Word-shift rows: per-type divergence contributions signed by system.

use super::combine::MixedElements;
use super::diamond::DiamondCounts;
use serde::{Deserialize, Serialize};

/// One bar of the word-shift chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordShiftRow {
    /// `"<name> (<rank1> ⇋ <rank2>)"`.
    #[serde(rename = "type")]
    pub type_label: String,
    /// `rank1 - rank2`; negative when the type ranks higher in system 1.
    pub rank_diff: f64,
    /// Contribution, negative when it favors system 1.
    pub metric: f64,
}

/// Build word-shift rows sorted by absolute contribution, largest first.
///
/// Ties keep union order.
pub fn wordshift_data(mixed: &MixedElements, diamond: &DiamondCounts) -> Vec<WordShiftRow> {
    let mut rows: Vec<WordShiftRow> = (0..mixed.len())
        .map(|i| {
            let r1 = mixed.sys1.ranks[i];
            let r2 = mixed.sys2.ranks[i];
            let rank_diff = r1 - r2;
            let delta = diamond.deltas[i];
            WordShiftRow {
                type_label: format!("{} ({} ⇋ {})", mixed.type_name(i), r1, r2),
                rank_diff,
                metric: if rank_diff < 0.0 { -delta } else { delta },
            }
        })
        .collect();

    rows.sort_by(|a, b| b.metric.abs().total_cmp(&a.metric.abs()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{combine_elements, diamond_count, rank_turbulence_divergence};
    use crate::data::{Alpha, Dataset};

    #[test]
    fn test_signs_labels_and_order() {
        let d1 = Dataset::from_pairs(vec![("Grover", 50.0), ("Liam", 30.0), ("Noah", 5.0)]).unwrap();
        let d2 = Dataset::from_pairs(vec![("Liam", 60.0), ("Noah", 40.0), ("Ava", 1.0)]).unwrap();
        let me = combine_elements(&d1, &d2);
        let rtd = rank_turbulence_divergence(&me, Alpha::Finite(0.17));
        let dat = diamond_count(&me, &rtd);
        let rows = wordshift_data(&me, &dat);

        assert_eq!(rows.len(), 4);
        assert!(rows
            .windows(2)
            .all(|w| w[0].metric.abs() >= w[1].metric.abs()));

        let grover = rows.iter().find(|r| r.type_label.starts_with("Grover")).unwrap();
        assert_eq!(grover.type_label, "Grover (1 ⇋ 4)");
        assert!(grover.metric < 0.0);

        let ava = rows.iter().find(|r| r.type_label.starts_with("Ava")).unwrap();
        assert_eq!(ava.type_label, "Ava (4 ⇋ 3)");
        assert!(ava.metric > 0.0);
    }

    #[test]
    fn test_row_json_uses_type_key() {
        let row = WordShiftRow {
            type_label: "a (1 ⇋ 2)".to_string(),
            rank_diff: -1.0,
            metric: -0.1,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["type"], "a (1 ⇋ 2)");
    }
}
