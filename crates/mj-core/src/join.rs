//! Join engine: probes the primary extract against both member indexes

use crate::index::MemberIndex;
use crate::merger::merge_record;
use crate::record::RowRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier column of the primary extract
pub const PRIMARY_KEY: &str = "MATRICULE_ANONYME";

/// Identifier column of the scored and predicted datasets
pub const MEMBER_KEY: &str = "member";

/// Match counters gathered during one pass over the primary extract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinStats {
    /// Number of primary records
    pub primary: usize,
    /// Records found in the scored index
    pub scored: usize,
    /// Records found in the predicted index
    pub predicted: usize,
    /// Records found in both indexes
    pub both: usize,
}

impl fmt::Display for JoinStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scored: {} / {}", self.scored, self.primary)?;
        writeln!(f, "Predicted: {} / {}", self.predicted, self.primary)?;
        write!(f, "Both: {} / {}", self.both, self.primary)
    }
}

/// Result of a join pass
#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    /// Merged records for members present in all three datasets, in
    /// primary order
    pub rows: Vec<RowRecord>,
    /// Match counters
    pub stats: JoinStats,
}

/// Join the primary records against the scored and predicted indexes.
///
/// Every primary record is counted. Only records matched on both sides are
/// merged and exported; a missing identifier is a normal outcome.
pub fn run_join(
    primary: &[RowRecord],
    primary_key: &str,
    scored_index: &MemberIndex<'_>,
    predicted_index: &MemberIndex<'_>,
) -> JoinOutcome {
    let mut outcome = JoinOutcome {
        rows: Vec::new(),
        stats: JoinStats {
            primary: primary.len(),
            ..JoinStats::default()
        },
    };

    for record in primary {
        let member = record.get(primary_key);
        let scored = scored_index.get(member);
        let predicted = predicted_index.get(member);

        if scored.is_some() {
            outcome.stats.scored += 1;
        }
        if predicted.is_some() {
            outcome.stats.predicted += 1;
        }

        if let (Some(scored), Some(predicted)) = (scored, predicted) {
            outcome.stats.both += 1;
            outcome
                .rows
                .push(merge_record(record, Some(predicted), Some(scored)));
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv_str;

    const EXTRACT: &str = "MATRICULE_ANONYME,x\nA1,1\nA2,2\n";
    const SCORED: &str = "member,cluster_id,cluster_score\nA1,5,0.9\n";
    const PREDICTED: &str = "member,vp_sum_current_year_pred,vp_sum_current_year\nA1,10,8\nA2,20,18\n";

    fn join(extract: &str, scored: &str, predicted: &str) -> JoinOutcome {
        let extract = parse_csv_str(extract, "extract.csv").unwrap();
        let scored = parse_csv_str(scored, "scored.csv").unwrap();
        let predicted = parse_csv_str(predicted, "predicted.csv").unwrap();

        let scored_index = MemberIndex::build(&scored.rows, MEMBER_KEY);
        let predicted_index = MemberIndex::build(&predicted.rows, MEMBER_KEY);

        run_join(&extract.rows, PRIMARY_KEY, &scored_index, &predicted_index)
    }

    fn members(outcome: &JoinOutcome) -> Vec<&str> {
        outcome
            .rows
            .iter()
            .filter_map(|r| r.get(PRIMARY_KEY))
            .collect()
    }

    #[test]
    fn test_counts_and_export() {
        let outcome = join(EXTRACT, SCORED, PREDICTED);

        assert_eq!(
            outcome.stats,
            JoinStats {
                primary: 2,
                scored: 1,
                predicted: 2,
                both: 1,
            }
        );
        assert_eq!(outcome.rows.len(), 1);

        let row = &outcome.rows[0];
        assert_eq!(row.get(PRIMARY_KEY), Some("A1"));
        assert_eq!(row.get("x"), Some("1"));
        assert_eq!(row.get("cluster_id"), Some("5"));
        assert_eq!(row.get("vp_sum_current_year_pred"), Some("10"));
        assert!(!row.contains(MEMBER_KEY));
    }

    #[test]
    fn test_base_field_is_never_overwritten() {
        let predicted = "member,vp_sum_current_year\nA1,999\n";
        let extract = "MATRICULE_ANONYME,vp_sum_current_year\nA1,1\n";

        let outcome = join(extract, SCORED, predicted);

        assert_eq!(outcome.rows[0].get("vp_sum_current_year"), Some("1"));
    }

    #[test]
    fn test_order_is_preserved() {
        let extract = "MATRICULE_ANONYME\nC\nA\nX\nB\n";
        let scored = "member,cluster_id\nA,1\nB,2\nC,3\n";
        let predicted = "member,vp_sum_current_year\nB,1\nC,2\nA,3\n";

        let outcome = join(extract, scored, predicted);

        assert_eq!(members(&outcome), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_duplicate_primary_records_are_each_exported() {
        let extract = "MATRICULE_ANONYME,x\nA1,1\nA1,2\n";

        let outcome = join(extract, SCORED, PREDICTED);

        assert_eq!(outcome.stats.both, 2);
        assert_eq!(outcome.rows[0].get("x"), Some("1"));
        assert_eq!(outcome.rows[1].get("x"), Some("2"));
    }

    #[test]
    fn test_falsy_looking_identifier_matches() {
        let extract = "MATRICULE_ANONYME,x\n0,1\n";
        let scored = "member,cluster_id\n0,0\n";
        let predicted = "member,vp_sum_current_year\n0,0\n";

        let outcome = join(extract, scored, predicted);

        assert_eq!(outcome.stats.both, 1);
        assert_eq!(outcome.rows[0].get("cluster_id"), Some("0"));
    }

    #[test]
    fn test_missing_key_column_matches_nothing() {
        let extract = "ID,x\nA1,1\nA2,2\n";

        let outcome = join(extract, SCORED, PREDICTED);

        assert_eq!(
            outcome.stats,
            JoinStats {
                primary: 2,
                ..JoinStats::default()
            }
        );
        assert!(outcome.rows.is_empty());
    }

    #[test]
    fn test_count_consistency() {
        let extract = "MATRICULE_ANONYME\nA\nB\nC\nD\nE\nA\n";
        let scored = "member,cluster_id\nA,1\nC,2\nE,3\nZ,4\n";
        let predicted = "member,vp_sum_current_year\nA,1\nB,2\nC,3\n";

        let outcome = join(extract, scored, predicted);
        let stats = outcome.stats;

        assert_eq!(stats.primary, 6);
        assert_eq!(stats.scored, 4);
        assert_eq!(stats.predicted, 4);
        assert_eq!(stats.both, 3);
        assert!(stats.both <= stats.scored.min(stats.predicted));
        assert!(stats.scored.max(stats.predicted) <= stats.primary);
        assert_eq!(outcome.rows.len(), stats.both);
        assert_eq!(members(&outcome), vec!["A", "C", "A"]);
    }

    #[test]
    fn test_whitespace_only_lines_are_not_records() {
        let extract = "MATRICULE_ANONYME,x\n   \nA1,1\n,2\n";
        let scored = "member,cluster_id\n   \nA1,5\n";
        let predicted = "member,vp_sum_current_year\n  \nA1,8\n";

        let outcome = join(extract, scored, predicted);

        // The empty-keyed primary row is real but finds no "" member
        assert_eq!(
            outcome.stats,
            JoinStats {
                primary: 2,
                scored: 1,
                predicted: 1,
                both: 1,
            }
        );
        assert_eq!(members(&outcome), vec!["A1"]);
    }

    #[test]
    fn test_join_is_deterministic() {
        let first = join(EXTRACT, SCORED, PREDICTED);
        let second = join(EXTRACT, SCORED, PREDICTED);

        assert_eq!(first.stats, second.stats);
        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn test_stats_display() {
        let stats = JoinStats {
            primary: 10,
            scored: 7,
            predicted: 6,
            both: 5,
        };

        assert_eq!(
            stats.to_string(),
            "Scored: 7 / 10\nPredicted: 6 / 10\nBoth: 5 / 10"
        );
    }

    #[test]
    fn test_empty_primary() {
        let outcome = join("MATRICULE_ANONYME\n", SCORED, PREDICTED);

        assert_eq!(outcome.stats, JoinStats::default());
        assert!(outcome.rows.is_empty());
    }
}
