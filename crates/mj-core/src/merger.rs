//! Field overlay for matched member records
//!
//! The merged record starts as a copy of the primary row. Forecast fields
//! from the predicted dataset are layered on next, then cluster statistics
//! from the scored dataset. A field is only ever added, never replaced, so
//! precedence is strictly base > predicted > scored.

use crate::record::RowRecord;

/// Fields taken from the predicted dataset, in export order
pub const PREDICTED_FIELDS: [&str; 11] = [
    "vp_annual_mean_before_current_year",
    "vp_annual_sum_before_current_year",
    "vp_mean_current_year",
    "vl_annual_mean_before_current_year",
    "vl_annual_sum_before_current_year",
    "vl_mean_current_year",
    "vl_sum_current_year",
    "vp_sum_current_year",
    "vp_sum_current_year_pred",
    "vp_sum_current_year_diff",
    "vp_sum_current_year_diff_pct",
];

/// Fields taken from the scored dataset, in export order
pub const SCORED_FIELDS: [&str; 14] = [
    "cluster_id",
    "cluster_description",
    "vp_sum_current_year",
    "vp_mean_current_year",
    "vl_sum_current_year",
    "cluster_vp_mean",
    "cluster_vp_median",
    "cluster_vp_std",
    "cluster_vp_min",
    "cluster_vp_max",
    "cluster_score",
    "cluster_percentile",
    "vp_diff_from_cluster_mean",
    "vp_diff_from_cluster_median",
];

/// Merge a primary record with its predicted and scored counterparts.
///
/// None of the inputs are modified.
pub fn merge_record(
    base: &RowRecord,
    predicted: Option<&RowRecord>,
    scored: Option<&RowRecord>,
) -> RowRecord {
    let mut merged = base.clone();

    if let Some(predicted) = predicted {
        overlay(&mut merged, predicted, &PREDICTED_FIELDS);
    }
    if let Some(scored) = scored {
        overlay(&mut merged, scored, &SCORED_FIELDS);
    }

    merged
}

/// Copy the allow-listed fields of `source` that `target` lacks.
///
/// Returns the number of fields copied.
fn overlay(target: &mut RowRecord, source: &RowRecord, fields: &[&str]) -> usize {
    let mut copied = 0;
    for &field in fields {
        if let Some(value) = source.get(field) {
            if target.insert_if_absent(field, value) {
                copied += 1;
            }
        }
    }
    copied
}
