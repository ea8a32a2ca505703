//! End-to-end run: load the three datasets, join, export

use crate::config::RunConfig;
use crate::error::Result;
use crate::index::MemberIndex;
use crate::join::{run_join, JoinOutcome, JoinStats};
use crate::parser::parse_csv;
use crate::record::Dataset;
use crate::report::RunReport;
use crate::writer::write_csv;
use tracing::{debug, info, warn};

/// The three datasets of a run, fully loaded
#[derive(Debug, Clone)]
pub struct Inputs {
    pub primary: Dataset,
    pub scored: Dataset,
    pub predicted: Dataset,
}

/// Load all three datasets. The first failure aborts the load.
pub fn load_inputs(config: &RunConfig) -> Result<Inputs> {
    let primary = parse_csv(&config.primary)?;
    let scored = parse_csv(&config.scored)?;
    let predicted = parse_csv(&config.predicted)?;

    check_key_column(&primary, &config.primary_key);
    check_key_column(&scored, &config.member_key);
    check_key_column(&predicted, &config.member_key);

    Ok(Inputs {
        primary,
        scored,
        predicted,
    })
}

// A missing key column is not an error: nothing will match
fn check_key_column(dataset: &Dataset, key: &str) {
    if !dataset.has_column(key) {
        warn!(
            path = %dataset.source_path.display(),
            key,
            "key column not found in header"
        );
    }
}

/// Index the auxiliary datasets and join the primary extract against them
pub fn join_inputs(inputs: &Inputs, config: &RunConfig) -> JoinOutcome {
    if let Some(first) = inputs.scored.rows.first() {
        debug!(sample = ?first, "first scored record");
    }
    if let Some(first) = inputs.predicted.rows.first() {
        debug!(sample = ?first, "first predicted record");
    }

    let scored_index = MemberIndex::build(&inputs.scored.rows, &config.member_key);
    let predicted_index = MemberIndex::build(&inputs.predicted.rows, &config.member_key);

    run_join(
        &inputs.primary.rows,
        &config.primary_key,
        &scored_index,
        &predicted_index,
    )
}

/// Log the three coverage lines
pub fn log_stats(stats: &JoinStats) {
    for line in stats.to_string().lines() {
        info!("{}", line);
    }
}

/// Run the whole pipeline described by `config`.
///
/// Load failures abort before anything is written. A write failure is
/// reported after the join has completed and its counts have been logged.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let inputs = load_inputs(config)?;
    let outcome = join_inputs(&inputs, config);
    log_stats(&outcome.stats);

    let rows_written = write_csv(&outcome.rows, &config.output)?;

    Ok(RunReport::new(config, outcome.stats, rows_written))
}
