//! mj-core: Core library for joining member datasets
//!
//! This library provides functionality to:
//! - Load CSV files into ordered row records
//! - Index the scored and predicted datasets by member identifier
//! - Join a primary extract against both indexes and count matches
//! - Merge matched records with a non-destructive field overlay
//! - Export merged records back to CSV

pub mod config;
pub mod error;
pub mod index;
pub mod join;
pub mod merger;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod writer;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use index::MemberIndex;
pub use join::{run_join, JoinOutcome, JoinStats, MEMBER_KEY, PRIMARY_KEY};
pub use merger::{merge_record, PREDICTED_FIELDS, SCORED_FIELDS};
pub use parser::{parse_csv, parse_csv_str};
pub use pipeline::{join_inputs, load_inputs, log_stats, run, Inputs};
pub use record::{Dataset, RowRecord};
pub use report::RunReport;
pub use writer::{export_header, write_csv, write_csv_string};
