//! End-to-end orchestration: load, decode and filter, aggregate, persist.

use std::path::Path;

use tracing::info;

use crate::error::PipelineError;
use crate::{aggregate, output, reader, records};

/// Row counts observed during a run, reported for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows in the source dataset.
    pub total_rows: usize,
    /// Rows whose vehicle type matched the bus categories.
    pub bus_rows: usize,
    /// Distinct (state, zip, carrier type, vehicle type) combinations.
    pub groups: usize,
}

/// Runs the full pipeline, writing the aggregated counts to `output_path`.
///
/// Steps run strictly in sequence; the output file is not touched unless
/// every preceding step succeeded.
///
/// # Errors
///
/// Propagates the first [`PipelineError`] from any stage. All errors are
/// terminal; there is no retry or partial output.
#[tracing::instrument]
pub fn run(input_path: &Path, output_path: &Path) -> Result<RunSummary, PipelineError> {
    let records = reader::load_records(input_path)?;
    info!(rows = records.len(), "Registration data loaded");

    let buses = records::select_buses(&records)?;
    info!(bus_rows = buses.len(), "Bus records selected");

    let counts = aggregate::count_buses(&buses);
    output::write_counts(output_path, &counts)?;
    info!(
        groups = counts.len(),
        path = %output_path.display(),
        "Bus counts written"
    );

    Ok(RunSummary {
        total_rows: records.len(),
        bus_rows: buses.len(),
        groups: counts.len(),
    })
}
