//! CSV persistence for the aggregated bus counts.

use std::fs::File;
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use crate::aggregate::BusCount;
use crate::error::PipelineError;

/// Column order of the output file.
const HEADER: [&str; 5] = ["state", "zip", "carriertype", "vehicletype", "cnt"];

/// Writes the counts to `path` as CSV, creating or overwriting the file.
///
/// The header row is always written, so an empty aggregation produces a
/// header-only file. The parent directory must already exist.
///
/// # Errors
///
/// Returns [`PipelineError::OutputWrite`] if the file cannot be created or
/// a row cannot be written.
pub fn write_counts(path: &Path, counts: &[BusCount]) -> Result<(), PipelineError> {
    debug!(path = %path.display(), rows = counts.len(), "Writing bus counts");

    let file = File::create(path).map_err(|e| PipelineError::output_write(path, e))?;

    // Header written explicitly; serde-driven headers are skipped entirely
    // when there are zero rows to serialize.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer
        .write_record(HEADER)
        .map_err(|e| PipelineError::output_write(path, e))?;

    for count in counts {
        writer
            .serialize(count)
            .map_err(|e| PipelineError::output_write(path, e))?;
    }

    writer
        .flush()
        .map_err(|e| PipelineError::output_write(path, e))?;

    Ok(())
}
