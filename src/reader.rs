//! Loader for the binary vehicle registration dataset.
//!
//! The dataset is a Parquet file whose text columns are stored as raw bytes
//! (Arrow `Binary`); decoding to strings happens later in the pipeline. The
//! whole table is materialized in memory in a single pass. Columns are looked
//! up by name, so column order and extra columns in the file do not matter.

use std::fs::File;
use std::path::Path;

use arrow::array::{Array, BinaryArray};
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::debug;

use crate::error::PipelineError;
use crate::records::RawVehicleRecord;

/// Columns the pipeline requires, in [`RawVehicleRecord`] field order.
const REQUIRED_COLUMNS: [&str; 4] = ["VehicleType", "CarrierType", "State", "Zip"];

type ColumnIndices = [usize; 4];
type SchemaError = Box<dyn std::error::Error + Send + Sync>;

/// Reads every row of the dataset at `path` into memory.
///
/// # Errors
///
/// Returns [`PipelineError::DataLoad`] if the file is missing or not valid
/// Parquet, or if a required column is absent or not binary-typed.
pub fn load_records(path: &Path) -> Result<Vec<RawVehicleRecord>, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::data_load(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| PipelineError::data_load(path, e))?;

    // Fail fast on schema problems before reading any row data
    let indices =
        resolve_columns(builder.schema()).map_err(|e| PipelineError::data_load(path, e))?;

    let reader = builder
        .build()
        .map_err(|e| PipelineError::data_load(path, e))?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|e| PipelineError::data_load(path, e))?;
        read_batch(&batch, indices, &mut records).map_err(|e| PipelineError::data_load(path, e))?;
    }

    debug!(path = %path.display(), rows = records.len(), "Dataset loaded");
    Ok(records)
}

/// Locates the required columns in the file schema and checks their types.
fn resolve_columns(schema: &Schema) -> Result<ColumnIndices, SchemaError> {
    let mut indices = [0usize; 4];

    for (slot, name) in REQUIRED_COLUMNS.into_iter().enumerate() {
        let (index, field) = schema
            .column_with_name(name)
            .ok_or_else(|| format!("required column {name} is missing"))?;

        if field.data_type() != &DataType::Binary {
            return Err(format!(
                "column {name} has type {}, expected binary-encoded text",
                field.data_type()
            )
            .into());
        }

        indices[slot] = index;
    }

    Ok(indices)
}

fn read_batch(
    batch: &RecordBatch,
    indices: ColumnIndices,
    records: &mut Vec<RawVehicleRecord>,
) -> Result<(), SchemaError> {
    let vehicle_type = binary_column(batch, indices[0], REQUIRED_COLUMNS[0])?;
    let carrier_type = binary_column(batch, indices[1], REQUIRED_COLUMNS[1])?;
    let state = binary_column(batch, indices[2], REQUIRED_COLUMNS[2])?;
    let zip = binary_column(batch, indices[3], REQUIRED_COLUMNS[3])?;

    for row in 0..batch.num_rows() {
        records.push(RawVehicleRecord {
            vehicle_type: cell_bytes(vehicle_type, row),
            carrier_type: cell_bytes(carrier_type, row),
            state: cell_bytes(state, row),
            zip: cell_bytes(zip, row),
        });
    }

    Ok(())
}

fn binary_column<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &str,
) -> Result<&'a BinaryArray, SchemaError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<BinaryArray>()
        .ok_or_else(|| format!("column {name} could not be read as binary-encoded text").into())
}

/// A null cell becomes empty bytes. SQL NULLs group together and serialize
/// as an empty field in the source toolchain; empty bytes reproduce that.
fn cell_bytes(array: &BinaryArray, row: usize) -> Vec<u8> {
    if array.is_null(row) {
        Vec::new()
    } else {
        array.value(row).to_vec()
    }
}
