use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BinaryArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use bus_count_zip::error::PipelineError;
use bus_count_zip::pipeline;

/// Writes a registration dataset with the four required columns, one tuple
/// per row: (VehicleType, CarrierType, State, Zip).
fn write_dataset(path: &Path, rows: &[(&[u8], &[u8], &[u8], &[u8])]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("VehicleType", DataType::Binary, true),
        Field::new("CarrierType", DataType::Binary, true),
        Field::new("State", DataType::Binary, true),
        Field::new("Zip", DataType::Binary, true),
    ]));

    let vehicle_types: Vec<&[u8]> = rows.iter().map(|r| r.0).collect();
    let carrier_types: Vec<&[u8]> = rows.iter().map(|r| r.1).collect();
    let states: Vec<&[u8]> = rows.iter().map(|r| r.2).collect();
    let zips: Vec<&[u8]> = rows.iter().map(|r| r.3).collect();

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(BinaryArray::from_vec(vehicle_types)) as ArrayRef,
            Arc::new(BinaryArray::from_vec(carrier_types)) as ArrayRef,
            Arc::new(BinaryArray::from_vec(states)) as ArrayRef,
            Arc::new(BinaryArray::from_vec(zips)) as ArrayRef,
        ],
    )
    .unwrap();

    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn test_full_pipeline() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trucks.parquet");
    let output = dir.path().join("bus_cnt_zip.csv");

    write_dataset(
        &input,
        &[
            (b"BUS SCHOOL", b"PUBLIC", b"TX", b"75001"),
            (b"BUS SCHOOL", b"PUBLIC", b"TX", b"75001"),
            (b"TRUCK", b"PUBLIC", b"TX", b"75001"),
            (b"BUS NON SCHOOL", b"PRIVATE", b"TX", b"75002"),
        ],
    );

    let summary = pipeline::run(&input, &output).expect("pipeline failed");

    assert_eq!(summary.total_rows, 4);
    assert_eq!(summary.bus_rows, 3);
    assert_eq!(summary.groups, 2);

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "state,zip,carriertype,vehicletype,cnt\n\
         TX,75001,PUBLIC,BUS SCHOOL,2\n\
         TX,75002,PRIVATE,BUS NON SCHOOL,1\n"
    );
}

#[test]
fn test_no_matching_rows_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trucks.parquet");
    let output = dir.path().join("bus_cnt_zip.csv");

    write_dataset(
        &input,
        &[
            (b"TRUCK", b"PUBLIC", b"TX", b"75001"),
            (b"TRACTOR", b"PRIVATE", b"OK", b"73001"),
        ],
    );

    let summary = pipeline::run(&input, &output).unwrap();

    assert_eq!(summary.bus_rows, 0);
    assert_eq!(summary.groups, 0);

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "state,zip,carriertype,vehicletype,cnt\n");
}

#[test]
fn test_rerun_is_bit_identical() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trucks.parquet");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    write_dataset(
        &input,
        &[
            (b"BUS NON SCHOOL", b"PRIVATE", b"OK", b"73001"),
            (b"BUS SCHOOL", b"PUBLIC", b"TX", b"75001"),
            (b"BUS SCHOOL", b"PUBLIC", b"OK", b"73002"),
            (b"BUS SCHOOL", b"PUBLIC", b"TX", b"75001"),
        ],
    );

    pipeline::run(&input, &first).unwrap();
    pipeline::run(&input, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_missing_input_is_data_load_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("no_such_file.parquet");
    let output = dir.path().join("out.csv");

    let err = pipeline::run(&input, &output).unwrap_err();

    assert!(matches!(err, PipelineError::DataLoad { .. }));
    assert!(!output.exists());
}

#[test]
fn test_invalid_utf8_is_encoding_error_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trucks.parquet");
    let output = dir.path().join("out.csv");

    write_dataset(
        &input,
        &[
            (b"BUS SCHOOL", b"PUBLIC", b"TX", b"75001"),
            (b"\xff\xfe", b"PUBLIC", b"TX", b"75001"),
        ],
    );

    let err = pipeline::run(&input, &output).unwrap_err();

    assert!(matches!(err, PipelineError::Encoding { .. }));
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_is_output_write_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trucks.parquet");
    let output = dir.path().join("missing_dir").join("out.csv");

    write_dataset(&input, &[(b"BUS SCHOOL", b"PUBLIC", b"TX", b"75001")]);

    let err = pipeline::run(&input, &output).unwrap_err();

    assert!(matches!(err, PipelineError::OutputWrite { .. }));
}
