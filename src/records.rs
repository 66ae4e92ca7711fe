//! Record types for the vehicle registration dataset, plus the decode and
//! bus-filter steps.
//!
//! Text cells arrive from storage as raw bytes. `VehicleType` is decoded for
//! every row so the filter can match on it; the other text columns are only
//! decoded for rows that survive the filter.

use crate::error::PipelineError;

/// Vehicle type categories counted as buses.
///
/// Matching is exact and case-sensitive; any other value, including other
/// bus-like spellings or an empty cell, is excluded.
pub const BUS_CATEGORIES: [&str; 2] = ["BUS SCHOOL", "BUS NON SCHOOL"];

/// One row of the source dataset with text cells still in their stored
/// byte-encoded form. A null cell is carried as empty bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawVehicleRecord {
    pub vehicle_type: Vec<u8>,
    pub carrier_type: Vec<u8>,
    pub state: Vec<u8>,
    pub zip: Vec<u8>,
}

/// A decoded registration row whose vehicle type matched [`BUS_CATEGORIES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRecord {
    pub vehicle_type: String,
    pub carrier_type: String,
    pub state: String,
    pub zip: String,
}

/// Decodes vehicle types across the whole table and keeps the bus rows.
///
/// # Errors
///
/// Returns [`PipelineError::Encoding`] if a decoded cell is not valid UTF-8.
/// `VehicleType` is decoded on every row; `CarrierType`, `State` and `Zip`
/// only on rows that passed the filter, so bad bytes in those columns on a
/// non-bus row never surface.
pub fn select_buses(records: &[RawVehicleRecord]) -> Result<Vec<BusRecord>, PipelineError> {
    let mut buses = Vec::new();

    for (row, record) in records.iter().enumerate() {
        let vehicle_type = decode_cell("VehicleType", row, &record.vehicle_type)?;
        if !BUS_CATEGORIES.contains(&vehicle_type.as_str()) {
            continue;
        }

        buses.push(BusRecord {
            carrier_type: decode_cell("CarrierType", row, &record.carrier_type)?,
            state: decode_cell("State", row, &record.state)?,
            zip: decode_cell("Zip", row, &record.zip)?,
            vehicle_type,
        });
    }

    Ok(buses)
}

/// Decodes one stored byte cell to a string. No trimming or case folding.
fn decode_cell(column: &'static str, row: usize, bytes: &[u8]) -> Result<String, PipelineError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(source) => Err(PipelineError::Encoding {
            column,
            row,
            source,
        }),
    }
}
