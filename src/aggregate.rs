//! Group-by aggregation of bus records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::records::BusRecord;

/// One output row: the number of buses registered under a distinct
/// (state, zip, carrier type, vehicle type) combination.
///
/// Field renames make the serialized CSV header match the published
/// `state,zip,carriertype,vehicletype,cnt` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusCount {
    pub state: String,
    pub zip: String,
    #[serde(rename = "carriertype")]
    pub carrier_type: String,
    #[serde(rename = "vehicletype")]
    pub vehicle_type: String,
    pub cnt: u64,
}

/// Counts bus records per (state, zip, carrier type, vehicle type) key.
///
/// Key equality is exact string equality; no normalization. Rows come back
/// sorted by the grouping key, so reruns over identical input produce
/// identical files.
pub fn count_buses(buses: &[BusRecord]) -> Vec<BusCount> {
    let mut groups: BTreeMap<(String, String, String, String), u64> = BTreeMap::new();

    for bus in buses {
        let key = (
            bus.state.clone(),
            bus.zip.clone(),
            bus.carrier_type.clone(),
            bus.vehicle_type.clone(),
        );
        *groups.entry(key).or_insert(0) += 1;
    }

    groups
        .into_iter()
        .map(|((state, zip, carrier_type, vehicle_type), cnt)| BusCount {
            state,
            zip,
            carrier_type,
            vehicle_type,
            cnt,
        })
        .collect()
}
