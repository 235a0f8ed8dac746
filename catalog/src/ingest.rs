//! Loads the SF "Mobile Food Facility Permit" export into memory.
//!
//! The export carries many more columns than the API exposes; only the ones
//! named on [`PermitRow`] are read. Empty cells are treated as absent. A row
//! that cannot be converted is logged and skipped, the rest of the file still
//! loads.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use common::models::{FoodTruck, FoodTruckStatus};
use common::{Error, Result};
use serde::Deserialize;
use tracing::{info, warn};

const EXPORT_DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";
const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Deserialize)]
struct PermitRow {
    locationid: Option<i64>,
    #[serde(rename = "Applicant")]
    applicant: Option<String>,
    #[serde(rename = "FacilityType")]
    facility_type: Option<String>,
    #[serde(rename = "LocationDescription")]
    location_description: Option<String>,
    #[serde(rename = "Address")]
    address: Option<String>,
    permit: Option<String>,
    #[serde(rename = "Status")]
    status: Option<String>,
    #[serde(rename = "FoodItems")]
    food_items: Option<String>,
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
    #[serde(rename = "Schedule")]
    schedule: Option<String>,
    dayshours: Option<String>,
    #[serde(rename = "ExpirationDate")]
    expiration_date: Option<String>,
}

impl TryFrom<PermitRow> for FoodTruck {
    type Error = Error;

    fn try_from(row: PermitRow) -> Result<Self> {
        let locationid = row
            .locationid
            .ok_or_else(|| Error::InvalidInput("missing locationid".into()))?;
        let applicant = row
            .applicant
            .ok_or_else(|| Error::InvalidInput(format!("missing applicant for {}", locationid)))?;

        let expiration_date = match row.expiration_date.as_deref() {
            Some(raw) => NaiveDateTime::parse_from_str(raw, EXPORT_DATE_FORMAT)
                .map_err(|e| {
                    Error::InvalidInput(format!("bad ExpirationDate '{}': {}", raw, e))
                })?
                .format(WIRE_DATE_FORMAT)
                .to_string(),
            None => String::new(),
        };

        Ok(FoodTruck {
            locationid,
            applicant,
            facility_type: row.facility_type.unwrap_or_default(),
            location_description: row.location_description.unwrap_or_default(),
            address: row.address.unwrap_or_default(),
            food_items: row.food_items.unwrap_or_default(),
            latitude: row.latitude.unwrap_or_default(),
            longitude: row.longitude.unwrap_or_default(),
            schedule: row.schedule.unwrap_or_default(),
            status: row.status.as_deref().and_then(FoodTruckStatus::parse),
            permit: row.permit.unwrap_or_default(),
            days_hours: row.dayshours.unwrap_or_default(),
            expiration_date,
        })
    }
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<FoodTruck>> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading food truck permits");
    let file = File::open(path)?;
    load_from_reader(file)
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<FoodTruck>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut trucks = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in csv_reader.deserialize::<PermitRow>().enumerate() {
        let converted = row.map_err(Error::from).and_then(FoodTruck::try_from);
        match converted {
            Ok(truck) => trucks.push(truck),
            Err(e) => {
                skipped += 1;
                // +2: one for the header, one for 1-based numbering
                warn!(line = index + 2, error = %e, "Skipping permit row");
            }
        }
    }

    info!(loaded = trucks.len(), skipped, "Loaded food truck permits");
    Ok(trucks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "locationid,Applicant,FacilityType,cnn,LocationDescription,Address,permit,Status,FoodItems,Latitude,Longitude,Schedule,dayshours,ExpirationDate";

    fn load(rows: &[&str]) -> Vec<FoodTruck> {
        let csv = std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n");
        load_from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn converts_a_complete_row() {
        let trucks = load(&[
            r#"1571753,The Geez Freeze,Truck,887000,18TH ST: DOLORES ST to CHURCH ST,3750 18TH ST,21MFF-00015,APPROVED,Snow Cones: Soft Serve Ice Cream,37.76201920035647,-122.42730642251331,http://example.com/schedule,Mo-Fr: 9AM-5PM,12/31/2024 12:00:00 AM"#,
        ]);

        assert_eq!(trucks.len(), 1);
        let truck = &trucks[0];
        assert_eq!(truck.locationid, 1571753);
        assert_eq!(truck.applicant, "The Geez Freeze");
        assert_eq!(truck.status, Some(FoodTruckStatus::Approved));
        assert_eq!(truck.food_items, "Snow Cones: Soft Serve Ice Cream");
        assert_eq!(truck.days_hours, "Mo-Fr: 9AM-5PM");
        assert_eq!(truck.expiration_date, "2024-12-31T00:00:00");
        assert!((truck.latitude - 37.762019).abs() < 1e-5);
    }

    #[test]
    fn empty_cells_become_empty_fields() {
        let trucks = load(&["42,Bare Cart,,,,,,REQUESTED,,,,,,"]);

        let truck = &trucks[0];
        assert_eq!(truck.facility_type, "");
        assert_eq!(truck.address, "");
        assert_eq!(truck.expiration_date, "");
        assert_eq!(truck.latitude, 0.0);
        assert_eq!(truck.status, Some(FoodTruckStatus::Requested));
    }

    #[test]
    fn unknown_status_is_kept_without_status() {
        let trucks = load(&["43,Issued Cart,Truck,,,,,ISSUED,,,,,,"]);
        assert_eq!(trucks[0].status, None);
    }

    #[test]
    fn bad_rows_are_skipped() {
        let trucks = load(&[
            "not-a-number,Broken,,,,,,,,,,,,",
            ",No Id,,,,,,,,,,,,",
            "44,Bad Date,,,,,,EXPIRED,,,,,,31/12/2024",
            "45,Good,,,,,,EXPIRED,,,,,,",
        ]);

        assert_eq!(trucks.len(), 1);
        assert_eq!(trucks[0].applicant, "Good");
    }

    #[test]
    fn bundled_sample_loads_completely() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/Mobile_Food_Facility_Permit.csv");
        let trucks = load_from_path(path).unwrap();
        assert_eq!(trucks.len(), 24);
        assert!(trucks.iter().any(|t| t.status.is_none()));
    }
}
