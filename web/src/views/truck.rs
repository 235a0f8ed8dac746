use chrono::{DateTime, NaiveDate, NaiveDateTime};
use common::models::{FoodTruck, FoodTruckStatus};
use serde::Serialize;

pub const UNKNOWN_TYPE: &str = "Unknown Type";
pub const NO_ADDRESS: &str = "Address not available";
pub const NO_HOURS: &str = "Hours not available";
pub const NO_FOOD_ITEMS: &str = "No food items available";
const UNKNOWN_DATE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub color: &'static str,
}

impl From<FoodTruckStatus> for StatusBadge {
    fn from(status: FoodTruckStatus) -> Self {
        Self {
            label: status.label(),
            color: status.color(),
        }
    }
}

/// Display-ready form of one record. Fallbacks are applied here so the
/// templates never branch on missing data except for optional sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckView {
    pub key: String,
    pub applicant: String,
    pub facility_type: String,
    pub address_summary: String,
    pub address: String,
    pub location_description: Option<String>,
    pub status: Option<StatusBadge>,
    pub hours: String,
    pub expiration: String,
    pub food_items: Vec<String>,
    pub no_food_items: &'static str,
    pub permit: String,
    pub schedule_url: String,
    pub map_url: String,
}

impl From<&FoodTruck> for TruckView {
    fn from(truck: &FoodTruck) -> Self {
        Self {
            key: format!("{}-{}", truck.locationid, truck.permit),
            applicant: truck.applicant.clone(),
            facility_type: or_fallback(&truck.facility_type, UNKNOWN_TYPE),
            address_summary: or_fallback(&truck.address, NO_ADDRESS),
            address: truck.address.clone(),
            location_description: Some(truck.location_description.clone())
                .filter(|description| !description.is_empty()),
            status: truck.status.map(StatusBadge::from),
            hours: format_hours(&truck.days_hours),
            expiration: format_expiration(&truck.expiration_date),
            food_items: split_food_items(&truck.food_items),
            no_food_items: NO_FOOD_ITEMS,
            permit: truck.permit.clone(),
            schedule_url: truck.schedule.clone(),
            map_url: map_url(truck.latitude, truck.longitude),
        }
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// `"Mo-Fr: 9AM-5PM; Sa: 10AM-6PM"` reads as `"Mo-Fr: 9AM-5PM • Sa: 10AM-6PM"`.
/// Every `;` becomes one separator; whitespace around it collapses into the
/// separator's single spaces. Only an empty string falls back.
pub fn format_hours(days_hours: &str) -> String {
    if days_hours.is_empty() {
        return NO_HOURS.to_string();
    }

    days_hours
        .split(';')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" • ")
}

pub fn split_food_items(food_items: &str) -> Vec<String> {
    food_items
        .split(':')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accepts a bare date, a naive date-time, or RFC 3339; renders `M/D/YYYY`.
/// Anything else is shown as received.
pub fn format_expiration(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_DATE.to_string();
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()));

    match date {
        Ok(date) => date.format("%-m/%-d/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn map_url(latitude: f64, longitude: f64) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        latitude, longitude
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::sample_truck;
    use rstest::rstest;

    #[test]
    fn complete_record() {
        let view = TruckView::from(&sample_truck());
        assert_eq!(view.key, "1-PERMIT123");
        assert_eq!(view.facility_type, "Truck");
        assert_eq!(view.address_summary, "123 Test St");
        assert_eq!(view.location_description.as_deref(), Some("Near the park"));
        assert_eq!(
            view.status,
            Some(StatusBadge {
                label: "Approved",
                color: "bg-green-100 text-green-800"
            })
        );
        assert_eq!(view.hours, "Mo-Fr: 9AM-5PM • Sa-Su: 10AM-6PM");
        assert_eq!(view.expiration, "12/31/2024");
        assert_eq!(view.food_items, vec!["Hot Dogs", "Burritos", "Tacos"]);
        assert_eq!(
            view.map_url,
            "https://www.google.com/maps/search/?api=1&query=37.7749,-122.4194"
        );
    }

    #[test]
    fn empty_optional_fields_fall_back() {
        let truck = FoodTruck {
            facility_type: String::new(),
            address: String::new(),
            food_items: String::new(),
            days_hours: String::new(),
            location_description: String::new(),
            ..sample_truck()
        };
        let view = TruckView::from(&truck);
        assert_eq!(view.facility_type, UNKNOWN_TYPE);
        assert_eq!(view.address_summary, NO_ADDRESS);
        assert_eq!(view.address, "");
        assert_eq!(view.hours, NO_HOURS);
        assert!(view.food_items.is_empty());
        assert_eq!(view.location_description, None);
    }

    #[rstest]
    #[case("Hot Dogs:Burritos:Tacos", vec!["Hot Dogs", "Burritos", "Tacos"])]
    #[case(" Snow Cones: Soft Serve Ice Cream ", vec!["Snow Cones", "Soft Serve Ice Cream"])]
    #[case("Tacos::  :Nachos:", vec!["Tacos", "Nachos"])]
    #[case("", vec![])]
    fn splits_food_items(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_food_items(raw), expected);
    }

    #[rstest]
    #[case("Mo-Fr: 9AM-5PM; Sa-Su: 10AM-6PM", "Mo-Fr: 9AM-5PM • Sa-Su: 10AM-6PM")]
    #[case("Mo-Su: 11AM-8PM", "Mo-Su: 11AM-8PM")]
    #[case("Mo;Tu", "Mo • Tu")]
    #[case("A;;B", "A •  • B")]
    #[case(";", " • ")]
    #[case(" ; ", " • ")]
    #[case("", "Hours not available")]
    fn formats_hours(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_hours(raw), expected);
    }

    #[rstest]
    #[case("2024-12-31", "12/31/2024")]
    #[case("2024-06-05T00:00:00", "6/5/2024")]
    #[case("2025-01-15T08:30:00Z", "1/15/2025")]
    #[case("someday", "someday")]
    #[case("", "Unknown")]
    fn formats_expiration(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_expiration(raw), expected);
    }
}
