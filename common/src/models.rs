//! Wire model shared by the `/foodtrucks` producer and the UI that consumes it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Records per page. Producer and consumer must agree on this out of band:
/// the response only carries `total`, never the page size.
pub const PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodTruckStatus {
    Approved,
    Requested,
    Expired,
    Suspend,
}

impl FoodTruckStatus {
    pub const ALL: [FoodTruckStatus; 4] = [
        FoodTruckStatus::Approved,
        FoodTruckStatus::Requested,
        FoodTruckStatus::Expired,
        FoodTruckStatus::Suspend,
    ];

    /// Upper-case token used in the dataset and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodTruckStatus::Approved => "APPROVED",
            FoodTruckStatus::Requested => "REQUESTED",
            FoodTruckStatus::Expired => "EXPIRED",
            FoodTruckStatus::Suspend => "SUSPEND",
        }
    }

    /// Lower-case token used in the UI's `status` query parameter.
    pub fn param(&self) -> &'static str {
        match self {
            FoodTruckStatus::Approved => "approved",
            FoodTruckStatus::Requested => "requested",
            FoodTruckStatus::Expired => "expired",
            FoodTruckStatus::Suspend => "suspend",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodTruckStatus::Approved => "Approved",
            FoodTruckStatus::Requested => "Requested",
            FoodTruckStatus::Expired => "Expired",
            FoodTruckStatus::Suspend => "Suspended",
        }
    }

    /// Badge colour classes.
    pub fn color(&self) -> &'static str {
        match self {
            FoodTruckStatus::Approved => "bg-green-100 text-green-800",
            FoodTruckStatus::Requested => "bg-yellow-100 text-yellow-800",
            FoodTruckStatus::Expired => "bg-red-100 text-red-800",
            FoodTruckStatus::Suspend => "bg-gray-100 text-gray-800",
        }
    }

    /// Case-insensitive lookup; anything outside the four known tokens is `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for FoodTruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodTruckStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidInput(format!("Unknown status: {}", s)))
    }
}

impl Serialize for FoodTruckStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FoodTruckStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The `status` filter as the UI understands it: `all` or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(FoodTruckStatus),
}

impl StatusFilter {
    /// Reads the `status` query parameter. The tokens are lower-case and
    /// case-sensitive; absent, empty, or unrecognised values mean no filter.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(token) => FoodTruckStatus::ALL
                .into_iter()
                .find(|status| status.param() == token)
                .map_or(StatusFilter::All, StatusFilter::Only),
            None => StatusFilter::All,
        }
    }

    pub fn param(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.param(),
        }
    }

    pub fn status(&self) -> Option<FoodTruckStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }
}

/// One food truck permit listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodTruck {
    pub locationid: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub applicant: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub facility_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location_description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    /// Colon-delimited list, e.g. `"Hot Dogs:Burritos"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub food_items: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub schedule: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<FoodTruckStatus>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub permit: String,
    /// Semicolon-delimited segments, e.g. `"Mo-Fr: 9AM-5PM; Sa-Su: 10AM-6PM"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub days_hours: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub expiration_date: String,
}

/// One page of matches plus the count across all pages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodTruckPage {
    pub food_trucks: Vec<FoodTruck>,
    pub total: u64,
}

/// Query parameters of `GET /foodtrucks`. Absent fields are left out of the
/// query string entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FoodTruckQuery {
    pub query: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
}

impl FoodTruckQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<FoodTruckStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(FoodTruckStatus::parse))
}
