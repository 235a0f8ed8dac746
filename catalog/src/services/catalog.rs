use common::config::CatalogConfig;
use common::models::{FoodTruck, FoodTruckPage, FoodTruckQuery, FoodTruckStatus, PAGE_SIZE};
use common::{Error, Result};
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::ingest;

/// Upper bound for the unpaginated by-status listing.
pub const STATUS_LISTING_LIMIT: usize = 100;

pub struct CatalogService {
    trucks: Vec<FoodTruck>,
}

impl CatalogService {
    pub fn new(trucks: Vec<FoodTruck>) -> Self {
        Self { trucks }
    }

    pub fn from_settings(config: &CatalogConfig) -> Result<Self> {
        Ok(Self::new(ingest::load_from_path(&config.data_path)?))
    }

    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }

    /// Filters by free text and status, then cuts out one page.
    /// `total` counts every match regardless of the page requested.
    pub fn search(&self, params: &FoodTruckQuery) -> Result<FoodTruckPage> {
        let matcher = params
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(text_matcher)
            .transpose()?;

        let status = match params.status.as_deref() {
            None | Some("") => StatusMatch::Any,
            Some(s) if s.eq_ignore_ascii_case("all") => StatusMatch::Any,
            Some(s) => StatusMatch::Exactly(FoodTruckStatus::parse(s)),
        };

        let page = params.page.unwrap_or(1).max(1) as u64;
        let skip = (page - 1).saturating_mul(PAGE_SIZE);

        let mut total = 0u64;
        let mut food_trucks = Vec::new();

        for truck in self.trucks.iter().filter(|truck| {
            status.matches(truck)
                && matcher
                    .as_ref()
                    .is_none_or(|re| re.is_match(&truck.applicant) || re.is_match(&truck.address))
        }) {
            if total >= skip && (food_trucks.len() as u64) < PAGE_SIZE {
                food_trucks.push(truck.clone());
            }
            total += 1;
        }

        debug!(
            query = ?params.query,
            status = ?params.status,
            page,
            total,
            returned = food_trucks.len(),
            "Searched food trucks"
        );

        Ok(FoodTruckPage { food_trucks, total })
    }

    pub fn by_status(&self, status: &str) -> Result<Vec<FoodTruck>> {
        let wanted = FoodTruckStatus::parse(status);
        let trucks: Vec<FoodTruck> = self
            .trucks
            .iter()
            .filter(|truck| wanted.is_some() && truck.status == wanted)
            .take(STATUS_LISTING_LIMIT)
            .cloned()
            .collect();

        if trucks.is_empty() {
            return Err(Error::NotFound(format!(
                "No food trucks found with status: {}",
                status
            )));
        }

        Ok(trucks)
    }
}

enum StatusMatch {
    Any,
    /// `None` means the caller asked for a status that does not exist.
    Exactly(Option<FoodTruckStatus>),
}

impl StatusMatch {
    fn matches(&self, truck: &FoodTruck) -> bool {
        match self {
            StatusMatch::Any => true,
            StatusMatch::Exactly(None) => false,
            StatusMatch::Exactly(wanted) => truck.status == *wanted,
        }
    }
}

/// Case-insensitive pattern; input that is not a valid regex is matched literally.
fn text_matcher(query: &str) -> Result<Regex> {
    RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(query))
                .case_insensitive(true)
                .build()
        })
        .map_err(Error::from)
}
