//! The URL query string is the only state the UI keeps. It is read once per
//! request into a [`SearchParams`] snapshot; new URLs are derived from that
//! snapshot, never by editing it in place.

use common::models::{FoodTruckQuery, StatusFilter};
use url::form_urlencoded;

use super::pagination::parse_page;

pub const QUERY_PARAM: &str = "query";
pub const STATUS_PARAM: &str = "status";
pub const PAGE_PARAM: &str = "page";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    /// Parses a raw query string (without the leading `?`).
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .map(|raw| {
                form_urlencoded::parse(raw.trim_start_matches('?').as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self { pairs }
    }

    /// First value for `key`, like `URLSearchParams.get`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Free-text filter; empty counts as absent.
    pub fn query(&self) -> Option<&str> {
        self.get(QUERY_PARAM).filter(|q| !q.is_empty())
    }

    pub fn status(&self) -> StatusFilter {
        StatusFilter::from_param(self.get(STATUS_PARAM))
    }

    pub fn raw_page(&self) -> Option<&str> {
        self.get(PAGE_PARAM)
    }

    /// Link target for `page`: every other parameter is kept in order, the
    /// first `page` is replaced (or one appended) and any duplicates dropped.
    pub fn with_page(&self, page: i64) -> String {
        let page = page.to_string();
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let mut replaced = false;

        for (key, value) in &self.pairs {
            if key == PAGE_PARAM {
                if !replaced {
                    serializer.append_pair(key, &page);
                    replaced = true;
                }
            } else {
                serializer.append_pair(key, value);
            }
        }
        if !replaced {
            serializer.append_pair(PAGE_PARAM, &page);
        }

        format!("?{}", serializer.finish())
    }

    /// Parameters forwarded to `/foodtrucks`; absent or no-op filters are omitted.
    pub fn backend_query(&self) -> FoodTruckQuery {
        FoodTruckQuery {
            query: self.query().map(str::to_string),
            status: self.status().status().map(|s| s.param().to_string()),
            page: self.raw_page().map(|raw| parse_page(Some(raw))),
        }
    }
}
