//! Page selector: turns the requested page and the total match count into
//! the set of pagination controls to render.
//!
//! The window is fixed: the first [`LEADING_PAGES`] pages are always linked,
//! and when there are more pages than that a separator plus a link to the
//! last page follow. Previous/Next depend only on the current page, except
//! that an empty result set renders no controls at all.

use common::models::PAGE_SIZE;
use serde::Serialize;

use super::search_params::SearchParams;

pub const LEADING_PAGES: i64 = 3;

/// 2^53 - 1, the largest integer a page parameter may carry.
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Reads the `page` parameter. Leading whitespace and a sign are accepted and
/// the longest run of leading digits is used (`"2abc"` is 2). Anything
/// without digits, or outside the safe-integer range, yields page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(leading_integer)
        .filter(|page| page.abs() <= MAX_SAFE_INTEGER)
        .unwrap_or(1)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

pub fn page_count(total: u64) -> i64 {
    i64::try_from(total.div_ceil(PAGE_SIZE)).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pub current: i64,
    pub page_size: u64,
    pub page_count: i64,
    /// Always `1..=min(page_count, LEADING_PAGES)`.
    pub leading: Vec<i64>,
    /// Set only when `page_count > LEADING_PAGES`; rendered after a separator.
    pub last: Option<i64>,
    pub previous: Option<i64>,
    pub next: Option<i64>,
}

impl PageSelection {
    pub fn new(requested: Option<&str>, total: u64) -> Self {
        let current = parse_page(requested);
        let page_count = page_count(total);

        Self {
            current,
            page_size: PAGE_SIZE,
            page_count,
            leading: (1..=page_count.min(LEADING_PAGES)).collect(),
            last: (page_count > LEADING_PAGES).then_some(page_count),
            // With no results there is nothing to go back to.
            previous: (page_count > 0 && current > 1).then(|| current - 1),
            next: (current < page_count).then(|| current + 1),
        }
    }

    pub fn has_separator(&self) -> bool {
        self.last.is_some()
    }

    pub fn is_active(&self, page: i64) -> bool {
        page == self.current
    }

    /// Resolves every control to an href that keeps the other query parameters.
    pub fn view(&self, params: &SearchParams) -> PaginationView {
        let link = |page: i64| PageLink {
            page,
            href: params.with_page(page),
            active: self.is_active(page),
        };

        PaginationView {
            previous: self.previous.map(|page| params.with_page(page)),
            pages: self.leading.iter().copied().map(link).collect(),
            last: self.last.map(link),
            next: self.next.map(|page| params.with_page(page)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: i64,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub previous: Option<String>,
    pub pages: Vec<PageLink>,
    pub last: Option<PageLink>,
    pub next: Option<String>,
}

impl PaginationView {
    pub fn active_count(&self) -> usize {
        self.pages
            .iter()
            .chain(self.last.iter())
            .filter(|link| link.active)
            .count()
    }
}
