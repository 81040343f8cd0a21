//! Query Engine
//!
//! Case-insensitive search plus clamped pagination over a record slice.
//! Everything here is a pure function of its inputs.

use serde::Serialize;

use crate::models::Record;


// == Page Request ==
/// Normalized list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Raw search text; trimmed and lowercased at query time
    pub search: String,
    /// 1-based page number
    pub page: usize,
    /// Page size
    pub limit: usize,
}

impl PageRequest {
    /// Creates a request, clamping `page` and `limit` to at least 1.
    pub fn new(search: impl Into<String>, page: usize, limit: usize) -> Self {
        Self {
            search: search.into(),
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

// == Page Result ==
/// One page of a (possibly filtered) collection plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub items: Vec<Record>,
    pub page: usize,
    pub limit: usize,
    /// Number of matching records before slicing
    pub total: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

// == Query ==
/// Filters `records` by `search` and returns the requested page.
///
/// `page` and `limit` below 1 are clamped to 1. Pages past the end yield an
/// empty `items` with metadata still describing the full filtered set.
pub fn query(records: &[Record], search: &str, page: usize, limit: usize) -> PageResult {
    let page = page.max(1);
    let limit = limit.max(1);

    let matching = filter(records, search);
    let total = matching.len();

    let start = (page - 1).saturating_mul(limit);
    let end = start.saturating_add(limit);
    let items: Vec<Record> = matching
        .into_iter()
        .skip(start)
        .take(limit)
        .cloned()
        .collect();

    PageResult {
        items,
        page,
        limit,
        total,
        total_pages: total_pages(total, limit),
        has_prev: page > 1,
        has_next: end < total,
    }
}

/// Runs [`query`] with a normalized request.
pub fn query_page(records: &[Record], request: &PageRequest) -> PageResult {
    query(records, &request.search, request.page, request.limit)
}

// == Filter ==
/// Keeps records whose name or category contains `search`, ignoring case.
///
/// A blank search keeps every record. Relative order is preserved.
pub fn filter<'a>(records: &'a [Record], search: &str) -> Vec<&'a Record> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| r.matches(&needle)).collect()
}

/// `max(1, ceil(total / limit))`
pub fn total_pages(total: usize, limit: usize) -> usize {
    total.div_ceil(limit.max(1)).max(1)
}
