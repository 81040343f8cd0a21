//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::models::NewRecord;
use crate::query::PageRequest;

/// Message returned when a create request has the wrong shape.
pub const CREATE_SHAPE_ERROR: &str = "Name, category, and numeric price are required";

/// Raw query string of `GET /api/items`.
///
/// Every field is kept as an untyped string so malformed numbers fall back to
/// defaults instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Search text matched against name and category
    #[serde(default)]
    pub q: Option<String>,
    /// 1-based page number
    #[serde(default)]
    pub page: Option<String>,
    /// Page size
    #[serde(default)]
    pub limit: Option<String>,
}

impl ListQuery {
    /// Normalizes the raw parameters into a page request.
    ///
    /// Missing or non-numeric `page` becomes 1, missing or non-numeric `limit`
    /// becomes `default_limit`. Numbers below 1 clamp to 1.
    pub fn to_page_request(&self, default_limit: usize) -> PageRequest {
        let page = parse_count(self.page.as_deref()).unwrap_or(1);
        let limit = parse_count(self.limit.as_deref()).unwrap_or(default_limit);
        PageRequest::new(self.q.clone().unwrap_or_default(), page, limit)
    }
}

/// Parses a count, clamping zero and negatives to 1.
fn parse_count(raw: Option<&str>) -> Option<usize> {
    let value: i64 = raw?.trim().parse().ok()?;
    Some(usize::try_from(value.max(1)).unwrap_or(usize::MAX))
}

/// Request body for `POST /api/items`.
///
/// Fields are optional and `price` is untyped so that shape errors surface as
/// a 400 with a uniform message instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl CreateItemRequest {
    /// Validates the request and converts it into a new record.
    ///
    /// Name and category are trimmed and must be non-empty; price must be a
    /// finite JSON number.
    pub fn into_new_record(self) -> Result<NewRecord, String> {
        let name = non_blank(self.name);
        let category = non_blank(self.category);
        let price = self
            .price
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|p| p.is_finite());

        match (name, category, price) {
            (Some(name), Some(category), Some(price)) => Ok(NewRecord {
                name,
                category,
                price,
            }),
            _ => Err(CREATE_SHAPE_ERROR.to_string()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
