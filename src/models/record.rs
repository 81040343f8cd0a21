//! Catalog record types
//!
//! Defines the item shape shared by the store, the caches and the query engine.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single catalog item.
///
/// Stored prices are decoded leniently: anything that is not a number (or a
/// numeric string) becomes `NaN` so the record still loads. Non-finite prices
/// serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique id, assigned at creation from the wall clock
    pub id: i64,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Unit price
    #[serde(default = "missing_price", deserialize_with = "lenient_price")]
    pub price: f64,
}

impl Record {
    /// Builds a record from creation input and an assigned id.
    pub fn from_new(id: i64, new: NewRecord) -> Self {
        Self {
            id,
            name: new.name,
            category: new.category,
            price: new.price,
        }
    }

    /// Returns true if the lowercased name or category contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub name: String,
    pub category: String,
    pub price: f64,
}

fn missing_price() -> f64 {
    f64::NAN
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip_fields() {
        let json = r#"{"id": 1, "name": "Laptop Pro", "category": "Electronics", "price": 999}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Laptop Pro");
        assert_eq!(record.price, 999.0);

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["category"], "Electronics");
        assert_eq!(out["price"], 999.0);
    }

    #[test]
    fn test_numeric_string_price() {
        let json = r#"{"id": 2, "name": "Desk", "category": "Furniture", "price": " 150.5 "}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.price, 150.5);
    }

    #[test]
    fn test_non_numeric_price_becomes_nan() {
        for raw in [r#""cheap""#, "null", "true", "[1]"] {
            let json = format!(
                r#"{{"id": 3, "name": "Lamp", "category": "Home", "price": {}}}"#,
                raw
            );
            let record: Record = serde_json::from_str(&json).unwrap();
            assert!(record.price.is_nan(), "price {} should decode to NaN", raw);
        }
    }

    #[test]
    fn test_missing_price_becomes_nan() {
        let json = r#"{"id": 4, "name": "Rug", "category": "Home"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert!(record.price.is_nan());
    }

    #[test]
    fn test_nan_price_serializes_as_null() {
        let record = Record {
            id: 5,
            name: "Broken".into(),
            category: "Misc".into(),
            price: f64::NAN,
        };
        let out = serde_json::to_value(&record).unwrap();
        assert!(out["price"].is_null());
    }

    #[test]
    fn test_matches_is_case_insensitive_on_both_fields() {
        let record = Record {
            id: 6,
            name: "Laptop Pro".into(),
            category: "Electronics".into(),
            price: 1.0,
        };
        assert!(record.matches("lap"));
        assert!(record.matches("tronic"));
        assert!(!record.matches("desk"));
    }
}
