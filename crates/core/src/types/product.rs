//! Catalog records as delivered by the catalog API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BrandId, CategoryId, ProductId};
use super::price::Price;
use super::wire::{string_or_null, strings_or_numbers};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "product_name")]
    pub name: String,
    pub price: Price,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
    pub category: String,
    pub brand: String,
    pub stock_quantity: u32,
    /// Release date exactly as the API sent it.
    #[serde(default, deserialize_with = "string_or_null")]
    pub release_date: String,
    /// The single selectable option group, if the product has one.
    #[serde(rename = "selectible_option", default)]
    pub option_group: Option<OptionGroup>,
}

impl Product {
    /// Release date as a UTC timestamp.
    ///
    /// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (read as
    /// midnight UTC). Anything else, including an empty string, is treated as
    /// the Unix epoch so it sorts as the oldest possible release.
    #[must_use]
    pub fn released_at(&self) -> DateTime<Utc> {
        parse_release_date(&self.release_date).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Whether at least one unit is in stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Whether the shopper must pick an option before adding to cart.
    #[must_use]
    pub const fn requires_option(&self) -> bool {
        self.option_group.is_some()
    }
}

fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A named group of mutually exclusive choices (e.g., shoe size).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    /// Machine-oriented kind of option (e.g., "size").
    #[serde(rename = "option_type", default)]
    pub kind: String,
    /// Human label (e.g., "Size").
    #[serde(rename = "option_name")]
    pub name: String,
    /// Choices in display order.
    #[serde(rename = "option", deserialize_with = "strings_or_numbers")]
    pub choices: Vec<String>,
}

impl OptionGroup {
    /// Whether `choice` is one of this group's values.
    #[must_use]
    pub fn contains(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }
}

/// A brand lookup record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

/// A category lookup record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SNEAKER: &str = r#"{
        "id": 3,
        "product_name": "Runner",
        "price": 89.5,
        "description": "Light trainer",
        "category": "Shoes",
        "brand": "Nike",
        "stock_quantity": 4,
        "release_date": "2024-03-01",
        "selectible_option": {
            "option_type": "size",
            "option_name": "Size",
            "option": [40, 41, "42"]
        }
    }"#;

    #[test]
    fn test_deserialize_api_product() {
        let product: Product = serde_json::from_str(SNEAKER).unwrap();
        assert_eq!(product.id.as_str(), "3");
        assert_eq!(product.name, "Runner");
        assert_eq!(product.price, Price::from_cents(8950));
        let group = product.option_group.unwrap();
        assert_eq!(group.name, "Size");
        assert_eq!(group.choices, vec!["40", "41", "42"]);
    }

    #[test]
    fn test_null_option_group() {
        let json = r#"{"id":"a","product_name":"Tee","price":10,"category":"Shirts",
            "brand":"Acme","stock_quantity":0,"release_date":null,"selectible_option":null}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.option_group.is_none());
        assert!(!product.in_stock());
    }

    #[test]
    fn test_released_at_formats() {
        let mut product: Product = serde_json::from_str(SNEAKER).unwrap();
        assert_eq!(product.released_at().to_rfc3339(), "2024-03-01T00:00:00+00:00");

        product.release_date = "2024-03-01T12:30:00Z".to_string();
        assert_eq!(product.released_at().to_rfc3339(), "2024-03-01T12:30:00+00:00");

        product.release_date = "not a date".to_string();
        assert_eq!(product.released_at(), DateTime::<Utc>::UNIX_EPOCH);
    }
}
