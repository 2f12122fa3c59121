//! Wire records of the catalog API.
//!
//! # Design
//! These mirror the remote service's JSON but are defined independently of
//! the mock-server crate; the integration tests catch schema drift. Decoding
//! is lenient: unknown fields (the remote API also sends `rating`) are
//! ignored, missing text fields become empty strings, and a `null` price
//! becomes NaN so a record created from a non-numeric price still decodes.

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{PLACEHOLDER_CATEGORY, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_IMAGE};

/// A catalog item as returned by the API. `id` is assigned by the server
/// and treated as opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default = "nan", deserialize_with = "price_or_nan")]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

/// Request payload for creating a product.
///
/// `price` is serialized as a JSON number; serde_json writes NaN as `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl NewProduct {
    /// Build the create payload from a draft. Description, image and
    /// category are always the fixed placeholders.
    pub fn from_draft(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
            category: PLACEHOLDER_CATEGORY.to_string(),
        }
    }
}

fn nan() -> f64 {
    f64::NAN
}

fn price_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_remote_record_and_ignores_rating() {
        let json = r#"{
            "id": 1,
            "title": "Shirt",
            "price": 9.99,
            "description": "cotton",
            "category": "men's clothing",
            "image": "https://example.com/shirt.jpg",
            "rating": {"rate": 3.9, "count": 120}
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.title, "Shirt");
        assert_eq!(product.price, 9.99);
        assert_eq!(product.category, "men's clothing");
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let product: Product = serde_json::from_str(r#"{"id":7,"price":1}"#).unwrap();
        assert_eq!(product.title, "");
        assert_eq!(product.image, "");
        assert_eq!(product.price, 1.0);
    }

    #[test]
    fn null_price_decodes_as_nan() {
        let product: Product =
            serde_json::from_str(r#"{"id":21,"title":"Mug","price":null}"#).unwrap();
        assert!(product.price.is_nan());
    }

    #[test]
    fn missing_id_is_rejected() {
        let result: Result<Product, _> = serde_json::from_str(r#"{"title":"x","price":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn draft_uses_fixed_placeholders() {
        let input = NewProduct::from_draft("Mug", 5.5);
        assert_eq!(input.description, "A new product");
        assert_eq!(input.category, "electronics");
        assert_eq!(input.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn nan_price_serializes_as_null() {
        let input = NewProduct::from_draft("Broken", f64::NAN);
        let json = serde_json::to_value(&input).unwrap();
        assert!(json["price"].is_null());
        assert_eq!(json["title"], "Broken");
    }
}
