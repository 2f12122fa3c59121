//! What the presentation layer renders.

use crate::config::{CURRENCY_PREFIX, SCREEN_HEADING};
use crate::form::FormState;
use crate::list::ProductListState;
use crate::types::Product;

/// One list row: image, title and the price label.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub price_label: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            price_label: price_label(product.price),
        }
    }
}

/// `INR₹` followed by the price as a UI number string: `9.99` stays `9.99`,
/// `5.0` renders as `5`, and very large or very small magnitudes switch to
/// exponent form (`1e+21`, `1e-7`).
pub fn price_label(price: f64) -> String {
    format!("{CURRENCY_PREFIX}{}", number_text(price))
}

fn number_text(value: f64) -> String {
    if value == 0.0 {
        // Also covers -0.0.
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    // NaN falls through here and prints as "NaN".
    value.to_string()
}

/// Snapshot of everything on the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub heading: String,
    /// Spinner in place of the list while true.
    pub loading: bool,
    pub cards: Vec<ProductCard>,
    pub title: String,
    pub price: String,
    pub can_submit: bool,
}

impl ScreenView {
    pub fn capture(list: &ProductListState, form: &FormState) -> Self {
        Self {
            heading: SCREEN_HEADING.to_string(),
            loading: list.is_loading(),
            cards: list.products().iter().map(ProductCard::from).collect(),
            title: form.title().to_string(),
            price: form.price().to_string(),
            can_submit: !form.is_submitting(),
        }
    }
}
