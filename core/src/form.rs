//! Add-Product Form State.
//!
//! Two free-text fields and a pending flag. Nothing is validated while the
//! user types; the price text is parsed once, at submission, and a
//! non-numeric value is passed on as NaN instead of being rejected.
//!
//! At most one create may be in flight. `begin_submit` refuses a second one
//! until `complete_submit` or `abandon_submit` has run, which is what the
//! view exposes as `can_submit`.

use tracing::{debug, warn};

use crate::error::NetworkError;
use crate::list::ProductListState;
use crate::notify::Notification;
use crate::price::parse_price;
use crate::types::{NewProduct, Product};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    title: String,
    price: String,
    submitting: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title = text.into();
    }

    pub fn set_price(&mut self, text: impl Into<String>) {
        self.price = text.into();
    }

    /// Turn the current fields into a create payload and mark the form as
    /// submitting. Returns `None` while a previous create is pending.
    pub fn begin_submit(&mut self) -> Option<NewProduct> {
        if self.submitting {
            debug!("submit ignored, create already in flight");
            return None;
        }
        self.submitting = true;
        let price = parse_price(&self.price);
        if price.is_nan() {
            debug!(input = %self.price, "price is not numeric, sending it as null");
        }
        Some(NewProduct::from_draft(self.title.clone(), price))
    }

    /// Release the in-flight guard for a create that will never complete.
    /// Fields stay as typed.
    pub fn abandon_submit(&mut self) {
        if self.submitting {
            debug!("create abandoned");
            self.submitting = false;
        }
    }

    /// Apply the outcome of the pending create.
    ///
    /// On success the record is appended to `list` and both fields clear;
    /// on failure the fields stay as typed so the user can resubmit.
    pub fn complete_submit(
        &mut self,
        outcome: Result<Product, NetworkError>,
        list: &mut ProductListState,
    ) -> Notification {
        self.submitting = false;
        match outcome {
            Ok(product) => {
                list.append(product);
                self.title.clear();
                self.price.clear();
                Notification::create_succeeded()
            }
            Err(err) => {
                warn!(error = %err, "create failed");
                Notification::create_failed()
            }
        }
    }
}
