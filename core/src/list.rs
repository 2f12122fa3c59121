//! Product List State: the ordered product sequence and the loading flag.
//!
//! # Design
//! Two states, `Idle` and `Loading`. Every fetch gets a `FetchTicket`
//! carrying a generation number. Only the most recently started fetch may
//! replace the list or clear the loading flag; an older success that lands
//! late is dropped. Failures always produce one notification, stale or not.

use tracing::{debug, warn};

use crate::error::NetworkError;
use crate::notify::Notification;
use crate::types::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
}

/// Proof that a fetch was started; handed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct ProductListState {
    products: Vec<Product>,
    phase: ListPhase,
    generation: u64,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListState {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            phase: ListPhase::Idle,
            generation: 0,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.phase = ListPhase::Loading;
        debug!(generation = self.generation, "fetch started");
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Returns the notification the user must see, if any.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<Product>, NetworkError>,
    ) -> Option<Notification> {
        let latest = ticket.generation == self.generation;
        if latest {
            self.phase = ListPhase::Idle;
        }
        match outcome {
            Ok(products) if latest => {
                debug!(count = products.len(), "fetch completed");
                self.products = products;
                None
            }
            Ok(products) => {
                warn!(
                    generation = ticket.generation,
                    latest = self.generation,
                    count = products.len(),
                    "dropping stale fetch result"
                );
                None
            }
            Err(err) => {
                warn!(generation = ticket.generation, error = %err, "fetch failed");
                Some(Notification::fetch_failed())
            }
        }
    }

    /// Forget a fetch that will never complete. Loading clears only if it
    /// was the latest one; the list is untouched and nobody is notified.
    pub fn abandon_fetch(&mut self, ticket: FetchTicket) {
        if ticket.generation == self.generation && self.is_loading() {
            debug!(generation = ticket.generation, "fetch abandoned");
            self.phase = ListPhase::Idle;
        }
    }

    /// Add one record to the end. The loading flag is not touched.
    pub fn append(&mut self, product: Product) {
        debug!(id = product.id, "product appended");
        self.products.push(product);
    }
}
