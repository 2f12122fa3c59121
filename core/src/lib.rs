//! Core of the product catalog screen.
//!
//! # Overview
//! Lists products from a remote catalog and appends new ones through the
//! same API. Requests are built and responses parsed without touching the
//! network (host-does-IO pattern); a blocking `ureq` transport is available
//! behind the default `ureq` feature for hosts that don't bring their own.
//!
//! # Design
//! - `CatalogClient` is stateless: it holds only the base URL.
//! - `ProductListState` and `FormState` are the only mutable state, each with
//!   a small set of mutation entry points.
//! - `ProductsScreen` ties them together and splits every operation into
//!   `begin_*` / `complete` around the I/O point.
//! - Every failure is a `NetworkError`; the screen turns it into a
//!   `Notification` and keeps running on the previous state.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod notify;
pub mod price;
pub mod screen;
pub mod transport;
pub mod types;
pub mod view;

pub use client::CatalogClient;
pub use error::NetworkError;
pub use form::FormState;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{FetchTicket, ListPhase, ProductListState};
pub use notify::{Notification, Notifier};
pub use price::parse_price;
pub use screen::{PendingCreate, PendingFetch, ProductsScreen};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{NewProduct, Product};
pub use view::{ProductCard, ScreenView};
