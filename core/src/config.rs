//! Fixed configuration of the catalog screen.
//!
//! The endpoint is a literal: there is no environment or file override.
//! `CatalogClient::new` accepts another base URL only so tests can target a
//! local mock server.

/// Base URL of the remote catalog service.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Path of the product collection, relative to the base URL.
pub const PRODUCTS_PATH: &str = "/products";

/// Description attached to every product created from the form.
pub const PLACEHOLDER_DESCRIPTION: &str = "A new product";

/// Image attached to every product created from the form.
pub const PLACEHOLDER_IMAGE: &str = "https://img.freepik.com/free-photo/copy-icon-right-side_187299-45738.jpg?t=st=1743186924~exp=1743190524~hmac=208f982c141cb2838c1ed98ef168b1904ef038a16e91d523ecc62fae81fbc305&w=900";

/// Category of every product created from the form, whatever the user typed.
pub const PLACEHOLDER_CATEGORY: &str = "electronics";

pub const SCREEN_HEADING: &str = "Products";
pub const CURRENCY_PREFIX: &str = "INR₹";

pub const ALERT_TITLE: &str = "error";
pub const FETCH_FAILED_MESSAGE: &str = "failed to fetch products";
pub const CREATE_FAILED_MESSAGE: &str = "could not add product";
pub const CREATE_SUCCEEDED_MESSAGE: &str = "product added successfully!";
