//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`; `fetch_all` and `create` glue the two around a
//! `Transport` for hosts that are happy to block.

use tracing::debug;

use crate::config::{DEFAULT_BASE_URL, PRODUCTS_PATH};
use crate::error::NetworkError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{NewProduct, Product};

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{PRODUCTS_PATH}", self.base_url)
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_product(&self, input: &NewProduct) -> Result<HttpRequest, NetworkError> {
        let body = serde_json::to_string(input).map_err(NetworkError::encode)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, NetworkError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(NetworkError::decode)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, NetworkError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(NetworkError::decode)
    }

    /// GET the whole catalog through `transport`.
    pub fn fetch_all<T: Transport + ?Sized>(&self, transport: &T) -> Result<Vec<Product>, NetworkError> {
        let request = self.build_list_products();
        debug!(url = %request.url, "fetching products");
        let response = transport.execute(&request)?;
        self.parse_list_products(response)
    }

    /// POST one product through `transport` and decode the echoed record.
    pub fn create<T: Transport + ?Sized>(
        &self,
        transport: &T,
        input: &NewProduct,
    ) -> Result<Product, NetworkError> {
        let request = self.build_create_product(input)?;
        debug!(url = %request.url, title = %input.title, "creating product");
        let response = transport.execute(&request)?;
        self.parse_create_product(response)
    }
}

/// Any 2xx is success: the remote service answers a create with 200, the
/// mock server with 201.
fn check_status(response: &HttpResponse) -> Result<(), NetworkError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(NetworkError::status(response))
    }
}
