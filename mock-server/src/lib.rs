//! In-memory stand-in for the remote product catalog.
//!
//! Speaks the same wire contract: `GET /products` returns every record in
//! insertion order, `POST /products` stores the body under the next free id
//! and echoes the stored record.

pub mod config;

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    /// `None` when a client sent `null`, which happens for non-numeric input.
    pub price: Option<f64>,
    pub description: String,
    pub image: String,
    pub category: String,
}

#[derive(Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

pub type Db = Arc<RwLock<Vec<Product>>>;

/// Router with an empty catalog.
pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-loaded with `products`.
pub fn app_with(products: Vec<Product>) -> Router {
    let db: Db = Arc::new(RwLock::new(products));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

/// A small catalog for local development.
pub fn demo_catalog() -> Vec<Product> {
    [
        ("Fjallraven Backpack", 109.95, "men's clothing"),
        ("Slim Fit T-Shirt", 22.3, "men's clothing"),
        ("Cotton Jacket", 55.99, "men's clothing"),
        ("Silver Dragon Bracelet", 695.0, "jewelery"),
        ("External Hard Drive 2TB", 64.0, "electronics"),
    ]
    .into_iter()
    .zip(1u64..)
    .map(|((title, price, category), id)| Product {
        id,
        title: title.to_string(),
        price: Some(price),
        description: format!("{title} from the demo catalog"),
        image: format!("https://example.com/img/{id}.jpg"),
        category: category.to_string(),
    })
    .collect()
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    Json(db.read().await.clone())
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<NewProduct>,
) -> (StatusCode, Json<Product>) {
    let mut products = db.write().await;
    let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let product = Product {
        id,
        title: input.title,
        price: input.price,
        description: input.description,
        image: input.image,
        category: input.category,
    };
    products.push(product.clone());
    info!(id, title = %product.title, "product created");
    (StatusCode::CREATED, Json(product))
}
