use std::sync::Arc;

use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use error::ApiError;
use kirana_types::{Value, json};
use middleware::jwt::jwt_middleware;
use state::{AppState, State};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, decompression::RequestDecompressionLayer,
};

pub mod db;
pub mod entity;
pub mod error;
pub mod payment;
pub mod service;
pub mod state;

mod middleware;
mod routes;

pub use axum;
pub use sea_orm;

pub mod auth {
    pub use crate::middleware::jwt::AuthUser;
}

/// Assembles the full storefront surface under `/api`. Route handlers
/// see `AuthUser` from the jwt layer; admin checks happen per handler
/// against the database, not the token.
pub fn construct_router(state: Arc<State>) -> Router {
    let api = Router::new()
        .route("/", get(store_info))
        .nest("/health", routes::health::routes())
        .nest("/auth", routes::auth::routes())
        .nest("/products", routes::products::routes())
        .nest("/orders", routes::orders::routes())
        .nest("/categories", routes::categories::routes())
        .nest("/admin", routes::admin::routes())
        .with_state(state.clone())
        .route("/version", get(|| async { env!("CARGO_PKG_VERSION") }))
        .layer(from_fn_with_state(state, jwt_middleware))
        .layer(CorsLayer::permissive())
        .layer(
            ServiceBuilder::new()
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new()),
        );

    Router::new().nest("/api", api)
}

/// Storefront identity for client branding. Nothing here is secret,
/// the payee address already rides along in every payment string.
#[tracing::instrument(name = "GET /", skip(state))]
async fn store_info(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(json::json!({
        "name": state.store.business_name,
        "currency": state.store.currency,
        "upiId": state.store.upi_id,
    })))
}
