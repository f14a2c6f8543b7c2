use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::{
    entity::{prelude::*, product},
    error::ApiError,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct CategoryStats {
    pub total_products: usize,
    pub total_stock: i64,
    pub avg_price: Option<Decimal>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

#[derive(Serialize)]
pub struct CategoryStatsResponse {
    pub stats: CategoryStats,
}

/// Price and stock aggregates over the active products of a category.
/// An unknown id simply yields empty stats, it is not an error.
#[tracing::instrument(name = "GET /categories/{id}/stats", skip(state))]
pub async fn category_stats(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<CategoryStatsResponse>, ApiError> {
    let products = Product::find()
        .filter(product::Column::CategoryId.eq(&category_id))
        .filter(product::Column::IsActive.eq(true))
        .all(&state.db)
        .await?;

    let total_products = products.len();
    let total_stock = products
        .iter()
        .map(|product| i64::from(product.stock_quantity))
        .sum();
    let min_price = products.iter().map(|product| product.price).min();
    let max_price = products.iter().map(|product| product.price).max();
    let avg_price = if products.is_empty() {
        None
    } else {
        let sum: Decimal = products.iter().map(|product| product.price).sum();
        Some((sum / Decimal::from(total_products as u64)).round_dp(2))
    };

    Ok(Json(CategoryStatsResponse {
        stats: CategoryStats {
            total_products,
            total_stock,
            avg_price,
            min_price,
            max_price,
        },
    }))
}
