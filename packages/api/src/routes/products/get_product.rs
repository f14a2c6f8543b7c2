use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::{
    entity::{prelude::*, product},
    error::ApiError,
    not_found,
    routes::products::ProductRow,
    state::AppState,
};

#[derive(Serialize)]
pub struct GetProductResponse {
    pub product: ProductRow,
}

/// Deactivated products are invisible here, same as in the listing.
#[tracing::instrument(name = "GET /products/{id}", skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<GetProductResponse>, ApiError> {
    let (product, category) = Product::find_by_id(&product_id)
        .filter(product::Column::IsActive.eq(true))
        .find_also_related(Category)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("Product not found"))?;

    Ok(Json(GetProductResponse {
        product: ProductRow {
            product,
            category_name: category.map(|c| c.name),
        },
    }))
}
