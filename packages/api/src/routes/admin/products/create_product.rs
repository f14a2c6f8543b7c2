use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::{NaiveDate, Utc};
use kirana_types::create_id;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{
    bad_request,
    entity::{prelude::*, product},
    error::ApiError,
    middleware::jwt::AuthUser,
    not_found,
    state::AppState,
};

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<String>,
    pub stock_quantity: Option<i32>,
    pub image: Option<String>,
    pub weight: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub brand: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductResponse {
    pub message: String,
    pub product_id: String,
}

#[tracing::instrument(name = "POST /admin/products", skip(state, user, request))]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<CreateProductResponse>), ApiError> {
    user.require_admin(&state).await?;

    let name = request.name.as_deref().unwrap_or("").trim().to_string();
    if name.chars().count() < 2 {
        return Err(bad_request!("Product name required"));
    }
    let price = match request.price {
        Some(price) if price >= Decimal::ZERO => price,
        _ => return Err(bad_request!("Valid price required")),
    };
    let category_id = request
        .category_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| bad_request!("Category required"))?;
    let stock_quantity = match request.stock_quantity {
        Some(stock) if stock >= 0 => stock,
        _ => return Err(bad_request!("Valid stock quantity required")),
    };

    // The schema enforces the foreign key; checking first gives a clear
    // answer instead of a generic database error.
    Category::find_by_id(&category_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("Category not found"))?;

    let now = Utc::now().naive_utc();
    let product = product::ActiveModel {
        id: Set(create_id()),
        name: Set(name),
        description: Set(request.description),
        price: Set(price),
        category_id: Set(Some(category_id)),
        stock_quantity: Set(stock_quantity),
        image: Set(request.image),
        weight: Set(request.weight),
        expiry_date: Set(request.expiry_date),
        brand: Set(request.brand),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            message: "Product added successfully".to_string(),
            product_id: product.id,
        }),
    ))
}
