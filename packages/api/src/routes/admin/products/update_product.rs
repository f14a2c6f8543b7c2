use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;

use crate::{
    bad_request,
    entity::{prelude::*, product},
    error::ApiError,
    middleware::jwt::AuthUser,
    not_found,
    routes::{Ack, double_option},
    state::AppState,
};

/// Partial update. Nullable columns accept an explicit `null` to clear
/// the stored value; absent fields are untouched.
#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub category_id: Option<String>,
    pub stock_quantity: Option<i32>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub weight: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub expiry_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub brand: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl UpdateProductRequest {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.stock_quantity.is_none()
            && self.image.is_none()
            && self.weight.is_none()
            && self.expiry_date.is_none()
            && self.brand.is_none()
            && self.is_active.is_none()
    }
}

#[tracing::instrument(name = "PUT /admin/products/{id}", skip(state, user, request))]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(product_id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Ack>, ApiError> {
    user.require_admin(&state).await?;

    if let Some(name) = &request.name
        && name.trim().chars().count() < 2
    {
        return Err(bad_request!("Product name required"));
    }
    if let Some(price) = request.price
        && price < Decimal::ZERO
    {
        return Err(bad_request!("Valid price required"));
    }
    if let Some(stock) = request.stock_quantity
        && stock < 0
    {
        return Err(bad_request!("Valid stock quantity required"));
    }

    if request.is_empty() {
        return Err(bad_request!("No fields to update"));
    }

    let product = Product::find_by_id(&product_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("Product not found"))?;

    if let Some(category_id) = &request.category_id {
        Category::find_by_id(category_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| not_found!("Category not found"))?;
    }

    let mut active: product::ActiveModel = product.into();
    if let Some(name) = request.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = request.description {
        active.description = Set(description);
    }
    if let Some(price) = request.price {
        active.price = Set(price);
    }
    if let Some(category_id) = request.category_id {
        active.category_id = Set(Some(category_id));
    }
    if let Some(stock) = request.stock_quantity {
        active.stock_quantity = Set(stock);
    }
    if let Some(image) = request.image {
        active.image = Set(image);
    }
    if let Some(weight) = request.weight {
        active.weight = Set(weight);
    }
    if let Some(expiry_date) = request.expiry_date {
        active.expiry_date = Set(expiry_date);
    }
    if let Some(brand) = request.brand {
        active.brand = Set(brand);
    }
    if let Some(is_active) = request.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(&state.db).await?;

    Ok(Json(Ack::new("Product updated successfully")))
}
