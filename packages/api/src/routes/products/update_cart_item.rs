use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    bad_request, error::ApiError, middleware::jwt::AuthUser, routes::Ack, service::cart,
    state::AppState,
};

#[derive(Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: Option<i32>,
}

#[tracing::instrument(name = "PUT /products/cart/{id}", skip(state, user, request))]
pub async fn update_cart_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(cart_item_id): Path<String>,
    Json(request): Json<UpdateCartItemRequest>,
) -> Result<Json<Ack>, ApiError> {
    let user_id = user.sub()?;
    let quantity = request
        .quantity
        .ok_or_else(|| bad_request!("Valid quantity required"))?;

    cart::set_quantity(&state.db, user_id, &cart_item_id, quantity).await?;

    Ok(Json(Ack::new("Cart updated successfully")))
}
