use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{
    bad_request, error::ApiError, middleware::jwt::AuthUser, routes::Ack, service::cart,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<String>,
    pub quantity: Option<i32>,
}

#[tracing::instrument(name = "POST /products/cart/add", skip(state, user, request))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    let user_id = user.sub()?;
    let product_id = request
        .product_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| bad_request!("Product ID required"))?;
    let quantity = request.quantity.unwrap_or(1);

    let (_, created) = cart::add_item(&state.db, user_id, &product_id, quantity).await?;

    if created {
        Ok((
            StatusCode::CREATED,
            Json(Ack::new("Item added to cart successfully")),
        ))
    } else {
        Ok((StatusCode::OK, Json(Ack::new("Cart updated successfully"))))
    }
}
