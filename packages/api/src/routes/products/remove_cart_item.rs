use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    error::ApiError, middleware::jwt::AuthUser, routes::Ack, service::cart, state::AppState,
};

#[tracing::instrument(name = "DELETE /products/cart/{id}", skip(state, user))]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(cart_item_id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let user_id = user.sub()?;
    cart::remove_item(&state.db, user_id, &cart_item_id).await?;
    Ok(Json(Ack::new("Item removed from cart")))
}
