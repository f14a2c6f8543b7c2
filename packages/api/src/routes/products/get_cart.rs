use axum::{Extension, Json, extract::State};

use crate::{
    error::ApiError,
    middleware::jwt::AuthUser,
    service::cart::{self, CartView},
    state::AppState,
};

#[tracing::instrument(name = "GET /products/cart/items", skip(state, user))]
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<CartView>, ApiError> {
    let user_id = user.sub()?;
    let view = cart::get_cart(&state.db, user_id).await?;
    Ok(Json(view))
}
