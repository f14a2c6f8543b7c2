use axum::{Extension, Json, extract::State};

use crate::{
    error::ApiError, middleware::jwt::AuthUser, routes::Ack, service::cart, state::AppState,
};

#[tracing::instrument(name = "DELETE /products/cart/clear/all", skip(state, user))]
pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Ack>, ApiError> {
    let user_id = user.sub()?;
    cart::clear(&state.db, user_id).await?;
    Ok(Json(Ack::new("Cart cleared successfully")))
}
