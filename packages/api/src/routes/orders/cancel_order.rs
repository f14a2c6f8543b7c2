use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    error::ApiError, middleware::jwt::AuthUser, routes::Ack, service::status, state::AppState,
};

#[tracing::instrument(name = "PUT /orders/{id}/cancel", skip(state, user))]
pub async fn cancel_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(order_id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let user_id = user.sub()?;
    status::cancel_order(&state.db, user_id, &order_id).await?;
    Ok(Json(Ack::new("Order cancelled successfully")))
}
