use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::{
    error::ApiError,
    middleware::jwt::AuthUser,
    service::orders::{self, OrderDetail},
    state::AppState,
};

#[derive(Serialize)]
pub struct GetOrderResponse {
    pub order: OrderDetail,
}

#[tracing::instrument(name = "GET /orders/{id}", skip(state, user))]
pub async fn get_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(order_id): Path<String>,
) -> Result<Json<GetOrderResponse>, ApiError> {
    let user_id = user.sub()?;
    let order = orders::get_order(&state.db, user_id, &order_id).await?;
    Ok(Json(GetOrderResponse { order }))
}
