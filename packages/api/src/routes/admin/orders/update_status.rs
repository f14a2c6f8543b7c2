use axum::{
    Extension, Json,
    extract::{Path, State},
};
use sea_orm::ActiveEnum;
use serde::Deserialize;

use crate::{
    bad_request,
    entity::sea_orm_active_enums::OrderStatus,
    error::ApiError,
    middleware::jwt::AuthUser,
    routes::Ack,
    service::status,
    state::AppState,
};

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// Moving an order into `cancelled` here releases its stock the same
/// way a customer cancellation does.
#[tracing::instrument(name = "PUT /admin/orders/{id}/status", skip(state, user, request))]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(order_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Ack>, ApiError> {
    user.require_admin(&state).await?;

    let status = request
        .status
        .and_then(|value| OrderStatus::try_from_value(&value).ok())
        .ok_or_else(|| bad_request!("Invalid status"))?;

    status::set_status(&state.db, &order_id, status).await?;

    Ok(Json(Ack::new("Order status updated successfully")))
}
