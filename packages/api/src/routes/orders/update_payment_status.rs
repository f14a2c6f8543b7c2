use axum::{
    Extension, Json,
    extract::{Path, State},
};
use sea_orm::ActiveEnum;
use serde::Deserialize;

use crate::{
    bad_request,
    entity::sea_orm_active_enums::PaymentStatus,
    error::ApiError,
    middleware::jwt::AuthUser,
    routes::Ack,
    service::status,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: Option<String>,
}

/// Self-reported payment confirmation; there is no gateway callback
/// verifying it. Owners may flag their own orders, admins anyone's.
#[tracing::instrument(name = "PUT /orders/{id}/payment-status", skip(state, user, request))]
pub async fn update_payment_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(order_id): Path<String>,
    Json(request): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<Ack>, ApiError> {
    let actor = user.current_user(&state).await?;

    let payment_status = request
        .payment_status
        .and_then(|value| PaymentStatus::try_from_value(&value).ok())
        .ok_or_else(|| bad_request!("Invalid payment status"))?;

    status::set_payment_status(&state.db, &actor, &order_id, payment_status).await?;

    Ok(Json(Ack::new("Payment status updated successfully")))
}
