use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    middleware::jwt::AuthUser,
    service::checkout::{self, CreateOrder, PlacedOrder},
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub delivery_address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct CreateOrderResponse {
    pub message: String,
    pub order: PlacedOrder,
}

#[tracing::instrument(name = "POST /orders/create", skip(state, user, request))]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), ApiError> {
    let user_id = user.sub()?;

    let order = checkout::create_order(
        &state.db,
        user_id,
        CreateOrder {
            delivery_address: request.delivery_address.unwrap_or_default(),
            phone: request.phone.unwrap_or_default(),
            notes: request.notes,
        },
        &state.store,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            message: "Order created successfully".to_string(),
            order,
        }),
    ))
}
