use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use cancel_order::cancel_order;
use create_order::create_order;
use get_order::get_order;
use my_orders::my_orders;
use update_payment_status::update_payment_status;

pub mod cancel_order;
pub mod create_order;
pub mod get_order;
pub mod my_orders;
pub mod update_payment_status;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_order))
        .route("/my-orders", get(my_orders))
        .route("/{id}", get(get_order))
        .route("/{id}/cancel", put(cancel_order))
        .route("/{id}/payment-status", put(update_payment_status))
}
