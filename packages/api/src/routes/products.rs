use axum::{
    Router,
    routing::{delete, get, post, put},
};
use serde::Serialize;

use crate::entity::product;
use crate::state::AppState;

use add_to_cart::add_to_cart;
use all_categories::all_categories;
use clear_cart::clear_cart;
use get_cart::get_cart;
use get_product::get_product;
use list_products::list_products;
use remove_cart_item::remove_cart_item;
use update_cart_item::update_cart_item;

pub mod add_to_cart;
pub mod all_categories;
pub mod clear_cart;
pub mod get_cart;
pub mod get_product;
pub mod list_products;
pub mod remove_cart_item;
pub mod update_cart_item;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/categories/all", get(all_categories))
        .route("/cart/add", post(add_to_cart))
        .route("/cart/items", get(get_cart))
        .route("/cart/clear/all", delete(clear_cart))
        .route("/cart/{id}", put(update_cart_item).delete(remove_cart_item))
        .route("/{id}", get(get_product))
}

/// Product row enriched with the category's display name.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: product::Model,
    pub category_name: Option<String>,
}
