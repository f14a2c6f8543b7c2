use axum::{
    Router,
    routing::{get, post, put},
};

use crate::routes::categories::{
    bulk_delete::bulk_delete, create_category::create_category, delete_category::delete_category,
    update_category::update_category,
};
use crate::state::AppState;

use dashboard::dashboard;
use list_categories::list_categories;
use list_customers::list_customers;

pub mod dashboard;
pub mod list_categories;
pub mod list_customers;
pub mod orders;
pub mod products;

/// Every handler mounted here checks the admin role itself; the
/// category create/update/delete handlers are shared with the public
/// `/categories` router, which gates them the same way.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route(
            "/products",
            get(products::list_products::list_products)
                .post(products::create_product::create_product),
        )
        .route(
            "/products/{id}",
            put(products::update_product::update_product)
                .delete(products::delete_product::delete_product),
        )
        .route("/orders", get(orders::list_orders::list_orders))
        .route("/orders/{id}", get(orders::get_order::get_order))
        .route(
            "/orders/{id}/status",
            put(orders::update_status::update_status),
        )
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/bulk/delete", post(bulk_delete))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/customers", get(list_customers))
}
