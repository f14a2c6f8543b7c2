use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use bulk_delete::bulk_delete;
use category_stats::category_stats;
use create_category::create_category;
use delete_category::delete_category;
use get_category::get_category;
use list_categories::list_categories;
use update_category::update_category;

pub mod bulk_delete;
pub mod category_stats;
pub mod create_category;
pub mod delete_category;
pub mod get_category;
pub mod list_categories;
pub mod update_category;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/bulk/delete", post(bulk_delete))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/{id}/stats", get(category_stats))
}

/// A usable image reference is either an absolute URL or a path the
/// storefront serves itself.
pub(crate) fn valid_image_url(image: &str) -> bool {
    image.starts_with("http://") || image.starts_with("https://") || image.starts_with('/')
}
