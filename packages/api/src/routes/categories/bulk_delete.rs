use axum::{Extension, Json, extract::State};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::{
    bad_request, conflict,
    entity::{category, prelude::*, product},
    error::ApiError,
    middleware::jwt::AuthUser,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub category_ids: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub message: String,
    pub deleted_count: u64,
}

#[tracing::instrument(name = "POST /categories/bulk/delete", skip(state, user, request))]
pub async fn bulk_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    user.require_admin(&state).await?;

    let category_ids = request
        .category_ids
        .ok_or_else(|| bad_request!("Category IDs must be an array"))?;
    if category_ids.is_empty() {
        return Err(bad_request!("No categories selected"));
    }

    let in_use = Product::find()
        .filter(product::Column::CategoryId.is_in(category_ids.iter().map(String::as_str)))
        .filter(product::Column::IsActive.eq(true))
        .count(&state.db)
        .await?;
    if in_use > 0 {
        return Err(conflict!(
            "Cannot delete categories. {} products are still using these categories.",
            in_use
        ));
    }

    let deleted = Category::delete_many()
        .filter(category::Column::Id.is_in(category_ids))
        .exec(&state.db)
        .await?;

    Ok(Json(BulkDeleteResponse {
        message: format!("{} categories deleted successfully", deleted.rows_affected),
        deleted_count: deleted.rows_affected,
    }))
}
