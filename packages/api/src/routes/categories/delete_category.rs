use axum::{
    Extension, Json,
    extract::{Path, State},
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::{
    conflict,
    entity::{category, prelude::*, product},
    error::ApiError,
    middleware::jwt::AuthUser,
    not_found,
    routes::Ack,
    state::AppState,
};

/// A category can only go away once no active product points at it,
/// otherwise those products would silently lose their shelf.
#[tracing::instrument(name = "DELETE /categories/{id}", skip(state, user))]
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(category_id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    user.require_admin(&state).await?;

    let in_use = Product::find()
        .filter(product::Column::CategoryId.eq(&category_id))
        .filter(product::Column::IsActive.eq(true))
        .count(&state.db)
        .await?;
    if in_use > 0 {
        return Err(conflict!(
            "Cannot delete category. {} products are still using this category. Please reassign or remove those products first.",
            in_use
        ));
    }

    let deleted = Category::delete_many()
        .filter(category::Column::Id.eq(&category_id))
        .exec(&state.db)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(not_found!("Category not found"));
    }

    Ok(Json(Ack::new("Category deleted successfully")))
}
