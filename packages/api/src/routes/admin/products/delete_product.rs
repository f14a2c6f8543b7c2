use axum::{
    Extension, Json,
    extract::{Path, State},
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    entity::{prelude::*, product},
    error::ApiError,
    middleware::jwt::AuthUser,
    not_found,
    routes::Ack,
    state::AppState,
};

/// Soft delete. The row stays so past orders keep their product
/// reference; the storefront simply stops listing it.
#[tracing::instrument(name = "DELETE /admin/products/{id}", skip(state, user))]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(product_id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    user.require_admin(&state).await?;

    let updated = Product::update_many()
        .col_expr(product::Column::IsActive, Expr::value(false))
        .filter(product::Column::Id.eq(&product_id))
        .exec(&state.db)
        .await?;

    if updated.rows_affected == 0 {
        return Err(not_found!("Product not found"));
    }

    Ok(Json(Ack::new("Product deactivated successfully")))
}
