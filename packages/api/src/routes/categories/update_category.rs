use axum::{
    Extension, Json,
    extract::{Path, State},
};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use crate::{
    bad_request, conflict,
    entity::{category, prelude::*},
    error::ApiError,
    middleware::jwt::AuthUser,
    not_found,
    routes::{Ack, categories::valid_image_url, double_option},
    state::AppState,
};

/// `description` and `image` distinguish "absent" from an explicit
/// `null`, which clears the column.
#[derive(Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub image: Option<Option<String>>,
}

#[tracing::instrument(name = "PUT /categories/{id}", skip(state, user, request))]
pub async fn update_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(category_id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<Ack>, ApiError> {
    user.require_admin(&state).await?;

    let category = Category::find_by_id(&category_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("Category not found"))?;

    let name = request.name.filter(|name| !name.trim().is_empty());
    if let Some(name) = &name
        && name.trim().chars().count() < 2
    {
        return Err(bad_request!("Category name must be at least 2 characters"));
    }
    if let Some(Some(image)) = &request.image
        && !valid_image_url(image)
    {
        return Err(bad_request!("Image must be a valid URL"));
    }

    if let Some(name) = &name
        && name.to_lowercase() != category.name.to_lowercase()
    {
        let conflict = Category::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(category::Column::Name)))
                    .eq(name.trim().to_lowercase()),
            )
            .filter(category::Column::Id.ne(&category_id))
            .one(&state.db)
            .await?;
        if conflict.is_some() {
            return Err(conflict!("Category name already exists"));
        }
    }

    if name.is_none() && request.description.is_none() && request.image.is_none() {
        return Err(bad_request!("No fields to update"));
    }

    let mut active: category::ActiveModel = category.into();
    if let Some(name) = name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = request.description {
        active.description = Set(description);
    }
    if let Some(image) = request.image {
        active.image = Set(image);
    }
    active.update(&state.db).await?;

    Ok(Json(Ack::new("Category updated successfully")))
}
