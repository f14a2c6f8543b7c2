use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use kirana_types::create_id;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::{
    bad_request, conflict,
    entity::{category, prelude::*},
    error::ApiError,
    middleware::jwt::AuthUser,
    routes::categories::valid_image_url,
    state::AppState,
};

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryResponse {
    pub message: String,
    pub category_id: String,
}

/// Category names are unique case-insensitively: "Snacks" and "snacks"
/// would confuse every dropdown that sorts them side by side.
#[tracing::instrument(name = "POST /categories", skip(state, user, request))]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CreateCategoryResponse>), ApiError> {
    user.require_admin(&state).await?;

    let name = request.name.as_deref().unwrap_or("").trim().to_string();
    if name.chars().count() < 2 {
        return Err(bad_request!("Category name required"));
    }
    if let Some(image) = &request.image
        && !valid_image_url(image)
    {
        return Err(bad_request!("Image must be a valid URL"));
    }

    let existing = Category::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(category::Column::Name))).eq(name.to_lowercase()),
        )
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(conflict!("Category name already exists"));
    }

    let category = category::ActiveModel {
        id: Set(create_id()),
        name: Set(name),
        description: Set(request.description),
        image: Set(request.image),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCategoryResponse {
            message: "Category added successfully".to_string(),
            category_id: category.id,
        }),
    ))
}
