use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sea_orm::EntityTrait;

use crate::{
    entity::{prelude::*, sea_orm_active_enums::UserRole, user},
    error::ApiError,
    state::AppState,
};

/// Identity carried by a validated token. The role here is the one baked
/// into the token at issue time; admin checks re-read the database.
#[derive(Debug, Clone)]
pub struct TokenUser {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub enum AuthUser {
    Known(TokenUser),
    Anonymous,
}

impl AuthUser {
    /// Subject of the authenticated caller, or 401 for anonymous requests.
    pub fn sub(&self) -> Result<&str, ApiError> {
        match self {
            AuthUser::Known(user) => Ok(&user.sub),
            AuthUser::Anonymous => Err(ApiError::unauthorized("Access token required")),
        }
    }

    /// Loads the caller's user row. A valid token whose user has since been
    /// deleted is treated like a stale token.
    pub async fn current_user(&self, state: &AppState) -> Result<user::Model, ApiError> {
        let sub = self.sub()?;
        let user = User::find_by_id(sub)
            .one(&state.db)
            .await?
            .ok_or_else(|| ApiError::forbidden("Invalid or expired token"))?;
        Ok(user)
    }

    /// Admin gate. The database is authoritative, not the token claims, so
    /// demoting an admin takes effect before their token expires.
    pub async fn require_admin(&self, state: &AppState) -> Result<user::Model, ApiError> {
        let user = self.current_user(state).await?;
        if user.role != UserRole::Admin {
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(user)
    }
}

/// Validates the `Authorization` header when present and stashes the result
/// as a request extension. Requests without credentials pass through as
/// [`AuthUser::Anonymous`]; handlers decide whether that is acceptable.
pub async fn jwt_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response<Body>, ApiError> {
    let mut request = request;
    if let Some(auth_header) = request.headers().get(AUTHORIZATION)
        && let Ok(raw) = auth_header.to_str()
    {
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
        let claims = state
            .validate_token(token)
            .map_err(|_| ApiError::forbidden("Invalid or expired token"))?;

        let user = AuthUser::Known(TokenUser {
            sub: claims.sub,
            email: claims.email,
            role: claims.role,
        });
        request.extensions_mut().insert::<AuthUser>(user);
        return Ok(next.run(request).await);
    }

    request
        .extensions_mut()
        .insert::<AuthUser>(AuthUser::Anonymous);
    Ok(next.run(request).await)
}
