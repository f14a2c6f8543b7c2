use axum::{
    Router,
    routing::{get, post, put},
};
use serde::Serialize;

use crate::entity::{sea_orm_active_enums::UserRole, user};
use crate::state::AppState;

use login::login;
use me::me;
use register::register;
use update_profile::update_profile;

pub mod login;
pub mod me;
pub mod register;
pub mod update_profile;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/profile", put(update_profile))
}

/// The slice of a user row the auth endpoints hand back. Never carries
/// the password hash or timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
}

impl From<user::Model> for PublicUser {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            role: user.role,
        }
    }
}

/// Just enough shape checking to catch typos; real verification would
/// need a confirmation mail anyway.
pub(crate) fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(' ')
        && !local.contains(' ')
}

#[cfg(test)]
mod tests {
    use super::valid_email;

    #[test]
    fn email_shapes() {
        assert!(valid_email("a@b.co"));
        assert!(valid_email("first.last+tag@sub.domain.org"));
        assert!(!valid_email("no-at-sign"));
        assert!(!valid_email("@missing.local"));
        assert!(!valid_email("no@dot"));
        assert!(!valid_email("spaced name@x.com"));
        assert!(!valid_email("x@.com"));
    }
}
