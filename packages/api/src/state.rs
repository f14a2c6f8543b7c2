use std::{sync::Arc, time::Duration};

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kirana_types::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::entity::{sea_orm_active_enums::UserRole, user};

pub type AppState = Arc<State>;

/// Issued tokens stay valid for seven days.
const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Merchant details embedded into every generated payment payload.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub upi_id: String,
    pub business_name: String,
    pub currency: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            upi_id: "merchant@paytm".to_string(),
            business_name: "FoodStore".to_string(),
            currency: "INR".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

pub struct State {
    pub db: DatabaseConnection,
    pub store: StoreConfig,
    jwt_encoding_key: EncodingKey,
    jwt_decoding_key: DecodingKey,
}

/// Opens the connection pool with the same tuning for every deployment
/// target; `database_url` may point at Postgres or SQLite.
pub async fn connect(
    database_url: &str,
    sqlx_logging: bool,
) -> std::result::Result<DatabaseConnection, sea_orm::DbErr> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(sqlx_logging);

    Database::connect(opt).await
}

impl State {
    pub fn new(db: DatabaseConnection, jwt_secret: &str, store: StoreConfig) -> Self {
        Self {
            db,
            store,
            jwt_encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            jwt_decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    pub fn issue_token(&self, user: &user::Model) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.jwt_encoding_key)?;
        Ok(token)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        let decoded = decode::<Claims>(token, &self.jwt_decoding_key, &validation)?;
        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::DatabaseConnection;

    fn test_state() -> State {
        State::new(
            DatabaseConnection::Disconnected,
            "test-secret",
            StoreConfig::default(),
        )
    }

    fn test_user() -> user::Model {
        let now = Utc::now().naive_utc();
        user::Model {
            id: "usr_1".to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            password_hash: String::new(),
            phone: None,
            address: None,
            role: UserRole::Customer,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn token_round_trip() {
        let state = test_state();
        let token = state.issue_token(&test_user()).unwrap();
        let claims = state.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "usr_1");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, UserRole::Customer);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let state = test_state();
        let token = state.issue_token(&test_user()).unwrap();
        let other = State::new(
            DatabaseConnection::Disconnected,
            "other-secret",
            StoreConfig::default(),
        );
        assert!(other.validate_token(&token).is_err());
    }
}
