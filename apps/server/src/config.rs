use kirana_api::state::StoreConfig;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub store: StoreConfig,
    pub seed_on_start: bool,
    pub sqlx_logging: bool,
}

impl Config {
    /// `JWT_SECRET` is the only variable without a fallback; shipping a
    /// default signing key would make every deployment forgeable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://kirana.db?mode=rwc".to_string());

        let defaults = StoreConfig::default();
        let store = StoreConfig {
            upi_id: env::var("UPI_ID").unwrap_or(defaults.upi_id),
            business_name: env::var("BUSINESS_NAME").unwrap_or(defaults.business_name),
            currency: env::var("CURRENCY").unwrap_or(defaults.currency),
        };

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,
            database_url,
            jwt_secret,
            store,
            seed_on_start: flag("SEED_ON_START", true),
            sqlx_logging: flag("SQLX_LOGGING", false),
        })
    }
}

fn flag(var: &str, default: bool) -> bool {
    env::var(var)
        .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidValue(var) => write!(f, "Invalid value for: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}
