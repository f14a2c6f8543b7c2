use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/db", get(db_roundtrip))
}

#[derive(Serialize)]
pub struct Liveness {
    pub status: &'static str,
}

/// Process-level liveness; touches no dependencies.
#[tracing::instrument(name = "GET /health")]
pub async fn liveness() -> Json<Liveness> {
    Json(Liveness { status: "ok" })
}

#[derive(Serialize)]
pub struct DbRoundtrip {
    pub rtt: u128,
}

/// Pings the database and reports the round trip in milliseconds.
#[tracing::instrument(name = "GET /health/db", skip(state))]
pub async fn db_roundtrip(State(state): State<AppState>) -> Result<Json<DbRoundtrip>, ApiError> {
    let started = Instant::now();
    state.db.ping().await?;
    Ok(Json(DbRoundtrip {
        rtt: started.elapsed().as_millis(),
    }))
}
