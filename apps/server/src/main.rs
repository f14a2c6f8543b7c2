#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::{sync::Arc, time::Instant};

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use kirana_api::{
    construct_router, db,
    state::{self, State},
};

mod config;
mod telemetry;

async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    telemetry::track_request(
        &method,
        &path,
        response.status().as_u16(),
        started.elapsed(),
    );

    response
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let prometheus = telemetry::init();

    tracing::info!("Starting Kirana Storefront API");

    let config = config::Config::from_env()?;

    let db = state::connect(&config.database_url, config.sqlx_logging).await?;
    db::setup(&db).await?;
    if config.seed_on_start && db::seed(&db).await? {
        tracing::info!("Seeded the database with the sample catalog");
    }

    let state = Arc::new(State::new(db, &config.jwt_secret, config.store.clone()));

    let app = Router::new()
        .merge(construct_router(state))
        .route(
            "/metrics",
            get(move || std::future::ready(prometheus.render())),
        )
        .layer(middleware::from_fn(track_requests));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
