//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError` inside the feature crates.

mod config;

use std::sync::Arc;

use auth::{AppMailer, LogMailer, PgUserRepository, SmtpMailer, TokenService, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    routing::get,
};
use library::{PgLibraryRepository, library_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,library=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        production = config.production,
        smtp = config.mailer.is_some(),
        "Configuration loaded"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let mailer = match &config.mailer {
        Some(mailer_config) => {
            let ttl_minutes = config.auth.reset_token_ttl.as_secs() / 60;
            AppMailer::Smtp(SmtpMailer::new(mailer_config, ttl_minutes)?)
        }
        None => {
            tracing::warn!("SMTP not configured; password reset emails will only be logged");
            AppMailer::Log(LogMailer)
        }
    };

    let tokens = Arc::new(TokenService::new(&config.auth));
    let auth_config = Arc::new(config.auth.clone());

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    let app = Router::new()
        .route("/api/health", get(|| async { "ok" }))
        .nest(
            "/api/auth",
            auth_router(
                PgUserRepository::new(pool.clone()),
                mailer,
                tokens.clone(),
                auth_config,
            ),
        )
        .nest(
            "/api",
            library_router(PgLibraryRepository::new(pool.clone()), tokens),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
