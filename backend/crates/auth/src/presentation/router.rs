//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::infra::{mailer::AppMailer, postgres::PgUserRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the PostgreSQL repository
pub fn auth_router(
    repo: PgUserRepository,
    mailer: AppMailer,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
) -> Router {
    auth_router_generic(repo, mailer, tokens, config)
}

/// Create a generic Auth router for any repository and mailer
pub fn auth_router_generic<R, M>(
    repo: R,
    mailer: M,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        tokens,
        config,
    };

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route(
            "/profile",
            get(handlers::get_profile::<R, M>)
                .put(handlers::update_profile::<R, M>)
                .delete(handlers::delete_account::<R, M>),
        )
        .route("/forgot-password", post(handlers::forgot_password::<R, M>))
        .route("/reset-password", post(handlers::reset_password::<R, M>))
        .with_state(state)
}
