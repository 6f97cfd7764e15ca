//! Library Router

use axum::{
    Router,
    routing::{delete, get, put},
};
use std::sync::Arc;

use auth::TokenService;

use crate::infra::postgres::PgLibraryRepository;
use crate::presentation::handlers::{self, LibraryAppState, LibraryRepository};

/// Create the library router with the PostgreSQL repository
pub fn library_router(repo: PgLibraryRepository, tokens: Arc<TokenService>) -> Router {
    library_router_generic(repo, tokens)
}

/// Create a generic library router for any repository
pub fn library_router_generic<R>(repo: R, tokens: Arc<TokenService>) -> Router
where
    R: LibraryRepository,
{
    let state = LibraryAppState {
        repo: Arc::new(repo),
        tokens,
    };

    Router::new()
        .route(
            "/favorites",
            get(handlers::list_favorites::<R>).post(handlers::add_favorite::<R>),
        )
        .route("/favorites/check", get(handlers::check_favorite::<R>))
        .route("/favorites/{id}", delete(handlers::remove_favorite::<R>))
        .route(
            "/ratings",
            get(handlers::list_ratings::<R>).post(handlers::submit_rating::<R>),
        )
        .route("/ratings/stats", get(handlers::rating_stats::<R>))
        .route("/ratings/mine", get(handlers::my_rating::<R>))
        .route(
            "/ratings/{id}",
            put(handlers::update_rating::<R>).delete(handlers::delete_rating::<R>),
        )
        .route(
            "/comments",
            get(handlers::list_comments::<R>).post(handlers::add_comment::<R>),
        )
        .route(
            "/comments/{id}",
            put(handlers::update_comment::<R>).delete(handlers::delete_comment::<R>),
        )
        .with_state(state)
}
