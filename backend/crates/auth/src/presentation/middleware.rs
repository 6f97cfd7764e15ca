//! Auth Middleware
//!
//! Bearer-token extractor for protected routes. Any router whose state can
//! hand out an `Arc<TokenService>` (via `FromRef`) can take
//! [`AuthenticatedUser`] as a handler argument.

use std::sync::Arc;

use axum::RequestPartsExt;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use kernel::id::UserId;

use crate::application::token::TokenService;
use crate::error::AuthError;

/// Caller identity taken from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::MissingToken)?;

        let tokens = Arc::<TokenService>::from_ref(state);
        let identity = tokens.verify(bearer.token())?;

        Ok(Self {
            user_id: identity.user_id,
            email: identity.email,
        })
    }
}
