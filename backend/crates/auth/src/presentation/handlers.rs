//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    DeleteAccountUseCase, ForgotPasswordUseCase, GetProfileUseCase, LoginInput, LoginUseCase,
    RegisterInput, RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, DeleteAccountRequest, ForgotPasswordRequest, ForgotPasswordResponse,
    LoginRequest, MessageResponse, RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
    UserResponse,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

impl<R, M> Clone for AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, M> FromRef<AuthAppState<R, M>> for Arc<TokenService>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn from_ref(state: &AuthAppState<R, M>) -> Self {
        state.tokens.clone()
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            age: req.age,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

/// POST /api/auth/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /api/auth/profile
pub async fn get_profile<R, M>(
    State(state): State<AuthAppState<R, M>>,
    caller: AuthenticatedUser,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let user = use_case.execute(&caller.user_id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/auth/profile
pub async fn update_profile<R, M>(
    State(state): State<AuthAppState<R, M>>,
    caller: AuthenticatedUser,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone());

    let input = UpdateProfileInput {
        email: req.email,
        password: req.password,
        current_password: req.current_password,
        first_name: req.first_name,
        last_name: req.last_name,
        age: req.age,
    };

    let user = use_case.execute(&caller.user_id, input).await?;
    Ok(Json(user.into()))
}

/// DELETE /api/auth/profile
pub async fn delete_account<R, M>(
    State(state): State<AuthAppState<R, M>>,
    caller: AuthenticatedUser,
    Json(req): Json<DeleteAccountRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = DeleteAccountUseCase::new(state.repo.clone(), state.config.clone());
    let message = use_case.execute(&caller.user_id, req.password).await?;
    Ok(Json(MessageResponse::new(message)))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/auth/forgot-password
pub async fn forgot_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<ForgotPasswordResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ForgotPasswordUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(req.email).await?;

    Ok(Json(ForgotPasswordResponse {
        message: output.message.to_string(),
        reset_token: output.reset_token,
    }))
}

/// POST /api/auth/reset-password
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.config.clone());

    let message = use_case
        .execute(ResetPasswordInput {
            token: req.token,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(MessageResponse::new(message)))
}
