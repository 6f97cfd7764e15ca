//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod delete_account;
pub mod forgot_password;
pub mod login;
pub mod output;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use delete_account::DeleteAccountUseCase;
pub use forgot_password::{ForgotPasswordOutput, ForgotPasswordUseCase};
pub use login::{LoginInput, LoginUseCase};
pub use output::{AuthOutput, PublicUser};
pub use profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use token::{TokenIdentity, TokenService};
