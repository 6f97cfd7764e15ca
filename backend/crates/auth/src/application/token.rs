//! Bearer Token Service
//!
//! HS256 JWTs carrying `{sub: userId, email}`. Tokens are stateless: they are
//! never stored and never revoked, and expire after `AuthConfig::token_ttl`.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Identity recovered from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: UserId,
    pub email: String,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(&config.token_secret),
            decoding: DecodingKey::from_secret(&config.token_secret),
            issuer: config.token_issuer.clone(),
            ttl_secs: i64::try_from(config.token_ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn issue(&self, user_id: &UserId, email: &Email) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: *user_id.as_uuid(),
            email: email.as_str().to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        tracing::debug!(user_id = %user_id, "Bearer token issued");
        Ok(token)
    }

    /// Checks signature, algorithm, issuer and expiry
    pub fn verify(&self, token: &str) -> AuthResult<TokenIdentity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AuthError::InvalidToken
        })?;

        Ok(TokenIdentity {
            user_id: UserId::from_uuid(data.claims.sub),
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &[u8], issuer: &str) -> TokenService {
        TokenService::new(&AuthConfig {
            token_secret: secret.to_vec(),
            token_issuer: issuer.to_string(),
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service(b"dev-secret", "streamvault");
        let user_id = UserId::new();
        let email = Email::new("a@b.io").unwrap();

        let token = tokens.issue(&user_id, &email).unwrap();
        let identity = tokens.verify(&token).unwrap();

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.email, "a@b.io");
    }

    #[test]
    fn test_rejects_foreign_secret_or_issuer() {
        let token = service(b"secret-a", "streamvault")
            .issue(&UserId::new(), &Email::new("a@b.io").unwrap())
            .unwrap();

        assert!(matches!(
            service(b"secret-b", "streamvault").verify(&token),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            service(b"secret-a", "other").verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_rejects_expired_token() {
        let secret = b"dev-secret";
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.io".into(),
            iat: now - 7200,
            exp: now - 3600,
            iss: "streamvault".into(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        assert!(matches!(
            service(secret, "streamvault").verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(service(b"s", "streamvault").verify("not.a.jwt").is_err());
        assert!(service(b"s", "streamvault").verify("").is_err());
    }
}
