//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    age::Age, email::Email, person_name::PersonName, reset_token::ResetToken,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    password_hash,
    first_name,
    last_name,
    age,
    reset_password_token_hash,
    reset_password_expires_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: impl ToString) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {filter}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }
}

/// Unique violation on `users.email` means someone else holds the address
fn map_email_conflict(err: sqlx::Error) -> AuthError {
    if is_unique_violation(&err) {
        AuthError::EmailTaken
    } else {
        AuthError::Database(err)
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let sql = format!(
            r#"
            INSERT INTO users (
                email,
                password_hash,
                first_name,
                last_name,
                age,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.email.as_str())
            .bind(user.password.as_phc_string())
            .bind(user.first_name.as_str())
            .bind(user.last_name.as_str())
            .bind(user.age.value())
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_email_conflict)?;

        Ok(row.into_user())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_one("email = $1", email).await
    }

    async fn find_by_reset_token_hash(&self, token_hash: &str) -> AuthResult<Option<User>> {
        self.find_one("reset_password_token_hash = $1", token_hash)
            .await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_profile(
        &self,
        user: &User,
        new_password: Option<&UserPassword>,
    ) -> AuthResult<User> {
        let sql = format!(
            r#"
            UPDATE users SET
                email = $2,
                first_name = $3,
                last_name = $4,
                age = $5,
                updated_at = $6,
                password_hash = COALESCE($7, password_hash)
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_id.as_uuid())
            .bind(user.email.as_str())
            .bind(user.first_name.as_str())
            .bind(user.last_name.as_str())
            .bind(user.age.value())
            .bind(user.updated_at)
            .bind(new_password.map(UserPassword::as_phc_string))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_email_conflict)?;

        row.map(UserRow::into_user).ok_or(AuthError::UserNotFound)
    }

    async fn update_password(
        &self,
        user_id: &UserId,
        current: &UserPassword,
        replacement: &UserPassword,
    ) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET password_hash = $3
            WHERE user_id = $1 AND password_hash = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(current.as_phc_string())
        .bind(replacement.as_phc_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn set_reset_token(&self, user: &User) -> AuthResult<User> {
        let sql = format!(
            r#"
            UPDATE users SET
                reset_password_token_hash = $2,
                reset_password_expires_at = $3,
                updated_at = $4
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_id.as_uuid())
            .bind(user.reset_token.as_ref().map(|t| t.token_hash.as_str()))
            .bind(user.reset_token.as_ref().map(|t| t.expires_at))
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).ok_or(AuthError::UserNotFound)
    }

    async fn redeem_reset_token(
        &self,
        user: &User,
        token_hash: &str,
    ) -> AuthResult<Option<User>> {
        // Single conditional statement: of two concurrent redemptions only
        // one can still match the token predicate.
        let sql = format!(
            r#"
            UPDATE users SET
                password_hash = $3,
                reset_password_token_hash = NULL,
                reset_password_expires_at = NULL,
                updated_at = $4
            WHERE user_id = $1
              AND reset_password_token_hash = $2
              AND reset_password_expires_at > $4
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_id.as_uuid())
            .bind(token_hash)
            .bind(user.password.as_phc_string())
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    age: i32,
    reset_password_token_hash: Option<String>,
    reset_password_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        let reset_token = match (self.reset_password_token_hash, self.reset_password_expires_at) {
            (Some(token_hash), Some(expires_at)) => Some(ResetToken {
                token_hash,
                expires_at,
            }),
            _ => None,
        };

        User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password_hash),
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            age: Age::from_db(self.age),
            reset_token,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
