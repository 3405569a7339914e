//! Token store service — CRUD operations over the `api_tokens` table.
//!
//! Every protected request performs a fresh `lookup_by_token` against the
//! database; there is deliberately no in-process cache, so a deleted token
//! is rejected on the very next request.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sqlx::PgPool;

use coinpulse_common::error::AppError;
use coinpulse_common::types::ApiToken;

/// Tokens inserted idempotently at first startup. Names already present in
/// the store are left untouched.
pub const SEED_TOKENS: &[(&str, &str)] = &[("admin", "admin-token-123456")];

/// Generate an opaque token: 32 bytes from the OS-seeded CSPRNG, URL-safe
/// base64 without padding (43 characters).
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Service layer for API token persistence.
pub struct TokenService;

impl TokenService {
    /// Create a new token record. Uniqueness of both `name` and `token` is
    /// enforced by the database; violations map to the duplicate errors.
    pub async fn create(pool: &PgPool, name: &str, token: &str) -> Result<ApiToken, AppError> {
        let record: ApiToken = sqlx::query_as(
            r#"
            INSERT INTO api_tokens (name, token)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(token)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                match db.constraint() {
                    Some("api_tokens_name_key") => {
                        return AppError::DuplicateName(name.to_string());
                    }
                    Some("api_tokens_token_key") => {
                        return AppError::DuplicateToken(token.to_string());
                    }
                    _ => {}
                }
            }
            AppError::Database(e)
        })?;

        tracing::info!(token_id = record.id, name = %record.name, "API token created");
        Ok(record)
    }

    /// Look up a record by its token value. Hot path — runs on every
    /// authenticated request, backed by the unique index on `token`.
    pub async fn lookup_by_token(pool: &PgPool, token: &str) -> Result<Option<ApiToken>, AppError> {
        let record: Option<ApiToken> = sqlx::query_as("SELECT * FROM api_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// List all token records, ordered by name for stable display.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ApiToken>, AppError> {
        let records: Vec<ApiToken> = sqlx::query_as("SELECT * FROM api_tokens ORDER BY name")
            .fetch_all(pool)
            .await?;

        Ok(records)
    }

    /// Delete a record by name. Returns true if a row was removed.
    pub async fn delete_by_name(pool: &PgPool, name: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM api_tokens WHERE name = $1")
            .bind(name)
            .execute(pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(name = %name, "API token deleted");
        }

        Ok(deleted)
    }

    /// Idempotently insert a set of named tokens. An existing name is left
    /// untouched rather than reported as an error, so seeding can run on
    /// every startup.
    pub async fn seed(pool: &PgPool, entries: &[(&str, &str)]) -> Result<(), AppError> {
        for (name, token) in entries {
            let result = sqlx::query(
                r#"
                INSERT INTO api_tokens (name, token)
                VALUES ($1, $2)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(name)
            .bind(token)
            .execute(pool)
            .await?;

            if result.rows_affected() > 0 {
                tracing::info!(name = %name, "Seeded API token");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_url_safe_and_distinct() {
        let a = generate_token();
        let b = generate_token();

        // 32 bytes -> 43 base64 chars without padding
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn seed_set_contains_admin() {
        assert!(SEED_TOKENS.iter().any(|(name, _)| *name == "admin"));
    }
}
