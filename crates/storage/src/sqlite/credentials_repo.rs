use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{Credentials, UserProfile};
use sqlx::Row;

use crate::repository::{CredentialStore, StorageError};

use super::SqliteRepository;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl CredentialStore for SqliteRepository {
    async fn load(&self) -> Result<Option<Credentials>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT token, user_id, username, email, saved_at
            FROM credentials
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let token: String = row.try_get("token").map_err(ser)?;
        let user = UserProfile {
            id: row.try_get("user_id").map_err(ser)?,
            username: row.try_get("username").map_err(ser)?,
            email: row.try_get("email").map_err(ser)?,
        };
        let saved_at: DateTime<Utc> = row.try_get("saved_at").map_err(ser)?;

        Credentials::new(token, user, saved_at).map(Some).map_err(ser)
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO credentials (id, token, user_id, username, email, saved_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                user_id = excluded.user_id,
                username = excluded.username,
                email = excluded.email,
                saved_at = excluded.saved_at
            ",
        )
        .bind(1_i64)
        .bind(credentials.token())
        .bind(&credentials.user().id)
        .bind(&credentials.user().username)
        .bind(credentials.user().email.as_deref())
        .bind(credentials.saved_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM credentials WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
