use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Moderation state of an inbox message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "contact_status", rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ContactMessage {
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        message: &str,
    ) -> anyhow::Result<ContactMessage> {
        let row = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, status, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(message)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<ContactMessage>> {
        let rows = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, message, status, created_at
            FROM contact_messages
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<ContactMessage>> {
        let row = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, message, status, created_at
            FROM contact_messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Merges the provided fields into an existing row. Returns `None` when
    /// no row has this id; never inserts.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        message: Option<&str>,
        status: Option<ContactStatus>,
    ) -> anyhow::Result<Option<ContactMessage>> {
        let row = sqlx::query_as::<_, ContactMessage>(
            r#"
            UPDATE contact_messages
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                message = COALESCE($4, message),
                status = COALESCE($5, status)
            WHERE id = $1
            RETURNING id, name, email, message, status, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(message)
        .bind(status)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
