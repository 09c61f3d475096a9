use super::{
    models::{Message, MessageCreateData},
    repository::MessageRepository,
};
use crate::errors::ApiError;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub struct PostgresMessageRepository {
    pool: Pool<Postgres>,
}

impl PostgresMessageRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn get_all(&self, organization_id: Uuid) -> Result<Vec<Message>, ApiError> {
        sqlx::query_as(
            r#"SELECT * FROM "messages"
            WHERE "organization_id" = $1
            ORDER BY "created_at""#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = e.to_string(),
                method = "get_all",
                "PostgresMessageRepository sqlx error"
            );

            ApiError::SqlxError
        })
    }

    async fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Message>, ApiError> {
        let res = sqlx::query_as(
            r#"SELECT * FROM "messages" WHERE "organization_id" = $1 AND "id" = $2"#,
        )
        .bind(organization_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                if matches!(e, sqlx::Error::RowNotFound) {
                    Ok(None)
                } else {
                    tracing::error!(
                        error = e.to_string(),
                        method = "get_by_id",
                        "PostgresMessageRepository sqlx error"
                    );

                    Err(ApiError::SqlxError)
                }
            }
        }
    }

    async fn get_by_title(
        &self,
        organization_id: Uuid,
        title: &str,
    ) -> Result<Option<Message>, ApiError> {
        let res = sqlx::query_as(
            r#"SELECT * FROM "messages" WHERE "organization_id" = $1 AND "title" = $2"#,
        )
        .bind(organization_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                if matches!(e, sqlx::Error::RowNotFound) {
                    Ok(None)
                } else {
                    tracing::error!(
                        error = e.to_string(),
                        method = "get_by_title",
                        "PostgresMessageRepository sqlx error"
                    );

                    Err(ApiError::SqlxError)
                }
            }
        }
    }

    async fn create(
        &self,
        organization_id: Uuid,
        data: MessageCreateData,
    ) -> Result<Message, ApiError> {
        sqlx::query_as(
            r#"INSERT INTO "messages"
            ("id", "organization_id", "title", "content", "active")
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(organization_id)
        .bind(data.title)
        .bind(data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = e.to_string(),
                method = "create",
                "PostgresMessageRepository sqlx error"
            );

            ApiError::SqlxError
        })
    }

    async fn update(&self, message: Message) -> Result<Option<Message>, ApiError> {
        let res = sqlx::query_as(
            r#"UPDATE "messages"
            SET "title" = $1, "content" = $2, "active" = $3, "updated_at" = now()
            WHERE "organization_id" = $4 AND "id" = $5
            RETURNING *"#,
        )
        .bind(message.title)
        .bind(message.content)
        .bind(message.active)
        .bind(message.organization_id)
        .bind(message.id)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                if matches!(e, sqlx::Error::RowNotFound) {
                    Ok(None)
                } else {
                    tracing::error!(
                        error = e.to_string(),
                        method = "update",
                        "PostgresMessageRepository sqlx error"
                    );

                    Err(ApiError::SqlxError)
                }
            }
        }
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let res = sqlx::query(r#"DELETE FROM "messages" WHERE "organization_id" = $1 AND "id" = $2"#)
            .bind(organization_id)
            .bind(id)
            .execute(&self.pool)
            .await;

        match res {
            Ok(r) => Ok(r.rows_affected() > 0),
            Err(e) => {
                tracing::error!(
                    error = e.to_string(),
                    method = "delete",
                    "PostgresMessageRepository sqlx error"
                );

                Err(ApiError::SqlxError)
            }
        }
    }
}
