//! Content record repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hookblocks_core::error::{AppError, ErrorKind};
use hookblocks_core::result::AppResult;
use hookblocks_entity::record::{ContentRecord, CreateRecord};

use crate::store::RecordStore;

/// PostgreSQL-backed record store.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Create a new record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error, treating connection-level failures as unavailability.
fn map_err(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        let kind = match &e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ErrorKind::ServiceUnavailable
            }
            _ => ErrorKind::Database,
        };
        AppError::with_source(kind, context, e)
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, data: CreateRecord) -> AppResult<ContentRecord> {
        let record = ContentRecord::from_create(data);
        sqlx::query_as::<_, ContentRecord>(
            "INSERT INTO content_records \
             (id, title, hook_name, priority, body, status, sort_order, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.hook_name)
        .bind(record.priority)
        .bind(&record.body)
        .bind(record.status)
        .bind(record.order)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_err("Failed to create record"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContentRecord>> {
        sqlx::query_as::<_, ContentRecord>("SELECT * FROM content_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err("Failed to find record"))
    }

    async fn update(&self, record: &ContentRecord) -> AppResult<ContentRecord> {
        sqlx::query_as::<_, ContentRecord>(
            "UPDATE content_records SET title = $2, hook_name = $3, priority = $4, body = $5, \
             status = $6, sort_order = $7, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.hook_name)
        .bind(record.priority)
        .bind(&record.body)
        .bind(record.status)
        .bind(record.order)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err("Failed to update record"))?
        .ok_or_else(|| AppError::not_found(format!("Record {} not found", record.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM content_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err("Failed to delete record"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> AppResult<Vec<ContentRecord>> {
        sqlx::query_as::<_, ContentRecord>(
            "SELECT * FROM content_records ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_err("Failed to list records"))
    }

    async fn find_active(&self) -> AppResult<Vec<ContentRecord>> {
        sqlx::query_as::<_, ContentRecord>(
            "SELECT * FROM content_records \
             WHERE status = 'published' AND hook_name <> '' \
             ORDER BY sort_order ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_err("Failed to query active records"))
    }
}
