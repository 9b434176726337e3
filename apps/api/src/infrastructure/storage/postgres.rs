use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::PgPool;

use super::{record_id, Record, StorageAdapter, StorageError, StorageResult, ID_FIELD};

/// `@>` narrows candidates through the GIN index on `data`; the `->`
/// comparison keeps the match exact for array and object values.
const FIND_BY_FIELD_SQL: &str = r#"
    SELECT data FROM records
    WHERE collection = $1 AND data @> $2 AND data -> $3 = $4
    ORDER BY seq
    LIMIT 1
"#;

/// PostgreSQL implementation of StorageAdapter
///
/// Records live in a single `records` table as JSONB documents keyed by
/// `(collection, id)`. Resource names carry a unique index, so a duplicate
/// name surfaces as `StorageError::Conflict` on insert.
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Creates a new PostgresStorage
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(collection: &str, err: sqlx::Error) -> StorageError {
    let is_unique_violation = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if is_unique_violation {
        StorageError::Conflict {
            collection: collection.to_string(),
            detail: err.to_string(),
        }
    } else {
        StorageError::Database(err)
    }
}

#[async_trait]
impl StorageAdapter for PostgresStorage {
    async fn create_record(&self, collection: &str, data: Record) -> StorageResult<Record> {
        let id = record_id(&data)?.to_string();

        sqlx::query(
            r#"
            INSERT INTO records (collection, id, data)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Json(&data))
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(collection, e))?;

        Ok(data)
    }

    async fn get_record_by_id(&self, collection: &str, id: &str) -> StorageResult<Option<Record>> {
        let row: Option<Json<Record>> = sqlx::query_scalar(
            r#"
            SELECT data FROM records
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|Json(record)| record))
    }

    async fn update_record(
        &self,
        collection: &str,
        id: &str,
        mut partial: Record,
    ) -> StorageResult<Option<Record>> {
        partial.remove(ID_FIELD);

        // jsonb `||` replaces top-level keys present on the right-hand side
        let row: Option<Json<Record>> = sqlx::query_scalar(
            r#"
            UPDATE records
            SET data = data || $3
            WHERE collection = $1 AND id = $2
            RETURNING data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(&partial))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|Json(record)| record))
    }

    async fn delete_record(&self, collection: &str, id: &str) -> StorageResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM records WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_all_records(&self, collection: &str) -> StorageResult<Vec<Record>> {
        let rows: Vec<Json<Record>> = sqlx::query_scalar(
            r#"
            SELECT data FROM records
            WHERE collection = $1
            ORDER BY seq
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(record)| record).collect())
    }

    async fn find_record_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StorageResult<Option<Record>> {
        let mut containment = Map::new();
        containment.insert(field.to_string(), value.clone());

        let row: Option<Json<Record>> = sqlx::query_scalar(FIND_BY_FIELD_SQL)
            .bind(collection)
            .bind(Json(&containment))
            .bind(field)
            .bind(Json(value))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|Json(record)| record))
    }
}
