use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::repository::DocumentStore;
use crate::domain::repository::Filter;
use crate::domain::repository::JsonDocument;
use crate::domain::repository::Projection;
use crate::domain::repository::StoreError;
use crate::domain::repository::ID_FIELD;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        seq BIGSERIAL,
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        body JSONB NOT NULL,
        PRIMARY KEY (collection, id)
    )
"#;

/// Document store backed by one PostgreSQL table of JSONB bodies.
///
/// Filters are evaluated with JSONB containment (`body @> filter`), which is
/// top-level equality only because [`Filter`] values are scalars.
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool on `url` and create the `documents` table if missing.
    ///
    /// # Errors
    /// * `Backend` - Connection or table creation failed
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(backend)?;

        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .map_err(backend)?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn insert(&self, collection: &str, document: JsonDocument) -> Result<(), StoreError> {
        let id = document
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                StoreError::Backend(anyhow::anyhow!("document has no {} field", ID_FIELD))
            })?;

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(Json(Value::Object(document)))
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<JsonDocument>, StoreError> {
        let rows = sqlx::query(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 ORDER BY seq",
        )
        .bind(collection)
        .bind(filter_json(filter))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter()
            .map(|row| body(row).map(|document| projection.apply(document)))
            .collect()
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<JsonDocument, StoreError> {
        let row = sqlx::query(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 ORDER BY seq LIMIT 1",
        )
        .bind(collection)
        .bind(filter_json(filter))
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?;

        body(&row).map(|document| projection.apply(document))
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        document: JsonDocument,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = $3 || jsonb_build_object('_id', id)
            WHERE collection = $1
              AND id = (
                SELECT id FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT 1
              )
            "#,
        )
        .bind(collection)
        .bind(filter_json(filter))
        .bind(Json(Value::Object(document)))
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn remove(&self, collection: &str, filter: &Filter) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1
              AND id = (
                SELECT id FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT 1
              )
            "#,
        )
        .bind(collection)
        .bind(filter_json(filter))
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

fn filter_json(filter: &Filter) -> Json<Value> {
    Json(Value::Object(filter.as_map().clone()))
}

fn body(row: &sqlx::postgres::PgRow) -> Result<JsonDocument, StoreError> {
    let Json(value): Json<Value> = row.try_get("body").map_err(backend)?;
    match value {
        Value::Object(document) => Ok(document),
        other => Err(StoreError::Backend(anyhow::anyhow!(
            "stored body is not an object: {}",
            other
        ))),
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.into())
}
