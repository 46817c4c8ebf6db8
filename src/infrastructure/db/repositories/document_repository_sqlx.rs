use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::store_error::StoreError;
use crate::domain::documents::document::{Document, DocumentChanges, NewDocument};
use crate::infrastructure::db::{PgPool, is_unique_violation};

const COLUMNS: &str = "id, title, filename, file_type, content, tags, user_id, is_public, \
                       share_code, created_at, updated_at";

pub struct SqlxDocumentRepository {
    pub pool: PgPool,
}

impl SqlxDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Decode failures surface as errors instead of defaulted fields.
fn map_row(r: &PgRow) -> anyhow::Result<Document> {
    Ok(Document {
        id: r.try_get("id")?,
        title: r.try_get("title")?,
        filename: r.try_get("filename")?,
        file_type: r.try_get("file_type")?,
        content: r.try_get::<Option<String>, _>("content")?,
        tags: r.try_get("tags")?,
        user_id: r.try_get::<Option<i64>, _>("user_id")?,
        is_public: r.try_get("is_public")?,
        share_code: r.try_get::<Option<String>, _>("share_code")?,
        created_at: r.try_get("created_at")?,
        updated_at: r.try_get("updated_at")?,
    })
}

#[async_trait]
impl DocumentRepository for SqlxDocumentRepository {
    async fn list(&self, user_id: Option<i64>) -> anyhow::Result<Vec<Document>> {
        let rows = if let Some(uid) = user_id {
            sqlx::query(&format!(
                "SELECT {COLUMNS} FROM documents WHERE user_id = $1 ORDER BY id ASC"
            ))
            .bind(uid)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(&format!("SELECT {COLUMNS} FROM documents ORDER BY id ASC"))
                .fetch_all(&self.pool)
                .await?
        };
        rows.iter().map(map_row).collect()
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Document>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM documents WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_row).transpose()
    }

    async fn get_by_share_code(&self, code: &str) -> anyhow::Result<Option<Document>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM documents WHERE share_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_row).transpose()
    }

    async fn create(&self, data: NewDocument, user_id: Option<i64>) -> anyhow::Result<Document> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO documents (title, filename, file_type, content, tags, user_id, is_public)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {COLUMNS}"#
        ))
        .bind(&data.title)
        .bind(&data.filename)
        .bind(&data.file_type)
        .bind(&data.content)
        .bind(&data.tags)
        .bind(user_id)
        .bind(data.is_public)
        .fetch_one(&self.pool)
        .await?;
        map_row(&row)
    }

    async fn update(&self, id: i64, changes: DocumentChanges) -> anyhow::Result<Option<Document>> {
        // content: None => keep; Some(v) => overwrite (v may be NULL)
        let (content_provided, content) = match changes.content {
            None => (false, None),
            Some(v) => (true, v),
        };
        let row = sqlx::query(&format!(
            r#"UPDATE documents SET
                    title = COALESCE($1, title),
                    content = CASE WHEN $2 THEN $3 ELSE content END,
                    tags = COALESCE($4, tags),
                    is_public = COALESCE($5, is_public),
                    updated_at = now()
                WHERE id = $6
                RETURNING {COLUMNS}"#
        ))
        .bind(changes.title)
        .bind(content_provided)
        .bind(content)
        .bind(changes.tags)
        .bind(changes.is_public)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_row).transpose()
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn assign_share_code(&self, id: i64, code: &str) -> anyhow::Result<Option<Document>> {
        // Concurrent callers serialize on the row lock; the loser matches no
        // row and reads back the winner's code.
        let res = sqlx::query(&format!(
            r#"UPDATE documents SET share_code = $1, updated_at = now()
               WHERE id = $2 AND share_code IS NULL
               RETURNING {COLUMNS}"#
        ))
        .bind(code)
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        match res {
            Ok(Some(row)) => map_row(&row).map(Some),
            Ok(None) => self.get_by_id(id).await,
            Err(e) if is_unique_violation(&e) => {
                Err(StoreError::Conflict(format!("share code {code} already in use")).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn clear_share_code(&self, id: i64) -> anyhow::Result<Option<Document>> {
        let row = sqlx::query(&format!(
            r#"UPDATE documents SET share_code = NULL, updated_at = now()
               WHERE id = $1
               RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_row).transpose()
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
