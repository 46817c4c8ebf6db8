use async_trait::async_trait;

use crate::domain::documents::document::{Document, DocumentChanges, NewDocument};

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    // Ascending id order, i.e. insertion order
    async fn list(&self, user_id: Option<i64>) -> anyhow::Result<Vec<Document>>;

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Document>>;

    async fn get_by_share_code(&self, code: &str) -> anyhow::Result<Option<Document>>;

    async fn create(&self, data: NewDocument, user_id: Option<i64>) -> anyhow::Result<Document>;

    async fn update(&self, id: i64, changes: DocumentChanges) -> anyhow::Result<Option<Document>>;

    // Returns true if a row existed and was removed
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;

    // Sets the code only while the document has none; otherwise the
    // document comes back with the code it already holds. A code held by
    // another document fails with StoreError::Conflict.
    async fn assign_share_code(&self, id: i64, code: &str) -> anyhow::Result<Option<Document>>;

    async fn clear_share_code(&self, id: i64) -> anyhow::Result<Option<Document>>;

    async fn ping(&self) -> anyhow::Result<()>;
}
