use crate::application::ports::document_repository::DocumentRepository;
use crate::domain::documents::document::Document;

pub struct RevokeShare<'a, R: DocumentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: DocumentRepository + ?Sized> RevokeShare<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<Option<Document>> {
        let row = self.repo.clear_share_code(id).await?;
        if row.is_some() {
            tracing::info!(document_id = id, "share_code_revoked");
        }
        Ok(row)
    }
}
