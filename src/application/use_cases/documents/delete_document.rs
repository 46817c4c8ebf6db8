use crate::application::ports::document_repository::DocumentRepository;

pub struct DeleteDocument<'a, R: DocumentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: DocumentRepository + ?Sized> DeleteDocument<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<bool> {
        let removed = self.repo.delete(id).await?;
        if removed {
            tracing::info!(document_id = id, "document_deleted");
        }
        Ok(removed)
    }
}
