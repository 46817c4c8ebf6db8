use crate::application::ports::document_repository::DocumentRepository;
use crate::domain::documents::document::{Document, DocumentChanges};

pub struct UpdateDocument<'a, R: DocumentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: DocumentRepository + ?Sized> UpdateDocument<'a, R> {
    pub async fn execute(
        &self,
        id: i64,
        changes: DocumentChanges,
    ) -> anyhow::Result<Option<Document>> {
        // An empty body still refreshes updated_at, same as any other write.
        self.repo.update(id, changes).await
    }
}
