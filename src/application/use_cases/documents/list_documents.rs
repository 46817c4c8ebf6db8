use crate::application::ports::document_repository::DocumentRepository;
use crate::domain::documents::document::Document;

pub struct ListDocuments<'a, R: DocumentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: DocumentRepository + ?Sized> ListDocuments<'a, R> {
    pub async fn execute(&self, user_id: Option<i64>) -> anyhow::Result<Vec<Document>> {
        self.repo.list(user_id).await
    }
}
