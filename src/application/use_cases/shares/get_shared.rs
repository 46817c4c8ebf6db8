use crate::application::access::{self, Capability};
use crate::application::ports::document_repository::DocumentRepository;
use crate::domain::documents::document::Document;

pub struct GetSharedDocument<'a, R: DocumentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: DocumentRepository + ?Sized> GetSharedDocument<'a, R> {
    /// Resolves a share code. Non-public documents are reported as missing
    /// so a leaked code reveals nothing.
    pub async fn execute(&self, code: &str) -> anyhow::Result<Option<Document>> {
        let Some(doc) = self.repo.get_by_share_code(code).await? else {
            return Ok(None);
        };
        if access::resolve_shared(&doc, code) < Capability::View {
            tracing::debug!(document_id = doc.id, "shared_document_not_public");
            return Ok(None);
        }
        Ok(Some(doc))
    }
}
