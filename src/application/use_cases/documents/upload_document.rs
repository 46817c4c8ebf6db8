use thiserror::Error;

use crate::application::access::Identity;
use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::extraction;
use crate::domain::documents::document::{Document, NewDocument};

const FALLBACK_FILENAME: &str = "upload";

/// A validated upload, as produced by the multipart form schema.
#[derive(Debug, Clone, Default)]
pub struct DocumentUpload {
    pub title: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub tags: Vec<String>,
    pub is_public: bool,
    /// Explicit owner from the form; falls back to the caller identity.
    pub owner_id: Option<i64>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("user {0} does not exist")]
    UnknownOwner(i64),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub struct UploadDocument<'a, D, U>
where
    D: DocumentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub documents: &'a D,
    pub users: &'a U,
}

impl<'a, D, U> UploadDocument<'a, D, U>
where
    D: DocumentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(
        &self,
        identity: &Identity,
        upload: DocumentUpload,
    ) -> Result<Document, UploadError> {
        let owner_id = upload.owner_id.unwrap_or(identity.user_id);
        if self.users.find_by_id(owner_id).await?.is_none() {
            return Err(UploadError::UnknownOwner(owner_id));
        }

        let filename = upload
            .filename
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| FALLBACK_FILENAME.to_string());
        let file_type =
            extraction::resolve_mime(upload.content_type.as_deref(), Some(filename.as_str()));
        let content = extraction::extract_content(&file_type, &upload.bytes);
        let title = upload
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| filename.clone());

        let data = NewDocument {
            title,
            filename,
            file_type,
            content: Some(content),
            tags: upload.tags,
            is_public: upload.is_public,
        };
        let doc = self
            .documents
            .create(data, Some(owner_id))
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, owner_id, "create_document_failed");
                err
            })?;
        tracing::info!(
            document_id = doc.id,
            owner_id,
            file_type = %doc.file_type,
            size = upload.bytes.len(),
            "document_uploaded"
        );
        Ok(doc)
    }
}
