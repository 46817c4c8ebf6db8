use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::store_error::is_conflict;
use crate::domain::documents::document::Document;

pub const SHARE_CODE_LEN: usize = 12;
const MAX_ATTEMPTS: usize = 5;

pub fn generate_share_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_CODE_LEN)
        .map(char::from)
        .collect()
}

pub struct CreateShare<'a, R: DocumentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: DocumentRepository + ?Sized> CreateShare<'a, R> {
    /// Returns the document carrying its share code, reusing an existing
    /// code. `None` when the document does not exist.
    pub async fn execute(&self, id: i64) -> anyhow::Result<Option<Document>> {
        let Some(doc) = self.repo.get_by_id(id).await? else {
            return Ok(None);
        };
        if doc.share_code.is_some() {
            return Ok(Some(doc));
        }
        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_share_code();
            match self.repo.assign_share_code(id, &code).await {
                Ok(row) => {
                    if row.as_ref().and_then(|d| d.share_code.as_deref()) == Some(code.as_str()) {
                        tracing::info!(document_id = id, "share_code_created");
                    }
                    return Ok(row);
                }
                Err(e) if is_conflict(&e) => {
                    tracing::warn!(document_id = id, attempt, "share_code_collision");
                }
                Err(e) => return Err(e),
            }
        }
        anyhow::bail!("could not allocate a unique share code after {MAX_ATTEMPTS} attempts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::documents::document::{DocumentChanges, NewDocument};
    use crate::infrastructure::memory::InMemoryStore;

    async fn store_with_doc() -> (InMemoryStore, Document) {
        let store = InMemoryStore::new();
        let doc = store
            .create(
                NewDocument {
                    title: "Bio".into(),
                    filename: "bio.txt".into(),
                    file_type: "text/plain".into(),
                    content: None,
                    tags: vec![],
                    is_public: true,
                },
                Some(1),
            )
            .await
            .unwrap();
        (store, doc)
    }

    #[test]
    fn codes_are_alphanumeric_and_fixed_length() {
        let code = generate_share_code();
        assert_eq!(code.len(), SHARE_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn sharing_twice_returns_same_code() {
        let (store, doc) = store_with_doc().await;
        let uc = CreateShare { repo: &store };
        let first = uc.execute(doc.id).await.unwrap().unwrap();
        let second = uc.execute(doc.id).await.unwrap().unwrap();
        assert!(first.share_code.is_some());
        assert_eq!(first.share_code, second.share_code);
    }

    #[tokio::test]
    async fn sharing_does_not_change_visibility() {
        let (store, doc) = store_with_doc().await;
        store
            .update(
                doc.id,
                DocumentChanges {
                    is_public: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let shared = CreateShare { repo: &store }.execute(doc.id).await.unwrap().unwrap();
        assert!(!shared.is_public);
    }

    // Yields after the existence check so two callers both see an
    // unshared document before either writes.
    struct Interleaved<'s>(&'s InMemoryStore);

    #[async_trait::async_trait]
    impl DocumentRepository for Interleaved<'_> {
        async fn list(&self, user_id: Option<i64>) -> anyhow::Result<Vec<Document>> {
            self.0.list(user_id).await
        }
        async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Document>> {
            let doc = self.0.get_by_id(id).await;
            tokio::task::yield_now().await;
            doc
        }
        async fn get_by_share_code(&self, code: &str) -> anyhow::Result<Option<Document>> {
            self.0.get_by_share_code(code).await
        }
        async fn create(&self, data: NewDocument, user_id: Option<i64>) -> anyhow::Result<Document> {
            self.0.create(data, user_id).await
        }
        async fn update(&self, id: i64, changes: DocumentChanges) -> anyhow::Result<Option<Document>> {
            self.0.update(id, changes).await
        }
        async fn delete(&self, id: i64) -> anyhow::Result<bool> {
            self.0.delete(id).await
        }
        async fn assign_share_code(&self, id: i64, code: &str) -> anyhow::Result<Option<Document>> {
            self.0.assign_share_code(id, code).await
        }
        async fn clear_share_code(&self, id: i64) -> anyhow::Result<Option<Document>> {
            self.0.clear_share_code(id).await
        }
        async fn ping(&self) -> anyhow::Result<()> {
            self.0.ping().await
        }
    }

    #[tokio::test]
    async fn concurrent_shares_agree_on_one_code() {
        let (store, doc) = store_with_doc().await;
        let repo = Interleaved(&store);
        let uc = CreateShare { repo: &repo };
        let (first, second) = tokio::join!(uc.execute(doc.id), uc.execute(doc.id));
        let first = first.unwrap().unwrap().share_code.unwrap();
        let second = second.unwrap().unwrap().share_code.unwrap();
        let stored = store.get_by_id(doc.id).await.unwrap().unwrap().share_code.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, stored);
        assert!(store.get_by_share_code(&first).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn missing_document_is_none() {
        let store = InMemoryStore::new();
        assert!(CreateShare { repo: &store }.execute(5).await.unwrap().is_none());
    }
}
