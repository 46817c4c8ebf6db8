use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::store_error::StoreError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::documents::document::{Document, DocumentChanges, NewDocument};
use crate::domain::users::user::User;

/// Process-local store backing both repositories. Used when
/// `DOCUMENT_STORE=memory` and by the test suites.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    documents: BTreeMap<i64, Document>,
    last_document_id: i64,
    users: BTreeMap<i64, User>,
    last_user_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryStore {
    async fn list(&self, user_id: Option<i64>) -> anyhow::Result<Vec<Document>> {
        let state = self.state.read().await;
        let items = state
            .documents
            .values()
            .filter(|d| user_id.is_none() || d.user_id == user_id)
            .cloned()
            .collect();
        Ok(items)
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Document>> {
        Ok(self.state.read().await.documents.get(&id).cloned())
    }

    async fn get_by_share_code(&self, code: &str) -> anyhow::Result<Option<Document>> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .values()
            .find(|d| d.share_code.as_deref() == Some(code))
            .cloned())
    }

    async fn create(&self, data: NewDocument, user_id: Option<i64>) -> anyhow::Result<Document> {
        let mut state = self.state.write().await;
        state.last_document_id += 1;
        let now = chrono::Utc::now();
        let doc = Document {
            id: state.last_document_id,
            title: data.title,
            filename: data.filename,
            file_type: data.file_type,
            content: data.content,
            tags: data.tags,
            user_id,
            is_public: data.is_public,
            share_code: None,
            created_at: now,
            updated_at: now,
        };
        state.documents.insert(doc.id, doc.clone());
        Ok(doc)
    }

    async fn update(&self, id: i64, changes: DocumentChanges) -> anyhow::Result<Option<Document>> {
        let mut state = self.state.write().await;
        let Some(doc) = state.documents.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(doc);
        doc.updated_at = chrono::Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        Ok(self.state.write().await.documents.remove(&id).is_some())
    }

    async fn assign_share_code(&self, id: i64, code: &str) -> anyhow::Result<Option<Document>> {
        let mut state = self.state.write().await;
        let taken = state
            .documents
            .values()
            .any(|d| d.id != id && d.share_code.as_deref() == Some(code));
        if taken {
            return Err(StoreError::Conflict(format!("share code {code} already in use")).into());
        }
        let Some(doc) = state.documents.get_mut(&id) else {
            return Ok(None);
        };
        if doc.share_code.is_none() {
            doc.share_code = Some(code.to_string());
            doc.updated_at = chrono::Utc::now();
        }
        Ok(Some(doc.clone()))
    }

    async fn clear_share_code(&self, id: i64) -> anyhow::Result<Option<Document>> {
        let mut state = self.state.write().await;
        let Some(doc) = state.documents.get_mut(&id) else {
            return Ok(None);
        };
        doc.share_code = None;
        doc.updated_at = chrono::Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, username: &str, password: &str) -> anyhow::Result<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.username == username) {
            return Err(StoreError::Conflict(format!("username {username} already taken")).into());
        }
        state.last_user_id += 1;
        let user = User {
            id: state.last_user_id,
            username: username.to_string(),
            password: password.to_string(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn ensure_user(&self, id: i64, username: &str) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&id) {
            if let Some(other) = state.users.values().find(|u| u.username == username) {
                anyhow::bail!(
                    "cannot seed user {id}: username {username} already belongs to user {}",
                    other.id
                );
            }
            state.users.insert(
                id,
                User {
                    id,
                    username: username.to_string(),
                    password: String::new(),
                },
            );
        }
        state.last_user_id = state.last_user_id.max(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::store_error::is_conflict;

    fn new_doc(title: &str) -> NewDocument {
        NewDocument {
            title: title.into(),
            filename: format!("{title}.txt"),
            file_type: "text/plain".into(),
            content: Some("body".into()),
            tags: vec![],
            is_public: false,
        }
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let store = InMemoryStore::new();
        let a = store.create(new_doc("a"), Some(1)).await.unwrap();
        assert!(store.delete(a.id).await.unwrap());
        let b = store.create(new_doc("b"), Some(1)).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn delete_twice_reports_false() {
        let store = InMemoryStore::new();
        let doc = store.create(new_doc("a"), None).await.unwrap();
        assert!(store.delete(doc.id).await.unwrap());
        assert!(!store.delete(doc.id).await.unwrap());
        assert!(!store.delete(999).await.unwrap());
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_and_filters_by_owner() {
        let store = InMemoryStore::new();
        store.create(new_doc("a"), Some(1)).await.unwrap();
        store.create(new_doc("b"), Some(2)).await.unwrap();
        store.create(new_doc("c"), Some(1)).await.unwrap();

        let all: Vec<_> = store.list(None).await.unwrap().into_iter().map(|d| d.title).collect();
        assert_eq!(all, ["a", "b", "c"]);

        let mine: Vec<_> = store.list(Some(1)).await.unwrap().into_iter().map(|d| d.title).collect();
        assert_eq!(mine, ["a", "c"]);
    }

    #[tokio::test]
    async fn update_refreshes_timestamp_and_misses_unknown_id() {
        let store = InMemoryStore::new();
        let doc = store.create(new_doc("a"), Some(1)).await.unwrap();
        let changes = DocumentChanges {
            title: Some("renamed".into()),
            ..Default::default()
        };
        let updated = store.update(doc.id, changes.clone()).await.unwrap().unwrap();
        assert_eq!(updated.title, "renamed");
        assert!(updated.updated_at >= doc.updated_at);
        assert_eq!(updated.created_at, doc.created_at);
        assert!(store.update(42, changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn share_codes_are_unique() {
        let store = InMemoryStore::new();
        let a = store.create(new_doc("a"), None).await.unwrap();
        let b = store.create(new_doc("b"), None).await.unwrap();
        store.assign_share_code(a.id, "code1").await.unwrap();

        let err = store.assign_share_code(b.id, "code1").await.unwrap_err();
        assert!(is_conflict(&err));

        let found = store.get_by_share_code("code1").await.unwrap().unwrap();
        assert_eq!(found.id, a.id);

        store.clear_share_code(a.id).await.unwrap();
        assert!(store.get_by_share_code("code1").await.unwrap().is_none());
        assert!(store.clear_share_code(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn assigned_code_is_never_overwritten() {
        let store = InMemoryStore::new();
        let doc = store.create(new_doc("a"), None).await.unwrap();
        store.assign_share_code(doc.id, "first").await.unwrap();

        let again = store.assign_share_code(doc.id, "second").await.unwrap().unwrap();
        assert_eq!(again.share_code.as_deref(), Some("first"));
        assert!(store.get_by_share_code("second").await.unwrap().is_none());
        assert!(store.assign_share_code(999, "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeding_fails_when_username_belongs_to_another_id() {
        let store = InMemoryStore::new();
        store.ensure_user(1, "demo").await.unwrap();
        let err = store.ensure_user(5, "demo").await.unwrap_err();
        assert!(err.to_string().contains("already belongs to user 1"));
        assert!(store.find_by_id(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn usernames_are_unique_and_seed_is_idempotent() {
        let store = InMemoryStore::new();
        store.ensure_user(1, "demo").await.unwrap();
        store.ensure_user(1, "demo").await.unwrap();
        assert_eq!(store.find_by_id(1).await.unwrap().unwrap().username, "demo");

        let next = store.create_user("ada", "pw").await.unwrap();
        assert_eq!(next.id, 2);
        let err = store.create_user("ada", "other").await.unwrap_err();
        assert!(is_conflict(&err));
        assert_eq!(store.find_by_username("ada").await.unwrap().unwrap().id, 2);
    }
}
