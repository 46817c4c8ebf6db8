use async_trait::async_trait;

use crate::domain::users::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    // Duplicate usernames fail with StoreError::Conflict
    async fn create_user(&self, username: &str, password: &str) -> anyhow::Result<User>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    // Inserts the user with a fixed id unless that id or name is already taken
    async fn ensure_user(&self, id: i64, username: &str) -> anyhow::Result<()>;
}
