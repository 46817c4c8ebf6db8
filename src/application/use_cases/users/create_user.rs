use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct CreateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> CreateUser<'a, R> {
    pub async fn execute(&self, username: &str, password: &str) -> anyhow::Result<User> {
        let user = self.repo.create_user(username, password).await?;
        tracing::info!(user_id = user.id, "user_created");
        Ok(user)
    }
}
