use std::sync::Arc;

use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::{Config, StoreBackend};
use crate::infrastructure::db;
use crate::infrastructure::db::repositories::document_repository_sqlx::SqlxDocumentRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::memory::InMemoryStore;

const DEMO_USERNAME: &str = "demo";

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    document_repo: Arc<dyn DocumentRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl AppServices {
    pub fn new(
        document_repo: Arc<dyn DocumentRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            document_repo,
            user_repo,
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store)
    }

    /// Wires repositories for the configured backend, running migrations
    /// when Postgres is selected.
    pub async fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        match cfg.store_backend {
            StoreBackend::Postgres => {
                let pool = db::connect_pool(&cfg.database_url).await?;
                db::migrate(&pool).await?;
                Ok(Self::new(
                    Arc::new(SqlxDocumentRepository::new(pool.clone())),
                    Arc::new(SqlxUserRepository::new(pool)),
                ))
            }
            StoreBackend::Memory => {
                tracing::warn!("document_store_in_memory");
                Ok(Self::in_memory())
            }
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn document_repo(&self) -> Arc<dyn DocumentRepository> {
        self.services.document_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    /// Makes sure the fallback identity exists so its documents satisfy the
    /// owner foreign key.
    pub async fn seed_demo_user(&self) -> anyhow::Result<()> {
        self.services
            .user_repo
            .ensure_user(self.cfg.demo_user_id, DEMO_USERNAME)
            .await?;
        tracing::debug!(user_id = self.cfg.demo_user_id, "demo_user_ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeding_fails_when_demo_username_is_held_by_another_id() {
        let services = AppServices::in_memory();
        let ctx = AppContext::new(Config::in_memory(), services.clone());
        ctx.seed_demo_user().await.unwrap();

        let mut moved = Config::in_memory();
        moved.demo_user_id = ctx.cfg.demo_user_id + 6;
        let err = AppContext::new(moved, services).seed_demo_user().await.unwrap_err();
        assert!(err.to_string().contains("already belongs to user"), "{err}");
    }
}
