#![allow(dead_code)]

use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};

use spark_api::bootstrap::app_context::{AppContext, AppServices};
use spark_api::bootstrap::config::Config;
use spark_api::presentation::router::build_router;

/// Full router over the in-memory store, with the demo user seeded.
pub struct TestEnv {
    pub ctx: AppContext,
    pub server: TestServer,
}

impl TestEnv {
    pub async fn start() -> Self {
        Self::with_config(Config::in_memory()).await
    }

    pub async fn with_config(cfg: Config) -> Self {
        let ctx = AppContext::new(cfg, AppServices::in_memory());
        ctx.seed_demo_user().await.expect("seed demo user");
        let server = TestServer::new(build_router(ctx.clone())).expect("start test server");
        Self { ctx, server }
    }
}

pub fn text_file(name: &str, body: &str) -> Part {
    Part::bytes(body.as_bytes().to_vec())
        .file_name(name)
        .mime_type("text/plain")
}

pub fn text_upload(name: &str, body: &str) -> MultipartForm {
    MultipartForm::new().add_part("file", text_file(name, body))
}
