use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http as handlers;
use crate::presentation::http::extract::USER_ID_HEADER;

// Room for the text fields that travel with the file in one upload.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::documents::list_documents,
        handlers::documents::get_document,
        handlers::documents::upload_document,
        handlers::documents::update_document,
        handlers::documents::delete_document,
        handlers::shares::get_shared_document,
        handlers::shares::create_share,
        handlers::shares::revoke_share,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::health::health,
    ),
    components(schemas(
        handlers::documents::Document,
        handlers::documents::UpdateDocumentRequest,
        handlers::documents::UploadDocumentMultipart,
        handlers::documents::DeleteResponse,
        handlers::shares::ShareResponse,
        handlers::users::CreateUserRequest,
        handlers::users::UserResponse,
        handlers::health::HealthResp,
    )),
    tags(
        (name = "Documents", description = "Document upload and management"),
        (name = "Sharing", description = "Share links for public documents"),
        (name = "Users", description = "Document owners"),
        (name = "Health", description = "System health checks")
    )
)]
pub struct ApiDoc;

pub fn build_router(ctx: AppContext) -> Router {
    let body_limit = ctx.cfg.upload_max_bytes + FORM_OVERHEAD_BYTES;
    let cors = cors_layer(&ctx.cfg);

    Router::new()
        .nest("/api", handlers::health::routes(ctx.clone()))
        .nest("/api", handlers::documents::routes(ctx.clone()))
        .nest("/api", handlers::shares::routes(ctx.clone()))
        .nest("/api", handlers::users::routes(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([
            http::header::CONTENT_TYPE,
            http::header::HeaderName::from_static(USER_ID_HEADER),
        ]);

    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        Some(Err(_)) | None if cfg.is_production => {
            // Production requires FRONTEND_URL; an unparsable one allows nothing
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        // Development convenience
        _ => base.allow_origin(AllowOrigin::mirror_request()),
    }
}
