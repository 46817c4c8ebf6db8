use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::shares::create_share::CreateShare;
use crate::application::use_cases::shares::get_shared::GetSharedDocument;
use crate::application::use_cases::shares::revoke_share::RevokeShare;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::documents::Document;
use crate::presentation::http::error::AppError;
use crate::presentation::http::extract::PathParam;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub share_code: String,
    pub share_path: String,
    /// The link only resolves while this is true
    pub is_public: bool,
}

#[utoipa::path(
    get,
    path = "/api/shared/{shareCode}",
    tag = "Sharing",
    params(("shareCode" = String, Path, description = "Share code")),
    responses(
        (status = 200, body = Document),
        (status = 404, description = "Unknown code or document not public"),
        (status = 500)
    )
)]
pub async fn get_shared_document(
    State(ctx): State<AppContext>,
    PathParam(code): PathParam<String>,
) -> Result<Json<Document>, AppError> {
    let repo = ctx.document_repo();
    let uc = GetSharedDocument {
        repo: repo.as_ref(),
    };
    let doc = uc
        .execute(&code)
        .await
        .map_err(AppError::internal("Failed to fetch shared document"))?
        .ok_or_else(|| AppError::not_found("Shared document not found"))?;
    Ok(Json(doc.into()))
}

#[utoipa::path(
    post,
    path = "/api/documents/{id}/share",
    tag = "Sharing",
    params(("id" = i64, Path, description = "Document ID")),
    responses((status = 200, body = ShareResponse), (status = 404), (status = 500))
)]
pub async fn create_share(
    State(ctx): State<AppContext>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<ShareResponse>, AppError> {
    let repo = ctx.document_repo();
    let uc = CreateShare {
        repo: repo.as_ref(),
    };
    let doc = uc
        .execute(id)
        .await
        .map_err(AppError::internal("Failed to create share link"))?
        .ok_or_else(|| AppError::not_found("Document not found"))?;
    let share_code = doc
        .share_code
        .ok_or_else(|| AppError::internal("Failed to create share link")(anyhow::anyhow!("share code missing after update")))?;
    Ok(Json(ShareResponse {
        share_path: ctx.cfg.share_path(&share_code),
        share_code,
        is_public: doc.is_public,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/documents/{id}/share",
    tag = "Sharing",
    params(("id" = i64, Path, description = "Document ID")),
    responses((status = 204), (status = 404), (status = 500))
)]
pub async fn revoke_share(
    State(ctx): State<AppContext>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    let repo = ctx.document_repo();
    let uc = RevokeShare {
        repo: repo.as_ref(),
    };
    uc.execute(id)
        .await
        .map_err(AppError::internal("Failed to revoke share link"))?
        .ok_or_else(|| AppError::not_found("Document not found"))?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/shared/:code", get(get_shared_document))
        .route("/documents/:id/share", post(create_share).delete(revoke_share))
        .with_state(ctx)
}
