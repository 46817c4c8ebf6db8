use axum::{
    Json, Router,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access::Identity;
use crate::application::use_cases::documents::delete_document::DeleteDocument;
use crate::application::use_cases::documents::get_document::GetDocument;
use crate::application::use_cases::documents::list_documents::ListDocuments;
use crate::application::use_cases::documents::update_document::UpdateDocument;
use crate::application::use_cases::documents::upload_document::{UploadDocument, UploadError};
use crate::bootstrap::app_context::AppContext;
use crate::domain::documents::document as domain;
use crate::presentation::http::error::AppError;
use crate::presentation::http::extract::{JsonBody, PathParam, QueryParams};
use crate::presentation::http::upload_form::{read_upload_form, reject_nul};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub filename: String,
    pub file_type: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub user_id: Option<i64>,
    pub is_public: bool,
    pub share_code: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Document> for Document {
    fn from(d: domain::Document) -> Self {
        Self {
            id: d.id,
            title: d.title,
            filename: d.filename,
            file_type: d.file_type,
            content: d.content,
            tags: d.tags,
            user_id: d.user_id,
            is_public: d.is_public,
            share_code: d.share_code,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Only the mutable fields. Anything else in the body, including
/// immutable ones such as `filename` or `shareCode`, is rejected.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub content: DoubleOption<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

impl UpdateDocumentRequest {
    fn into_changes(self) -> Result<domain::DocumentChanges, AppError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::bad_request("title: must not be empty"));
        }
        if let Some(title) = &self.title {
            reject_nul("title", title)?;
        }
        if let DoubleOption::Some(content) = &self.content {
            reject_nul("content", content)?;
        }
        for tag in self.tags.iter().flatten() {
            reject_nul("tags", tag)?;
        }
        let content = match self.content {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        };
        Ok(domain::DocumentChanges {
            title: self.title,
            content,
            tags: self.tags,
            is_public: self.is_public,
        })
    }
}

#[derive(ToSchema)]
#[allow(dead_code, non_snake_case)]
pub struct UploadDocumentMultipart {
    /// File to upload
    #[schema(value_type = String, format = Binary)]
    file: String,
    /// Display title; defaults to the file name
    title: Option<String>,
    /// JSON array of strings, e.g. `["math","notes"]`
    tags: Option<String>,
    /// `"true"` or `"false"`
    isPublic: Option<String>,
    /// Owner id; defaults to the caller identity
    userId: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    pub user_id: Option<i64>,
}

#[utoipa::path(get, path = "/api/documents", tag = "Documents",
    params(("userId" = Option<i64>, Query, description = "Only documents owned by this user")),
    responses((status = 200, body = [Document]), (status = 400), (status = 500)))]
pub async fn list_documents(
    State(ctx): State<AppContext>,
    QueryParams(q): QueryParams<ListDocumentsQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    let repo = ctx.document_repo();
    let uc = ListDocuments {
        repo: repo.as_ref(),
    };
    let docs = uc
        .execute(q.user_id)
        .await
        .map_err(AppError::internal("Failed to fetch documents"))?;
    Ok(Json(docs.into_iter().map(Document::from).collect()))
}

#[utoipa::path(get, path = "/api/documents/{id}", tag = "Documents",
    params(("id" = i64, Path, description = "Document ID")),
    responses((status = 200, body = Document), (status = 404), (status = 500)))]
pub async fn get_document(
    State(ctx): State<AppContext>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Document>, AppError> {
    let repo = ctx.document_repo();
    let uc = GetDocument {
        repo: repo.as_ref(),
    };
    let doc = uc
        .execute(id)
        .await
        .map_err(AppError::internal("Failed to fetch document"))?
        .ok_or_else(|| AppError::not_found("Document not found"))?;
    Ok(Json(doc.into()))
}

#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "Documents",
    params(("X-User-Id" = Option<i64>, Header, description = "Caller identity; defaults to the demo user")),
    request_body(content = UploadDocumentMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Document created", body = Document),
        (status = 400, description = "Missing file or invalid field"),
        (status = 413, description = "File too large"),
        (status = 500)
    )
)]
pub async fn upload_document(
    State(ctx): State<AppContext>,
    identity: Identity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let mut multipart = multipart?;
    let upload = read_upload_form(&mut multipart, ctx.cfg.upload_max_bytes).await?;

    let documents = ctx.document_repo();
    let users = ctx.user_repo();
    let uc = UploadDocument {
        documents: documents.as_ref(),
        users: users.as_ref(),
    };
    let doc = uc.execute(&identity, upload).await.map_err(|e| match e {
        UploadError::UnknownOwner(id) => AppError::bad_request(format!("userId: user {id} does not exist")),
        UploadError::Store(source) => AppError::internal("Failed to upload document")(source),
    })?;
    Ok((StatusCode::CREATED, Json(doc.into())))
}

#[utoipa::path(put, path = "/api/documents/{id}", tag = "Documents", request_body = UpdateDocumentRequest,
    params(("id" = i64, Path, description = "Document ID")),
    responses((status = 200, body = Document), (status = 400), (status = 404), (status = 500)))]
pub async fn update_document(
    State(ctx): State<AppContext>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<UpdateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    let changes = req.into_changes()?;
    let repo = ctx.document_repo();
    let uc = UpdateDocument {
        repo: repo.as_ref(),
    };
    let doc = uc
        .execute(id, changes)
        .await
        .map_err(AppError::internal("Failed to update document"))?
        .ok_or_else(|| AppError::not_found("Document not found"))?;
    Ok(Json(doc.into()))
}

#[utoipa::path(delete, path = "/api/documents/{id}", tag = "Documents",
    params(("id" = i64, Path, description = "Document ID")),
    responses((status = 200, body = DeleteResponse), (status = 404), (status = 500)))]
pub async fn delete_document(
    State(ctx): State<AppContext>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let repo = ctx.document_repo();
    let uc = DeleteDocument {
        repo: repo.as_ref(),
    };
    let ok = uc
        .execute(id)
        .await
        .map_err(AppError::internal("Failed to delete document"))?;
    if ok {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(AppError::not_found("Document not found"))
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/documents", get(list_documents).post(upload_document))
        .route(
            "/documents/:id",
            get(get_document)
                .put(update_document)
                .delete(delete_document),
        )
        .with_state(ctx)
}
