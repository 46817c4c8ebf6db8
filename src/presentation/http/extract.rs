use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;

use crate::application::access::Identity;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// `axum::Json` with rejections rendered as JSON 400s.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with rejections rendered as JSON 400s.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// `axum::extract::Query` with rejections rendered as JSON 400s.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

// Caller identity: the `X-User-Id` header when present, otherwise the
// configured demo user.
#[axum::async_trait]
impl FromRequestParts<AppContext> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, ctx: &AppContext) -> Result<Self, AppError> {
        let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(Identity::new(ctx.cfg.demo_user_id));
        };
        raw.to_str()
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(Identity::new)
            .ok_or_else(|| AppError::bad_request("X-User-Id must be a positive integer"))
    }
}
