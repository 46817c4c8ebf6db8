use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::store_error::is_conflict;
use crate::application::use_cases::users::create_user::CreateUser;
use crate::application::use_cases::users::get_user::GetUser;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::presentation::http::error::AppError;
use crate::presentation::http::extract::{JsonBody, PathParam};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user; the credential is never returned.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
        }
    }
}

#[utoipa::path(post, path = "/api/users", tag = "Users", request_body = CreateUserRequest,
    responses((status = 201, body = UserResponse), (status = 400), (status = 409), (status = 500)))]
pub async fn create_user(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::bad_request("username: must not be empty"));
    }
    let repo = ctx.user_repo();
    let uc = CreateUser {
        repo: repo.as_ref(),
    };
    let user = match uc.execute(username, &req.password).await {
        Ok(user) => user,
        Err(e) if is_conflict(&e) => {
            return Err(AppError::Conflict("Username already taken".into()));
        }
        Err(e) => return Err(AppError::internal("Failed to create user")(e)),
    };
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses((status = 200, body = UserResponse), (status = 404), (status = 500)))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(id)
        .await
        .map_err(AppError::internal("Failed to fetch user"))?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(user.into()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:id", get(get_user))
        .with_state(ctx)
}
