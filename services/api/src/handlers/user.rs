use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::{Query, QueryRejection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_domain::pagination::Page;

use crate::domain::types::{Profile, User};
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::handlers::viewer::Viewer;
use crate::state::AppState;
use crate::usecase::user::{
    GetMeUseCase, GetProfileUseCase, ListUsersUseCase, RegisterInput, RegisterUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<Profile> for UserResponse {
    fn from(profile: Profile) -> Self {
        let Profile {
            user,
            is_subscribed,
        } = profile;
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisteredUserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for RegisteredUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

// ── POST /api/users ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), ApiError> {
    let uc = RegisterUseCase {
        users: state.user_repo(),
    };
    let user = uc
        .execute(RegisterInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<UserResponse>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::InvalidQuery)?;
    let uc = ListUsersUseCase {
        users: state.user_repo(),
        viewer_ctx: state.viewer_context(),
    };
    let page = uc
        .execute(viewer.user(), query.page_request(state.page_limit))
        .await?;
    Ok(Json(page.map(UserResponse::from)))
}

// ── GET /api/users/me ────────────────────────────────────────────────────────

pub async fn get_me(Extension(viewer): Extension<Viewer>) -> Result<Json<UserResponse>, ApiError> {
    let profile = GetMeUseCase.execute(viewer.user())?;
    Ok(Json(profile.into()))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let uc = GetProfileUseCase {
        users: state.user_repo(),
        viewer_ctx: state.viewer_context(),
    };
    let profile = uc.execute(viewer.user(), id).await?;
    Ok(Json(profile.into()))
}
