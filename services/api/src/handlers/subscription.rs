use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::{Query, QueryRejection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_domain::pagination::Page;

use crate::domain::types::{Profile, Subscription};
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::handlers::user::UserResponse;
use crate::handlers::viewer::Viewer;
use crate::state::AppState;
use crate::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub author: UserResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            author: Profile {
                user: subscription.author,
                is_subscribed: true,
            }
            .into(),
            recipes: subscription
                .recipes
                .into_iter()
                .map(RecipeSummaryResponse::from)
                .collect(),
            recipes_count: subscription.recipes_count,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<u64>,
}

// ── GET /api/users/subscriptions ─────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u64>,
}

pub async fn list_subscriptions(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    query: Result<Query<SubscriptionListQuery>, QueryRejection>,
) -> Result<Json<Page<SubscriptionResponse>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::InvalidQuery)?;
    let page = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .page_request(state.page_limit);

    let uc = ListSubscriptionsUseCase {
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let subscriptions = uc.execute(viewer.user(), page, query.recipes_limit).await?;
    Ok(Json(subscriptions.map(SubscriptionResponse::from)))
}

// ── POST /api/users/{id}/subscribe ───────────────────────────────────────────

pub async fn subscribe(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(author_id): Path<Uuid>,
    query: Result<Query<RecipesLimitQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    let Query(query) = query.map_err(|_| ApiError::InvalidQuery)?;
    let uc = SubscribeUseCase {
        follows: state.follow_repo(),
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let subscription = uc
        .execute(viewer.user(), author_id, query.recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(subscription.into())))
}

// ── DELETE /api/users/{id}/subscribe ─────────────────────────────────────────

pub async fn unsubscribe(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let uc = UnsubscribeUseCase {
        follows: state.follow_repo(),
        users: state.user_repo(),
    };
    uc.execute(viewer.user(), author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
