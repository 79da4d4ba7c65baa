use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::ApiError;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::handlers::viewer::Viewer;
use crate::state::AppState;
use crate::usecase::collection::{
    AddToCollectionUseCase, Collection, RemoveFromCollectionUseCase,
};

// ── POST /api/recipes/{id}/favorite ──────────────────────────────────────────

pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), ApiError> {
    let uc = AddToCollectionUseCase {
        collection: Collection::Favorites,
        entries: state.favorite_repo(),
        recipes: state.recipe_repo(),
    };
    let summary = uc.execute(viewer.user(), recipe_id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

// ── DELETE /api/recipes/{id}/favorite ────────────────────────────────────────

pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let uc = RemoveFromCollectionUseCase {
        collection: Collection::Favorites,
        entries: state.favorite_repo(),
        recipes: state.recipe_repo(),
    };
    uc.execute(viewer.user(), recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
