use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::domain::shopping_list::SHOPPING_LIST_FILENAME;
use crate::error::ApiError;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::handlers::viewer::Viewer;
use crate::state::AppState;
use crate::usecase::collection::{
    AddToCollectionUseCase, Collection, RemoveFromCollectionUseCase,
};
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── POST /api/recipes/{id}/shopping_cart ─────────────────────────────────────

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), ApiError> {
    let uc = AddToCollectionUseCase {
        collection: Collection::ShoppingCart,
        entries: state.shopping_cart_repo(),
        recipes: state.recipe_repo(),
    };
    let summary = uc.execute(viewer.user(), recipe_id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

// ── DELETE /api/recipes/{id}/shopping_cart ───────────────────────────────────

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let uc = RemoveFromCollectionUseCase {
        collection: Collection::ShoppingCart,
        entries: state.shopping_cart_repo(),
        recipes: state.recipe_repo(),
    };
    uc.execute(viewer.user(), recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/recipes/download_shopping_cart ──────────────────────────────────

pub async fn download_shopping_cart(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<impl IntoResponse, ApiError> {
    let uc = DownloadShoppingListUseCase {
        repo: state.shopping_cart_repo(),
    };
    let body = uc.execute(viewer.user()).await?;
    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
        ),
    ];
    Ok((headers, body))
}
