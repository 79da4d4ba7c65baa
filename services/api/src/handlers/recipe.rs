use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::{Query, QueryRejection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_domain::pagination::Page;

use crate::domain::types::{
    IngredientAmount, Profile, RecipeIngredient, RecipeSummary, RecipeView,
};
use crate::error::ApiError;
use crate::handlers::tag::TagResponse;
use crate::handlers::user::UserResponse;
use crate::handlers::viewer::Viewer;
use crate::handlers::{PageQuery, query_flag};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    ListRecipesInput, ListRecipesUseCase, UpdateRecipeInput, UpdateRecipeUseCase,
};
use crate::usecase::annotate;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(item: RecipeIngredient) -> Self {
        Self {
            id: item.ingredient_id,
            name: item.name,
            measurement_unit: item.measurement_unit,
            amount: item.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        let RecipeView {
            recipe,
            author_is_subscribed,
            is_favorited,
            is_in_shopping_cart,
        } = view;
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
            author: Profile {
                user: recipe.author,
                is_subscribed: author_is_subscribed,
            }
            .into(),
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            is_favorited,
            is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Short projection used by favorites, the cart and subscriptions.
#[derive(Debug, Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            image: summary.image,
            cooking_time: summary.cooking_time,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

impl From<IngredientAmountRequest> for IngredientAmount {
    fn from(item: IngredientAmountRequest) -> Self {
        Self {
            id: item.id,
            amount: item.amount,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountRequest>,
    #[serde(default)]
    pub tags: Vec<i32>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Scalar fields are optional; `ingredients` and `tags` always replace the
/// stored sets (missing means empty).
#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountRequest>,
    #[serde(default)]
    pub tags: Vec<i32>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

// ── GET /api/recipes ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Tag slugs, any-of. Repeat the key for several tags.
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<Uuid>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

pub async fn list_recipes(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    query: Result<Query<RecipeListQuery>, QueryRejection>,
) -> Result<Json<Page<RecipeResponse>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::InvalidQuery)?;
    let page = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .page_request(state.page_limit);
    let input = ListRecipesInput {
        tag_slugs: query.tags,
        author_id: query.author,
        is_favorited: query_flag(query.is_favorited.as_deref()),
        is_in_shopping_cart: query_flag(query.is_in_shopping_cart.as_deref()),
    };

    let uc = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        viewer_ctx: state.viewer_context(),
    };
    let recipes = uc.execute(viewer.user(), input, page).await?;
    Ok(Json(recipes.map(RecipeResponse::from)))
}

// ── GET /api/recipes/{id} ────────────────────────────────────────────────────

pub async fn get_recipe(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let uc = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        viewer_ctx: state.viewer_context(),
    };
    Ok(Json(uc.execute(viewer.user(), id).await?.into()))
}

// ── POST /api/recipes ────────────────────────────────────────────────────────

pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(body): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let uc = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
    };
    let recipe = uc
        .execute(
            viewer.user(),
            CreateRecipeInput {
                name: body.name,
                image: body.image,
                text: body.text,
                cooking_time: body.cooking_time,
                tags: body.tags,
                ingredients: body.ingredients.into_iter().map(Into::into).collect(),
            },
        )
        .await?;
    let view = annotate::recipe_view(&state.viewer_context(), viewer.user(), recipe).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── PATCH /api/recipes/{id} ──────────────────────────────────────────────────

pub async fn update_recipe(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let uc = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
    };
    let recipe = uc
        .execute(
            viewer.user(),
            id,
            UpdateRecipeInput {
                name: body.name,
                image: body.image,
                text: body.text,
                cooking_time: body.cooking_time,
                tags: body.tags,
                ingredients: body.ingredients.into_iter().map(Into::into).collect(),
            },
        )
        .await?;
    let view = annotate::recipe_view(&state.viewer_context(), viewer.user(), recipe).await?;
    Ok(Json(view.into()))
}

// ── DELETE /api/recipes/{id} ─────────────────────────────────────────────────

pub async fn delete_recipe(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let uc = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    uc.execute(viewer.user(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
