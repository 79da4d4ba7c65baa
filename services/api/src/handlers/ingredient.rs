use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::{Deserialize, Serialize};

use crate::domain::types::Ingredient;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::ingredient::{GetIngredientUseCase, ListIngredientsUseCase};

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

// ── GET /api/ingredients ─────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct IngredientSearchQuery {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

pub async fn list_ingredients(
    State(state): State<AppState>,
    query: Result<Query<IngredientSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<IngredientResponse>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::InvalidQuery)?;
    let uc = ListIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredients = uc.execute(query.name.as_deref()).await?;
    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

// ── GET /api/ingredients/{id} ────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, ApiError> {
    let uc = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}
