use tracing::info;
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::access::{authorize_object, authorize_writer};
use crate::domain::repository::{
    IngredientRepository, RecipeRepository, TagRepository, ViewerContextPort,
};
use crate::domain::types::{
    IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeFilter, RecipeView, User,
};
use crate::domain::validation::{
    ValidationError, dedup_tag_ids, validate_cooking_time, validate_image, validate_ingredients,
    validate_recipe_name,
};
use crate::error::ApiError;
use crate::usecase::annotate;

/// Fail with `IngredientNotFound`/`TagNotFound` when a payload references
/// ids that do not exist. Ids must already be unique.
async fn ensure_references<I: IngredientRepository, T: TagRepository>(
    ingredients: &I,
    tags: &T,
    items: &[IngredientAmount],
    tag_ids: &[i32],
) -> Result<(), ApiError> {
    let ingredient_ids: Vec<i32> = items.iter().map(|item| item.id).collect();
    let found = ingredients.find_by_ids(&ingredient_ids).await?;
    if found.len() != ingredient_ids.len() {
        return Err(ApiError::IngredientNotFound);
    }
    if !tag_ids.is_empty() && tags.find_by_ids(tag_ids).await?.len() != tag_ids.len() {
        return Err(ApiError::TagNotFound);
    }
    Ok(())
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeInput {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

impl CreateRecipeInput {
    pub fn validate(self) -> Result<NewRecipe, ValidationError> {
        validate_ingredients(&self.ingredients)?;
        let name = self.name.trim().to_owned();
        validate_recipe_name(&name)?;
        validate_image(&self.image)?;
        validate_cooking_time(self.cooking_time)?;
        Ok(NewRecipe {
            name,
            image: self.image,
            text: self.text,
            cooking_time: self.cooking_time,
            tag_ids: dedup_tag_ids(self.tags),
            ingredients: self.ingredients,
        })
    }
}

pub struct CreateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, T: TagRepository> {
    pub recipes: R,
    pub ingredients: I,
    pub tags: T,
}

impl<R: RecipeRepository, I: IngredientRepository, T: TagRepository> CreateRecipeUseCase<R, I, T> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        input: CreateRecipeInput,
    ) -> Result<Recipe, ApiError> {
        let actor = authorize_writer(actor)?;
        let recipe = input.validate()?;
        ensure_references(
            &self.ingredients,
            &self.tags,
            &recipe.ingredients,
            &recipe.tag_ids,
        )
        .await?;

        let id = self.recipes.create(actor.id, &recipe).await?;
        info!(recipe_id = id, author_id = %actor.id, "recipe created");

        self.recipes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RecipeNotFound)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

/// Scalar fields left as `None` keep their stored value. Tags and
/// ingredients always replace the stored sets.
pub struct UpdateRecipeInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

impl UpdateRecipeInput {
    pub fn validate(self) -> Result<RecipeChanges, ValidationError> {
        validate_ingredients(&self.ingredients)?;
        let name = self.name.map(|name| name.trim().to_owned());
        if let Some(name) = &name {
            validate_recipe_name(name)?;
        }
        if let Some(image) = &self.image {
            validate_image(image)?;
        }
        if let Some(minutes) = self.cooking_time {
            validate_cooking_time(minutes)?;
        }
        Ok(RecipeChanges {
            name,
            image: self.image,
            text: self.text,
            cooking_time: self.cooking_time,
            tag_ids: dedup_tag_ids(self.tags),
            ingredients: self.ingredients,
        })
    }
}

pub struct UpdateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, T: TagRepository> {
    pub recipes: R,
    pub ingredients: I,
    pub tags: T,
}

impl<R: RecipeRepository, I: IngredientRepository, T: TagRepository> UpdateRecipeUseCase<R, I, T> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        id: i32,
        input: UpdateRecipeInput,
    ) -> Result<Recipe, ApiError> {
        let actor = authorize_writer(actor)?;
        let author_id = self
            .recipes
            .find_author_id(id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        authorize_object(actor, author_id)?;

        let changes = input.validate()?;

        ensure_references(
            &self.ingredients,
            &self.tags,
            &changes.ingredients,
            &changes.tag_ids,
        )
        .await?;

        self.recipes.update(id, &changes).await?;
        info!(recipe_id = id, editor_id = %actor.id, "recipe updated");

        self.recipes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RecipeNotFound)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(&self, actor: Option<&User>, id: i32) -> Result<(), ApiError> {
        let actor = authorize_writer(actor)?;
        let author_id = self
            .recipes
            .find_author_id(id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        authorize_object(actor, author_id)?;

        if !self.recipes.delete(id).await? {
            return Err(ApiError::RecipeNotFound);
        }
        info!(recipe_id = id, editor_id = %actor.id, "recipe deleted");
        Ok(())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository, V: ViewerContextPort> {
    pub recipes: R,
    pub viewer_ctx: V,
}

impl<R: RecipeRepository, V: ViewerContextPort> GetRecipeUseCase<R, V> {
    pub async fn execute(&self, viewer: Option<&User>, id: i32) -> Result<RecipeView, ApiError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        annotate::recipe_view(&self.viewer_ctx, viewer, recipe).await
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ListRecipesInput {
    pub tag_slugs: Vec<String>,
    pub author_id: Option<Uuid>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl ListRecipesInput {
    /// Viewer-relative flags only narrow the list for an authenticated viewer.
    fn into_filter(self, viewer: Option<&User>) -> RecipeFilter {
        let viewer_id = viewer.map(|v| v.id);
        RecipeFilter {
            tag_slugs: self.tag_slugs,
            author_id: self.author_id,
            favorited_by: viewer_id.filter(|_| self.is_favorited),
            in_cart_of: viewer_id.filter(|_| self.is_in_shopping_cart),
        }
    }
}

pub struct ListRecipesUseCase<R: RecipeRepository, V: ViewerContextPort> {
    pub recipes: R,
    pub viewer_ctx: V,
}

impl<R: RecipeRepository, V: ViewerContextPort> ListRecipesUseCase<R, V> {
    pub async fn execute(
        &self,
        viewer: Option<&User>,
        input: ListRecipesInput,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, ApiError> {
        let filter = input.into_filter(viewer);
        let Page { count, results } = self.recipes.list(&filter, page.clamped()).await?;
        let results = annotate::recipe_views(&self.viewer_ctx, viewer, results).await?;
        Ok(Page { count, results })
    }
}
