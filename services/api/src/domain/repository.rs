#![allow(async_fn_in_trait)]

use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    CartLine, Ingredient, NewRecipe, Recipe, RecipeChanges, RecipeFilter, RecipeSummary, Tag,
    User,
};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, ApiError>;
    async fn exists_by_username(&self, username: &str) -> Result<bool, ApiError>;
    /// Insert a new account. Unique violations map to `EmailTaken`/`UsernameTaken`.
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError>;
}

pub trait IngredientRepository: Send + Sync {
    /// Ingredients ordered by name. `prefix` is a case-insensitive name prefix.
    async fn list(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, ApiError>;
}

pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, ApiError>;
}

/// Repository for recipes and their tag and ingredient sets.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError>;
    async fn find_author_id(&self, id: i32) -> Result<Option<Uuid>, ApiError>;
    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, ApiError>;

    /// Newest first.
    async fn list(&self, filter: &RecipeFilter, page: PageRequest)
    -> Result<Page<Recipe>, ApiError>;

    /// Insert the recipe with its tags and line items atomically. Returns the new id.
    async fn create(&self, author_id: Uuid, recipe: &NewRecipe) -> Result<i32, ApiError>;

    /// Apply scalar changes and replace tags and line items atomically.
    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), ApiError>;

    /// Delete a recipe. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;

    async fn list_summaries_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, ApiError>;

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, ApiError>;
}

/// A per-user set of recipes (favorites, shopping cart).
pub trait RecipeCollectionRepository: Send + Sync {
    async fn contains(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError>;

    /// Add the recipe. Returns `false` if it was already present.
    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError>;

    /// Remove the recipe. Returns `true` if a row was deleted.
    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError>;
}

pub trait ShoppingListRepository: Send + Sync {
    /// Every ingredient line of every recipe in the user's cart, unaggregated.
    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, ApiError>;
}

/// Repository for follower -> author subscriptions.
pub trait FollowRepository: Send + Sync {
    async fn contains(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError>;

    /// Returns `false` if the subscription already existed.
    async fn add(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError>;

    /// Returns `true` if a row was deleted.
    async fn remove(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError>;

    /// Followed authors, most recently followed first.
    async fn list_authors(&self, user_id: Uuid, page: PageRequest)
    -> Result<Page<User>, ApiError>;
}

/// Batch lookups of the viewer's relationships, used to annotate responses.
pub trait ViewerContextPort: Send + Sync {
    async fn favorited_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, ApiError>;

    async fn carted_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, ApiError>;

    async fn followed_author_ids(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ApiError>;
}
