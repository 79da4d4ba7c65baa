use tracing::info;

use crate::domain::access::authorize_writer;
use crate::domain::repository::{RecipeCollectionRepository, RecipeRepository};
use crate::domain::types::{RecipeSummary, User};
use crate::error::ApiError;

/// Which per-user recipe set a toggle operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Favorites,
    ShoppingCart,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::ShoppingCart => "shopping_cart",
        }
    }

    fn already_exists(self) -> ApiError {
        match self {
            Self::Favorites => ApiError::FavoriteAlreadyExists,
            Self::ShoppingCart => ApiError::ShoppingCartEntryAlreadyExists,
        }
    }

    fn not_found(self) -> ApiError {
        match self {
            Self::Favorites => ApiError::FavoriteNotFound,
            Self::ShoppingCart => ApiError::ShoppingCartEntryNotFound,
        }
    }
}

// ── AddToCollection ──────────────────────────────────────────────────────────

pub struct AddToCollectionUseCase<C: RecipeCollectionRepository, R: RecipeRepository> {
    pub collection: Collection,
    pub entries: C,
    pub recipes: R,
}

impl<C: RecipeCollectionRepository, R: RecipeRepository> AddToCollectionUseCase<C, R> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        recipe_id: i32,
    ) -> Result<RecipeSummary, ApiError> {
        let actor = authorize_writer(actor)?;
        let summary = self
            .recipes
            .find_summary(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;

        if self.entries.contains(actor.id, recipe_id).await? {
            return Err(self.collection.already_exists());
        }
        // A concurrent add can still win the race; the unique key decides.
        if !self.entries.add(actor.id, recipe_id).await? {
            return Err(self.collection.already_exists());
        }

        info!(
            collection = self.collection.as_str(),
            user_id = %actor.id,
            recipe_id,
            "recipe added"
        );
        Ok(summary)
    }
}

// ── RemoveFromCollection ─────────────────────────────────────────────────────

pub struct RemoveFromCollectionUseCase<C: RecipeCollectionRepository, R: RecipeRepository> {
    pub collection: Collection,
    pub entries: C,
    pub recipes: R,
}

impl<C: RecipeCollectionRepository, R: RecipeRepository> RemoveFromCollectionUseCase<C, R> {
    pub async fn execute(&self, actor: Option<&User>, recipe_id: i32) -> Result<(), ApiError> {
        let actor = authorize_writer(actor)?;
        if self.recipes.find_summary(recipe_id).await?.is_none() {
            return Err(ApiError::RecipeNotFound);
        }
        if !self.entries.remove(actor.id, recipe_id).await? {
            return Err(self.collection.not_found());
        }

        info!(
            collection = self.collection.as_str(),
            user_id = %actor.id,
            recipe_id,
            "recipe removed"
        );
        Ok(())
    }
}
