use crate::domain::access::authenticated;
use crate::domain::repository::ShoppingListRepository;
use crate::domain::shopping_list::{ShoppingListItem, aggregate, render};
use crate::domain::types::User;
use crate::error::ApiError;

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<S: ShoppingListRepository> {
    pub repo: S,
}

impl<S: ShoppingListRepository> DownloadShoppingListUseCase<S> {
    pub async fn items(&self, actor: Option<&User>) -> Result<Vec<ShoppingListItem>, ApiError> {
        let actor = authenticated(actor)?;
        let lines = self.repo.cart_lines(actor.id).await?;
        Ok(aggregate(lines))
    }

    /// The rendered plain-text list.
    pub async fn execute(&self, actor: Option<&User>) -> Result<String, ApiError> {
        let items = self.items(actor).await?;
        Ok(render(&items))
    }
}
