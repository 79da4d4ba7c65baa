use tracing::info;
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::access::{authenticated, authorize_writer};
use crate::domain::repository::{FollowRepository, RecipeRepository, UserRepository};
use crate::domain::types::{Subscription, User};
use crate::domain::validation::ValidationError;
use crate::error::ApiError;

async fn subscription_for<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<Subscription, ApiError> {
    let preview = recipes
        .list_summaries_by_author(author.id, recipes_limit)
        .await?;
    let recipes_count = recipes.count_by_author(author.id).await?;
    Ok(Subscription {
        author,
        recipes: preview,
        recipes_count,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<F: FollowRepository, U: UserRepository, R: RecipeRepository> {
    pub follows: F,
    pub users: U,
    pub recipes: R,
}

impl<F: FollowRepository, U: UserRepository, R: RecipeRepository> SubscribeUseCase<F, U, R> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, ApiError> {
        let actor = authorize_writer(actor)?;
        if actor.id == author_id {
            return Err(ValidationError::SelfFollow.into());
        }
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if self.follows.contains(actor.id, author_id).await? {
            return Err(ApiError::AlreadySubscribed);
        }
        if !self.follows.add(actor.id, author_id).await? {
            return Err(ApiError::AlreadySubscribed);
        }

        info!(user_id = %actor.id, author_id = %author_id, "subscribed");
        subscription_for(&self.recipes, author, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<F: FollowRepository, U: UserRepository> {
    pub follows: F,
    pub users: U,
}

impl<F: FollowRepository, U: UserRepository> UnsubscribeUseCase<F, U> {
    pub async fn execute(&self, actor: Option<&User>, author_id: Uuid) -> Result<(), ApiError> {
        let actor = authorize_writer(actor)?;
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        if !self.follows.remove(actor.id, author_id).await? {
            return Err(ApiError::SubscriptionNotFound);
        }

        info!(user_id = %actor.id, author_id = %author_id, "unsubscribed");
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<F: FollowRepository, R: RecipeRepository> {
    pub follows: F,
    pub recipes: R,
}

impl<F: FollowRepository, R: RecipeRepository> ListSubscriptionsUseCase<F, R> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<Subscription>, ApiError> {
        let actor = authenticated(actor)?;
        let Page { count, results } = self.follows.list_authors(actor.id, page.clamped()).await?;

        let mut subscriptions = Vec::with_capacity(results.len());
        for author in results {
            subscriptions.push(subscription_for(&self.recipes, author, recipes_limit).await?);
        }
        Ok(Page {
            count,
            results: subscriptions,
        })
    }
}
