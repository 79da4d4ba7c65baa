//! Annotate users and recipes with the viewer's relationship to them.
//!
//! Anonymous viewers get `false` everywhere without touching storage.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::repository::ViewerContextPort;
use crate::domain::types::{Profile, Recipe, RecipeView, User};
use crate::error::ApiError;

pub async fn profiles<V: ViewerContextPort>(
    ctx: &V,
    viewer: Option<&User>,
    users: Vec<User>,
) -> Result<Vec<Profile>, ApiError> {
    let followed: HashSet<Uuid> = match viewer {
        Some(viewer) if !users.is_empty() => {
            let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
            ctx.followed_author_ids(viewer.id, &ids)
                .await?
                .into_iter()
                .collect()
        }
        _ => HashSet::new(),
    };
    Ok(users
        .into_iter()
        .map(|user| Profile {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

pub async fn profile<V: ViewerContextPort>(
    ctx: &V,
    viewer: Option<&User>,
    user: User,
) -> Result<Profile, ApiError> {
    let id = user.id;
    profiles(ctx, viewer, vec![user])
        .await?
        .pop()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("user {id} lost during annotation")))
}

pub async fn recipe_views<V: ViewerContextPort>(
    ctx: &V,
    viewer: Option<&User>,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeView>, ApiError> {
    let Some(viewer) = viewer.filter(|_| !recipes.is_empty()) else {
        return Ok(recipes
            .into_iter()
            .map(|recipe| RecipeView {
                recipe,
                author_is_subscribed: false,
                is_favorited: false,
                is_in_shopping_cart: false,
            })
            .collect());
    };

    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let mut author_ids: Vec<Uuid> = recipes.iter().map(|r| r.author.id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let favorited: HashSet<i32> = ctx
        .favorited_recipe_ids(viewer.id, &recipe_ids)
        .await?
        .into_iter()
        .collect();
    let carted: HashSet<i32> = ctx
        .carted_recipe_ids(viewer.id, &recipe_ids)
        .await?
        .into_iter()
        .collect();
    let followed: HashSet<Uuid> = ctx
        .followed_author_ids(viewer.id, &author_ids)
        .await?
        .into_iter()
        .collect();

    Ok(recipes
        .into_iter()
        .map(|recipe| RecipeView {
            author_is_subscribed: followed.contains(&recipe.author.id),
            is_favorited: favorited.contains(&recipe.id),
            is_in_shopping_cart: carted.contains(&recipe.id),
            recipe,
        })
        .collect())
}

pub async fn recipe_view<V: ViewerContextPort>(
    ctx: &V,
    viewer: Option<&User>,
    recipe: Recipe,
) -> Result<RecipeView, ApiError> {
    let id = recipe.id;
    recipe_views(ctx, viewer, vec![recipe])
        .await?
        .pop()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("recipe {id} lost during annotation")))
}
