use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use foodgram_core::error::error_response;

use crate::domain::validation::ValidationError;

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid query parameters")]
    InvalidQuery,
    #[error("authentication required")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("account suspended")]
    AccountSuspended,
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("recipe is not in favorites")]
    FavoriteNotFound,
    #[error("recipe is not in the shopping cart")]
    ShoppingCartEntryNotFound,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("email is already registered")]
    EmailTaken,
    #[error("username is already taken")]
    UsernameTaken,
    #[error("recipe is already in favorites")]
    FavoriteAlreadyExists,
    #[error("recipe is already in the shopping cart")]
    ShoppingCartEntryAlreadyExists,
    #[error("already subscribed")]
    AlreadySubscribed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.kind(),
            Self::InvalidQuery => "INVALID_QUERY",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::AccountSuspended => "ACCOUNT_SUSPENDED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::FavoriteNotFound => "FAVORITE_NOT_FOUND",
            Self::ShoppingCartEntryNotFound => "SHOPPING_CART_ENTRY_NOT_FOUND",
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::FavoriteAlreadyExists => "FAVORITE_ALREADY_EXISTS",
            Self::ShoppingCartEntryAlreadyExists => "SHOPPING_CART_ENTRY_ALREADY_EXISTS",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidQuery => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::AccountSuspended => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::IngredientNotFound
            | Self::TagNotFound
            | Self::FavoriteNotFound
            | Self::ShoppingCartEntryNotFound
            | Self::SubscriptionNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken
            | Self::UsernameTaken
            | Self::FavoriteAlreadyExists
            | Self::ShoppingCartEntryAlreadyExists
            | Self::AlreadySubscribed => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
