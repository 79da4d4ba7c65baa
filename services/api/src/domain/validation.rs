//! Input validation. Every check here is pure and runs before any write.

use std::collections::HashSet;

use crate::domain::types::IngredientAmount;

pub const RECIPE_NAME_MAX_LEN: usize = 200;
pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("recipe must contain at least one ingredient")]
    EmptyIngredients,
    #[error("ingredient {0} can only be added once")]
    DuplicateIngredient(i32),
    #[error("ingredient {0} amount must be greater than 0")]
    NonPositiveAmount(i32),
    #[error("cooking time must be at least 1 minute")]
    InvalidCookingTime,
    #[error("recipe name must be 1-200 characters")]
    InvalidRecipeName,
    #[error("recipe image is required")]
    MissingImage,
    #[error("cannot subscribe to yourself")]
    SelfFollow,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email")]
    InvalidEmail,
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyIngredients => "EMPTY_INGREDIENTS",
            Self::DuplicateIngredient(_) => "DUPLICATE_INGREDIENT",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::InvalidCookingTime => "INVALID_COOKING_TIME",
            Self::InvalidRecipeName => "INVALID_RECIPE_NAME",
            Self::MissingImage => "MISSING_IMAGE",
            Self::SelfFollow => "SELF_FOLLOW",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
        }
    }
}

/// Reject an empty list, a repeated ingredient id, or a non-positive amount.
/// Items are checked in order; the first offending item decides the error.
pub fn validate_ingredients(items: &[IngredientAmount]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyIngredients);
    }
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(ValidationError::DuplicateIngredient(item.id));
        }
        if item.amount <= 0 {
            return Err(ValidationError::NonPositiveAmount(item.id));
        }
    }
    Ok(())
}

pub fn validate_cooking_time(minutes: i32) -> Result<(), ValidationError> {
    if minutes < 1 {
        return Err(ValidationError::InvalidCookingTime);
    }
    Ok(())
}

pub fn validate_recipe_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if len == 0 || name.chars().count() > RECIPE_NAME_MAX_LEN {
        return Err(ValidationError::InvalidRecipeName);
    }
    Ok(())
}

pub fn validate_image(image: &str) -> Result<(), ValidationError> {
    if image.trim().is_empty() {
        return Err(ValidationError::MissingImage);
    }
    Ok(())
}

/// Drop repeated tag ids, keeping first occurrences in order.
pub fn dedup_tag_ids(tag_ids: Vec<i32>) -> Vec<i32> {
    let mut seen = HashSet::with_capacity(tag_ids.len());
    tag_ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Username: 1-150 chars of letters, digits and `.@+-_`. `me` is reserved.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        return Err(ValidationError::InvalidUsername);
    }
    if username == "me" {
        return Err(ValidationError::InvalidUsername);
    }
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'));
    if !valid {
        return Err(ValidationError::InvalidUsername);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() > EMAIL_MAX_LEN {
        return Err(ValidationError::InvalidEmail);
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(ValidationError::InvalidEmail),
    }
}
