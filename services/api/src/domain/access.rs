//! Per-request access rules.
//!
//! Reads are open to everyone. Writes need an authenticated, non-suspended
//! user. Writes to an owned object additionally need the owner or a moderator.

use uuid::Uuid;

use crate::domain::types::User;
use crate::error::ApiError;

/// Return the acting user for reads that need an identity.
pub fn authenticated(actor: Option<&User>) -> Result<&User, ApiError> {
    actor.ok_or(ApiError::Unauthorized)
}

/// Return the acting user if they may perform writes at all.
///
/// Suspension is checked before anything else a caller may check, so a
/// blocked author cannot edit even their own recipes.
pub fn authorize_writer(actor: Option<&User>) -> Result<&User, ApiError> {
    let actor = authenticated(actor)?;
    if actor.status.is_blocked() {
        return Err(ApiError::AccountSuspended);
    }
    Ok(actor)
}

/// Object-level write check: the writer must own the object or moderate.
///
/// Expects a writer already cleared by [`authorize_writer`].
pub fn authorize_object(actor: &User, owner_id: Uuid) -> Result<(), ApiError> {
    if actor.id == owner_id || actor.role.is_moderator() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
