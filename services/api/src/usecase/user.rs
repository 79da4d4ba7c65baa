use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::user::{UserRole, UserStatus};

use crate::domain::access::authenticated;
use crate::domain::repository::{UserRepository, ViewerContextPort};
use crate::domain::types::{Profile, User};
use crate::domain::validation::{validate_email, validate_username};
use crate::error::ApiError;
use crate::usecase::annotate;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiError> {
        let email = input.email.trim().to_owned();
        let username = input.username.trim().to_owned();
        validate_email(&email)?;
        validate_username(&username)?;

        if self.users.exists_by_email(&email).await? {
            return Err(ApiError::EmailTaken);
        }
        if self.users.exists_by_username(&username).await? {
            return Err(ApiError::UsernameTaken);
        }

        let user = User {
            id: Uuid::now_v7(),
            email,
            username,
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.trim().to_owned(),
            role: UserRole::User,
            status: UserStatus::Enabled,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository, V: ViewerContextPort> {
    pub users: U,
    pub viewer_ctx: V,
}

impl<U: UserRepository, V: ViewerContextPort> GetProfileUseCase<U, V> {
    pub async fn execute(&self, viewer: Option<&User>, id: Uuid) -> Result<Profile, ApiError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        annotate::profile(&self.viewer_ctx, viewer, user).await
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository, V: ViewerContextPort> {
    pub users: U,
    pub viewer_ctx: V,
}

impl<U: UserRepository, V: ViewerContextPort> ListUsersUseCase<U, V> {
    pub async fn execute(
        &self,
        viewer: Option<&User>,
        page: PageRequest,
    ) -> Result<Page<Profile>, ApiError> {
        let Page { count, results } = self.users.list(page.clamped()).await?;
        let results = annotate::profiles(&self.viewer_ctx, viewer, results).await?;
        Ok(Page { count, results })
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase;

impl GetMeUseCase {
    /// A user never follows themselves, so the projection needs no lookup.
    pub fn execute(&self, viewer: Option<&User>) -> Result<Profile, ApiError> {
        let user = authenticated(viewer)?;
        Ok(Profile {
            user: user.clone(),
            is_subscribed: false,
        })
    }
}
