//! Resolve the gateway identity into the acting user once per request.

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The acting user, `None` for anonymous requests.
///
/// An identity without a registered profile is treated as anonymous.
#[derive(Debug, Clone, Default)]
pub struct Viewer(pub Option<User>);

impl Viewer {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Load the [`Viewer`] into request extensions and turn away writes from
/// suspended accounts before any handler runs.
pub async fn load_viewer(
    State(state): State<AppState>,
    identity: Result<Option<IdentityHeaders>, StatusCode>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = identity.map_err(|_| ApiError::Unauthorized)?;
    let user = match identity {
        Some(identity) => state.user_repo().find_by_id(identity.user_id).await?,
        None => None,
    };

    if let Some(user) = &user {
        if user.status.is_blocked() && !is_safe(request.method()) {
            tracing::debug!(user_id = %user.id, method = %request.method(), "write from suspended account");
            return Err(ApiError::AccountSuspended);
        }
    }

    request.extensions_mut().insert(Viewer(user));
    Ok(next.run(request).await)
}
