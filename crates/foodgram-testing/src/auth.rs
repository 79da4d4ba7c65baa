//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-foodgram-user-id` injected by the
//! identity provider. In tests, `MockAuth` produces that header directly so no
//! real gateway or token is needed.

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

use foodgram_auth_types::identity::USER_ID_HEADER;

/// Identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// Header name/value pair as the gateway would inject it.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        )
    }
}
