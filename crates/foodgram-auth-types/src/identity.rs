//! Gateway-injected identity header extractor.
//!
//! Token issuance and verification live in the identity provider in front of
//! the service. Requests that reach us carry the verified user id in
//! `x-foodgram-user-id`; requests without it are anonymous.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";

/// Verified user identity.
///
/// As a required extractor it returns 401 when the header is absent or is not
/// a UUID. As `Option<IdentityHeaders>` an absent header yields `None` and a
/// malformed one still returns 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
}

enum Header {
    Absent,
    Malformed,
    Valid(Uuid),
}

fn read_header(parts: &Parts) -> Header {
    let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
        return Header::Absent;
    };
    match raw.to_str().ok().and_then(|s| s.parse::<Uuid>().ok()) {
        Some(user_id) => Header::Valid(user_id),
        None => {
            tracing::debug!("rejecting malformed {USER_ID_HEADER} header");
            Header::Malformed
        }
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Values are read synchronously so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let header = read_header(parts);
        async move {
            match header {
                Header::Valid(user_id) => Ok(Self { user_id }),
                Header::Absent | Header::Malformed => Err(StatusCode::UNAUTHORIZED),
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let header = read_header(parts);
        async move {
            match header {
                Header::Absent => Ok(None),
                Header::Malformed => Err(StatusCode::UNAUTHORIZED),
                Header::Valid(user_id) => Ok(Some(Self { user_id })),
            }
        }
    }
}
