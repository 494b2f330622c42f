use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{gate::VerifierState, repository::RepositoryState};

/// The user id the mock session resolves to. The real authentication service
/// owns credential validation and would resolve the session cookie to an
/// actual account; until it exists, every authenticated request is the demo
/// user, exactly as the legacy frontend's mock session behaved.
pub const MOCK_SESSION_USER_ID: &str = "user-1";

/// AuthUser
///
/// The resolved identity of an authenticated request. Handlers take this as an
/// argument to require authentication and to stamp created records with the
/// caller's identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any authenticated handler. This cleanly separates
/// authentication (extractor) from business logic (the handler).
///
/// The check is **presence-based**: the request is authenticated when any
/// recognized cookie name is present, via the shared `SessionVerifier`.
/// Cookie contents are never read or validated here, the same documented
/// boundary the route gate has. A deployment with a real session store swaps
/// the verifier, not this extractor.
///
/// Rejection: Returns StatusCode::UNAUTHORIZED (401) when no recognized
/// cookie is present.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    // Allows the extractor to pull the session verifier from the app state.
    VerifierState: FromRef<S>,
    // Allows the extractor to pull the user store for profile resolution.
    RepositoryState: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = VerifierState::from_ref(state);
        let repo = RepositoryState::from_ref(state);

        let jar = CookieJar::from_headers(&parts.headers);
        if !verifier.is_authenticated(&jar) {
            return Err(StatusCode::UNAUTHORIZED);
        }

        // Resolve the mock session to its profile record when the store has
        // one; otherwise fall back to the static demo identity so a bare
        // (unseeded) store still authenticates.
        match repo.get_user(MOCK_SESSION_USER_ID).await {
            Some(user) => Ok(AuthUser {
                id: user.id,
                email: user.email,
                name: user.name,
            }),
            None => Ok(AuthUser {
                id: MOCK_SESSION_USER_ID.to_string(),
                email: "demo@nivaro.com".to_string(),
                name: "Demo User".to_string(),
            }),
        }
    }
}
