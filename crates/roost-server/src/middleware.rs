//! Request authentication middleware and the authenticated-context
//! extractor.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use roost_access::{AccessContext, Denial, DenyCode};
use surrealdb::Connection;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity-stage middleware.
///
/// Runs the identity verification stage and attaches the resolved
/// [`AccessContext`] to the request; a denial terminates the request
/// here and no downstream gate executes.
pub async fn authenticate<C: Connection>(
    State(state): State<AppState<C>>,
    mut req: Request,
    next: Next,
) -> Response {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.gatekeeper.authenticate(authorization).await {
        Ok(ctx) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(denial) => ApiError::from(denial).into_response(),
    }
}

/// Extractor for the context the identity stage attached.
///
/// Rejects with `AUTH_REQUIRED` if a route was wired without the
/// authentication middleware.
pub struct Authenticated(pub AccessContext);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccessContext>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| {
                Denial::new(DenyCode::AuthRequired, "Authentication required").into()
            })
    }
}
