use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::{body::Body, extract::Request, http::Response, middleware::Next};

use crate::core::error::Error;
use crate::core::state::AppState;

/// Pulls the token out of an `Authorization: Bearer <token>` header.
///
/// A missing header, another scheme, or extra segments all yield `None`.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split_whitespace();
    let (scheme, token) = (parts.next()?, parts.next()?);

    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some(token)
}

/// Route layer for protected endpoints. Runs the guard chain and hands the
/// resolved account to the handler as an `Extension<User>`.
pub(crate) async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let token = bearer_token(request.headers()).map(str::to_owned);

    let user = state
        .user_controller
        .authenticate_and_authorize(token.as_deref())
        .await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
