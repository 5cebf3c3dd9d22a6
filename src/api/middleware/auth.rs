//! HTTP Basic authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use serde_json::{Value, json};

use crate::{error::AppError, state::AppState};

/// Authenticates requests using HTTP Basic credentials.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(username:password)
/// ```
///
/// # Errors
///
/// - `401 Unauthorized` with `WWW-Authenticate: Basic realm="URL Shortener"`
///   if the `Authorization` header is missing
/// - `400 Bad Request` if the header is not a well-formed Basic credential
/// - `403 Forbidden` if the credentials are wrong
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, handler::Handler, routing::post, middleware};
/// use crate::api::middleware::auth;
///
/// let register = register_handler.layer(middleware::from_fn_with_state(state, auth::layer));
/// let protected = Router::new().route("/new", post(register));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    if !parts.headers.contains_key(header::AUTHORIZATION) {
        return Err(AppError::unauthorized("Authorization Required", Value::Null));
    }

    let AuthBasic((username, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::bad_request(
                "Bad Request",
                json!({"reason": "Authorization header is not valid Basic credentials"}),
            )
        })?;

    st.auth_service
        .authenticate(&username, password.as_deref().unwrap_or_default())?;

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
