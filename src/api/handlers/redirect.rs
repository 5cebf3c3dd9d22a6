//! Handlers for identifier resolution and the catch-all fallback.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, warn};

use crate::api::dto::url::ShortenedUrlResponse;
use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

const JSON_SUFFIX: &str = ".json";

/// Resolves an identifier.
///
/// # Endpoints
///
/// - `GET /{identifier}` - records a visit and answers `302 Found` with the
///   original URL; unknown identifiers redirect to the fallback URL
/// - `GET /{identifier}.json` - returns `{"original", "shortened"}` without
///   recording a visit; unknown identifiers return 404
///
/// # Errors
///
/// Returns 404 Not Found for unknown identifiers on the JSON variant.
/// Returns 500 Internal Server Error on storage errors.
pub async fn resolve_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    resolve(&state, &identifier).await
}

/// Resolves a single-segment path that is also claimed by a static route.
///
/// `GET /new` lands here: `new` is the identifier of key 30344, while
/// `POST /new` registers URLs.
pub async fn resolve_path_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, AppError> {
    resolve(&state, uri.path().trim_start_matches('/')).await
}

/// Redirects any unmatched route to the fallback URL.
pub async fn fallback_handler(State(state): State<AppState>) -> Response {
    found(&state.fallback_url)
}

async fn resolve(state: &AppState, identifier: &str) -> Result<Response, AppError> {
    if let Some(identifier) = identifier.strip_suffix(JSON_SUFFIX) {
        return describe(state, identifier).await;
    }

    match state.registry.resolve(identifier).await? {
        Resolution::Found(record) => {
            debug!(
                identifier = %identifier,
                views = record.view_count,
                "Redirecting to {}",
                record.original
            );
            Ok(found(&record.original))
        }
        Resolution::NotFound => Ok(found(&state.fallback_url)),
    }
}

async fn describe(state: &AppState, identifier: &str) -> Result<Response, AppError> {
    let Some(record) = state.registry.lookup(identifier).await?.into_record() else {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "identifier": identifier }),
        ));
    };

    let body = ShortenedUrlResponse {
        shortened: state.registry.shortened_url(&record),
        original: record.original,
    };

    Ok(Json(body).into_response())
}

/// Builds a `302 Found` response pointing at `location`.
///
/// ASCII targets are sent as stored; anything else is sent as its
/// percent-encoded serialization.
pub fn found(location: &str) -> Response {
    let literal = location
        .is_ascii()
        .then(|| HeaderValue::from_str(location).ok())
        .flatten();

    let value = literal.or_else(|| {
        url::Url::parse(location)
            .ok()
            .and_then(|u| HeaderValue::from_str(u.as_str()).ok())
    });

    match value {
        Some(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        None => {
            warn!("Cannot redirect to {:?}", location);
            AppError::internal("Invalid redirect target", serde_json::Value::Null).into_response()
        }
    }
}
