//! Handler for URL registration.

use axum::{
    Form, Json,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
};
use serde_json::{Value, json};

use crate::api::dto::url::{RegisterParams, ShortenedUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Message returned when the `url` parameter is absent.
pub const MISSING_URL_MESSAGE: &str = "'url' parameter is missing";

/// Registers a URL, or returns the existing registration for it.
///
/// # Endpoint
///
/// `POST /new` (HTTP Basic authentication required)
///
/// The `url` parameter is read from an `application/x-www-form-urlencoded`
/// body, falling back to the query string.
///
/// # Response
///
/// ```json
/// {
///   "original": "http://www.amazon.com",
///   "shortened": "http://localhost:3000/1"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is missing or is not an HTTP(S) URL, or
/// if the query string cannot be parsed and the body carries no `url`.
pub async fn register_handler(
    State(state): State<AppState>,
    query: Result<Query<RegisterParams>, QueryRejection>,
    form: Result<Form<RegisterParams>, FormRejection>,
) -> Result<Json<ShortenedUrlResponse>, AppError> {
    let from_body = form.ok().and_then(|Form(params)| params.url);

    let url = match (from_body, query) {
        (Some(url), _) => Some(url),
        (None, Ok(Query(params))) => params.url,
        (None, Err(rejection)) => {
            return Err(AppError::bad_request(
                "Invalid query string",
                json!({ "reason": rejection.body_text() }),
            ));
        }
    };

    let Some(url) = url else {
        return Err(AppError::bad_request(MISSING_URL_MESSAGE, Value::Null));
    };

    let record = state.registry.register(&url).await?;

    Ok(Json(ShortenedUrlResponse {
        shortened: state.registry.shortened_url(&record),
        original: record.original,
    }))
}
