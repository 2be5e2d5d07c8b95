//! Annotation REST routes for one document.

#[cfg(test)]
#[path = "annotations_test.rs"]
mod annotations_test;

use annotations::model::{Annotation, AnnotationPatch};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::routes::csrf::CsrfVerified;
use crate::services::annotation::{self as annotation_svc, AnnotationError};
use crate::state::AppState;

pub(crate) fn annotation_error_to_status(err: &AnnotationError) -> StatusCode {
    match err {
        AnnotationError::MissingFields(_) | AnnotationError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        AnnotationError::NotFound(_) | AnnotationError::UnknownId(_) => StatusCode::NOT_FOUND,
    }
}

fn error_response(err: AnnotationError) -> Response {
    (annotation_error_to_status(&err), Json(json!({ "error": err.to_string() }))).into_response()
}

/// Decode a JSON request body whatever its content type.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AnnotationError> {
    serde_json::from_slice(body).map_err(|e| AnnotationError::InvalidBody(e.to_string()))
}

fn parse_id(raw: &str) -> Result<i64, AnnotationError> {
    raw.parse().map_err(|_| AnnotationError::UnknownId(raw.to_owned()))
}

/// `GET /api/documents/{document}/annotations`: list a document's highlights.
pub async fn list(State(state): State<AppState>, Path(document): Path<String>) -> Json<Vec<Annotation>> {
    Json(annotation_svc::list(&state, &document).await)
}

/// `POST /api/documents/{document}/annotations`: create a highlight.
pub async fn create(
    State(state): State<AppState>,
    _csrf: CsrfVerified,
    Path(document): Path<String>,
    body: Bytes,
) -> Response {
    let body: Value = match decode_body(&body) {
        Ok(body) => body,
        Err(e) => return error_response(e),
    };
    match annotation_svc::create(&state, &document, &body).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `PATCH /api/documents/{document}/annotations/{id}`: change comment or color.
pub async fn update(
    State(state): State<AppState>,
    _csrf: CsrfVerified,
    Path((document, id)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };
    let patch: AnnotationPatch = match decode_body(&body) {
        Ok(patch) => patch,
        Err(e) => return error_response(e),
    };
    match annotation_svc::update(&state, &document, id, &patch).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => error_response(e),
    }
}

/// `DELETE /api/documents/{document}/annotations/{id}`: remove a highlight.
pub async fn delete(
    State(state): State<AppState>,
    _csrf: CsrfVerified,
    Path((document, id)): Path<(String, String)>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };
    match annotation_svc::delete(&state, &document, id).await {
        Ok(()) => Json(json!({ "status": "deleted" })).into_response(),
        Err(e) => error_response(e),
    }
}
