//! Annotation service: per-document highlight CRUD.
//!
//! DESIGN
//! ======
//! Records use the same wire type the browser client decodes
//! (`annotations::model::Annotation`), with integer ids from the library-wide
//! counter. Lists come back ordered by page, then id.
//!
//! VALIDATION
//! ==========
//! Creation requires the geometry fields and `color` to be present in the
//! request body; their absence is reported together in one error. Values are
//! not range-checked. `comment` defaults to empty, a blank `color` to the
//! highlight yellow.

#[cfg(test)]
#[path = "annotation_test.rs"]
mod annotation_test;

use annotations::model::{Annotation, AnnotationId, AnnotationPatch, DEFAULT_COLOR};
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::state::AppState;

pub const REQUIRED_FIELDS: [&str; 6] = ["page_number", "x", "y", "width", "height", "color"];

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("invalid annotation body: {0}")]
    InvalidBody(String),
    #[error("annotation not found: {0}")]
    NotFound(i64),
    /// The id path segment is not an integer, so it names no annotation.
    #[error("annotation not found: {0}")]
    UnknownId(String),
}

#[derive(Debug, Deserialize)]
struct CreateBody {
    page_number: u32,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: String,
    #[serde(default)]
    comment: String,
}

fn now() -> Option<String> {
    OffsetDateTime::now_utc().format(&Rfc3339).ok()
}

/// Check a create body before it is decoded.
///
/// # Errors
///
/// [`AnnotationError::MissingFields`] naming every absent required field, or
/// [`AnnotationError::InvalidBody`] when the body is not an object or a field
/// has the wrong type.
fn parse_create(body: &Value) -> Result<CreateBody, AnnotationError> {
    let Some(object) = body.as_object() else {
        return Err(AnnotationError::InvalidBody("expected a JSON object".to_owned()));
    };
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Err(AnnotationError::MissingFields(missing));
    }
    CreateBody::deserialize(body).map_err(|e| AnnotationError::InvalidBody(e.to_string()))
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Annotations of `document`, ordered by page number, then id.
pub async fn list(state: &AppState, document: &str) -> Vec<Annotation> {
    let library = state.library.read().await;
    let mut records = library.annotations(document).to_vec();
    // Stored in creation order, which is id order; the sort is stable.
    records.sort_by_key(|record| record.page_number);
    records
}

/// Store a new annotation on `document`.
///
/// # Errors
///
/// Returns a validation error from the body checks.
pub async fn create(state: &AppState, document: &str, body: &Value) -> Result<Annotation, AnnotationError> {
    let body = parse_create(body)?;
    let color = if body.color.trim().is_empty() { DEFAULT_COLOR.to_owned() } else { body.color };

    let mut library = state.library.write().await;
    let id = library.next_id();
    let stamp = now();
    let record = Annotation {
        id: AnnotationId::from(id),
        page_number: body.page_number,
        x: body.x,
        y: body.y,
        width: body.width,
        height: body.height,
        color,
        comment: body.comment,
        created_at: stamp.clone(),
        updated_at: stamp,
    };
    library
        .documents
        .entry(document.to_owned())
        .or_default()
        .push(record.clone());
    tracing::info!(%document, id, page = record.page_number, "annotation created");
    Ok(record)
}

/// Apply `patch` to annotation `id` of `document`.
///
/// # Errors
///
/// [`AnnotationError::NotFound`] if the document has no such annotation.
pub async fn update(
    state: &AppState,
    document: &str,
    id: i64,
    patch: &AnnotationPatch,
) -> Result<Annotation, AnnotationError> {
    let mut library = state.library.write().await;
    let target = AnnotationId::from(id);
    let record = library
        .documents
        .get_mut(document)
        .and_then(|records| records.iter_mut().find(|r| r.id == target))
        .ok_or(AnnotationError::NotFound(id))?;
    if let Some(comment) = &patch.comment {
        record.comment.clone_from(comment);
    }
    if let Some(color) = &patch.color {
        record.color.clone_from(color);
    }
    record.updated_at = now();
    tracing::info!(%document, id, "annotation updated");
    Ok(record.clone())
}

/// Remove annotation `id` from `document`.
///
/// # Errors
///
/// [`AnnotationError::NotFound`] if the document has no such annotation.
pub async fn delete(state: &AppState, document: &str, id: i64) -> Result<(), AnnotationError> {
    let mut library = state.library.write().await;
    let target = AnnotationId::from(id);
    let records = library.documents.get_mut(document).ok_or(AnnotationError::NotFound(id))?;
    let before = records.len();
    records.retain(|r| r.id != target);
    if records.len() == before {
        return Err(AnnotationError::NotFound(id));
    }
    tracing::info!(%document, id, "annotation deleted");
    Ok(())
}
