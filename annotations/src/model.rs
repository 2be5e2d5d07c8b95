//! Wire model shared by the browser viewer and the backend.
//!
//! DESIGN
//! ======
//! Field names match the JSON the annotation endpoints exchange, so the same
//! types serialize request bodies in the browser and responses on the server.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::FractionalRect;

/// Highlight color used when a record or draft carries none.
pub const DEFAULT_COLOR: &str = "#ffeb3b";

/// Server-assigned annotation identity.
///
/// Opaque to the client: it is only compared, hashed and substituted into the
/// detail URL. Backends may send it as a JSON number or string; it is written
/// back in the same form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(RawId);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<i64> for AnnotationId {
    fn from(value: i64) -> Self {
        Self(RawId::Number(value))
    }
}

impl From<&str> for AnnotationId {
    fn from(value: &str) -> Self {
        Self(RawId::Text(value.to_owned()))
    }
}

impl From<String> for AnnotationId {
    fn from(value: String) -> Self {
        Self(RawId::Text(value))
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            RawId::Number(n) => write!(f, "{n}"),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

fn default_color() -> String {
    DEFAULT_COLOR.to_owned()
}

/// A persisted highlight on one page of the open document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Identity assigned by the backend on create.
    pub id: AnnotationId,
    /// 1-indexed page the highlight belongs to.
    pub page_number: u32,
    /// Left edge as a fraction of the page width.
    pub x: f64,
    /// Top edge as a fraction of the page height.
    pub y: f64,
    /// Width as a fraction of the page width.
    pub width: f64,
    /// Height as a fraction of the page height.
    pub height: f64,
    /// CSS color of the highlight.
    #[serde(default = "default_color")]
    pub color: String,
    /// Free-text note, possibly empty.
    #[serde(default)]
    pub comment: String,
    /// RFC 3339 creation time, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// RFC 3339 time of the last change, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Annotation {
    /// Build the canonical record for `draft` under a freshly assigned id.
    #[must_use]
    pub fn from_draft(id: AnnotationId, draft: AnnotationDraft) -> Self {
        Self {
            id,
            page_number: draft.page_number,
            x: draft.x,
            y: draft.y,
            width: draft.width,
            height: draft.height,
            color: draft.color,
            comment: draft.comment,
            created_at: None,
            updated_at: None,
        }
    }

    /// The highlighted area as a page-relative rectangle.
    #[must_use]
    pub fn rect(&self) -> FractionalRect {
        FractionalRect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

/// Body of a create request: everything but the identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDraft {
    pub page_number: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub comment: String,
}

impl AnnotationDraft {
    /// Combine a normalized selection with user-entered metadata.
    ///
    /// A blank color falls back to [`DEFAULT_COLOR`].
    #[must_use]
    pub fn new(page_number: u32, rect: FractionalRect, color: &str, comment: &str) -> Self {
        let color = color.trim();
        Self {
            page_number,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: if color.is_empty() { default_color() } else { color.to_owned() },
            comment: comment.to_owned(),
        }
    }
}

/// Sparse metadata update. Only present fields are applied.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl AnnotationPatch {
    /// Whether the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.color.is_none()
    }
}
