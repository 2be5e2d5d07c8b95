//! Persistence seam between the session and the annotation backend.
//!
//! The browser implementation lives in `viewer::http`; tests use an in-memory
//! fake. Implementations never retry on their own: every retry is a user click.

use crate::model::{Annotation, AnnotationDraft, AnnotationId, AnnotationPatch};

/// Failure of one gateway round trip.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("request failed: {0}")]
    Status(u16),
    /// The response body was not the expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// CRUD operations against the annotation collection of one document.
///
/// The futures are awaited on the UI thread and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait AnnotationGateway {
    /// Fetch every annotation of the document.
    async fn list(&self) -> Result<Vec<Annotation>, GatewayError>;

    /// Persist a new annotation and return the server's canonical record.
    async fn create(&self, draft: &AnnotationDraft) -> Result<Annotation, GatewayError>;

    /// Change comment and/or color of an existing annotation.
    async fn update(&self, id: &AnnotationId, patch: &AnnotationPatch) -> Result<Annotation, GatewayError>;

    /// Delete an annotation.
    async fn delete(&self, id: &AnnotationId) -> Result<(), GatewayError>;
}
