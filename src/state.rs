//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the annotation collections of every document, keyed by the document
//! id from the URL, plus one id counter shared by all documents so an id is
//! never reused. Everything lives in memory; a restart starts empty.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::HashMap;
use std::sync::Arc;

use annotations::model::Annotation;
use tokio::sync::RwLock;

/// All annotation collections.
#[derive(Debug, Default)]
pub struct Library {
    /// Annotations per document id, in creation order.
    pub documents: HashMap<String, Vec<Annotation>>,
    last_id: i64,
}

impl Library {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next annotation id.
    pub fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    #[must_use]
    pub fn annotations(&self, document: &str) -> &[Annotation] {
        self.documents.get(document).map_or(&[], Vec::as_slice)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub library: Arc<RwLock<Library>>,
    /// Name of the cookie carrying the CSRF token.
    pub csrf_cookie: Arc<str>,
}

impl AppState {
    #[must_use]
    pub fn new(csrf_cookie: &str) -> Self {
        Self {
            library: Arc::new(RwLock::new(Library::new())),
            csrf_cookie: Arc::from(csrf_cookie),
        }
    }
}
