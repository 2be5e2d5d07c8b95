//! Client-side annotation cache for the open document.
//!
//! DESIGN
//! ======
//! The store mirrors confirmed server state only: the session mutates it from
//! gateway success paths and nowhere else. Every mutation bumps `generation`
//! so an in-flight list request can tell whether its response is stale.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::model::{Annotation, AnnotationId};

/// Insertion-ordered annotation records plus a mutation counter.
#[derive(Clone, Debug, Default)]
pub struct AnnotationStore {
    records: Vec<Annotation>,
    generation: u64,
}

impl AnnotationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record with a fresh server listing.
    pub fn replace_all(&mut self, records: Vec<Annotation>) {
        self.records = records;
        self.bump();
    }

    /// Append a record confirmed by the server. A record with the same id
    /// replaces the existing one in place.
    pub fn add(&mut self, record: Annotation) {
        if let Some(existing) = self.records.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
        } else {
            self.records.push(record);
        }
        self.bump();
    }

    /// Swap in an updated record. Returns `false` if the id is unknown.
    pub fn replace(&mut self, record: Annotation) -> bool {
        let Some(existing) = self.records.iter_mut().find(|r| r.id == record.id) else {
            return false;
        };
        *existing = record;
        self.bump();
        true
    }

    /// Remove and return the record with `id`, if present.
    pub fn remove_by_id(&mut self, id: &AnnotationId) -> Option<Annotation> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        let removed = self.records.remove(index);
        self.bump();
        Some(removed)
    }

    /// Records sorted by page number; equal pages keep insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<&Annotation> {
        let mut sorted: Vec<&Annotation> = self.records.iter().collect();
        sorted.sort_by_key(|r| r.page_number);
        sorted
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.records.iter().find(|r| &r.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Monotonic counter incremented on every mutation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
