use super::*;
use crate::geometry::FractionalRect;
use crate::model::{Annotation, AnnotationDraft};

fn record(id: i64, page: u32, comment: &str) -> Annotation {
    let draft = AnnotationDraft::new(page, FractionalRect { x: 0.0, y: 0.0, width: 0.1, height: 0.1 }, "", comment);
    Annotation::from_draft(AnnotationId::from(id), draft)
}

#[test]
fn entries_are_ordered_by_page() {
    let mut store = AnnotationStore::new();
    store.add(record(1, 3, "c"));
    store.add(record(2, 1, "a"));
    store.add(record(3, 2, "b"));
    let pages: Vec<u32> = entries(&store).iter().map(|e| e.page_number).collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[test]
fn entry_shows_label_comment_and_color() {
    let mut store = AnnotationStore::new();
    store.add(record(7, 12, "check this"));
    let rows = entries(&store);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, AnnotationId::from(7));
    assert_eq!(rows[0].page_label, "Page 12");
    assert_eq!(rows[0].comment, "check this");
    assert!(rows[0].has_comment);
    assert_eq!(rows[0].color, crate::model::DEFAULT_COLOR);
}

#[test]
fn empty_comment_uses_placeholder() {
    let mut store = AnnotationStore::new();
    store.add(record(1, 1, ""));
    store.add(record(2, 1, "   "));
    for row in entries(&store) {
        assert_eq!(row.comment, EMPTY_COMMENT_PLACEHOLDER);
        assert!(!row.has_comment);
    }
}

#[test]
fn empty_store_has_no_entries() {
    assert!(entries(&AnnotationStore::new()).is_empty());
}
