use super::*;
use crate::geometry::FractionalRect;
use crate::model::AnnotationDraft;

fn record(id: i64, page: u32) -> Annotation {
    let draft = AnnotationDraft::new(page, FractionalRect { x: 0.1, y: 0.1, width: 0.2, height: 0.05 }, "", "");
    Annotation::from_draft(AnnotationId::from(id), draft)
}

fn ids(store: &AnnotationStore) -> Vec<String> {
    store.all().iter().map(|r| r.id.to_string()).collect()
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn all_sorts_by_page_number() {
    let mut store = AnnotationStore::new();
    store.add(record(1, 3));
    store.add(record(2, 1));
    store.add(record(3, 2));
    let pages: Vec<u32> = store.all().iter().map(|r| r.page_number).collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[test]
fn all_keeps_insertion_order_within_a_page() {
    let mut store = AnnotationStore::new();
    store.add(record(10, 2));
    store.add(record(11, 1));
    store.add(record(12, 2));
    store.add(record(13, 1));
    assert_eq!(ids(&store), vec!["11", "13", "10", "12"]);
}

// =============================================================
// Mutations
// =============================================================

#[test]
fn replace_all_discards_previous_records() {
    let mut store = AnnotationStore::new();
    store.add(record(1, 1));
    store.replace_all(vec![record(5, 2), record(6, 1)]);
    assert_eq!(store.len(), 2);
    assert!(!store.contains(&AnnotationId::from(1)));
    assert_eq!(ids(&store), vec!["6", "5"]);
}

#[test]
fn add_with_existing_id_replaces_in_place() {
    let mut store = AnnotationStore::new();
    store.add(record(1, 1));
    let mut changed = record(1, 1);
    changed.comment = "updated".to_owned();
    store.add(changed);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&AnnotationId::from(1)).map(|r| r.comment.as_str()), Some("updated"));
}

#[test]
fn replace_unknown_id_is_rejected() {
    let mut store = AnnotationStore::new();
    let before = store.generation();
    assert!(!store.replace(record(9, 1)));
    assert_eq!(store.generation(), before);
}

#[test]
fn remove_by_id_returns_record() {
    let mut store = AnnotationStore::new();
    store.add(record(1, 1));
    store.add(record(2, 1));
    let removed = store.remove_by_id(&AnnotationId::from(1)).unwrap();
    assert_eq!(removed.id, AnnotationId::from(1));
    assert_eq!(store.len(), 1);
}

#[test]
fn remove_missing_id_is_noop() {
    let mut store = AnnotationStore::new();
    store.add(record(1, 1));
    let before = store.generation();
    assert!(store.remove_by_id(&AnnotationId::from(99)).is_none());
    assert_eq!(store.len(), 1);
    assert_eq!(store.generation(), before);
}

// =============================================================
// Generation
// =============================================================

#[test]
fn every_mutation_bumps_generation() {
    let mut store = AnnotationStore::new();
    assert_eq!(store.generation(), 0);
    store.add(record(1, 1));
    assert_eq!(store.generation(), 1);
    store.replace_all(Vec::new());
    assert_eq!(store.generation(), 2);
    store.add(record(2, 1));
    store.remove_by_id(&AnnotationId::from(2));
    assert_eq!(store.generation(), 4);
    assert!(store.is_empty());
}
