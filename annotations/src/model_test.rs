#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// AnnotationId
// =============================================================

#[test]
fn id_accepts_number_and_keeps_it_numeric() {
    let id: AnnotationId = serde_json::from_value(json!(42)).unwrap();
    assert_eq!(id, AnnotationId::from(42));
    assert_eq!(serde_json::to_value(&id).unwrap(), json!(42));
    assert_eq!(id.to_string(), "42");
}

#[test]
fn id_accepts_string() {
    let id: AnnotationId = serde_json::from_value(json!("a1b2")).unwrap();
    assert_eq!(id, AnnotationId::from("a1b2"));
    assert_eq!(id.to_string(), "a1b2");
}

#[test]
fn numeric_and_text_ids_are_distinct() {
    assert_ne!(AnnotationId::from(7), AnnotationId::from("7"));
}

// =============================================================
// Annotation
// =============================================================

#[test]
fn annotation_defaults_missing_color_and_comment() {
    let ann: Annotation = serde_json::from_value(json!({
        "id": 1,
        "page_number": 2,
        "x": 0.1, "y": 0.2, "width": 0.3, "height": 0.05
    }))
    .unwrap();
    assert_eq!(ann.color, DEFAULT_COLOR);
    assert_eq!(ann.comment, "");
    assert!(ann.created_at.is_none());
}

#[test]
fn annotation_tolerates_backend_timestamps() {
    let ann: Annotation = serde_json::from_value(json!({
        "id": 3,
        "page_number": 1,
        "x": 0.0, "y": 0.0, "width": 0.5, "height": 0.5,
        "color": "#00ff00",
        "comment": "see eq. 4",
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-02T10:00:00Z"
    }))
    .unwrap();
    assert_eq!(ann.created_at.as_deref(), Some("2024-05-01T10:00:00Z"));
    assert_eq!(ann.updated_at.as_deref(), Some("2024-05-02T10:00:00Z"));
}

#[test]
fn from_draft_copies_every_field() {
    let draft = AnnotationDraft::new(
        1,
        FractionalRect { x: 0.1, y: 0.2, width: 0.3, height: 0.05 },
        "#ffeb3b",
        "note",
    );
    let ann = Annotation::from_draft(AnnotationId::from(42), draft);
    assert_eq!(ann.id, AnnotationId::from(42));
    assert_eq!(ann.page_number, 1);
    assert_eq!(ann.rect(), FractionalRect { x: 0.1, y: 0.2, width: 0.3, height: 0.05 });
    assert_eq!(ann.comment, "note");
}

// =============================================================
// AnnotationDraft
// =============================================================

#[test]
fn draft_serializes_wire_field_names() {
    let draft = AnnotationDraft::new(
        1,
        FractionalRect { x: 0.1, y: 0.2, width: 0.3, height: 0.05 },
        "#ffeb3b",
        "note",
    );
    let value = serde_json::to_value(&draft).unwrap();
    assert_eq!(
        value,
        json!({
            "page_number": 1,
            "x": 0.1, "y": 0.2, "width": 0.3, "height": 0.05,
            "color": "#ffeb3b",
            "comment": "note"
        })
    );
}

#[test]
fn draft_blank_color_falls_back_to_default() {
    let draft = AnnotationDraft::new(4, FractionalRect::default(), "  ", "");
    assert_eq!(draft.color, DEFAULT_COLOR);
    assert_eq!(draft.page_number, 4);
}

// =============================================================
// AnnotationPatch
// =============================================================

#[test]
fn patch_omits_absent_fields() {
    let patch = AnnotationPatch { comment: Some("x".to_owned()), color: None };
    assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "comment": "x" }));
    assert!(!patch.is_empty());
    assert!(AnnotationPatch::default().is_empty());
}
