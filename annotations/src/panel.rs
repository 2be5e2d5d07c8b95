//! Annotation list entries and the panel/controls seam.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use crate::model::AnnotationId;
use crate::store::AnnotationStore;

/// Shown in place of an empty comment.
pub const EMPTY_COMMENT_PLACEHOLDER: &str = "No comment";

/// One row of the annotation list.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelEntry {
    pub id: AnnotationId,
    pub page_number: u32,
    /// e.g. `"Page 3"`.
    pub page_label: String,
    /// The comment, or [`EMPTY_COMMENT_PLACEHOLDER`].
    pub comment: String,
    pub has_comment: bool,
    pub color: String,
}

/// List rows for the store, ordered by page number.
#[must_use]
pub fn entries(store: &AnnotationStore) -> Vec<PanelEntry> {
    store
        .all()
        .into_iter()
        .map(|record| {
            let has_comment = !record.comment.trim().is_empty();
            PanelEntry {
                id: record.id.clone(),
                page_number: record.page_number,
                page_label: format!("Page {}", record.page_number),
                comment: if has_comment { record.comment.clone() } else { EMPTY_COMMENT_PLACEHOLDER.to_owned() },
                has_comment,
                color: record.color.clone(),
            }
        })
        .collect()
}

/// The annotation panel and its controls, as seen by the session.
pub trait ControlPanel {
    /// Redraw the list with `entries`.
    fn show_entries(&mut self, entries: &[PanelEntry]);

    /// Replace the hint line under the controls.
    fn set_hint(&mut self, hint: &str);

    fn set_save_enabled(&mut self, enabled: bool);

    /// Ask the user to confirm a destructive action.
    fn confirm(&mut self, message: &str) -> bool;

    /// Tell the user something went wrong.
    fn alert(&mut self, message: &str);
}
