//! Selection normalizer: browser text selection → page-relative rectangle.
//!
//! The DOM layer reduces a live `Selection` to a [`SelectionSnapshot`] (plain
//! numbers read at event time); everything after that is decided here.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::geometry::{ClientRect, FractionalRect};
use crate::model::AnnotationDraft;

/// The page element enclosing a selection, measured at read time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageBox {
    /// 1-indexed page number from the element's `data-page-number`.
    pub page_number: u32,
    /// Current on-screen box of the page element.
    pub rect: ClientRect,
}

/// What the browser reported about the current selection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionSnapshot {
    /// No selection at all, or a collapsed (caret) range.
    pub collapsed: bool,
    /// Bounding client rect of the selected range.
    pub bounds: ClientRect,
    /// The single page containing the whole range, if there is one.
    pub page: Option<PageBox>,
}

/// Why a selection cannot become an annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("selection is empty")]
    Collapsed,
    #[error("selection is not inside a single page")]
    NoPage,
    #[error("selection has no width or height")]
    ZeroSize,
    #[error("selection does not overlap its page")]
    OutsidePage,
}

/// A normalized selection waiting to be saved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingSelection {
    pub page_number: u32,
    pub rect: FractionalRect,
}

impl PendingSelection {
    /// Build the create request body for this selection.
    #[must_use]
    pub fn draft(&self, color: &str, comment: &str) -> AnnotationDraft {
        AnnotationDraft::new(self.page_number, self.rect, color, comment)
    }
}

/// Normalize a snapshot against its page box.
///
/// # Errors
///
/// Returns the [`Rejection`] describing why the snapshot is unusable.
pub fn normalize(snapshot: &SelectionSnapshot) -> Result<PendingSelection, Rejection> {
    if snapshot.collapsed {
        return Err(Rejection::Collapsed);
    }
    let Some(page) = snapshot.page.filter(|p| p.page_number > 0) else {
        return Err(Rejection::NoPage);
    };
    if snapshot.bounds.is_degenerate() {
        return Err(Rejection::ZeroSize);
    }
    let rect = FractionalRect::relative_to(&snapshot.bounds, &page.rect).ok_or(Rejection::OutsidePage)?;
    Ok(PendingSelection { page_number: page.page_number, rect })
}

/// Holder of the single pending selection.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    pending: Option<PendingSelection>,
}

impl SelectionState {
    /// Replace the pending selection with `snapshot`, or clear it when the
    /// snapshot is rejected.
    ///
    /// # Errors
    ///
    /// Returns the rejection; the pending selection is cleared in that case.
    pub fn capture(&mut self, snapshot: &SelectionSnapshot) -> Result<PendingSelection, Rejection> {
        match normalize(snapshot) {
            Ok(selection) => {
                self.pending = Some(selection);
                Ok(selection)
            }
            Err(rejection) => {
                log::debug!("selection rejected: {rejection}");
                self.pending = None;
                Err(rejection)
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingSelection> {
        self.pending
    }

    /// Whether the save action should be enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.pending.is_some()
    }
}
