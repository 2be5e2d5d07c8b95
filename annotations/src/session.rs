//! Annotation session: one open document's annotations, end to end.
//!
//! ARCHITECTURE
//! ============
//! The session owns the store, the pending selection and the overlay renderer,
//! and talks to the backend through an [`AnnotationGateway`]. Every store
//! mutation happens after a confirmed gateway response; failures are turned
//! into panel hints/alerts and returned to the caller, never retried.
//!
//! CONCURRENCY
//! ===========
//! Single-threaded. Methods take `&self` so several operations can be in
//! flight on the UI thread at once; interior `RefCell` borrows are always
//! released before an `.await`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Ref, RefCell};

use crate::gateway::{AnnotationGateway, GatewayError};
use crate::model::{Annotation, AnnotationId, AnnotationPatch};
use crate::overlay::{OverlayRenderer, OverlaySurface};
use crate::panel::{self, ControlPanel};
use crate::selection::{PendingSelection, Rejection, SelectionSnapshot, SelectionState};
use crate::store::AnnotationStore;

pub const HINT_SELECT_TEXT: &str = "Select text on a page to create a highlight.";
pub const HINT_LIST_FAILED: &str = "Annotations could not be loaded.";
pub const HINT_SAVE_FAILED: &str = "Saving failed. Please try again.";
pub const HINT_SAVED: &str = "Highlight saved.";
pub const CONFIRM_DELETE: &str = "Delete this highlight?";
pub const ALERT_DELETE_FAILED: &str = "The highlight could not be deleted.";

/// Requests [`AnnotationSession::load_latest`] makes before giving up on a
/// fresh list.
pub const LOAD_ATTEMPTS: usize = 3;

fn selection_hint(page_number: u32) -> String {
    format!("Selection on page {page_number}. Add a comment and save.")
}

/// Failure of a session operation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no text is selected")]
    NoSelection,
    #[error("a save is already in progress")]
    SaveInProgress,
    #[error("annotation {0} is not loaded")]
    UnknownAnnotation(AnnotationId),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// What happened to a list response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store now holds this many records.
    Applied(usize),
    /// The store changed while the request was in flight; response dropped.
    Stale,
}

/// What happened to a delete request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
}

struct SessionState<S: OverlaySurface> {
    store: AnnotationStore,
    selection: SelectionState,
    overlays: OverlayRenderer<S>,
    saving: bool,
}

impl<S: OverlaySurface> SessionState<S> {
    fn render(&mut self) -> usize {
        let Self { store, overlays, .. } = self;
        overlays.render_pass(store.iter())
    }
}

/// Annotation state and workflows for one open document.
pub struct AnnotationSession<G, S: OverlaySurface, P> {
    gateway: G,
    state: RefCell<SessionState<S>>,
    panel: RefCell<P>,
}

impl<G, S, P> AnnotationSession<G, S, P>
where
    G: AnnotationGateway,
    S: OverlaySurface,
    P: ControlPanel,
{
    /// Start with an empty store, no selection and the save action disabled.
    pub fn new(gateway: G, surface: S, mut panel: P) -> Self {
        panel.set_save_enabled(false);
        panel.set_hint(HINT_SELECT_TEXT);
        panel.show_entries(&[]);
        Self {
            gateway,
            state: RefCell::new(SessionState {
                store: AnnotationStore::new(),
                selection: SelectionState::default(),
                overlays: OverlayRenderer::new(surface),
                saving: false,
            }),
            panel: RefCell::new(panel),
        }
    }

    /// Fetch the document's annotations and replace the store with them.
    ///
    /// The response is dropped as [`LoadOutcome::Stale`] if a create, update
    /// or delete landed while it was in flight.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the store keeps its current contents.
    pub async fn load(&self) -> Result<LoadOutcome, SessionError> {
        let issued_at = self.state.borrow().store.generation();
        let records = match self.gateway.list().await {
            Ok(records) => records,
            Err(e) => {
                log::warn!("annotation list failed: {e}");
                self.panel.borrow_mut().set_hint(HINT_LIST_FAILED);
                return Err(e.into());
            }
        };

        let count = {
            let mut state = self.state.borrow_mut();
            if state.store.generation() != issued_at {
                log::warn!("discarding stale annotation list ({} records)", records.len());
                return Ok(LoadOutcome::Stale);
            }
            state.store.replace_all(records);
            let SessionState { store, overlays, .. } = &mut *state;
            overlays.retain(|id| store.contains(id));
            state.render();
            state.store.len()
        };
        log::debug!("loaded {count} annotations");
        self.refresh_panel();
        Ok(LoadOutcome::Applied(count))
    }

    /// [`Self::load`], fetched again while the response keeps coming back
    /// stale, up to [`LOAD_ATTEMPTS`] requests.
    ///
    /// A stale response only means a local change raced it; the records that
    /// already existed on the server still have to reach the store.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the failing request.
    pub async fn load_latest(&self) -> Result<LoadOutcome, SessionError> {
        let mut outcome = LoadOutcome::Stale;
        for attempt in 1..=LOAD_ATTEMPTS {
            outcome = self.load().await?;
            if outcome != LoadOutcome::Stale {
                break;
            }
            log::debug!("annotation list attempt {attempt} was stale");
        }
        Ok(outcome)
    }

    /// Read a new browser selection. A rejected snapshot clears any pending
    /// selection and disables saving.
    ///
    /// # Errors
    ///
    /// Returns why the snapshot cannot be annotated.
    pub fn capture_selection(&self, snapshot: &SelectionSnapshot) -> Result<PendingSelection, Rejection> {
        let result = self.state.borrow_mut().selection.capture(snapshot);
        let mut panel = self.panel.borrow_mut();
        match &result {
            Ok(selection) => {
                panel.set_save_enabled(true);
                panel.set_hint(&selection_hint(selection.page_number));
            }
            Err(_) => {
                panel.set_save_enabled(false);
                panel.set_hint(HINT_SELECT_TEXT);
            }
        }
        result
    }

    /// Drop the pending selection.
    pub fn clear_selection(&self) {
        self.state.borrow_mut().selection.clear();
        let mut panel = self.panel.borrow_mut();
        panel.set_save_enabled(false);
        panel.set_hint(HINT_SELECT_TEXT);
    }

    /// Persist the pending selection with the given metadata.
    ///
    /// On failure the pending selection stays so the user can retry.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSelection`] without a pending selection,
    /// [`SessionError::SaveInProgress`] while an earlier save is in flight,
    /// or the gateway error.
    pub async fn save(&self, color: &str, comment: &str) -> Result<Annotation, SessionError> {
        let (drafted, draft) = {
            let mut state = self.state.borrow_mut();
            if state.saving {
                return Err(SessionError::SaveInProgress);
            }
            let Some(selection) = state.selection.pending() else {
                return Err(SessionError::NoSelection);
            };
            state.saving = true;
            (selection, selection.draft(color, comment))
        };
        self.panel.borrow_mut().set_save_enabled(false);

        let result = self.gateway.create(&draft).await;

        let mut state = self.state.borrow_mut();
        state.saving = false;
        match result {
            Ok(record) => {
                state.store.add(record.clone());
                // A selection made while the request was out is kept.
                if state.selection.pending() == Some(drafted) {
                    state.selection.clear();
                }
                let selection_left = state.selection.can_save();
                state.render();
                drop(state);
                {
                    let mut panel = self.panel.borrow_mut();
                    panel.set_save_enabled(selection_left);
                    panel.set_hint(HINT_SAVED);
                }
                self.refresh_panel();
                Ok(record)
            }
            Err(e) => {
                log::warn!("annotation create failed: {e}");
                let can_retry = state.selection.can_save();
                drop(state);
                let mut panel = self.panel.borrow_mut();
                panel.set_save_enabled(can_retry);
                panel.set_hint(HINT_SAVE_FAILED);
                Err(e.into())
            }
        }
    }

    /// Change comment and/or color of a loaded annotation and redraw it.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownAnnotation`] for an id not in the store, or the
    /// gateway error (nothing changes locally in that case).
    pub async fn update(&self, id: &AnnotationId, patch: &AnnotationPatch) -> Result<Annotation, SessionError> {
        if !self.state.borrow().store.contains(id) {
            return Err(SessionError::UnknownAnnotation(id.clone()));
        }
        let record = self.gateway.update(id, patch).await.inspect_err(|e| {
            log::warn!("annotation update failed: {e}");
        })?;
        {
            let mut state = self.state.borrow_mut();
            if state.store.replace(record.clone()) {
                state.overlays.remove(&record.id);
                state.render();
            }
        }
        self.refresh_panel();
        Ok(record)
    }

    /// Ask for confirmation, then delete `id` on the server and, only once
    /// the server agreed, locally.
    ///
    /// # Errors
    ///
    /// Returns the gateway error after alerting the user; no local state
    /// changes in that case.
    pub async fn delete(&self, id: &AnnotationId) -> Result<DeleteOutcome, SessionError> {
        if !self.panel.borrow_mut().confirm(CONFIRM_DELETE) {
            return Ok(DeleteOutcome::Cancelled);
        }
        if let Err(e) = self.gateway.delete(id).await {
            log::warn!("annotation delete failed: {e}");
            self.panel.borrow_mut().alert(ALERT_DELETE_FAILED);
            return Err(e.into());
        }
        {
            let mut state = self.state.borrow_mut();
            state.store.remove_by_id(id);
            state.overlays.remove(id);
        }
        self.refresh_panel();
        Ok(DeleteOutcome::Deleted)
    }

    /// A page finished painting: draw any overlays still missing.
    pub fn page_rendered(&self, page_number: u32) -> usize {
        let added = self.state.borrow_mut().render();
        log::debug!("page {page_number} painted, {added} overlays added");
        added
    }

    /// A page's content is about to be replaced: forget its overlays so they
    /// are drawn again on the next paint.
    pub fn page_released(&self, page_number: u32) -> usize {
        self.state.borrow_mut().overlays.release_page(page_number)
    }

    /// Annotations ordered by page.
    #[must_use]
    pub fn annotations(&self) -> Vec<Annotation> {
        self.state.borrow().store.all().into_iter().cloned().collect()
    }

    #[must_use]
    pub fn store(&self) -> Ref<'_, AnnotationStore> {
        Ref::map(self.state.borrow(), |s| &s.store)
    }

    #[must_use]
    pub fn pending_selection(&self) -> Option<PendingSelection> {
        self.state.borrow().selection.pending()
    }

    #[must_use]
    pub fn is_rendered(&self, id: &AnnotationId) -> bool {
        self.state.borrow().overlays.is_rendered(id)
    }

    fn refresh_panel(&self) {
        let entries = panel::entries(&self.state.borrow().store);
        self.panel.borrow_mut().show_entries(&entries);
    }
}
