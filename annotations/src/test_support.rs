//! In-memory stand-ins for the DOM, the panel and the backend.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;

use crate::gateway::{AnnotationGateway, GatewayError};
use crate::geometry::ClientRect;
use crate::model::{Annotation, AnnotationDraft, AnnotationId, AnnotationPatch};
use crate::overlay::{OverlayPlacement, OverlaySurface};
use crate::panel::{ControlPanel, PanelEntry};

// =============================================================
// Surface
// =============================================================

#[derive(Clone, Debug)]
pub struct FakeElement {
    pub key: u64,
    pub id: AnnotationId,
    pub placement: OverlayPlacement,
}

#[derive(Debug, Default)]
pub struct FakeDom {
    /// Painted pages and their on-screen boxes.
    pub pages: HashMap<u32, ClientRect>,
    /// Overlay layers per page.
    pub layers: HashMap<u32, Vec<FakeElement>>,
    pub layers_created: usize,
    next_key: u64,
}

impl FakeDom {
    /// Paint `page` as a 600x800 box stacked below the previous pages.
    pub fn paint(&mut self, page: u32) {
        let top = f64::from(page - 1) * 820.0;
        self.pages.insert(page, ClientRect::new(40.0, top, 600.0, 800.0));
    }

    pub fn elements_for(&self, id: &AnnotationId) -> usize {
        self.layers.values().flatten().filter(|e| &e.id == id).count()
    }

    pub fn element_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// The on-screen box of `id`'s element, resolved like a browser would
    /// resolve percentage offsets inside the page box.
    pub fn box_of(&self, id: &AnnotationId) -> Option<(u32, ClientRect)> {
        self.layers.iter().find_map(|(page, elements)| {
            let element = elements.iter().find(|e| &e.id == id)?;
            let page_box = self.pages.get(page)?;
            let p = &element.placement;
            Some((
                *page,
                ClientRect::new(
                    page_box.left + p.left_pct / 100.0 * page_box.width,
                    page_box.top + p.top_pct / 100.0 * page_box.height,
                    p.width_pct / 100.0 * page_box.width,
                    p.height_pct / 100.0 * page_box.height,
                ),
            ))
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakeSurface {
    pub dom: Rc<RefCell<FakeDom>>,
}

impl OverlaySurface for FakeSurface {
    type Highlight = (u32, u64);

    fn attach(&mut self, page_number: u32, id: &AnnotationId, placement: &OverlayPlacement) -> Option<Self::Highlight> {
        let mut dom = self.dom.borrow_mut();
        if !dom.pages.contains_key(&page_number) {
            return None;
        }
        dom.next_key += 1;
        let key = dom.next_key;
        if !dom.layers.contains_key(&page_number) {
            dom.layers_created += 1;
        }
        dom.layers.entry(page_number).or_default().push(FakeElement {
            key,
            id: id.clone(),
            placement: placement.clone(),
        });
        Some((page_number, key))
    }

    fn detach(&mut self, (page_number, key): Self::Highlight) {
        if let Some(layer) = self.dom.borrow_mut().layers.get_mut(&page_number) {
            layer.retain(|e| e.key != key);
        }
    }
}

// =============================================================
// Panel
// =============================================================

#[derive(Debug)]
pub struct PanelLog {
    pub entries: Vec<PanelEntry>,
    pub hint: String,
    pub save_enabled: bool,
    pub confirm_answer: bool,
    pub confirms: usize,
    pub alerts: Vec<String>,
    pub redraws: usize,
}

impl Default for PanelLog {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            hint: String::new(),
            save_enabled: true,
            confirm_answer: true,
            confirms: 0,
            alerts: Vec::new(),
            redraws: 0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakePanel {
    pub log: Rc<RefCell<PanelLog>>,
}

impl ControlPanel for FakePanel {
    fn show_entries(&mut self, entries: &[PanelEntry]) {
        let mut log = self.log.borrow_mut();
        log.entries = entries.to_vec();
        log.redraws += 1;
    }

    fn set_hint(&mut self, hint: &str) {
        hint.clone_into(&mut self.log.borrow_mut().hint);
    }

    fn set_save_enabled(&mut self, enabled: bool) {
        self.log.borrow_mut().save_enabled = enabled;
    }

    fn confirm(&mut self, _message: &str) -> bool {
        let mut log = self.log.borrow_mut();
        log.confirms += 1;
        log.confirm_answer
    }

    fn alert(&mut self, message: &str) {
        self.log.borrow_mut().alerts.push(message.to_owned());
    }
}

// =============================================================
// Gateway
// =============================================================

#[derive(Debug, Default)]
pub struct Backend {
    pub records: Vec<Annotation>,
    pub next_id: i64,
    pub fail_list: bool,
    pub fail_create: bool,
    pub fail_update: bool,
    pub fail_delete: bool,
    pub creates: usize,
    pub deletes: usize,
    /// When set, the next `list` snapshots the records and then waits for
    /// this signal before answering.
    pub list_gate: Option<oneshot::Receiver<()>>,
    /// When set, the next `create` waits for this signal before storing.
    pub create_gate: Option<oneshot::Receiver<()>>,
}

impl Backend {
    pub fn seeded(records: Vec<Annotation>, next_id: i64) -> Self {
        Self { records, next_id, ..Self::default() }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakeGateway {
    pub backend: Rc<RefCell<Backend>>,
}

fn offline() -> GatewayError {
    GatewayError::Network("offline".to_owned())
}

impl AnnotationGateway for FakeGateway {
    async fn list(&self) -> Result<Vec<Annotation>, GatewayError> {
        let (snapshot, gate) = {
            let mut backend = self.backend.borrow_mut();
            if backend.fail_list {
                return Err(offline());
            }
            (backend.records.clone(), backend.list_gate.take())
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(snapshot)
    }

    async fn create(&self, draft: &AnnotationDraft) -> Result<Annotation, GatewayError> {
        let gate = self.backend.borrow_mut().create_gate.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let mut backend = self.backend.borrow_mut();
        if backend.fail_create {
            return Err(offline());
        }
        backend.next_id += 1;
        backend.creates += 1;
        let record = Annotation::from_draft(AnnotationId::from(backend.next_id), draft.clone());
        backend.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &AnnotationId, patch: &AnnotationPatch) -> Result<Annotation, GatewayError> {
        let mut backend = self.backend.borrow_mut();
        if backend.fail_update {
            return Err(offline());
        }
        let record = backend
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or(GatewayError::Status(404))?;
        if let Some(comment) = &patch.comment {
            record.comment.clone_from(comment);
        }
        if let Some(color) = &patch.color {
            record.color.clone_from(color);
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: &AnnotationId) -> Result<(), GatewayError> {
        let mut backend = self.backend.borrow_mut();
        if backend.fail_delete {
            return Err(GatewayError::Status(500));
        }
        backend.deletes += 1;
        backend.records.retain(|r| &r.id != id);
        Ok(())
    }
}
