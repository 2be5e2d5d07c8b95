//! Mounting, event wiring and the page render loop.
//!
//! ARCHITECTURE
//! ============
//! `mount` looks up the host markup, opens the PDF and returns a
//! [`ViewerHandle`]. All state sits in one `Rc<Viewer>` shared by the event
//! listeners and the `spawn_local` tasks; the handle owns the listeners, so
//! disposing it detaches every callback and stops pending render steps.
//!
//! Pages render one at a time into a single canvas. Navigation goes through
//! [`PageNavigator`], which collapses clicks made during a render into one
//! pending page. The canvas container carries `data-page-number` only while a
//! fully painted page is on screen, which is what the overlay surface and the
//! selection reader look for.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use annotations::model::AnnotationId;
use annotations::queue::PageNavigator;
use annotations::session::{AnnotationSession, DeleteOutcome, LOAD_ATTEMPTS, LoadOutcome};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget, HtmlElement, Window};

use crate::config::ViewerConfig;
use crate::dom::{AnnotationHandles, DELETE_ATTR, DomHandles, DomPanel, DomSurface};
use crate::http::HttpGateway;
use crate::pdf::{self, PageTarget, PdfDocument};
use crate::selection;

type Session = AnnotationSession<HttpGateway, DomSurface, DomPanel>;

struct Annotating {
    session: Session,
    handles: AnnotationHandles,
    text_layer: Option<HtmlElement>,
}

struct Viewer {
    window: Window,
    dom: DomHandles,
    navigator: RefCell<PageNavigator>,
    document: RefCell<Option<PdfDocument>>,
    shown: Cell<Option<u32>>,
    annotating: Option<Annotating>,
    disposed: Cell<bool>,
}

/// A DOM listener that is removed again when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::warn!("could not listen for {event}: {e:?}");
            return None;
        }
        Some(Self { target: target.clone(), event, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// A mounted viewer. Dropping or disposing it detaches all listeners.
#[wasm_bindgen]
pub struct ViewerHandle {
    viewer: Rc<Viewer>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ViewerHandle {
    /// Detach all listeners and stop any queued page renders.
    pub fn dispose(&mut self) {
        self.viewer.disposed.set(true);
        self.listeners.clear();
        log::debug!("viewer disposed");
    }

    /// Page currently selected by the navigation buttons.
    #[wasm_bindgen(getter, js_name = currentPage)]
    pub fn current_page(&self) -> u32 {
        self.viewer.navigator.borrow().current()
    }
}

/// Attach a viewer to the host page described by `config`.
///
/// Returns `None` (after a debug log) when the page lacks the viewer markup or
/// PDF.js is not loaded. The annotation panel is wired up only when
/// `annotations_url` is set and all panel elements exist.
#[must_use]
pub fn mount(config: ViewerConfig) -> Option<ViewerHandle> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let Some(dom) = DomHandles::lookup(&document, &config.ids) else {
        log::debug!("no viewer markup on this page");
        return None;
    };
    let Some(library) = pdf::library() else {
        log::debug!("pdfjsLib is not loaded");
        return None;
    };
    if let Some(src) = &config.worker_src {
        if let Err(e) = pdf::set_worker_src(&library, src) {
            log::warn!("could not configure the PDF.js worker: {e:?}");
        }
    }

    let annotating = annotating(&window, &dom, &config);
    let viewer = Rc::new(Viewer {
        window,
        dom,
        navigator: RefCell::new(PageNavigator::new()),
        document: RefCell::new(None),
        shown: Cell::new(None),
        annotating,
        disposed: Cell::new(false),
    });

    let listeners = listen(&viewer);
    spawn_local(open_document(Rc::clone(&viewer), config.pdf_url));
    Some(ViewerHandle { viewer, listeners })
}

fn annotating(window: &Window, dom: &DomHandles, config: &ViewerConfig) -> Option<Annotating> {
    let url = config.annotations_url.as_deref()?;
    let Some(handles) = AnnotationHandles::lookup(&dom.document, &config.ids) else {
        log::debug!("annotation panel markup incomplete; running the plain viewer");
        return None;
    };
    if handles.color.value().trim().is_empty() {
        handles.color.set_value(&config.default_color);
    }
    let _ = handles.panel.class_list().remove_1("d-none");

    let gateway = HttpGateway::new(url, &config.csrf_cookie, &config.csrf_header);
    let surface = DomSurface::new(dom.document.clone(), handles.hint.clone());
    let panel = DomPanel::new(window.clone(), dom.document.clone(), &handles);
    Some(Annotating {
        session: AnnotationSession::new(gateway, surface, panel),
        text_layer: dom.add_text_layer(),
        handles,
    })
}

fn on(viewer: &Rc<Viewer>, target: &EventTarget, event: &'static str, handler: fn(&Rc<Viewer>, &Event)) -> Option<Listener> {
    let viewer = Rc::clone(viewer);
    Listener::attach(target, event, move |e: Event| handler(&viewer, &e))
}

fn listen(viewer: &Rc<Viewer>) -> Vec<Listener> {
    let mut listeners = Vec::new();
    listeners.extend(on(viewer, &viewer.dom.prev, "click", |v, _| v.step(false)));
    listeners.extend(on(viewer, &viewer.dom.next, "click", |v, _| v.step(true)));
    if let Some(annotating) = &viewer.annotating {
        listeners.extend(on(viewer, &viewer.dom.container, "mouseup", |v, _| v.capture_selection()));
        listeners.extend(on(viewer, &viewer.dom.container, "keyup", |v, _| v.capture_selection()));
        listeners.extend(on(viewer, &annotating.handles.save, "click", |v, _| v.save()));
        listeners.extend(on(viewer, &annotating.handles.list, "click", Viewer::list_clicked));
    }
    listeners
}

impl Viewer {
    fn step(self: &Rc<Self>, forward: bool) {
        let start = {
            let mut navigator = self.navigator.borrow_mut();
            if forward { navigator.next() } else { navigator.prev() }
        };
        if let Some(page) = start {
            spawn_local(render_from(Rc::clone(self), page));
        }
    }

    fn set_controls(&self, page: u32) {
        let controls = self.navigator.borrow().controls_for(page);
        self.dom.set_controls(&controls.label, controls.prev_disabled, controls.next_disabled);
    }

    async fn paint(&self, page: u32) {
        let Some(document) = self.document.borrow().clone() else {
            return;
        };
        if let Some(old) = self.shown.get().filter(|old| *old != page) {
            self.dom.set_page(None);
            self.shown.set(None);
            if let Some(annotating) = &self.annotating {
                annotating.session.page_released(old);
            }
        }

        let target = PageTarget {
            canvas: &self.dom.canvas,
            container: &self.dom.container,
            text_layer: self.annotating.as_ref().and_then(|a| a.text_layer.as_ref()),
        };
        match pdf::paint(&document, page, &target).await {
            Ok(()) => {
                self.dom.set_page(Some(page));
                self.shown.set(Some(page));
                self.set_controls(page);
                if let Some(annotating) = &self.annotating {
                    annotating.session.page_rendered(page);
                }
            }
            Err(e) => log::warn!("page {page} failed to render: {e:?}"),
        }
    }

    fn capture_selection(&self) {
        if let Some(annotating) = &self.annotating {
            let snapshot = selection::read(&self.window);
            let _ = annotating.session.capture_selection(&snapshot);
        }
    }

    fn save(self: &Rc<Self>) {
        let Some(annotating) = &self.annotating else {
            return;
        };
        let color = annotating.handles.color.value();
        let comment = annotating.handles.comment_value();
        let viewer = Rc::clone(self);
        spawn_local(async move {
            let Some(annotating) = &viewer.annotating else {
                return;
            };
            match annotating.session.save(&color, &comment).await {
                Ok(record) => {
                    annotating.handles.clear_comment();
                    selection::clear(&viewer.window);
                    log::debug!("saved annotation {} on page {}", record.id, record.page_number);
                }
                Err(e) => log::debug!("annotation not saved: {e}"),
            }
        });
    }

    fn list_clicked(self: &Rc<Self>, event: &Event) {
        let Some(annotating) = &self.annotating else {
            return;
        };
        let Some(raw) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&format!("[{DELETE_ATTR}]")).ok().flatten())
            .and_then(|button| button.get_attribute(DELETE_ATTR))
        else {
            return;
        };
        let id = annotating
            .session
            .annotations()
            .into_iter()
            .map(|record| record.id)
            .find(|id| id.to_string() == raw)
            .unwrap_or_else(|| AnnotationId::from(raw));

        let viewer = Rc::clone(self);
        spawn_local(async move {
            let Some(annotating) = &viewer.annotating else {
                return;
            };
            match annotating.session.delete(&id).await {
                Ok(DeleteOutcome::Deleted) => log::debug!("deleted annotation {id}"),
                Ok(DeleteOutcome::Cancelled) => {}
                Err(e) => log::debug!("annotation {id} not deleted: {e}"),
            }
        });
    }
}

async fn open_document(viewer: Rc<Viewer>, url: String) {
    let document = match pdf::open(&url).await {
        Ok(document) => document,
        Err(e) => {
            log::warn!("could not load {url}: {e:?}");
            viewer.dom.show_error();
            return;
        }
    };
    if viewer.disposed.get() {
        return;
    }
    let total = document.num_pages();
    *viewer.document.borrow_mut() = Some(document);
    let first = viewer.navigator.borrow_mut().open(total);
    viewer.set_controls(1);
    log::debug!("opened {url} ({total} pages)");

    if viewer.annotating.is_some() {
        spawn_local(load_annotations(Rc::clone(&viewer)));
    }
    if let Some(page) = first {
        render_from(viewer, page).await;
    }
}

async fn load_annotations(viewer: Rc<Viewer>) {
    let Some(annotating) = &viewer.annotating else {
        return;
    };
    match annotating.session.load_latest().await {
        Ok(LoadOutcome::Applied(count)) => log::debug!("{count} annotations loaded"),
        Ok(LoadOutcome::Stale) => log::warn!("annotation list still stale after {LOAD_ATTEMPTS} requests"),
        Err(e) => log::debug!("annotations not loaded: {e}"),
    }
}

/// Paint `page`, then whatever page was requested while it rendered, until
/// the queue is empty.
async fn render_from(viewer: Rc<Viewer>, mut page: u32) {
    loop {
        if viewer.disposed.get() {
            return;
        }
        viewer.paint(page).await;
        let painted = viewer.navigator.borrow_mut().render_finished();
        match painted.and_then(|p| p.next) {
            Some(next) => page = next,
            None => return,
        }
    }
}
