//! DOM side of the viewer: element lookup, highlight overlays, annotation panel.
//!
//! DESIGN
//! ======
//! Every element the viewer touches is looked up once at mount time into
//! [`DomHandles`] / [`AnnotationHandles`]. A missing required element means the
//! host page has no viewer markup, and mounting silently stops.
//!
//! Highlights live in one `.annotation-layer` per page element (the element
//! carrying `data-page-number`), absolutely positioned in percent of the page
//! box so they follow the page through resizes without re-measuring.

use annotations::model::AnnotationId;
use annotations::overlay::{OverlayPlacement, OverlaySurface};
use annotations::panel::{ControlPanel, EMPTY_COMMENT_PLACEHOLDER, PanelEntry};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, Window,
};

use crate::config::ElementIds;

pub const PAGE_ATTR: &str = "data-page-number";
pub const DELETE_ATTR: &str = "data-annotation-delete";
const LAYER_CLASS: &str = "annotation-layer";
const LAYER_STYLE: &str = "position: absolute; inset: 0; pointer-events: none;";
const HIGHLIGHT_STYLE: &str = "position: absolute; pointer-events: auto; opacity: 0.4; cursor: pointer;";
const EMPTY_LIST_TEXT: &str = "No highlights yet.";

fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let found = document.get_element_by_id(id).and_then(|el| el.dyn_into::<T>().ok());
    if found.is_none() {
        log::debug!("viewer element #{id} not found");
    }
    found
}

fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    element.dyn_into::<T>().map_err(JsValue::from)
}

// =============================================================
// Handles
// =============================================================

/// Elements of the plain page viewer.
pub struct DomHandles {
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    /// The canvas's parent; it is the page element while a page is shown.
    pub container: HtmlElement,
    pub page_info: HtmlElement,
    pub prev: HtmlButtonElement,
    pub next: HtmlButtonElement,
    pub error_box: Option<HtmlElement>,
}

impl DomHandles {
    #[must_use]
    pub fn lookup(document: &Document, ids: &ElementIds) -> Option<Self> {
        let canvas: HtmlCanvasElement = by_id(document, &ids.canvas)?;
        let container = canvas.parent_element()?.dyn_into::<HtmlElement>().ok()?;
        Some(Self {
            document: document.clone(),
            page_info: by_id(document, &ids.page_info)?,
            prev: by_id(document, &ids.prev)?,
            next: by_id(document, &ids.next)?,
            error_box: by_id(document, &ids.error),
            canvas,
            container,
        })
    }

    pub fn set_controls(&self, label: &str, prev_disabled: bool, next_disabled: bool) {
        self.page_info.set_text_content(Some(label));
        self.prev.set_disabled(prev_disabled);
        self.next.set_disabled(next_disabled);
    }

    pub fn show_error(&self) {
        if let Some(error_box) = &self.error_box {
            let _ = error_box.class_list().remove_1("d-none");
        }
    }

    /// Mark the container as showing `page`, or as between pages.
    pub fn set_page(&self, page: Option<u32>) {
        let _ = match page {
            Some(page) => self.container.set_attribute(PAGE_ATTR, &page.to_string()),
            None => self.container.remove_attribute(PAGE_ATTR),
        };
    }

    /// Absolutely positioned text layer over the canvas, for selecting text.
    #[must_use]
    pub fn add_text_layer(&self) -> Option<HtmlElement> {
        let _ = self.container.style().set_property("position", "relative");
        let layer: HtmlElement = create(&self.document, "div", "textLayer").ok()?;
        let _ = layer.set_attribute("style", "position: absolute; inset: 0;");
        self.container.append_child(&layer).ok()?;
        Some(layer)
    }
}

enum CommentField {
    Area(HtmlTextAreaElement),
    Input(HtmlInputElement),
}

/// Elements of the annotation panel. All are required.
pub struct AnnotationHandles {
    pub panel: HtmlElement,
    comment: CommentField,
    pub color: HtmlInputElement,
    pub save: HtmlButtonElement,
    pub hint: HtmlElement,
    pub list: HtmlElement,
}

impl AnnotationHandles {
    #[must_use]
    pub fn lookup(document: &Document, ids: &ElementIds) -> Option<Self> {
        let comment = match by_id::<Element>(document, &ids.comment)? {
            el if el.is_instance_of::<HtmlTextAreaElement>() => CommentField::Area(el.dyn_into().ok()?),
            el => CommentField::Input(el.dyn_into().ok()?),
        };
        Some(Self {
            panel: by_id(document, &ids.panel)?,
            comment,
            color: by_id(document, &ids.color)?,
            save: by_id(document, &ids.save)?,
            hint: by_id(document, &ids.hint)?,
            list: by_id(document, &ids.list)?,
        })
    }

    #[must_use]
    pub fn comment_value(&self) -> String {
        match &self.comment {
            CommentField::Area(area) => area.value(),
            CommentField::Input(input) => input.value(),
        }
    }

    pub fn clear_comment(&self) {
        match &self.comment {
            CommentField::Area(area) => area.set_value(""),
            CommentField::Input(input) => input.set_value(""),
        }
    }
}

// =============================================================
// Overlays
// =============================================================

/// A drawn highlight and the click listener bound to it.
pub struct DomHighlight {
    element: HtmlElement,
    _on_click: Closure<dyn FnMut(Event)>,
}

/// Draws highlights into per-page `.annotation-layer` elements.
pub struct DomSurface {
    document: Document,
    /// Clicking a highlight shows its comment here.
    hint: HtmlElement,
}

impl DomSurface {
    #[must_use]
    pub fn new(document: Document, hint: HtmlElement) -> Self {
        Self { document, hint }
    }

    fn layer_for(&self, page_number: u32) -> Option<Element> {
        let selector = format!("[{PAGE_ATTR}=\"{page_number}\"]");
        let page = self.document.query_selector(&selector).ok()??;
        if let Some(layer) = page.query_selector(&format!(".{LAYER_CLASS}")).ok()? {
            return Some(layer);
        }
        let layer: Element = create(&self.document, "div", LAYER_CLASS).ok()?;
        layer.set_attribute("style", LAYER_STYLE).ok()?;
        page.append_child(&layer).ok()?;
        Some(layer)
    }
}

impl OverlaySurface for DomSurface {
    type Highlight = DomHighlight;

    fn attach(&mut self, page_number: u32, id: &AnnotationId, placement: &OverlayPlacement) -> Option<DomHighlight> {
        let layer = self.layer_for(page_number)?;
        let element: HtmlElement = create(&self.document, "div", "annotation-highlight").ok()?;
        element.set_attribute("style", HIGHLIGHT_STYLE).ok()?;
        let style = element.style();
        for (name, value) in placement.style_properties() {
            style.set_property(name, &value).ok()?;
        }
        element.set_attribute("data-annotation-id", &id.to_string()).ok()?;
        element.set_title(&placement.comment);

        let hint = self.hint.clone();
        let text = if placement.comment.trim().is_empty() {
            EMPTY_COMMENT_PLACEHOLDER.to_owned()
        } else {
            placement.comment.clone()
        };
        let on_click = Closure::wrap(Box::new(move |_event: Event| {
            hint.set_text_content(Some(&text));
        }) as Box<dyn FnMut(Event)>);
        element
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .ok()?;
        layer.append_child(&element).ok()?;
        Some(DomHighlight { element, _on_click: on_click })
    }

    fn detach(&mut self, highlight: DomHighlight) {
        highlight.element.remove();
    }
}

// =============================================================
// Panel
// =============================================================

/// The annotation list, hint label and save button.
pub struct DomPanel {
    window: Window,
    document: Document,
    list: HtmlElement,
    hint: HtmlElement,
    save: HtmlButtonElement,
}

impl DomPanel {
    #[must_use]
    pub fn new(window: Window, document: Document, handles: &AnnotationHandles) -> Self {
        Self {
            window,
            document,
            list: handles.list.clone(),
            hint: handles.hint.clone(),
            save: handles.save.clone(),
        }
    }

    fn entry_item(&self, entry: &PanelEntry) -> Result<Element, JsValue> {
        let item: Element = create(&self.document, "li", "annotation-item")?;
        item.set_attribute("data-annotation-id", &entry.id.to_string())?;

        let swatch: HtmlElement = create(&self.document, "span", "annotation-swatch")?;
        swatch.style().set_property("background-color", &entry.color)?;
        let page: Element = create(&self.document, "span", "annotation-page")?;
        page.set_text_content(Some(&entry.page_label));
        let comment_class = if entry.has_comment { "annotation-text" } else { "annotation-text text-muted" };
        let comment: Element = create(&self.document, "span", comment_class)?;
        comment.set_text_content(Some(&entry.comment));
        let delete: HtmlButtonElement = create(&self.document, "button", "annotation-delete")?;
        delete.set_type("button");
        delete.set_attribute(DELETE_ATTR, &entry.id.to_string())?;
        delete.set_text_content(Some("Delete"));

        item.append_child(&swatch)?;
        item.append_child(&page)?;
        item.append_child(&comment)?;
        item.append_child(&delete)?;
        Ok(item)
    }
}

impl ControlPanel for DomPanel {
    fn show_entries(&mut self, entries: &[PanelEntry]) {
        self.list.set_inner_html("");
        if entries.is_empty() {
            if let Ok(empty) = create::<Element>(&self.document, "li", "annotation-empty text-muted") {
                empty.set_text_content(Some(EMPTY_LIST_TEXT));
                let _ = self.list.append_child(&empty);
            }
            return;
        }
        for entry in entries {
            match self.entry_item(entry) {
                Ok(item) => {
                    let _ = self.list.append_child(&item);
                }
                Err(e) => log::warn!("could not draw annotation {}: {e:?}", entry.id),
            }
        }
    }

    fn set_hint(&mut self, hint: &str) {
        self.hint.set_text_content(Some(hint));
    }

    fn set_save_enabled(&mut self, enabled: bool) {
        self.save.set_disabled(!enabled);
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}
