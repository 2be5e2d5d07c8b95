//! Bindings to the PDF.js global (`window.pdfjsLib`).
//!
//! Only the handful of calls the viewer makes are bound: open a document,
//! fetch a page, render it into a canvas and lay its text out for selection.
//! PDF.js itself is loaded by the host page.

use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use crate::layout::{canvas_px, fit_scale};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = pdfjsLib, js_name = getDocument)]
    fn get_document(src: &str) -> Result<LoadingTask, JsValue>;

    type LoadingTask;

    #[wasm_bindgen(method, getter, js_name = promise)]
    fn loading_promise(this: &LoadingTask) -> Promise;

    /// A parsed PDF document.
    pub type PdfDocument;

    #[wasm_bindgen(method, getter, js_name = numPages)]
    pub fn num_pages(this: &PdfDocument) -> u32;

    #[wasm_bindgen(method, js_name = getPage)]
    fn get_page(this: &PdfDocument, page_number: u32) -> Promise;

    type PdfPage;

    #[wasm_bindgen(method, js_name = getViewport)]
    fn get_viewport(this: &PdfPage, params: &JsValue) -> PageViewport;

    #[wasm_bindgen(method, js_name = render)]
    fn render(this: &PdfPage, params: &JsValue) -> RenderTask;

    #[wasm_bindgen(method, js_name = getTextContent)]
    fn get_text_content(this: &PdfPage) -> Promise;

    type PageViewport;

    #[wasm_bindgen(method, getter)]
    fn width(this: &PageViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    fn height(this: &PageViewport) -> f64;

    type RenderTask;

    #[wasm_bindgen(method, getter, js_name = promise)]
    fn render_promise(this: &RenderTask) -> Promise;

    #[wasm_bindgen(js_namespace = pdfjsLib)]
    type TextLayer;

    #[wasm_bindgen(catch, constructor, js_namespace = pdfjsLib)]
    fn new(params: &JsValue) -> Result<TextLayer, JsValue>;

    #[wasm_bindgen(method, js_name = render)]
    fn render_text(this: &TextLayer) -> Promise;
}

/// The `pdfjsLib` global, if the host page loaded PDF.js.
#[must_use]
pub fn library() -> Option<JsValue> {
    let lib = Reflect::get(&js_sys::global(), &JsValue::from_str("pdfjsLib")).ok()?;
    if lib.is_undefined() || lib.is_null() { None } else { Some(lib) }
}

/// Point PDF.js at its worker script.
///
/// # Errors
///
/// Returns the JS exception if `GlobalWorkerOptions` is not writable.
pub fn set_worker_src(lib: &JsValue, src: &str) -> Result<(), JsValue> {
    let options = Reflect::get(lib, &JsValue::from_str("GlobalWorkerOptions"))?;
    Reflect::set(&options, &JsValue::from_str("workerSrc"), &JsValue::from_str(src))?;
    Ok(())
}

/// Fetch and parse the document at `url`.
///
/// # Errors
///
/// Returns the rejection value of the loading task.
pub async fn open(url: &str) -> Result<PdfDocument, JsValue> {
    let task = get_document(url)?;
    let document = JsFuture::from(task.loading_promise()).await?;
    Ok(document.unchecked_into())
}

fn params(entries: &[(&str, &JsValue)]) -> Result<JsValue, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object.into())
}

/// Where a page is painted.
pub struct PageTarget<'a> {
    pub canvas: &'a HtmlCanvasElement,
    /// Measured for fit-to-width scaling.
    pub container: &'a HtmlElement,
    /// Receives the selectable text spans, when annotations are enabled.
    pub text_layer: Option<&'a HtmlElement>,
}

/// Render `page_number` scaled to the container width.
///
/// # Errors
///
/// Returns the JS error of any PDF.js step. A failing text layer is logged
/// and does not fail the paint.
pub async fn paint(document: &PdfDocument, page_number: u32, target: &PageTarget<'_>) -> Result<(), JsValue> {
    let page: PdfPage = JsFuture::from(document.get_page(page_number)).await?.unchecked_into();
    let natural = page.get_viewport(&params(&[("scale", &JsValue::from(1.0))])?);
    let scale = fit_scale(f64::from(target.container.client_width()), natural.width());
    let viewport = page.get_viewport(&params(&[("scale", &JsValue::from(scale))])?);

    target.canvas.set_width(canvas_px(viewport.width()));
    target.canvas.set_height(canvas_px(viewport.height()));
    let context: CanvasRenderingContext2d = target
        .canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .unchecked_into();

    let task = page.render(&params(&[
        ("canvasContext", &JsValue::from(context)),
        ("viewport", &JsValue::from(viewport.clone())),
    ])?);
    JsFuture::from(task.render_promise()).await?;

    if let Some(layer) = target.text_layer {
        if let Err(e) = paint_text(&page, &viewport, scale, layer).await {
            log::warn!("text layer for page {page_number} failed: {e:?}");
        }
    }
    Ok(())
}

async fn paint_text(page: &PdfPage, viewport: &PageViewport, scale: f64, layer: &HtmlElement) -> Result<(), JsValue> {
    layer.set_inner_html("");
    layer.style().set_property("--scale-factor", &scale.to_string())?;
    let content = JsFuture::from(page.get_text_content()).await?;
    let text = TextLayer::new(&params(&[
        ("textContentSource", &content),
        ("container", &JsValue::from(layer.clone())),
        ("viewport", &JsValue::from(viewport.clone())),
    ])?)?;
    JsFuture::from(text.render_text()).await?;
    Ok(())
}
