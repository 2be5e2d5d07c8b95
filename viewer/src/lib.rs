//! # viewer
//!
//! Browser PDF viewer with highlight annotations, compiled to WASM.
//!
//! The host page loads PDF.js and this module, then calls
//! `mountPdfViewer(JSON.stringify(config))`. The viewer renders one page at a
//! time into the page's canvas and, when an annotations endpoint is
//! configured, lets the user highlight selected text and manage highlights
//! in the annotation panel. All annotation logic lives in the `annotations`
//! crate; this crate binds it to the DOM, `fetch` and PDF.js.
//!
//! Without the `hydrate` feature only the pure helpers ([`config`],
//! [`endpoints`], [`layout`]) are built, which is what native tests use.

pub mod config;
pub mod endpoints;
pub mod layout;

#[cfg(feature = "hydrate")]
pub mod controller;
#[cfg(feature = "hydrate")]
pub mod dom;
#[cfg(feature = "hydrate")]
pub mod http;
#[cfg(feature = "hydrate")]
pub mod logging;
#[cfg(feature = "hydrate")]
pub mod pdf;
#[cfg(feature = "hydrate")]
pub mod selection;

#[cfg(feature = "hydrate")]
pub use controller::{ViewerHandle, mount};

/// JS entry point: parse the host's JSON config and mount the viewer.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = mountPdfViewer)]
pub fn mount_pdf_viewer(config_json: &str) -> Option<ViewerHandle> {
    logging::init();
    match config::ViewerConfig::from_json(config_json) {
        Ok(config) => mount(config),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}
