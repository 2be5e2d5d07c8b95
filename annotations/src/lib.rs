//! Highlight annotations for PDF pages rendered in the browser.
//!
//! This crate holds everything about the annotation feature that does not need
//! a browser: the wire model, the selection normalizer, the client-side store,
//! the overlay bookkeeping and the session that coordinates them against a
//! persistence gateway. The `viewer` crate plugs real DOM nodes and HTTP calls
//! into the traits defined here; tests plug in fakes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Wire types: [`model::Annotation`], [`model::AnnotationDraft`], ids |
//! | [`geometry`] | Client rects and page-relative fractional rectangles |
//! | [`selection`] | Selection normalizer and the single pending selection |
//! | [`store`] | Ordered in-memory annotation cache with a generation counter |
//! | [`overlay`] | Idempotent overlay rendering over an [`overlay::OverlaySurface`] |
//! | [`panel`] | List entries and the [`panel::ControlPanel`] seam |
//! | [`gateway`] | The [`gateway::AnnotationGateway`] persistence trait |
//! | [`session`] | Coordinates gateway, store, overlays and panel |
//! | [`queue`] | Two-slot page render queue and page navigation |

pub mod gateway;
pub mod geometry;
pub mod model;
pub mod overlay;
pub mod panel;
pub mod queue;
pub mod selection;
pub mod session;
pub mod store;

#[cfg(test)]
mod test_support;
