//! Overlay rendering: projects stored annotations onto painted pages.
//!
//! ARCHITECTURE
//! ============
//! [`OverlayRenderer`] owns the id → element map and decides what to draw;
//! an [`OverlaySurface`] does the drawing. The browser surface appends
//! absolutely positioned divs to a per-page layer; tests use an in-memory one.
//!
//! Pages paint lazily and out of order, so a render pass attaches whatever it
//! can and leaves the rest for the next page-rendered event.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use std::collections::HashMap;

use crate::model::{Annotation, AnnotationId};

/// Where and how to draw one highlight, in page-relative percentages.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPlacement {
    pub left_pct: f64,
    pub top_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
    pub color: String,
    pub comment: String,
}

impl OverlayPlacement {
    #[must_use]
    pub fn for_annotation(annotation: &Annotation) -> Self {
        Self {
            left_pct: annotation.x * 100.0,
            top_pct: annotation.y * 100.0,
            width_pct: annotation.width * 100.0,
            height_pct: annotation.height * 100.0,
            color: annotation.color.clone(),
            comment: annotation.comment.clone(),
        }
    }

    /// Style properties for an absolutely positioned element inside the page
    /// layer, one CSS value each. Callers set them one by one so a color
    /// string can never add declarations of its own.
    #[must_use]
    pub fn style_properties(&self) -> [(&'static str, String); 5] {
        [
            ("left", percent(self.left_pct)),
            ("top", percent(self.top_pct)),
            ("width", percent(self.width_pct)),
            ("height", percent(self.height_pct)),
            ("background-color", self.color.clone()),
        ]
    }
}

fn percent(value: f64) -> String {
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{trimmed}%")
}

/// Drawing backend for highlights.
pub trait OverlaySurface {
    /// Handle to one drawn highlight, kept until it is detached.
    type Highlight;

    /// Draw a highlight on `page_number`, creating or reusing the page's
    /// overlay layer. Returns `None` when the page is not in the document yet.
    fn attach(&mut self, page_number: u32, id: &AnnotationId, placement: &OverlayPlacement) -> Option<Self::Highlight>;

    /// Remove a highlight previously returned by [`OverlaySurface::attach`].
    fn detach(&mut self, highlight: Self::Highlight);
}

struct Drawn<H> {
    page_number: u32,
    highlight: H,
}

/// Tracks which annotations currently have an overlay element.
pub struct OverlayRenderer<S: OverlaySurface> {
    surface: S,
    rendered: HashMap<AnnotationId, Drawn<S::Highlight>>,
}

impl<S: OverlaySurface> OverlayRenderer<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self { surface, rendered: HashMap::new() }
    }

    /// Attach every annotation that is not drawn yet and whose page exists.
    /// Returns how many overlays were added.
    pub fn render_pass<'a>(&mut self, annotations: impl IntoIterator<Item = &'a Annotation>) -> usize {
        let mut added = 0;
        for annotation in annotations {
            if self.rendered.contains_key(&annotation.id) {
                continue;
            }
            let placement = OverlayPlacement::for_annotation(annotation);
            let Some(highlight) = self.surface.attach(annotation.page_number, &annotation.id, &placement) else {
                continue;
            };
            self.rendered.insert(
                annotation.id.clone(),
                Drawn { page_number: annotation.page_number, highlight },
            );
            added += 1;
        }
        added
    }

    /// Detach the overlay for `id` and forget it. Returns `false` when the id
    /// was never drawn.
    pub fn remove(&mut self, id: &AnnotationId) -> bool {
        let Some(drawn) = self.rendered.remove(id) else {
            return false;
        };
        self.surface.detach(drawn.highlight);
        true
    }

    /// Detach every overlay on `page_number` so the next paint of that page
    /// draws them again. Returns how many were released.
    pub fn release_page(&mut self, page_number: u32) -> usize {
        let ids: Vec<AnnotationId> = self
            .rendered
            .iter()
            .filter(|(_, drawn)| drawn.page_number == page_number)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &ids {
            self.remove(id);
        }
        ids.len()
    }

    /// Detach overlays whose id fails `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&AnnotationId) -> bool) {
        let stale: Vec<AnnotationId> = self.rendered.keys().filter(|id| !keep(id)).cloned().collect();
        for id in &stale {
            self.remove(id);
        }
    }

    #[must_use]
    pub fn is_rendered(&self, id: &AnnotationId) -> bool {
        self.rendered.contains_key(id)
    }

    #[must_use]
    pub fn rendered_count(&self) -> usize {
        self.rendered.len()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
