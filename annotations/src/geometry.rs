//! Rectangle math between viewport pixels and page-relative fractions.
//!
//! Page boxes change size with zoom, resize and lazy painting, so highlights
//! are stored as fractions of the page box and converted at the moment a
//! selection is read or an overlay is placed.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A box in CSS pixels, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True when the box has no area (or a negative extent).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A rectangle expressed as fractions (0..=1) of its page box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FractionalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FractionalRect {
    /// Express `inner` relative to `page`, clipped to the page.
    ///
    /// Returns `None` when the page box is degenerate (not painted yet) or the
    /// clipped rectangle has no area.
    #[must_use]
    pub fn relative_to(inner: &ClientRect, page: &ClientRect) -> Option<Self> {
        if page.is_degenerate() {
            return None;
        }
        let x0 = ((inner.left - page.left) / page.width).clamp(0.0, 1.0);
        let x1 = ((inner.right() - page.left) / page.width).clamp(0.0, 1.0);
        let y0 = ((inner.top - page.top) / page.height).clamp(0.0, 1.0);
        let y1 = ((inner.bottom() - page.top) / page.height).clamp(0.0, 1.0);
        let rect = Self { x: x0, y: y0, width: x1 - x0, height: y1 - y0 };
        if rect.width > 0.0 && rect.height > 0.0 { Some(rect) } else { None }
    }

    /// Scale back into pixels for a page box of the given geometry.
    #[must_use]
    pub fn project(&self, page: &ClientRect) -> ClientRect {
        ClientRect {
            left: page.left + self.x * page.width,
            top: page.top + self.y * page.height,
            width: self.width * page.width,
            height: self.height * page.height,
        }
    }

    /// Whether the rectangle lies inside the unit page box.
    #[must_use]
    pub fn is_within_page(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.width >= 0.0
            && self.height >= 0.0
            && self.x + self.width <= 1.0 + f64::EPSILON
            && self.y + self.height <= 1.0 + f64::EPSILON
    }
}
