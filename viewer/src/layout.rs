//! Canvas sizing for fit-to-width page rendering.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

/// Scale that makes a page `page_width` points wide fill the container.
/// A container without a measured width renders at natural size.
#[must_use]
pub fn fit_scale(container_width: f64, page_width: f64) -> f64 {
    if page_width.is_nan() || page_width <= 0.0 {
        return 1.0;
    }
    let target = if container_width > 0.0 { container_width } else { page_width };
    target / page_width
}

/// Canvas backing-store size for a CSS length, truncated like the DOM does.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn canvas_px(length: f64) -> u32 {
    if !length.is_finite() || length <= 0.0 {
        return 0;
    }
    length.min(f64::from(u32::MAX)).floor() as u32
}
