//! Reads the live browser selection into a plain snapshot.

use annotations::geometry::ClientRect;
use annotations::selection::{PageBox, SelectionSnapshot};
use wasm_bindgen::JsCast;
use web_sys::{DomRect, Element, Node, Window};

use crate::dom::PAGE_ATTR;

fn client_rect(rect: &DomRect) -> ClientRect {
    ClientRect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn collapsed() -> SelectionSnapshot {
    SelectionSnapshot { collapsed: true, ..SelectionSnapshot::default() }
}

/// The page element that contains `node`, measured now.
fn enclosing_page(node: &Node) -> Option<PageBox> {
    let element = match node.dyn_ref::<Element>() {
        Some(element) => element.clone(),
        None => node.parent_element()?,
    };
    let page = element.closest(&format!("[{PAGE_ATTR}]")).ok()??;
    let page_number = page.get_attribute(PAGE_ATTR)?.trim().parse().ok()?;
    Some(PageBox { page_number, rect: client_rect(&page.get_bounding_client_rect()) })
}

/// Snapshot of the first range of the window's selection.
///
/// A selection spanning several pages has its common ancestor above the page
/// elements and so comes back without a page.
#[must_use]
pub fn read(window: &Window) -> SelectionSnapshot {
    let Ok(Some(selection)) = window.get_selection() else {
        return collapsed();
    };
    if selection.is_collapsed() || selection.range_count() == 0 {
        return collapsed();
    }
    let Ok(range) = selection.get_range_at(0) else {
        return collapsed();
    };
    let page = range
        .common_ancestor_container()
        .ok()
        .and_then(|node| enclosing_page(&node));
    SelectionSnapshot { collapsed: false, bounds: client_rect(&range.get_bounding_client_rect()), page }
}

/// Drop the browser selection after it was turned into a highlight.
pub fn clear(window: &Window) {
    if let Ok(Some(selection)) = window.get_selection() {
        let _ = selection.remove_all_ranges();
    }
}
