//! Pure widget-list transforms.
//!
//! Every function takes the current list by reference and returns a new
//! candidate list, or `None` when the target widget or index does not
//! resolve. Callers treat `None` as a no-op; the input is never modified.

use crate::widget::{GridPosition, GridSize, WidgetConfig};

/// Position of the widget with `id`, if present.
pub fn index_of(widgets: &[WidgetConfig], id: &str) -> Option<usize> {
    widgets.iter().position(|w| w.id == id)
}

/// Flip `visible` on the widget with `id`.
pub fn toggle_visibility(widgets: &[WidgetConfig], id: &str) -> Option<Vec<WidgetConfig>> {
    update_widget(widgets, id, |w| w.visible = !w.visible)
}

/// Replace the advisory grid position of the widget with `id`.
pub fn update_position(
    widgets: &[WidgetConfig],
    id: &str,
    position: GridPosition,
) -> Option<Vec<WidgetConfig>> {
    update_widget(widgets, id, |w| w.position = position)
}

/// Replace the grid span of the widget with `id`.
pub fn update_size(widgets: &[WidgetConfig], id: &str, size: GridSize) -> Option<Vec<WidgetConfig>> {
    update_widget(widgets, id, |w| w.size = size)
}

/// Move the widget at `source` so that it ends up at `dest`.
///
/// Both indices refer to `widgets` as passed in. Returns `None` when either
/// index is out of range.
pub fn reorder(widgets: &[WidgetConfig], source: usize, dest: usize) -> Option<Vec<WidgetConfig>> {
    let len = widgets.len();
    if source >= len || dest >= len {
        tracing::debug!(source, dest, len, "Reorder index out of range, ignoring");
        return None;
    }

    let mut next = widgets.to_vec();
    let moved = next.remove(source);
    next.insert(dest, moved);
    Some(next)
}

fn update_widget(
    widgets: &[WidgetConfig],
    id: &str,
    apply: impl FnOnce(&mut WidgetConfig),
) -> Option<Vec<WidgetConfig>> {
    let Some(index) = index_of(widgets, id) else {
        tracing::debug!(widget_id = id, "Unknown widget id, ignoring");
        return None;
    };

    let mut next = widgets.to_vec();
    apply(&mut next[index]);
    Some(next)
}
