//! Built-in default dashboard layout.
//!
//! Used by the client when a user has no saved layout yet and by the server
//! as the target of a layout reset.

use crate::registry;
use crate::widget::{WidgetCategory, WidgetConfig, WidgetType};

/// Default grid placement `(kind, x, y, width, height)` in render order.
const DEFAULT_PLACEMENT: [(WidgetType, i32, i32, u32, u32); 7] = [
    (WidgetType::Profile, 0, 0, 1, 2),
    (WidgetType::Vitals, 1, 0, 2, 1),
    (WidgetType::Fitness, 1, 1, 2, 1),
    (WidgetType::Recommendations, 3, 0, 1, 2),
    (WidgetType::WeeklyChart, 0, 2, 2, 1),
    (WidgetType::Awards, 2, 2, 1, 1),
    (WidgetType::Resources, 3, 2, 1, 1),
];

/// The seven built-in widgets, all visible, ids equal to their type names.
pub fn default_widgets() -> Vec<WidgetConfig> {
    DEFAULT_PLACEMENT
        .into_iter()
        .map(|(kind, x, y, width, height)| {
            let category = registry::lookup(&kind)
                .map(|meta| meta.category)
                .unwrap_or(WidgetCategory::Profile);
            let id = kind.as_str().to_string();
            WidgetConfig::new(id, kind, category)
                .at(x, y)
                .sized(width, height)
        })
        .collect()
}
