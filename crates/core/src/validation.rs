//! Layout validation applied before a layout is persisted.

use std::collections::HashSet;

use validator::Validate;

use crate::error::CoreError;
use crate::widget::WidgetConfig;

/// Maximum number of widgets a single layout may hold.
pub const MAX_WIDGETS: usize = 32;

/// Validate a widget list for persistence.
///
/// Checks the list length, per-widget field ranges (id length, size within
/// the grid, non-negative position), that every widget has a known type and
/// that ids are unique.
pub fn validate_layout(widgets: &[WidgetConfig]) -> Result<(), CoreError> {
    if widgets.len() > MAX_WIDGETS {
        return Err(CoreError::Validation(format!(
            "Layout has {} widgets; at most {MAX_WIDGETS} are allowed",
            widgets.len()
        )));
    }

    let mut seen = HashSet::with_capacity(widgets.len());
    for widget in widgets {
        widget.validate().map_err(|errors| {
            CoreError::Validation(format!("Widget '{}' is invalid: {errors}", widget.id))
        })?;

        if !widget.kind.is_known() {
            return Err(CoreError::Validation(format!(
                "Widget '{}' has unknown type '{}'",
                widget.id, widget.kind
            )));
        }

        if !seen.insert(widget.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate widget id '{}'",
                widget.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::defaults::default_widgets;
    use crate::widget::{WidgetCategory, WidgetType};

    #[test]
    fn empty_layout_is_valid() {
        assert!(validate_layout(&[]).is_ok());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut widgets = default_widgets();
        widgets[1].id = "profile".into();

        let err = validate_layout(&widgets).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Duplicate widget id 'profile'"));
    }

    #[test]
    fn empty_id_is_rejected() {
        let widgets = vec![WidgetConfig::new("", WidgetType::Vitals, WidgetCategory::Vitals)];
        assert_matches!(validate_layout(&widgets), Err(CoreError::Validation(_)));
    }

    #[test]
    fn oversized_widget_is_rejected() {
        let widgets = vec![
            WidgetConfig::new("vitals", WidgetType::Vitals, WidgetCategory::Vitals).sized(2, 9),
        ];

        let err = validate_layout(&widgets).unwrap_err();
        assert!(err.to_string().contains("vitals"));
    }

    #[test]
    fn unknown_type_is_rejected_on_write() {
        let widgets = vec![WidgetConfig::new(
            "sleep",
            WidgetType::Other("sleep-tracker".into()),
            WidgetCategory::Vitals,
        )];

        let err = validate_layout(&widgets).unwrap_err();
        assert!(err.to_string().contains("sleep-tracker"));
    }

    #[test]
    fn too_many_widgets_are_rejected() {
        let widgets: Vec<_> = (0..=MAX_WIDGETS)
            .map(|i| WidgetConfig::new(format!("w{i}"), WidgetType::Awards, WidgetCategory::Social))
            .collect();

        assert_matches!(validate_layout(&widgets), Err(CoreError::Validation(_)));
    }
}
