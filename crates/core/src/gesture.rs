//! Drag-and-drop gesture state machine for the customize grid.
//!
//! ```text
//! Idle --drag_start(s)--> Dragging(s) --drag_over(t != s)--> Hovering(s, t)
//!   ^                         |   ^                               |
//!   |                         |   +-------drag_over(s)------------+
//!   +------drop / drag_end----+-----------------------------------+
//! ```
//!
//! The machine only tracks ids. Turning a drop into a reorder (resolving
//! indices against the current widget list) is the caller's job, so this
//! type is independent of any input or rendering framework.

use crate::types::WidgetId;

/// Current phase of a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging {
        source: WidgetId,
    },
    Hovering {
        source: WidgetId,
        target: WidgetId,
    },
}

/// A completed drop: move `source` to where `target` currently sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIntent {
    pub source: WidgetId,
    pub target: WidgetId,
}

impl DragGesture {
    /// Begin dragging `source`, replacing any gesture in progress.
    pub fn drag_start(&mut self, source: impl Into<WidgetId>) {
        *self = DragGesture::Dragging {
            source: source.into(),
        };
    }

    /// Pointer moved over `target`. Ignored while idle.
    pub fn drag_over(&mut self, target: &str) {
        let Some(source) = self.source().map(str::to_owned) else {
            return;
        };

        *self = if target == source {
            DragGesture::Dragging { source }
        } else {
            DragGesture::Hovering {
                source,
                target: target.to_owned(),
            }
        };
    }

    /// Drop on `target`. Always returns to `Idle`; yields an intent only
    /// when a drag was active and `target` differs from the source.
    pub fn drop_on(&mut self, target: &str) -> Option<DropIntent> {
        let source = match std::mem::take(self) {
            DragGesture::Idle => return None,
            DragGesture::Dragging { source } | DragGesture::Hovering { source, .. } => source,
        };

        (source != target).then(|| DropIntent {
            source,
            target: target.to_owned(),
        })
    }

    /// Drag cancelled or finished. Always returns to `Idle`.
    pub fn drag_end(&mut self) {
        *self = DragGesture::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragGesture::Idle)
    }

    /// Id being dragged, if any. Rendered de-emphasised.
    pub fn source(&self) -> Option<&str> {
        match self {
            DragGesture::Idle => None,
            DragGesture::Dragging { source } | DragGesture::Hovering { source, .. } => Some(source),
        }
    }

    /// Id currently highlighted as the drop target, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            DragGesture::Hovering { target, .. } => Some(target),
            _ => None,
        }
    }
}
