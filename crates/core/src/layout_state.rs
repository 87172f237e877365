//! Canonical-versus-draft layout edit model.
//!
//! A layout is either showing its canonical widget list or being edited, in
//! which case a draft list sits on top of the canonical baseline. "Unsaved
//! changes" exists only in the `Editing` variant, and only while the draft
//! differs from its baseline.

use crate::defaults::default_widgets;
use crate::mutator;
use crate::types::Timestamp;
use crate::widget::{DashboardLayoutData, GridPosition, GridSize, WidgetConfig};

// ---------------------------------------------------------------------------
// Baseline
// ---------------------------------------------------------------------------

/// The last server-confirmed widget list, or the built-in defaults when
/// the server has none for this user yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    widgets: Vec<WidgetConfig>,
    last_modified: Option<Timestamp>,
}

impl Baseline {
    /// Built-in defaults, never persisted.
    pub fn defaults() -> Self {
        Self {
            widgets: default_widgets(),
            last_modified: None,
        }
    }

    /// Baseline confirmed by the server.
    pub fn persisted(data: DashboardLayoutData) -> Self {
        Self {
            widgets: data.widgets,
            last_modified: Some(data.last_modified),
        }
    }

    pub fn widgets(&self) -> &[WidgetConfig] {
        &self.widgets
    }

    /// Time of the last successful save, `None` for built-in defaults.
    pub fn last_modified(&self) -> Option<Timestamp> {
        self.last_modified
    }

    pub fn is_persisted(&self) -> bool {
        self.last_modified.is_some()
    }

    fn placeholder() -> Self {
        Self {
            widgets: Vec::new(),
            last_modified: None,
        }
    }
}

impl From<DashboardLayoutData> for Baseline {
    fn from(data: DashboardLayoutData) -> Self {
        Self::persisted(data)
    }
}

// ---------------------------------------------------------------------------
// LayoutState
// ---------------------------------------------------------------------------

/// Edit state of a single dashboard layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutState {
    /// No draft; the baseline is what renders.
    Canonical(Baseline),
    /// A client-owned draft on top of the baseline it was started from.
    Editing {
        draft: Vec<WidgetConfig>,
        baseline: Baseline,
    },
}

impl Default for LayoutState {
    fn default() -> Self {
        LayoutState::Canonical(Baseline::defaults())
    }
}

impl LayoutState {
    pub fn new(baseline: Baseline) -> Self {
        LayoutState::Canonical(baseline)
    }

    pub fn baseline(&self) -> &Baseline {
        match self {
            LayoutState::Canonical(baseline) | LayoutState::Editing { baseline, .. } => baseline,
        }
    }

    /// The draft list, present only while editing.
    pub fn draft(&self) -> Option<&[WidgetConfig]> {
        match self {
            LayoutState::Canonical(_) => None,
            LayoutState::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, LayoutState::Editing { .. })
    }

    /// Draft if editing, otherwise the baseline.
    pub fn effective_widgets(&self) -> &[WidgetConfig] {
        match self {
            LayoutState::Canonical(baseline) => baseline.widgets(),
            LayoutState::Editing { draft, .. } => draft,
        }
    }

    /// Widgets that render in the grid, in list order.
    pub fn visible_widgets(&self) -> Vec<&WidgetConfig> {
        self.effective_widgets().iter().filter(|w| w.visible).collect()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        match self {
            LayoutState::Canonical(_) => false,
            LayoutState::Editing { draft, baseline } => draft.as_slice() != baseline.widgets(),
        }
    }

    // -- customize mode ---------------------------------------------------

    /// Start a draft from the baseline. Re-entering keeps the current draft.
    pub fn enter_customize(&mut self) {
        if let LayoutState::Canonical(baseline) = self {
            let draft = baseline.widgets.clone();
            let baseline = std::mem::replace(baseline, Baseline::placeholder());
            *self = LayoutState::Editing { draft, baseline };
        }
    }

    /// Discard the draft unconditionally. Returns `true` if one existed.
    pub fn exit_customize(&mut self) -> bool {
        match self.take() {
            LayoutState::Editing { baseline, .. } => {
                *self = LayoutState::Canonical(baseline);
                true
            }
            canonical => {
                *self = canonical;
                false
            }
        }
    }

    // -- mutations --------------------------------------------------------

    /// Flip visibility of `id`. Returns `false` (and changes nothing) for
    /// an unknown id.
    pub fn toggle_widget_visibility(&mut self, id: &str) -> bool {
        self.apply(|widgets| mutator::toggle_visibility(widgets, id))
    }

    pub fn update_widget_position(&mut self, id: &str, position: GridPosition) -> bool {
        self.apply(|widgets| mutator::update_position(widgets, id, position))
    }

    pub fn update_widget_size(&mut self, id: &str, size: GridSize) -> bool {
        self.apply(|widgets| mutator::update_size(widgets, id, size))
    }

    /// Move the widget at `source` to `dest` in the effective list.
    /// Out-of-range indices leave the state untouched.
    pub fn reorder_widgets(&mut self, source: usize, dest: usize) -> bool {
        self.apply(|widgets| mutator::reorder(widgets, source, dest))
    }

    /// Run a mutation against the effective list and, if it resolves,
    /// store the result as the draft (starting one if needed).
    fn apply(&mut self, mutation: impl FnOnce(&[WidgetConfig]) -> Option<Vec<WidgetConfig>>) -> bool {
        let Some(next) = mutation(self.effective_widgets()) else {
            return false;
        };

        match self {
            LayoutState::Editing { draft, .. } => *draft = next,
            LayoutState::Canonical(baseline) => {
                let baseline = std::mem::replace(baseline, Baseline::placeholder());
                *self = LayoutState::Editing {
                    draft: next,
                    baseline,
                };
            }
        }
        true
    }

    // -- server outcomes --------------------------------------------------

    /// Swap in a freshly loaded baseline, keeping any draft.
    pub fn replace_baseline(&mut self, fresh: Baseline) {
        match self {
            LayoutState::Canonical(baseline) | LayoutState::Editing { baseline, .. } => {
                *baseline = fresh;
            }
        }
    }

    /// Apply a successful save of `sent`.
    ///
    /// The saved layout becomes the baseline. The draft is dropped when it
    /// still equals what was sent; edits made while the save was in flight
    /// stay as a draft on top of the new baseline.
    pub fn commit_saved(&mut self, saved: Baseline, sent: &[WidgetConfig]) {
        *self = match self.take() {
            LayoutState::Editing { draft, .. } if draft.as_slice() != sent => LayoutState::Editing {
                draft,
                baseline: saved,
            },
            _ => LayoutState::Canonical(saved),
        };
    }

    /// Replace everything with `fresh`, discarding any draft.
    pub fn reset_to(&mut self, fresh: Baseline) {
        *self = LayoutState::Canonical(fresh);
    }

    fn take(&mut self) -> LayoutState {
        std::mem::replace(self, LayoutState::Canonical(Baseline::placeholder()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
