//! Customize screen view model.
//!
//! [`CustomizeView`] turns the store state into render-ready rows (grid
//! cards, sidebar entries, category chips, status bar) and translates
//! drag-and-drop gestures into store reorders. It holds no rendering code,
//! so any UI layer can draw from it and tests can drive it directly.

use std::sync::Arc;

use chrono::Utc;
use vitalboard_core::gesture::DragGesture;
use vitalboard_core::mutator;
use vitalboard_core::registry;
use vitalboard_core::types::{Timestamp, WidgetId};
use vitalboard_core::widget::{GridSize, WidgetCategory, WidgetConfig, WidgetType};

use crate::events::Notice;
use crate::store::{LayoutStore, SaveOutcome, StoreError};

// ---------------------------------------------------------------------------
// Render rows
// ---------------------------------------------------------------------------

/// One card in the live grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCard {
    pub id: WidgetId,
    pub kind: WidgetType,
    pub title: String,
    pub description: String,
    pub icon: &'static str,
    pub size: GridSize,
    /// Card is being dragged (rendered de-emphasised).
    pub dragging: bool,
    /// Card is the current drop target (rendered highlighted).
    pub drop_target: bool,
}

/// One row of the sidebar visibility selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: WidgetId,
    pub title: String,
    pub description: String,
    pub category: WidgetCategory,
    pub visible: bool,
}

/// A category filter chip. `category == None` is the "All" chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChip {
    pub category: Option<WidgetCategory>,
    pub label: &'static str,
    pub count: usize,
    pub selected: bool,
}

/// Header state of the customize screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    pub customizing: bool,
    pub has_unsaved_changes: bool,
    pub saving: bool,
    pub last_saved: String,
}

fn sidebar_entry(widget: &WidgetConfig) -> SidebarEntry {
    SidebarEntry {
        id: widget.id.clone(),
        title: registry::display_name(&widget.kind).to_string(),
        description: registry::describe(&widget.kind).to_string(),
        category: widget.category,
        visible: widget.visible,
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// View model backing the dashboard customize screen.
pub struct CustomizeView {
    store: Arc<LayoutStore>,
    gesture: DragGesture,
    category: Option<WidgetCategory>,
}

impl CustomizeView {
    pub fn new(store: Arc<LayoutStore>) -> Self {
        Self {
            store,
            gesture: DragGesture::default(),
            category: None,
        }
    }

    pub fn store(&self) -> &Arc<LayoutStore> {
        &self.store
    }

    pub fn gesture(&self) -> &DragGesture {
        &self.gesture
    }

    // -- mode -------------------------------------------------------------

    pub async fn enter(&mut self) {
        self.store.enter_customize_mode().await;
    }

    /// Leave customize mode, discarding the draft and any gesture.
    pub async fn exit(&mut self) {
        self.gesture.drag_end();
        self.store.exit_customize_mode().await;
    }

    // -- rows -------------------------------------------------------------

    /// Cards for the visible widgets, in list order.
    pub async fn grid(&self) -> Vec<GridCard> {
        let source = self.gesture.source();
        let target = self.gesture.target();

        self.store
            .visible_widgets()
            .await
            .into_iter()
            .map(|widget| GridCard {
                dragging: source == Some(widget.id.as_str()),
                drop_target: target == Some(widget.id.as_str()),
                title: registry::display_name(&widget.kind).to_string(),
                description: registry::describe(&widget.kind).to_string(),
                icon: registry::icon(&widget.kind),
                size: widget.size,
                kind: widget.kind,
                id: widget.id,
            })
            .collect()
    }

    /// Sidebar rows for every widget (visible or not) in the selected
    /// category.
    pub async fn sidebar(&self) -> Vec<SidebarEntry> {
        self.store
            .effective_widgets()
            .await
            .iter()
            .filter(|w| self.category.map_or(true, |c| w.category == c))
            .map(sidebar_entry)
            .collect()
    }

    /// "All" chip followed by one chip per category, with widget counts.
    pub async fn category_chips(&self) -> Vec<CategoryChip> {
        let widgets = self.store.effective_widgets().await;

        let all = CategoryChip {
            category: None,
            label: "All",
            count: widgets.len(),
            selected: self.category.is_none(),
        };

        std::iter::once(all)
            .chain(WidgetCategory::ALL.into_iter().map(|category| CategoryChip {
                category: Some(category),
                label: category.label(),
                count: widgets.iter().filter(|w| w.category == category).count(),
                selected: self.category == Some(category),
            }))
            .collect()
    }

    /// Filter the sidebar. Never affects the grid.
    pub fn select_category(&mut self, category: Option<WidgetCategory>) {
        self.category = category;
    }

    pub fn selected_category(&self) -> Option<WidgetCategory> {
        self.category
    }

    pub async fn status(&self) -> StatusBar {
        self.status_at(Utc::now()).await
    }

    /// Status bar with "last saved" computed relative to `now`.
    pub async fn status_at(&self, now: Timestamp) -> StatusBar {
        let snapshot = self.store.snapshot().await;
        StatusBar {
            customizing: snapshot.is_customizing(),
            has_unsaved_changes: snapshot.has_unsaved_changes(),
            saving: snapshot.saving,
            last_saved: snapshot.last_saved_text(now),
        }
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.store.notice().await
    }

    pub async fn dismiss_notice(&self) {
        self.store.dismiss_notice().await;
    }

    // -- drag and drop ----------------------------------------------------

    pub fn drag_start(&mut self, widget_id: &str) {
        self.gesture.drag_start(widget_id);
    }

    pub fn drag_over(&mut self, target_id: &str) {
        self.gesture.drag_over(target_id);
    }

    /// Drop the dragged widget onto `target_id`.
    ///
    /// Both ids must still be visible in the grid and differ; otherwise the
    /// drop is ignored. The gesture returns to idle either way. Returns
    /// `true` if the list was reordered.
    pub async fn drop(&mut self, target_id: &str) -> bool {
        let Some(intent) = self.gesture.drop_on(target_id) else {
            return false;
        };

        let visible = self.store.visible_widgets().await;
        let source_index = mutator::index_of(&visible, &intent.source);
        let target_index = mutator::index_of(&visible, &intent.target);

        match (source_index, target_index) {
            (Some(source), Some(target)) if source != target => {
                self.store.move_widget(&intent.source, &intent.target).await
            }
            _ => {
                tracing::debug!(
                    source = %intent.source,
                    target = %intent.target,
                    "Drop ids no longer in the grid, ignoring",
                );
                false
            }
        }
    }

    pub fn drag_end(&mut self) {
        self.gesture.drag_end();
    }

    // -- actions ----------------------------------------------------------

    pub async fn toggle(&self, widget_id: &str) -> bool {
        self.store.toggle_widget_visibility(widget_id).await
    }

    pub async fn save(&self) -> Result<SaveOutcome, StoreError> {
        self.store.save_layout().await
    }

    /// Reset to server defaults. Any gesture in progress is abandoned.
    pub async fn reset(&mut self) -> Result<(), StoreError> {
        self.gesture.drag_end();
        self.store.reset_layout().await
    }
}
