//! Tests for the customize screen view model.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use common::{ids, loaded_store, widget, MockGateway};
use vitalboard_client::customize::CustomizeView;
use vitalboard_client::events::NoticeLevel;
use vitalboard_client::store::{LayoutStore, SaveOutcome};
use vitalboard_core::widget::WidgetCategory;

async fn view_over(widgets: Vec<vitalboard_core::widget::WidgetConfig>) -> (CustomizeView, Arc<MockGateway>) {
    let gateway = MockGateway::with_layout(widgets);
    let store = loaded_store(gateway.clone()).await;
    (CustomizeView::new(store), gateway)
}

async fn default_view() -> CustomizeView {
    let store = Arc::new(LayoutStore::new(MockGateway::new()));
    store.load().await.unwrap();
    CustomizeView::new(store)
}

fn grid_ids(cards: &[vitalboard_client::customize::GridCard]) -> Vec<&str> {
    cards.iter().map(|c| c.id.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Drag and drop
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drop_moves_source_to_target_slot() {
    let (mut view, _) = view_over(vec![widget("a"), widget("b"), widget("c")]).await;
    view.enter().await;

    view.drag_start("a");
    view.drag_over("c");
    assert!(view.drop("c").await);

    assert!(view.gesture().is_idle());
    assert_eq!(grid_ids(&view.grid().await), ["b", "c", "a"]);
    assert!(view.status().await.has_unsaved_changes);
}

#[tokio::test]
async fn grid_marks_dragged_and_hovered_cards() {
    let (mut view, _) = view_over(vec![widget("a"), widget("b")]).await;
    view.enter().await;

    view.drag_start("a");
    view.drag_over("b");
    let cards = view.grid().await;

    assert!(cards[0].dragging && !cards[0].drop_target);
    assert!(cards[1].drop_target && !cards[1].dragging);

    view.drag_end();
    let cards = view.grid().await;
    assert!(cards.iter().all(|c| !c.dragging && !c.drop_target));
}

#[tokio::test]
async fn drop_on_self_is_ignored() {
    let (mut view, _) = view_over(vec![widget("a"), widget("b")]).await;
    view.enter().await;

    view.drag_start("a");
    assert!(!view.drop("a").await);

    assert!(view.gesture().is_idle());
    assert!(!view.status().await.has_unsaved_changes);
}

#[tokio::test]
async fn drop_without_drag_is_ignored() {
    let (mut view, _) = view_over(vec![widget("a"), widget("b")]).await;
    view.enter().await;

    assert!(!view.drop("b").await);
    assert_eq!(grid_ids(&view.grid().await), ["a", "b"]);
}

#[tokio::test]
async fn drop_with_hidden_source_is_ignored() {
    let (mut view, _) = view_over(vec![widget("a"), widget("b"), widget("c")]).await;
    view.enter().await;

    view.drag_start("a");
    // Hidden from the sidebar while the drag is in progress.
    view.toggle("a").await;
    assert!(!view.drop("c").await);

    assert!(view.gesture().is_idle());
    assert_eq!(grid_ids(&view.grid().await), ["b", "c"]);
}

#[tokio::test]
async fn hidden_widgets_keep_their_slot_on_drop() {
    let (mut view, _) =
        view_over(vec![widget("a"), widget("b").hidden(), widget("c"), widget("d")]).await;
    view.enter().await;

    view.drag_start("d");
    assert!(view.drop("a").await);

    let store = Arc::clone(view.store());
    assert_eq!(ids(&store.effective_widgets().await), ["d", "a", "b", "c"]);
    assert_eq!(grid_ids(&view.grid().await), ["d", "a", "c"]);
}

#[tokio::test]
async fn exit_discards_draft_and_gesture() {
    let (mut view, _) = view_over(vec![widget("a"), widget("b")]).await;
    view.enter().await;
    view.drag_start("a");
    view.drag_over("b");
    assert!(view.drop("b").await);
    view.drag_start("a");

    view.exit().await;

    assert!(view.gesture().is_idle());
    assert!(!view.status().await.customizing);
    assert_eq!(grid_ids(&view.grid().await), ["a", "b"]);
}

// ---------------------------------------------------------------------------
// Sidebar and category filter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn category_filter_only_affects_sidebar() {
    let mut view = default_view().await;
    view.enter().await;
    let grid_before = view.grid().await;

    view.select_category(Some(WidgetCategory::Fitness));

    let sidebar = view.sidebar().await;
    assert_eq!(
        sidebar.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
        ["fitness", "weekly-chart"]
    );
    assert!(sidebar.iter().all(|e| e.category == WidgetCategory::Fitness));
    assert_eq!(view.grid().await, grid_before);
    assert_eq!(view.selected_category(), Some(WidgetCategory::Fitness));
}

#[tokio::test]
async fn sidebar_lists_hidden_widgets() {
    let mut view = default_view().await;
    view.enter().await;
    view.toggle("awards").await;

    let sidebar = view.sidebar().await;
    let awards = sidebar.iter().find(|e| e.id == "awards").unwrap();

    assert_eq!(sidebar.len(), 7);
    assert!(!awards.visible);
    assert_eq!(awards.title, "Awards & Badges");
    assert_eq!(view.grid().await.len(), 6);
}

#[tokio::test]
async fn chips_count_widgets_per_category() {
    let mut view = default_view().await;
    view.select_category(Some(WidgetCategory::Recommendations));

    let chips = view.category_chips().await;
    let summary: Vec<_> = chips.iter().map(|c| (c.label, c.count, c.selected)).collect();

    assert_eq!(
        summary,
        [
            ("All", 7, false),
            ("Profile", 1, false),
            ("Vitals", 1, false),
            ("Fitness", 2, false),
            ("Social", 1, false),
            ("Recommendations", 2, true),
        ]
    );
}

// ---------------------------------------------------------------------------
// Status and actions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_reports_relative_save_time() {
    let (view, _) = view_over(vec![widget("a")]).await;

    let status = view.status_at(Utc::now() + Duration::minutes(5)).await;

    assert!(!status.customizing);
    assert!(!status.saving);
    assert_eq!(status.last_saved, "5 minutes ago");
}

#[tokio::test]
async fn status_before_first_save_says_never() {
    let view = default_view().await;
    assert_eq!(view.status().await.last_saved, "Never saved");
}

#[tokio::test]
async fn save_then_notice_then_dismiss() {
    let (mut view, gateway) = view_over(vec![widget("a"), widget("b")]).await;
    view.enter().await;
    view.toggle("b").await;

    assert_eq!(view.save().await.unwrap(), SaveOutcome::Saved);
    assert_eq!(gateway.saves(), 1);
    assert_eq!(view.notice().await.unwrap().level, NoticeLevel::Success);

    view.dismiss_notice().await;
    assert!(view.notice().await.is_none());
    assert_eq!(grid_ids(&view.grid().await), ["a"]);
}

#[tokio::test]
async fn reset_ends_gesture_and_restores_defaults() {
    let (mut view, _) = view_over(vec![widget("a"), widget("b")]).await;
    view.enter().await;
    view.drag_start("a");

    view.reset().await.unwrap();

    assert!(view.gesture().is_idle());
    assert_eq!(view.grid().await.len(), 7);
    assert!(!view.status().await.customizing);
}
