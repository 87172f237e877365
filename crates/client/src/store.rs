//! Async layout store.
//!
//! [`LayoutStore`] owns the [`LayoutState`] of one user's dashboard and is
//! the only writer of it. Mutations are in-memory and never await I/O;
//! `load`, `save_layout` and `reset_layout` are the only suspension points.
//!
//! Two guards keep concurrent requests coherent:
//!
//! - **Single-flight save.** A second save while one is pending fails with
//!   [`StoreError::SaveInProgress`] instead of racing the first.
//! - **Response ordering.** Each load/save/reset takes a ticket when it is
//!   issued. A load response is dropped once any later-issued response has
//!   been applied. A save or reset response is dropped only once a later
//!   save or reset has been applied, so a load can never undo a write.
//!   Nothing is applied after [`LayoutStore::close`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, Mutex};
use vitalboard_core::error::CoreError;
use vitalboard_core::layout_state::{Baseline, LayoutState};
use vitalboard_core::mutator;
use vitalboard_core::relative_time::last_saved_text;
use vitalboard_core::types::Timestamp;
use vitalboard_core::validation::validate_layout;
use vitalboard_core::widget::{GridPosition, GridSize, WidgetConfig};

use crate::events::{LayoutEvent, LoadStatus, Notice};
use crate::gateway::{GatewayError, LayoutGateway};

/// Buffer capacity of the event channel.
const EVENT_CAPACITY: usize = 64;

pub const SAVE_SUCCESS_MESSAGE: &str = "Dashboard layout saved";
pub const SAVE_FAILURE_MESSAGE: &str = "Failed to save dashboard layout. Please try again.";
pub const RESET_SUCCESS_MESSAGE: &str = "Dashboard reset to the default layout";
pub const RESET_FAILURE_MESSAGE: &str = "Failed to reset dashboard layout. Please try again.";

// ---------------------------------------------------------------------------
// Errors / outcomes
// ---------------------------------------------------------------------------

/// Errors returned by [`LayoutStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("A layout save is already in progress")]
    SaveInProgress,

    #[error("Layout store is closed")]
    Closed,
}

/// Result of a [`LayoutStore::save_layout`] call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The draft was written to the backend.
    Saved,
    /// The write succeeded but a later reset had already replaced the
    /// layout; local state was left alone.
    Superseded,
    /// There was no draft; no request was made.
    NothingToSave,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Point-in-time copy of the store for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSnapshot {
    pub state: LayoutState,
    pub load_status: LoadStatus,
    pub saving: bool,
    pub notice: Option<Notice>,
}

impl LayoutSnapshot {
    pub fn effective_widgets(&self) -> &[WidgetConfig] {
        self.state.effective_widgets()
    }

    pub fn visible_widgets(&self) -> Vec<&WidgetConfig> {
        self.state.visible_widgets()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.state.has_unsaved_changes()
    }

    pub fn is_customizing(&self) -> bool {
        self.state.is_editing()
    }

    pub fn last_modified(&self) -> Option<Timestamp> {
        self.state.baseline().last_modified()
    }

    /// "Last saved" label relative to `now`.
    pub fn last_saved_text(&self, now: Timestamp) -> String {
        last_saved_text(self.last_modified(), now)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

struct StoreInner {
    state: LayoutState,
    load_status: LoadStatus,
    notice: Option<Notice>,
    /// Ticket handed to the most recently issued request.
    last_ticket: u64,
    /// Ticket of the most recent response that changed the baseline.
    applied_ticket: u64,
    /// Ticket of the most recent save or reset response applied.
    applied_write_ticket: u64,
    closed: bool,
}

impl StoreInner {
    fn issue_ticket(&mut self) -> u64 {
        self.last_ticket += 1;
        self.last_ticket
    }

    /// Whether a load response for `ticket` may still change the baseline.
    fn accepts_load(&self, ticket: u64) -> bool {
        !self.closed && ticket > self.applied_ticket
    }

    /// Whether a save or reset response for `ticket` may still change the
    /// baseline. Loads issued later do not supersede a write.
    fn accepts_write(&self, ticket: u64) -> bool {
        !self.closed && ticket > self.applied_write_ticket
    }

    fn mark_write_applied(&mut self, ticket: u64) {
        self.applied_write_ticket = ticket;
        self.applied_ticket = self.applied_ticket.max(ticket);
    }
}

/// Clears the in-flight flag when the save finishes or its future is dropped.
struct SaveFlight<'a>(&'a AtomicBool);

impl<'a> SaveFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SaveFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Holds the canonical layout and the customize-mode draft for one user.
///
/// Create one per dashboard session and share it via `Arc`. Instances are
/// independent; nothing is global.
pub struct LayoutStore {
    gateway: Arc<dyn LayoutGateway>,
    inner: Mutex<StoreInner>,
    saving: AtomicBool,
    events: broadcast::Sender<LayoutEvent>,
}

impl LayoutStore {
    /// Store showing the built-in defaults until [`load`](Self::load) runs.
    pub fn new(gateway: Arc<dyn LayoutGateway>) -> Self {
        Self::with_state(gateway, LayoutState::default())
    }

    /// Store starting from an explicit state.
    pub fn with_state(gateway: Arc<dyn LayoutGateway>, state: LayoutState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            gateway,
            inner: Mutex::new(StoreInner {
                state,
                load_status: LoadStatus::Idle,
                notice: None,
                last_ticket: 0,
                applied_ticket: 0,
                applied_write_ticket: 0,
                closed: false,
            }),
            saving: AtomicBool::new(false),
            events,
        }
    }

    /// Subscribe to store events.
    pub fn subscribe(&self) -> broadcast::Receiver<LayoutEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: LayoutEvent) {
        // A send error only means nobody is listening.
        let _ = self.events.send(event);
    }

    /// Stop applying responses. Requests already in flight complete on the
    /// wire but their results are ignored.
    pub async fn close(&self) {
        self.inner.lock().await.closed = true;
        tracing::debug!("Layout store closed");
    }

    // -- reads ------------------------------------------------------------

    pub async fn snapshot(&self) -> LayoutSnapshot {
        let inner = self.inner.lock().await;
        LayoutSnapshot {
            state: inner.state.clone(),
            load_status: inner.load_status.clone(),
            saving: self.is_saving(),
            notice: inner.notice.clone(),
        }
    }

    /// Draft if customizing, else canonical, else built-in defaults.
    pub async fn effective_widgets(&self) -> Vec<WidgetConfig> {
        self.inner.lock().await.state.effective_widgets().to_vec()
    }

    pub async fn visible_widgets(&self) -> Vec<WidgetConfig> {
        let inner = self.inner.lock().await;
        inner.state.visible_widgets().into_iter().cloned().collect()
    }

    pub async fn has_unsaved_changes(&self) -> bool {
        self.inner.lock().await.state.has_unsaved_changes()
    }

    pub async fn is_customizing(&self) -> bool {
        self.inner.lock().await.state.is_editing()
    }

    pub async fn load_status(&self) -> LoadStatus {
        self.inner.lock().await.load_status.clone()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// "Last saved" label relative to the current time.
    pub async fn last_saved_text(&self) -> String {
        let last_modified = self.inner.lock().await.state.baseline().last_modified();
        last_saved_text(last_modified, Utc::now())
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.inner.lock().await.notice.clone()
    }

    pub async fn dismiss_notice(&self) {
        self.inner.lock().await.notice = None;
    }

    // -- customize mode ---------------------------------------------------

    /// Start a draft from the current effective list. Re-entering keeps
    /// any unsaved draft.
    pub async fn enter_customize_mode(&self) {
        self.inner.lock().await.state.enter_customize();
        self.publish(LayoutEvent::CustomizeEntered);
    }

    /// Discard the draft without confirmation.
    pub async fn exit_customize_mode(&self) {
        let discarded = self.inner.lock().await.state.exit_customize();
        self.publish(LayoutEvent::CustomizeExited { discarded });
    }

    // -- mutations --------------------------------------------------------

    /// Flip visibility of `id`. Unknown ids are ignored (`false`).
    pub async fn toggle_widget_visibility(&self, id: &str) -> bool {
        self.mutate(|state| state.toggle_widget_visibility(id)).await
    }

    pub async fn update_widget_position(&self, id: &str, position: GridPosition) -> bool {
        self.mutate(|state| state.update_widget_position(id, position))
            .await
    }

    pub async fn update_widget_size(&self, id: &str, size: GridSize) -> bool {
        self.mutate(|state| state.update_widget_size(id, size)).await
    }

    /// Move the widget at `source` to `dest` in the effective list.
    /// Out-of-range indices are ignored (`false`).
    pub async fn reorder_widgets(&self, source: usize, dest: usize) -> bool {
        self.mutate(|state| state.reorder_widgets(source, dest)).await
    }

    /// Move widget `source_id` to the slot currently held by `target_id`.
    ///
    /// Both ids are resolved against the effective list under one lock, so
    /// a list that changed since the caller last looked cannot misplace the
    /// move. Unresolvable or identical ids are ignored (`false`).
    pub async fn move_widget(&self, source_id: &str, target_id: &str) -> bool {
        self.mutate(|state| {
            let widgets = state.effective_widgets();
            match (
                mutator::index_of(widgets, source_id),
                mutator::index_of(widgets, target_id),
            ) {
                (Some(source), Some(dest)) if source != dest => state.reorder_widgets(source, dest),
                _ => false,
            }
        })
        .await
    }

    async fn mutate(&self, apply: impl FnOnce(&mut LayoutState) -> bool) -> bool {
        let changed = apply(&mut self.inner.lock().await.state);
        if changed {
            self.publish(LayoutEvent::Changed);
        }
        changed
    }

    // -- gateway operations -----------------------------------------------

    /// Fetch the stored layout and make it the baseline.
    ///
    /// A user without a stored layout gets the built-in defaults. On
    /// failure the current baseline (initially the defaults) stays in use,
    /// the load status records the error and the error is returned.
    pub async fn load(&self) -> Result<(), StoreError> {
        let ticket = {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return Err(StoreError::Closed);
            }
            inner.load_status = LoadStatus::Loading;
            inner.issue_ticket()
        };

        tracing::debug!(ticket, "Loading dashboard layout");
        let result = self.gateway.fetch_layout().await;

        let mut inner = self.inner.lock().await;
        if inner.closed {
            tracing::debug!(ticket, "Store closed, ignoring load response");
            return Err(StoreError::Closed);
        }
        if !inner.accepts_load(ticket) {
            // A later request already supplied a fresher baseline.
            tracing::debug!(ticket, "Discarding stale layout load response");
            if inner.load_status.is_loading() {
                inner.load_status = LoadStatus::Loaded;
            }
            return Ok(());
        }

        match result {
            Ok(data) => {
                let persisted = data.is_some();
                let baseline = data.map_or_else(Baseline::defaults, Baseline::persisted);
                tracing::info!(
                    persisted,
                    widget_count = baseline.widgets().len(),
                    "Dashboard layout loaded",
                );

                inner.applied_ticket = ticket;
                inner.state.replace_baseline(baseline);
                inner.load_status = LoadStatus::Loaded;
                drop(inner);

                self.publish(LayoutEvent::Loaded { persisted });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load dashboard layout, using current baseline");
                let message = e.to_string();
                inner.load_status = LoadStatus::Failed(message.clone());
                drop(inner);

                self.publish(LayoutEvent::LoadFailed { message });
                Err(e.into())
            }
        }
    }

    /// Write the draft to the backend.
    ///
    /// Without a draft nothing is sent. The draft is validated first; a
    /// validation or gateway failure keeps the draft intact and raises an
    /// error notice. On success the stored layout becomes the baseline and
    /// the draft is cleared unless it was edited while the request was in
    /// flight. A response overtaken by a later reset leaves state, notice
    /// and events untouched and yields [`SaveOutcome::Superseded`].
    pub async fn save_layout(&self) -> Result<SaveOutcome, StoreError> {
        let (flight, ticket, sent) = {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return Err(StoreError::Closed);
            }

            let Some(draft) = inner.state.draft() else {
                tracing::debug!("No draft to save");
                return Ok(SaveOutcome::NothingToSave);
            };
            let sent = draft.to_vec();

            let Some(flight) = SaveFlight::acquire(&self.saving) else {
                tracing::debug!("Save requested while another is in flight");
                return Err(StoreError::SaveInProgress);
            };

            if let Err(e) = validate_layout(&sent) {
                tracing::warn!(error = %e, "Refusing to save invalid layout");
                inner.notice = Some(Notice::error(e.to_string()));
                drop(inner);
                self.publish(LayoutEvent::SaveFailed {
                    message: e.to_string(),
                });
                return Err(e.into());
            }

            (flight, inner.issue_ticket(), sent)
        };

        tracing::info!(ticket, widget_count = sent.len(), "Saving dashboard layout");
        let result = self.gateway.save_layout(&sent).await;

        // The in-flight flag is held until the response has been applied.
        let mut inner = self.inner.lock().await;
        if inner.closed {
            tracing::debug!(ticket, "Store closed, ignoring save response");
            return Err(StoreError::Closed);
        }

        match result {
            Ok(data) => {
                if !inner.accepts_write(ticket) {
                    tracing::debug!(ticket, "Later reset already applied, ignoring save response");
                    return Ok(SaveOutcome::Superseded);
                }
                inner.mark_write_applied(ticket);
                inner.state.commit_saved(Baseline::persisted(data), &sent);
                inner.notice = Some(Notice::success(SAVE_SUCCESS_MESSAGE));
                drop(inner);
                drop(flight);

                tracing::info!(ticket, "Dashboard layout saved");
                self.publish(LayoutEvent::Saved);
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                tracing::error!(ticket, error = %e, "Failed to save dashboard layout");
                inner.notice = Some(Notice::error(SAVE_FAILURE_MESSAGE));
                drop(inner);

                self.publish(LayoutEvent::SaveFailed {
                    message: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Restore the server defaults, discarding any draft.
    ///
    /// On failure the baseline and draft are left as they were and an error
    /// notice is raised. A response overtaken by a later save or reset is
    /// ignored.
    pub async fn reset_layout(&self) -> Result<(), StoreError> {
        let ticket = {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return Err(StoreError::Closed);
            }
            inner.issue_ticket()
        };

        tracing::info!(ticket, "Resetting dashboard layout");
        let result = self.gateway.reset_layout().await;

        let mut inner = self.inner.lock().await;
        if inner.closed {
            tracing::debug!(ticket, "Store closed, ignoring reset response");
            return Err(StoreError::Closed);
        }

        match result {
            Ok(data) => {
                if !inner.accepts_write(ticket) {
                    tracing::debug!(ticket, "Later write already applied, ignoring reset response");
                    return Ok(());
                }
                inner.mark_write_applied(ticket);
                inner.state.reset_to(Baseline::persisted(data));
                inner.notice = Some(Notice::success(RESET_SUCCESS_MESSAGE));
                drop(inner);

                tracing::info!(ticket, "Dashboard layout reset");
                self.publish(LayoutEvent::Reset);
                Ok(())
            }
            Err(e) => {
                tracing::error!(ticket, error = %e, "Failed to reset dashboard layout");
                inner.notice = Some(Notice::error(RESET_FAILURE_MESSAGE));
                drop(inner);

                self.publish(LayoutEvent::ResetFailed {
                    message: e.to_string(),
                });
                Err(e.into())
            }
        }
    }
}
