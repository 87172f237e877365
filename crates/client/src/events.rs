//! Store notifications for the presentation layer.
//!
//! [`LayoutEvent`]s fan out over a `tokio::sync::broadcast` channel so any
//! number of views can re-render on change. [`Notice`] is the single
//! dismissible message the customize screen shows after a save or reset.

/// Something observable happened to the layout store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    /// A layout (stored or built-in default) became the baseline.
    Loaded { persisted: bool },
    /// Fetching the layout failed; the current baseline stays in use.
    LoadFailed { message: String },
    /// The draft changed through a mutation.
    Changed,
    CustomizeEntered,
    /// Customize mode ended; `discarded` is `true` if a draft was dropped.
    CustomizeExited { discarded: bool },
    Saved,
    SaveFailed { message: String },
    Reset,
    ResetFailed { message: String },
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Progress of the initial layout fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Fetch failed; built-in defaults (or the previous baseline) render.
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }
}
