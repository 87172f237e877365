/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable widget identity, unique within a layout.
pub type WidgetId = String;
