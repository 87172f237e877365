//! "Last saved" label formatting.

use crate::types::Timestamp;

/// Render how long ago a layout was saved, e.g. `"5 minutes ago"`.
///
/// `None` means the layout was never saved. Timestamps in the future (clock
/// skew between client and server) read as `"Just now"`.
pub fn last_saved_text(last_modified: Option<Timestamp>, now: Timestamp) -> String {
    let Some(saved_at) = last_modified else {
        return "Never saved".to_string();
    };

    let elapsed = now.signed_duration_since(saved_at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else {
        plural(days, "day")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
