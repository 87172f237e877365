//! Static widget registry.
//!
//! Maps each known [`WidgetType`] to its display metadata. The sidebar
//! selector and the customize grid both read labels from here.

use crate::widget::{WidgetCategory, WidgetType};

/// Display metadata for a widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: WidgetCategory,
}

const PROFILE: WidgetMeta = WidgetMeta {
    name: "Health Profile",
    description: "Your personal details, goals and care team at a glance",
    icon: "user",
    category: WidgetCategory::Profile,
};

const VITALS: WidgetMeta = WidgetMeta {
    name: "Vital Signs",
    description: "Latest heart rate, blood pressure, weight and glucose readings",
    icon: "heart-pulse",
    category: WidgetCategory::Vitals,
};

const FITNESS: WidgetMeta = WidgetMeta {
    name: "Fitness Stats",
    description: "Steps, active minutes and calories burned today",
    icon: "activity",
    category: WidgetCategory::Fitness,
};

const RECOMMENDATIONS: WidgetMeta = WidgetMeta {
    name: "Health Recommendations",
    description: "Personalised suggestions based on your recent data",
    icon: "lightbulb",
    category: WidgetCategory::Recommendations,
};

const WEEKLY_CHART: WidgetMeta = WidgetMeta {
    name: "Weekly Activity",
    description: "Seven-day chart of your activity trends",
    icon: "bar-chart",
    category: WidgetCategory::Fitness,
};

const AWARDS: WidgetMeta = WidgetMeta {
    name: "Awards & Badges",
    description: "Milestones and streaks you have earned",
    icon: "trophy",
    category: WidgetCategory::Social,
};

const RESOURCES: WidgetMeta = WidgetMeta {
    name: "Health Resources",
    description: "Articles and guides picked from the content library",
    icon: "book-open",
    category: WidgetCategory::Recommendations,
};

/// Look up metadata for a widget kind. Returns `None` for unknown kinds.
pub fn lookup(kind: &WidgetType) -> Option<&'static WidgetMeta> {
    match kind {
        WidgetType::Profile => Some(&PROFILE),
        WidgetType::Vitals => Some(&VITALS),
        WidgetType::Fitness => Some(&FITNESS),
        WidgetType::Recommendations => Some(&RECOMMENDATIONS),
        WidgetType::WeeklyChart => Some(&WEEKLY_CHART),
        WidgetType::Awards => Some(&AWARDS),
        WidgetType::Resources => Some(&RESOURCES),
        WidgetType::Other(_) => None,
    }
}

/// Human-readable widget name, falling back to the raw type string.
pub fn display_name(kind: &WidgetType) -> &str {
    lookup(kind).map_or(kind.as_str(), |meta| meta.name)
}

/// Widget description, falling back to the raw type string.
pub fn describe(kind: &WidgetType) -> &str {
    lookup(kind).map_or(kind.as_str(), |meta| meta.description)
}

/// Icon name, falling back to a generic placeholder.
pub fn icon(kind: &WidgetType) -> &'static str {
    lookup(kind).map_or("square", |meta| meta.icon)
}
