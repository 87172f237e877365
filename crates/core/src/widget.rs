//! Widget and layout data model.
//!
//! These types are the JSON wire shape exchanged with the layout endpoints:
//! `{ id, type, visible, position: {x, y}, size: {width, height}, category }`
//! per widget and `{ widgets, lastModified }` per layout.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Timestamp, WidgetId};

/// Number of grid columns a widget can span at most.
pub const GRID_COLUMNS: u32 = 4;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of dashboard widget. Determines renderer and registry metadata.
///
/// Unknown kinds coming from the server are kept verbatim in
/// [`WidgetType::Other`] so a newer backend never breaks an older client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetType {
    Profile,
    Vitals,
    Fitness,
    Recommendations,
    WeeklyChart,
    Awards,
    Resources,
    Other(String),
}

impl WidgetType {
    /// Every known widget kind, in default dashboard order.
    pub const KNOWN: [WidgetType; 7] = [
        WidgetType::Profile,
        WidgetType::Vitals,
        WidgetType::Fitness,
        WidgetType::Recommendations,
        WidgetType::WeeklyChart,
        WidgetType::Awards,
        WidgetType::Resources,
    ];

    /// Wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            WidgetType::Profile => "profile",
            WidgetType::Vitals => "vitals",
            WidgetType::Fitness => "fitness",
            WidgetType::Recommendations => "recommendations",
            WidgetType::WeeklyChart => "weekly-chart",
            WidgetType::Awards => "awards",
            WidgetType::Resources => "resources",
            WidgetType::Other(raw) => raw,
        }
    }

    /// Returns `true` unless this is an unrecognised kind.
    pub fn is_known(&self) -> bool {
        !matches!(self, WidgetType::Other(_))
    }
}

impl From<String> for WidgetType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "profile" => WidgetType::Profile,
            "vitals" => WidgetType::Vitals,
            "fitness" => WidgetType::Fitness,
            "recommendations" => WidgetType::Recommendations,
            "weekly-chart" => WidgetType::WeeklyChart,
            "awards" => WidgetType::Awards,
            "resources" => WidgetType::Resources,
            _ => WidgetType::Other(raw),
        }
    }
}

impl From<WidgetType> for String {
    fn from(kind: WidgetType) -> Self {
        match kind {
            WidgetType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sidebar grouping for widgets. Used for filtering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetCategory {
    Vitals,
    Fitness,
    Social,
    Recommendations,
    Profile,
}

impl WidgetCategory {
    /// All categories in sidebar chip order.
    pub const ALL: [WidgetCategory; 5] = [
        WidgetCategory::Profile,
        WidgetCategory::Vitals,
        WidgetCategory::Fitness,
        WidgetCategory::Social,
        WidgetCategory::Recommendations,
    ];

    /// Human-readable chip label.
    pub fn label(self) -> &'static str {
        match self {
            WidgetCategory::Vitals => "Vitals",
            WidgetCategory::Fitness => "Fitness",
            WidgetCategory::Social => "Social",
            WidgetCategory::Recommendations => "Recommendations",
            WidgetCategory::Profile => "Profile",
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Advisory grid coordinates. Render order is list order, not position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
pub struct GridPosition {
    #[validate(range(min = 0))]
    pub x: i32,
    #[validate(range(min = 0))]
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Grid-cell span of a widget. Both sides must lie in `1..=GRID_COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GridSize {
    #[validate(range(min = 1, max = GRID_COLUMNS))]
    pub width: u32,
    #[validate(range(min = 1, max = GRID_COLUMNS))]
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

// ---------------------------------------------------------------------------
// Widget + layout
// ---------------------------------------------------------------------------

/// One dashboard widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct WidgetConfig {
    #[validate(length(min = 1, max = 64))]
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub kind: WidgetType,
    pub visible: bool,
    #[validate(nested)]
    pub position: GridPosition,
    #[validate(nested)]
    pub size: GridSize,
    pub category: WidgetCategory,
}

impl WidgetConfig {
    /// Build a visible widget at the origin with a 1x1 span.
    pub fn new(id: impl Into<WidgetId>, kind: WidgetType, category: WidgetCategory) -> Self {
        Self {
            id: id.into(),
            kind,
            visible: true,
            position: GridPosition::default(),
            size: GridSize::default(),
            category,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = GridPosition::new(x, y);
        self
    }

    pub fn sized(mut self, width: u32, height: u32) -> Self {
        self.size = GridSize::new(width, height);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// The persisted layout aggregate.
///
/// `widgets` order is the render order and ids are unique within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayoutData {
    pub widgets: Vec<WidgetConfig>,
    pub last_modified: Timestamp,
}

/// Request body for `PUT /users/dashboard-layout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveLayoutRequest {
    pub widgets: Vec<WidgetConfig>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
