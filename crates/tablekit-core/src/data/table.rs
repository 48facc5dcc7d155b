//! Dining table model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{new_entity_id, EntityId, Point};

/// Default footprint of a freshly placed table.
pub const DEFAULT_TABLE_SIZE: f64 = 60.0;
/// Default seat count of a freshly placed table.
pub const DEFAULT_TABLE_CAPACITY: u32 = 4;
/// Default fill color of a freshly placed table.
pub const DEFAULT_TABLE_COLOR: &str = "#4CAF50";

/// Outline of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    #[default]
    Rectangle,
    Circle,
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => write!(f, "rectangle"),
            Self::Circle => write!(f, "circle"),
        }
    }
}

impl FromStr for TableShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" | "square" => Ok(Self::Rectangle),
            "circle" | "round" => Ok(Self::Circle),
            other => Err(format!("unknown table shape '{}'", other)),
        }
    }
}

/// Service status of a table, used to color seeded tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub fn default_color(&self) -> &'static str {
        match self {
            Self::Free => "#4CAF50",
            Self::Occupied => "#F44336",
            Self::Reserved => "#FF9800",
        }
    }
}

/// A seating table placed on a floor plan. `(x, y)` is the shape's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "table", rename_all = "camelCase")]
pub struct Table {
    pub id: EntityId,
    pub label: String,
    pub capacity: u32,
    #[serde(default)]
    pub shape: TableShape,
    #[serde(default = "default_table_color")]
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

fn default_table_color() -> String {
    DEFAULT_TABLE_COLOR.to_string()
}

impl Table {
    /// Creates a default-sized table centered on `center` with a fresh id.
    pub fn new(label: impl Into<String>, capacity: u32, center: Point) -> Self {
        Self {
            id: new_entity_id("table"),
            label: label.into(),
            capacity: capacity.max(1),
            shape: TableShape::Rectangle,
            color: default_table_color(),
            x: center.x,
            y: center.y,
            width: DEFAULT_TABLE_SIZE,
            height: DEFAULT_TABLE_SIZE,
            rotation: 0.0,
        }
    }

    pub fn with_shape(mut self, shape: TableShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Partial update of a table; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    pub label: Option<String>,
    pub capacity: Option<u32>,
    pub shape: Option<TableShape>,
    pub color: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

impl TableUpdate {
    pub fn position(point: Point) -> Self {
        Self {
            x: Some(point.x),
            y: Some(point.y),
            ..Default::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// Merges the present fields into `table`. Capacity never drops below one.
    pub fn apply_to(&self, table: &mut Table) {
        if let Some(label) = &self.label {
            table.label = label.clone();
        }
        if let Some(capacity) = self.capacity {
            table.capacity = capacity.max(1);
        }
        if let Some(shape) = self.shape {
            table.shape = shape;
        }
        if let Some(color) = &self.color {
            table.color = color.clone();
        }
        if let Some(x) = self.x {
            table.x = x;
        }
        if let Some(y) = self.y {
            table.y = y;
        }
        if let Some(width) = self.width {
            table.width = width;
        }
        if let Some(height) = self.height {
            table.height = height;
        }
        if let Some(rotation) = self.rotation {
            table.rotation = rotation;
        }
    }
}
