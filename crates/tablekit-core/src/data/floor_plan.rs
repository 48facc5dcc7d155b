//! Floor plan aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    new_entity_id, EntityId, Obstacle, PerimeterParams, PerimeterShape, Point, Table,
};

/// Advisory seat limit of a new plan.
pub const DEFAULT_CAPACITY_LIMIT: u32 = 50;

/// One room/area layout: tables, obstacles and an optional perimeter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    #[serde(default = "new_plan_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_capacity_limit")]
    pub capacity_limit: u32,
    pub tables: Vec<Table>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub perimeter: Vec<Point>,
    #[serde(default)]
    pub perimeter_shape: PerimeterShape,
    #[serde(default)]
    pub perimeter_params: PerimeterParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn new_plan_id() -> EntityId {
    new_entity_id("plan")
}

fn default_capacity_limit() -> u32 {
    DEFAULT_CAPACITY_LIMIT
}

/// Seat count of a plan compared to its advisory limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityStatus {
    pub total: u64,
    pub limit: u32,
    pub exceeded: bool,
}

impl FloorPlan {
    /// Creates an empty plan with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_plan_id(),
            name: name.into(),
            description: String::new(),
            capacity_limit: DEFAULT_CAPACITY_LIMIT,
            tables: Vec::new(),
            obstacles: Vec::new(),
            perimeter: Vec::new(),
            perimeter_shape: PerimeterShape::Custom,
            perimeter_params: PerimeterParams::default(),
            background_color: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the perimeter forms a closed polygon.
    pub fn has_perimeter(&self) -> bool {
        self.perimeter.len() >= 3
    }

    /// Seats across all tables, widened so large imports cannot overflow.
    pub fn total_capacity(&self) -> u64 {
        self.tables.iter().map(|t| u64::from(t.capacity)).sum()
    }

    pub fn capacity_status(&self) -> CapacityStatus {
        let total = self.total_capacity();
        CapacityStatus {
            total,
            limit: self.capacity_limit,
            exceeded: total > u64::from(self.capacity_limit),
        }
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn obstacle(&self, id: &str) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }
}
