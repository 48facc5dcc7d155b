//! Floor-plan data models
//!
//! Serializable domain types shared by the store, the canvas and the
//! persistence boundary:
//! - Points, sizes and bounds in canvas pixel space
//! - Tables and their partial updates
//! - Obstacles, their categories and category presets
//! - Perimeter shape descriptors
//! - The `FloorPlan` aggregate

mod floor_plan;
mod obstacle;
mod perimeter;
mod point;
mod table;

pub use floor_plan::{CapacityStatus, FloorPlan, DEFAULT_CAPACITY_LIMIT};
pub use obstacle::{
    CustomizedFields, Obstacle, ObstacleCategory, ObstaclePreset, ObstacleShape,
    ObstacleUpdate, Property, PropertyValue,
};
pub use perimeter::{PerimeterParams, PerimeterShape, PerimeterUpdate};
pub use point::{Bounds, Point, Size};
pub use table::{
    Table, TableShape, TableStatus, TableUpdate, DEFAULT_TABLE_CAPACITY, DEFAULT_TABLE_COLOR,
    DEFAULT_TABLE_SIZE,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a plan, table or obstacle.
pub type EntityId = String;

/// Generates a collision-resistant id such as `table-3f2a…`.
pub fn new_entity_id(prefix: &str) -> EntityId {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Kind of a placeable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Table,
    Obstacle,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Obstacle => write!(f, "obstacle"),
        }
    }
}

/// Reference to a table or obstacle of the current plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl EntityRef {
    pub fn table(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Table,
        }
    }

    pub fn obstacle(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Obstacle,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}
