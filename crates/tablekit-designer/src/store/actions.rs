use chrono::{DateTime, Utc};

use tablekit_core::{
    new_entity_id, EntityId, FloorPlan, Obstacle, ObstacleUpdate, PerimeterUpdate, Point,
    Property, Table, TableUpdate,
};

/// A mutation of the floor-plan store.
///
/// Everything non-deterministic (fresh ids, timestamps) is captured when the
/// action is built, so reducing the same action on the same state always
/// yields the same result.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum FloorPlanAction {
    /// Replace every plan, e.g. with the repository's load result
    LoadFloorPlans(Vec<FloorPlan>),
    AddFloorPlan(FloorPlan),
    /// Replace a plan by id, or append it when unknown
    UpsertFloorPlan(FloorPlan),
    RemoveFloorPlan(EntityId),
    SwitchFloorPlan(EntityId),
    RenameFloorPlan {
        name: String,
        description: Option<String>,
    },
    SetBackgroundColor(Option<String>),
    UpdateCapacityLimit(u32),

    AddTable(Table),
    UpdateTable {
        id: EntityId,
        update: TableUpdate,
    },
    UpdateTablePosition {
        id: EntityId,
        position: Point,
    },
    DeleteTable(EntityId),

    AddObstacle(Obstacle),
    UpdateObstacle {
        id: EntityId,
        update: ObstacleUpdate,
        at: DateTime<Utc>,
    },
    UpdateObstacleProperties {
        id: EntityId,
        properties: Vec<Property>,
    },
    UpdateObstaclePosition {
        id: EntityId,
        position: Point,
    },
    DuplicateObstacle {
        source_id: EntityId,
        new_id: EntityId,
        offset: f64,
        at: DateTime<Utc>,
    },
    RemoveObstacle(EntityId),

    SetPerimeter(PerimeterUpdate),
    ClearPerimeter,
}

impl FloorPlanAction {
    pub fn update_obstacle(id: impl Into<EntityId>, update: ObstacleUpdate) -> Self {
        Self::UpdateObstacle {
            id: id.into(),
            update,
            at: Utc::now(),
        }
    }

    pub fn duplicate_obstacle(source_id: impl Into<EntityId>, offset: f64) -> Self {
        Self::DuplicateObstacle {
            source_id: source_id.into(),
            new_id: new_entity_id("obstacle"),
            offset,
            at: Utc::now(),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadFloorPlans(_) => "load_floor_plans",
            Self::AddFloorPlan(_) => "add_floor_plan",
            Self::UpsertFloorPlan(_) => "upsert_floor_plan",
            Self::RemoveFloorPlan(_) => "remove_floor_plan",
            Self::SwitchFloorPlan(_) => "switch_floor_plan",
            Self::RenameFloorPlan { .. } => "rename_floor_plan",
            Self::SetBackgroundColor(_) => "set_background_color",
            Self::UpdateCapacityLimit(_) => "update_capacity_limit",
            Self::AddTable(_) => "add_table",
            Self::UpdateTable { .. } => "update_table",
            Self::UpdateTablePosition { .. } => "update_table_position",
            Self::DeleteTable(_) => "delete_table",
            Self::AddObstacle(_) => "add_obstacle",
            Self::UpdateObstacle { .. } => "update_obstacle",
            Self::UpdateObstacleProperties { .. } => "update_obstacle_properties",
            Self::UpdateObstaclePosition { .. } => "update_obstacle_position",
            Self::DuplicateObstacle { .. } => "duplicate_obstacle",
            Self::RemoveObstacle(_) => "remove_obstacle",
            Self::SetPerimeter(_) => "set_perimeter",
            Self::ClearPerimeter => "clear_perimeter",
        }
    }

    /// Whether the action is a user edit recorded in undo history.
    ///
    /// Loading, switching and repository upserts are not.
    pub fn is_edit(&self) -> bool {
        !matches!(
            self,
            Self::LoadFloorPlans(_) | Self::SwitchFloorPlan(_) | Self::UpsertFloorPlan(_)
        )
    }
}
