//! Immutable floor-plan snapshot and its reducer.

use serde::{Deserialize, Serialize};

use tablekit_core::{
    EntityId, FloorPlan, Obstacle, PerimeterParams, Point, Table,
};
use tablekit_settings::EditorSettings;

use super::actions::FloorPlanAction;
use crate::geometry::{clamp_dimensions, normalize_rotation};

/// Size bounds enforced on every committed table and obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub table_min: f64,
    pub obstacle_min: f64,
    pub max: f64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            table_min: 20.0,
            obstacle_min: 10.0,
            max: 1000.0,
        }
    }
}

impl From<&EditorSettings> for SizeLimits {
    fn from(settings: &EditorSettings) -> Self {
        Self {
            table_min: settings.table_min_size,
            obstacle_min: settings.obstacle_min_size,
            max: settings.max_size,
        }
    }
}

impl SizeLimits {
    /// Brings a table within bounds: size clamped, rotation normalized,
    /// non-finite coordinates reset to 0, capacity at least 1.
    pub fn sanitize_table(&self, table: &mut Table) {
        let size = clamp_dimensions(table.width, table.height, self.table_min, self.max);
        table.width = size.width;
        table.height = size.height;
        table.rotation = normalize_rotation(table.rotation);
        table.x = finite_or_zero(table.x);
        table.y = finite_or_zero(table.y);
        table.capacity = table.capacity.max(1);
    }

    pub fn sanitize_obstacle(&self, obstacle: &mut Obstacle) {
        let size = clamp_dimensions(
            obstacle.width,
            obstacle.height,
            self.obstacle_min,
            self.max,
        );
        obstacle.width = size.width;
        obstacle.height = size.height;
        obstacle.rotation = normalize_rotation(obstacle.rotation);
        obstacle.x = finite_or_zero(obstacle.x);
        obstacle.y = finite_or_zero(obstacle.y);
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Every plan plus the pointer to the one being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanState {
    pub plans: Vec<FloorPlan>,
    pub current_id: Option<EntityId>,
}

impl FloorPlanState {
    pub fn new(plans: Vec<FloorPlan>) -> Self {
        let current_id = plans.first().map(|p| p.id.clone());
        Self { plans, current_id }
    }

    pub fn current_plan(&self) -> Option<&FloorPlan> {
        let id = self.current_id.as_deref()?;
        self.plan(id)
    }

    pub fn plan(&self, id: &str) -> Option<&FloorPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// Applies `action` to a copy of this snapshot.
    ///
    /// Unknown ids and actions without a current plan leave the copy equal
    /// to `self`.
    pub fn reduce(&self, action: &FloorPlanAction, limits: &SizeLimits) -> FloorPlanState {
        let mut next = self.clone();
        next.apply(action, limits);
        next
    }

    fn apply(&mut self, action: &FloorPlanAction, limits: &SizeLimits) {
        use FloorPlanAction::*;

        match action {
            LoadFloorPlans(plans) => {
                self.plans = plans
                    .iter()
                    .cloned()
                    .map(|plan| sanitize_plan(plan, limits))
                    .collect();
                let keep = self
                    .current_id
                    .as_deref()
                    .is_some_and(|id| self.plans.iter().any(|p| p.id == id));
                if !keep {
                    self.current_id = self.plans.first().map(|p| p.id.clone());
                }
            }
            AddFloorPlan(plan) => {
                if self.plan(&plan.id).is_some() {
                    return;
                }
                self.plans.push(sanitize_plan(plan.clone(), limits));
                if self.current_id.is_none() {
                    self.current_id = Some(plan.id.clone());
                }
            }
            UpsertFloorPlan(plan) => {
                let plan = sanitize_plan(plan.clone(), limits);
                match self.plans.iter_mut().find(|p| p.id == plan.id) {
                    Some(existing) => *existing = plan,
                    None => {
                        if self.current_id.is_none() {
                            self.current_id = Some(plan.id.clone());
                        }
                        self.plans.push(plan);
                    }
                }
            }
            RemoveFloorPlan(id) => {
                self.plans.retain(|p| &p.id != id);
                if self.current_id.as_ref() == Some(id) {
                    self.current_id = self.plans.first().map(|p| p.id.clone());
                }
            }
            SwitchFloorPlan(id) => {
                if self.plan(id).is_some() {
                    self.current_id = Some(id.clone());
                }
            }
            RenameFloorPlan { name, description } => self.with_current(|plan| {
                plan.name = name.clone();
                if let Some(description) = description {
                    plan.description = description.clone();
                }
            }),
            SetBackgroundColor(color) => {
                self.with_current(|plan| plan.background_color = color.clone())
            }
            UpdateCapacityLimit(limit) => self.with_current(|plan| plan.capacity_limit = *limit),

            AddTable(table) => self.with_current(|plan| {
                let mut table = table.clone();
                limits.sanitize_table(&mut table);
                plan.tables.push(table);
            }),
            UpdateTable { id, update } => self.with_current(|plan| {
                if let Some(table) = plan.tables.iter_mut().find(|t| &t.id == id) {
                    update.apply_to(table);
                    limits.sanitize_table(table);
                }
            }),
            UpdateTablePosition { id, position } => self.with_current(|plan| {
                if !position.is_finite() {
                    return;
                }
                if let Some(table) = plan.tables.iter_mut().find(|t| &t.id == id) {
                    table.x = position.x;
                    table.y = position.y;
                }
            }),
            DeleteTable(id) => self.with_current(|plan| plan.tables.retain(|t| &t.id != id)),

            AddObstacle(obstacle) => self.with_current(|plan| {
                let mut obstacle = obstacle.clone();
                limits.sanitize_obstacle(&mut obstacle);
                plan.obstacles.push(obstacle);
            }),
            UpdateObstacle { id, update, at } => self.with_current(|plan| {
                if let Some(obstacle) = plan.obstacles.iter_mut().find(|o| &o.id == id) {
                    update.apply_to(obstacle);
                    limits.sanitize_obstacle(obstacle);
                    obstacle.updated_at = *at;
                }
            }),
            UpdateObstacleProperties { id, properties } => self.with_current(|plan| {
                if let Some(obstacle) = plan.obstacles.iter_mut().find(|o| &o.id == id) {
                    for property in properties {
                        obstacle.apply_property(property);
                    }
                    limits.sanitize_obstacle(obstacle);
                }
            }),
            UpdateObstaclePosition { id, position } => self.with_current(|plan| {
                if !position.is_finite() {
                    return;
                }
                if let Some(obstacle) = plan.obstacles.iter_mut().find(|o| &o.id == id) {
                    obstacle.x = position.x;
                    obstacle.y = position.y;
                }
            }),
            DuplicateObstacle {
                source_id,
                new_id,
                offset,
                at,
            } => self.with_current(|plan| {
                let Some(source) = plan.obstacles.iter().find(|o| &o.id == source_id) else {
                    return;
                };
                let offset = if offset.is_finite() { *offset } else { 0.0 };
                let mut copy = source.duplicate(offset);
                copy.id = new_id.clone();
                copy.created_at = *at;
                copy.updated_at = *at;
                plan.obstacles.push(copy);
            }),
            RemoveObstacle(id) => {
                self.with_current(|plan| plan.obstacles.retain(|o| &o.id != id))
            }

            SetPerimeter(update) => self.with_current(|plan| {
                plan.perimeter = update
                    .perimeter
                    .iter()
                    .copied()
                    .filter(Point::is_finite)
                    .collect();
                plan.perimeter_shape = update.perimeter_shape;
                plan.perimeter_params = update.perimeter_params.unwrap_or_default().sanitized();
            }),
            ClearPerimeter => self.with_current(|plan| {
                plan.perimeter.clear();
                plan.perimeter_shape = Default::default();
                plan.perimeter_params = PerimeterParams::default();
            }),
        }
    }

    fn with_current(&mut self, f: impl FnOnce(&mut FloorPlan)) {
        let Some(id) = self.current_id.as_deref() else {
            return;
        };
        if let Some(plan) = self.plans.iter_mut().find(|p| p.id == id) {
            f(plan);
        }
    }
}

fn sanitize_plan(mut plan: FloorPlan, limits: &SizeLimits) -> FloorPlan {
    for table in &mut plan.tables {
        limits.sanitize_table(table);
    }
    for obstacle in &mut plan.obstacles {
        limits.sanitize_obstacle(obstacle);
    }
    plan.perimeter.retain(Point::is_finite);
    plan.perimeter_params = plan.perimeter_params.sanitized();
    plan
}
