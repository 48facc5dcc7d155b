//! Floor-plan domain store
//!
//! Holds every plan and the current-plan pointer as an immutable
//! [`FloorPlanState`] snapshot. Each dispatched [`FloorPlanAction`] produces a
//! new snapshot; readers holding an `Arc` of the previous one never observe
//! partial updates.
//!
//! Operations on unknown ids are no-ops. They never report "not found".

mod actions;
mod state;

pub use actions::FloorPlanAction;
pub use state::{FloorPlanState, SizeLimits};

use std::collections::VecDeque;
use std::sync::Arc;

use tablekit_core::{
    CapacityStatus, EntityId, FloorPlan, Obstacle, ObstacleUpdate, PerimeterUpdate, Point,
    Property, Table, TableUpdate,
};

/// Default number of undo snapshots retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Snapshot store with bounded undo/redo.
#[derive(Debug, Clone)]
pub struct FloorPlanStore {
    state: Arc<FloorPlanState>,
    limits: SizeLimits,
    revision: u64,
    undo_stack: VecDeque<Arc<FloorPlanState>>,
    redo_stack: Vec<Arc<FloorPlanState>>,
    history_limit: usize,
}

impl Default for FloorPlanStore {
    fn default() -> Self {
        Self::new(SizeLimits::default())
    }
}

impl FloorPlanStore {
    pub fn new(limits: SizeLimits) -> Self {
        Self {
            state: Arc::new(FloorPlanState::default()),
            limits,
            revision: 0,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    /// Reduce `action` into a new snapshot. Returns whether the state changed.
    ///
    /// Edits are recorded for undo and clear the redo stack. Loading plans
    /// resets history.
    pub fn dispatch(&mut self, action: FloorPlanAction) -> bool {
        let next = self.state.reduce(&action, &self.limits);
        if next == *self.state {
            tracing::debug!(action = action.name(), "Action left state unchanged");
            return false;
        }

        let previous = std::mem::replace(&mut self.state, Arc::new(next));
        if action.is_edit() {
            self.undo_stack.push_back(previous);
            self.redo_stack.clear();
            self.trim_history();
        } else if matches!(action, FloorPlanAction::LoadFloorPlans(_)) {
            self.undo_stack.clear();
            self.redo_stack.clear();
        }
        self.revision += 1;
        tracing::debug!(
            action = action.name(),
            revision = self.revision,
            "Dispatched action"
        );
        true
    }

    fn trim_history(&mut self) {
        while self.undo_stack.len() > self.history_limit {
            self.undo_stack.pop_front();
        }
    }

    /// Current snapshot
    pub fn state(&self) -> Arc<FloorPlanState> {
        Arc::clone(&self.state)
    }

    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    /// Incremented on every state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn plans(&self) -> &[FloorPlan] {
        &self.state.plans
    }

    pub fn current_plan(&self) -> Option<&FloorPlan> {
        self.state.current_plan()
    }

    pub fn current_plan_id(&self) -> Option<&str> {
        self.state.current_id.as_deref()
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.current_plan()?.table(id)
    }

    pub fn obstacle(&self, id: &str) -> Option<&Obstacle> {
        self.current_plan()?.obstacle(id)
    }

    pub fn total_capacity(&self) -> u64 {
        self.current_plan().map_or(0, FloorPlan::total_capacity)
    }

    pub fn capacity_status(&self) -> Option<CapacityStatus> {
        self.current_plan().map(FloorPlan::capacity_status)
    }

    // Undo/Redo

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Restores the previous snapshot. The current-plan pointer is kept when
    /// that plan still exists in the restored snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        let restored = self.keep_pointer(previous);
        let current = std::mem::replace(&mut self.state, restored);
        self.redo_stack.push(current);
        self.revision += 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let restored = self.keep_pointer(next);
        let current = std::mem::replace(&mut self.state, restored);
        self.undo_stack.push_back(current);
        self.trim_history();
        self.revision += 1;
        true
    }

    fn keep_pointer(&self, snapshot: Arc<FloorPlanState>) -> Arc<FloorPlanState> {
        let Some(current_id) = self.state.current_id.as_deref() else {
            return snapshot;
        };
        if snapshot.current_id.as_deref() == Some(current_id) || snapshot.plan(current_id).is_none()
        {
            return snapshot;
        }
        let mut state = (*snapshot).clone();
        state.current_id = Some(current_id.to_string());
        Arc::new(state)
    }

    // Plan-level operations

    pub fn load_floor_plans(&mut self, plans: Vec<FloorPlan>) -> bool {
        self.dispatch(FloorPlanAction::LoadFloorPlans(plans))
    }

    pub fn add_floor_plan(&mut self, plan: FloorPlan) -> bool {
        self.dispatch(FloorPlanAction::AddFloorPlan(plan))
    }

    pub fn upsert_floor_plan(&mut self, plan: FloorPlan) -> bool {
        self.dispatch(FloorPlanAction::UpsertFloorPlan(plan))
    }

    pub fn remove_floor_plan(&mut self, id: impl Into<EntityId>) -> bool {
        self.dispatch(FloorPlanAction::RemoveFloorPlan(id.into()))
    }

    /// Makes `id` the current plan. An unknown id leaves the current plan
    /// unchanged.
    pub fn switch_floor_plan(&mut self, id: impl Into<EntityId>) -> bool {
        self.dispatch(FloorPlanAction::SwitchFloorPlan(id.into()))
    }

    pub fn rename_floor_plan(&mut self, name: impl Into<String>, description: Option<String>) -> bool {
        self.dispatch(FloorPlanAction::RenameFloorPlan {
            name: name.into(),
            description,
        })
    }

    pub fn set_background_color(&mut self, color: Option<String>) -> bool {
        self.dispatch(FloorPlanAction::SetBackgroundColor(color))
    }

    pub fn update_capacity_limit(&mut self, limit: u32) -> bool {
        self.dispatch(FloorPlanAction::UpdateCapacityLimit(limit))
    }

    pub fn set_perimeter(&mut self, update: PerimeterUpdate) -> bool {
        self.dispatch(FloorPlanAction::SetPerimeter(update))
    }

    pub fn clear_perimeter(&mut self) -> bool {
        self.dispatch(FloorPlanAction::ClearPerimeter)
    }

    // Tables

    pub fn add_table(&mut self, table: Table) -> bool {
        self.dispatch(FloorPlanAction::AddTable(table))
    }

    pub fn update_table(&mut self, id: impl Into<EntityId>, update: TableUpdate) -> bool {
        self.dispatch(FloorPlanAction::UpdateTable {
            id: id.into(),
            update,
        })
    }

    /// Moves a table without re-clamping its size.
    pub fn update_table_position(&mut self, id: impl Into<EntityId>, position: Point) -> bool {
        self.dispatch(FloorPlanAction::UpdateTablePosition {
            id: id.into(),
            position,
        })
    }

    pub fn delete_table(&mut self, id: impl Into<EntityId>) -> bool {
        self.dispatch(FloorPlanAction::DeleteTable(id.into()))
    }

    // Obstacles

    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> bool {
        self.dispatch(FloorPlanAction::AddObstacle(obstacle))
    }

    /// Merges `update` and stamps `updated_at`.
    pub fn update_obstacle(&mut self, id: impl Into<EntityId>, update: ObstacleUpdate) -> bool {
        self.dispatch(FloorPlanAction::update_obstacle(id, update))
    }

    pub fn update_obstacle_properties(
        &mut self,
        id: impl Into<EntityId>,
        properties: Vec<Property>,
    ) -> bool {
        self.dispatch(FloorPlanAction::UpdateObstacleProperties {
            id: id.into(),
            properties,
        })
    }

    pub fn update_obstacle_position(&mut self, id: impl Into<EntityId>, position: Point) -> bool {
        self.dispatch(FloorPlanAction::UpdateObstaclePosition {
            id: id.into(),
            position,
        })
    }

    /// Copies an obstacle shifted by `offset` on both axes. Returns the new id.
    pub fn duplicate_obstacle(&mut self, id: impl Into<EntityId>, offset: f64) -> Option<EntityId> {
        let action = FloorPlanAction::duplicate_obstacle(id, offset);
        let new_id = match &action {
            FloorPlanAction::DuplicateObstacle { new_id, .. } => new_id.clone(),
            _ => return None,
        };
        self.dispatch(action).then_some(new_id)
    }

    pub fn remove_obstacle(&mut self, id: impl Into<EntityId>) -> bool {
        self.dispatch(FloorPlanAction::RemoveObstacle(id.into()))
    }
}
