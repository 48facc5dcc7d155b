//! Gated table, obstacle, perimeter and plan mutations.
//!
//! Every entry point checks the role first. Unknown ids are not errors: the
//! call returns `Ok(false)` / `Ok(None)` and nothing changes.

use tablekit_core::{
    EntityId, EntityKind, EntityRef, Obstacle, ObstacleCategory, ObstacleUpdate, PerimeterParams,
    PerimeterShape, PerimeterUpdate, Point, Property, Result, Table, TableUpdate,
};

use super::{Capability, FloorPlanEditor};
use crate::canvas::InteractionOutcome;

impl FloorPlanEditor {
    fn created_id(outcome: InteractionOutcome) -> Option<EntityId> {
        match outcome {
            InteractionOutcome::Created(entity) => Some(entity.id),
            _ => None,
        }
    }

    /// Adds a table when its center lies inside the perimeter.
    pub fn add_table(&mut self, table: Table) -> Result<Option<EntityId>> {
        self.require(Capability::Edit, "add tables")?;
        let outcome = self.canvas.place_table(table);
        self.report(&outcome);
        Ok(Self::created_id(outcome))
    }

    pub fn update_table(&mut self, id: &str, update: TableUpdate) -> Result<bool> {
        self.require(Capability::Edit, "edit tables")?;
        let capacity_changed = update.capacity.is_some();
        let changed = self.canvas.store_mut().update_table(id, update);
        if changed && capacity_changed {
            self.check_capacity();
        }
        Ok(changed)
    }

    pub fn delete_table(&mut self, id: &str) -> Result<bool> {
        self.require(Capability::Delete, "delete tables")?;
        let changed = self.canvas.store_mut().delete_table(id);
        self.canvas.sync_selection();
        Ok(changed)
    }

    /// Adds an obstacle when its center lies inside the perimeter.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> Result<Option<EntityId>> {
        self.require(Capability::Edit, "add obstacles")?;
        let outcome = self.canvas.place_obstacle(obstacle);
        self.report(&outcome);
        Ok(Self::created_id(outcome))
    }

    /// Adds an obstacle with the presets of `category`.
    pub fn add_obstacle_of(
        &mut self,
        category: ObstacleCategory,
        center: Point,
    ) -> Result<Option<EntityId>> {
        self.add_obstacle(Obstacle::from_category(category, center))
    }

    pub fn update_obstacle(&mut self, id: &str, update: ObstacleUpdate) -> Result<bool> {
        self.require(Capability::Edit, "edit obstacles")?;
        Ok(self.canvas.store_mut().update_obstacle(id, update))
    }

    /// Applies named properties from a property panel.
    pub fn update_obstacle_properties(
        &mut self,
        id: &str,
        properties: Vec<Property>,
    ) -> Result<bool> {
        self.require(Capability::Edit, "edit obstacles")?;
        Ok(self
            .canvas
            .store_mut()
            .update_obstacle_properties(id, properties))
    }

    pub fn remove_obstacle(&mut self, id: &str) -> Result<bool> {
        self.require(Capability::Delete, "delete obstacles")?;
        let changed = self.canvas.store_mut().remove_obstacle(id);
        self.canvas.sync_selection();
        Ok(changed)
    }

    /// Copies an obstacle, shifted by the configured offset.
    pub fn duplicate_obstacle(&mut self, id: &str) -> Result<Option<EntityId>> {
        self.require(Capability::Edit, "duplicate obstacles")?;
        let offset = self.canvas.duplicate_offset();
        let new_id = self.canvas.store_mut().duplicate_obstacle(id, offset);
        if new_id.is_some() {
            self.notifications_mut().success("Obstacle duplicated");
        }
        Ok(new_id)
    }

    // Selected entity

    pub fn selected_table(&self) -> Option<&Table> {
        let id = self
            .canvas
            .tools()
            .selection_manager()
            .selected_id_of(EntityKind::Table)?;
        self.canvas.store().table(id)
    }

    pub fn selected_obstacle(&self) -> Option<&Obstacle> {
        let id = self
            .canvas
            .tools()
            .selection_manager()
            .selected_id_of(EntityKind::Obstacle)?;
        self.canvas.store().obstacle(id)
    }

    /// Applies a property-editor update to the selected table.
    pub fn update_selected_table(&mut self, update: TableUpdate) -> Result<bool> {
        let Some(id) = self.selected_table().map(|t| t.id.clone()) else {
            return Ok(false);
        };
        self.update_table(&id, update)
    }

    /// Applies a property-editor update to the selected obstacle.
    pub fn update_selected_obstacle(&mut self, update: ObstacleUpdate) -> Result<bool> {
        let Some(id) = self.selected_obstacle().map(|o| o.id.clone()) else {
            return Ok(false);
        };
        self.update_obstacle(&id, update)
    }

    /// Selects an entity of the current plan; viewing is enough.
    pub fn select(&mut self, entity: EntityRef) -> Result<InteractionOutcome> {
        self.require(Capability::View, "view floor plans")?;
        Ok(self.canvas.select_entity(entity))
    }

    // Perimeter and plan settings

    pub fn set_perimeter(&mut self, update: PerimeterUpdate) -> Result<bool> {
        self.require(Capability::Edit, "edit the perimeter")?;
        Ok(self.canvas.store_mut().set_perimeter(update))
    }

    /// Replaces the perimeter with a generated shape.
    pub fn apply_perimeter_shape(
        &mut self,
        shape: PerimeterShape,
        params: PerimeterParams,
        center: Point,
    ) -> Result<bool> {
        self.require(Capability::Edit, "edit the perimeter")?;
        let outcome = self.canvas.apply_perimeter_shape(shape, params, center);
        Ok(outcome.is_mutation())
    }

    pub fn clear_perimeter(&mut self) -> Result<bool> {
        self.require(Capability::Edit, "edit the perimeter")?;
        Ok(self.canvas.store_mut().clear_perimeter())
    }

    pub fn update_capacity_limit(&mut self, limit: u32) -> Result<bool> {
        self.require(Capability::Edit, "edit the capacity limit")?;
        let changed = self.canvas.store_mut().update_capacity_limit(limit);
        if changed {
            self.check_capacity();
        }
        Ok(changed)
    }

    pub fn rename_floor_plan(&mut self, name: &str, description: Option<String>) -> Result<bool> {
        self.require(Capability::Edit, "rename floor plans")?;
        let name = name.trim();
        if name.is_empty() {
            self.notifications_mut()
                .warning("A floor plan name cannot be empty");
            return Ok(false);
        }
        Ok(self
            .canvas
            .store_mut()
            .rename_floor_plan(name, description))
    }

    pub fn set_background_color(&mut self, color: Option<String>) -> Result<bool> {
        self.require(Capability::Edit, "edit floor plans")?;
        Ok(self.canvas.store_mut().set_background_color(color))
    }

    /// Makes `id` current. An unknown id is ignored and the current plan
    /// stays as it was.
    pub fn switch_floor_plan(&mut self, id: &str) -> Result<bool> {
        self.require(Capability::View, "view floor plans")?;
        Ok(self.canvas.switch_floor_plan(id))
    }

    pub fn undo(&mut self) -> Result<bool> {
        self.require(Capability::Edit, "undo changes")?;
        Ok(self.canvas.undo())
    }

    pub fn redo(&mut self) -> Result<bool> {
        self.require(Capability::Edit, "redo changes")?;
        Ok(self.canvas.redo())
    }
}
