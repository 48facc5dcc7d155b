//! Pointer and keyboard handling.

use tablekit_core::{EntityRef, ObstacleCategory, Point, Result};

use super::{Capability, FloorPlanEditor};
use crate::canvas::{InteractionOutcome, Transform};
use crate::tools::ToolMode;

impl FloorPlanEditor {
    pub fn set_tool(&mut self, mode: ToolMode) {
        self.canvas.set_mode(mode);
    }

    /// Selects a tool by name (`"drag"` and `"move"` mean pan).
    pub fn set_tool_by_name(&mut self, name: &str) -> bool {
        self.canvas.tools_mut().set_mode_by_name(name)
    }

    /// Picks the add-obstacle tool for `category`.
    pub fn begin_add_obstacle(&mut self, category: ObstacleCategory) {
        self.canvas.tools_mut().begin_add_obstacle(category);
    }

    /// Pointer click on the scene.
    ///
    /// Clicks that would create something or draw the perimeter need edit
    /// permission; selecting an entity only needs view permission.
    pub fn click(&mut self, point: Point) -> Result<InteractionOutcome> {
        let mode = self.canvas.mode();
        let creates = mode == ToolMode::DrawPerimeter
            || (mode.is_creation() && self.canvas.hit_test(point).is_none());
        if creates {
            self.require(Capability::Edit, "edit the floor plan")?;
        } else {
            self.require(Capability::View, "view floor plans")?;
        }

        let outcome = self.canvas.click(point);
        if let InteractionOutcome::PerimeterClosed(count) = &outcome {
            self.notifications_mut()
                .success(format!("Perimeter closed with {} points", count));
        }
        self.report(&outcome);
        Ok(outcome)
    }

    /// Background click; clears the selection.
    pub fn stage_click(&mut self) -> InteractionOutcome {
        self.canvas.stage_click()
    }

    pub fn drag_start(&mut self, entity: EntityRef, pointer: Point) -> Result<InteractionOutcome> {
        self.require(Capability::Edit, "move elements")?;
        Ok(self.canvas.drag_start(entity, pointer))
    }

    pub fn drag_move(&mut self, pointer: Point) -> InteractionOutcome {
        self.canvas.drag_move(pointer)
    }

    /// Ends a drag; a move outside the perimeter raises a warning and
    /// changes nothing.
    pub fn drag_end(&mut self, pointer: Point) -> InteractionOutcome {
        let outcome = self.canvas.drag_end(pointer);
        self.report(&outcome);
        outcome
    }

    pub fn transform_end(
        &mut self,
        entity: &EntityRef,
        transform: &mut Transform,
    ) -> Result<InteractionOutcome> {
        self.require(Capability::Edit, "resize elements")?;
        Ok(self.canvas.transform_end(entity, transform))
    }

    /// Delete/Backspace: removes the selected entity when editing is allowed.
    pub fn delete_key(&mut self) -> Result<InteractionOutcome> {
        if self.canvas.selection().is_none() {
            return Ok(InteractionOutcome::Ignored);
        }
        self.require(Capability::Edit, "delete elements")?;
        let outcome = self.canvas.delete_selected();
        self.report(&outcome);
        Ok(outcome)
    }

    /// Ctrl+D: duplicates the selected obstacle.
    pub fn duplicate_key(&mut self) -> Result<InteractionOutcome> {
        self.require(Capability::Edit, "duplicate obstacles")?;
        Ok(self.canvas.duplicate_selected())
    }

    /// Escape: cancels the pending perimeter, the tool and the selection.
    pub fn escape(&mut self) -> InteractionOutcome {
        self.canvas.cancel()
    }
}
