//! Gesture handling for Canvas.

use std::time::Instant;

use tablekit_core::{
    EntityKind, EntityRef, Obstacle, ObstacleUpdate, PerimeterParams, PerimeterShape,
    PerimeterUpdate, Point, Table, TableUpdate, DEFAULT_TABLE_CAPACITY,
};

use super::types::{DragEndEvent, DragState, InteractionOutcome, Transform};
use super::Canvas;
use crate::geometry::{clamp_position, generate_regular_polygon_points, normalize_rotation};
use crate::tools::{PerimeterStep, ToolMode};

/// Smallest size a transform handle may produce.
pub const MIN_TRANSFORM_SIZE: f64 = 10.0;

impl Canvas {
    /// Center and size of an entity in the current plan.
    fn entity_geometry(&self, entity: &EntityRef) -> Option<(Point, f64, f64)> {
        let plan = self.store.current_plan()?;
        match entity.kind {
            EntityKind::Table => plan
                .table(&entity.id)
                .map(|t| (t.center(), t.width, t.height)),
            EntityKind::Obstacle => plan
                .obstacle(&entity.id)
                .map(|o| (o.center(), o.width, o.height)),
        }
    }

    fn entity_exists(&self, entity: &EntityRef) -> bool {
        self.entity_geometry(entity).is_some()
    }

    /// Pointer click on the scene.
    ///
    /// While drawing a perimeter every click is a vertex. Otherwise a click on
    /// an entity selects it and anything else is an empty-canvas click.
    pub fn click(&mut self, point: Point) -> InteractionOutcome {
        if self.tools.mode() != ToolMode::DrawPerimeter {
            if let Some(entity) = self.hit_test(point) {
                return self.select_entity(entity);
            }
        }
        self.click_empty(point)
    }

    /// Click on the stage background, dispatched on the active tool.
    pub fn click_empty(&mut self, point: Point) -> InteractionOutcome {
        match self.tools.mode() {
            ToolMode::Select | ToolMode::Pan => self.stage_click(),
            ToolMode::AddTable => self.create_table_at(point),
            ToolMode::AddObstacle => self.create_obstacle_at(point),
            ToolMode::DrawPerimeter => self.add_perimeter_point(point),
        }
    }

    /// Selects an entity of the current plan and forces the `Select` tool.
    pub fn select_entity(&mut self, entity: EntityRef) -> InteractionOutcome {
        if !self.entity_exists(&entity) {
            return InteractionOutcome::Ignored;
        }
        self.tools.select(entity.clone());
        InteractionOutcome::Selected(entity)
    }

    /// Background click: clears the selection.
    pub fn stage_click(&mut self) -> InteractionOutcome {
        if self.tools.clear_selection() {
            InteractionOutcome::SelectionCleared
        } else {
            InteractionOutcome::Ignored
        }
    }

    /// Creates a default table at `point` and returns to `Select`.
    pub fn create_table_at(&mut self, point: Point) -> InteractionOutcome {
        let label = format!(
            "T{}",
            self.store.current_plan().map_or(0, |p| p.tables.len()) + 1
        );
        let table = Table::new(label, DEFAULT_TABLE_CAPACITY, point);
        let outcome = self.place_table(table);
        if matches!(outcome, InteractionOutcome::Created(_)) {
            self.tools.finish_creation();
        }
        outcome
    }

    /// Creates an obstacle of the active category at `point` and returns to
    /// `Select`.
    pub fn create_obstacle_at(&mut self, point: Point) -> InteractionOutcome {
        let obstacle = Obstacle::from_category(self.tools.obstacle_category(), point);
        let outcome = self.place_obstacle(obstacle);
        if matches!(outcome, InteractionOutcome::Created(_)) {
            self.tools.finish_creation();
        }
        outcome
    }

    /// Adds `table` if its center lies inside the perimeter.
    pub fn place_table(&mut self, mut table: Table) -> InteractionOutcome {
        if self.store.current_plan().is_none() || !self.settings.editable {
            return InteractionOutcome::Ignored;
        }
        let center = clamp_position(table.center(), self.settings.width, self.settings.height);
        if !self.inside_perimeter(center) {
            tracing::debug!("Rejected table at ({}, {}): outside perimeter", center.x, center.y);
            return InteractionOutcome::OutsidePerimeter(center);
        }
        table.x = center.x;
        table.y = center.y;
        let entity = EntityRef::table(table.id.clone());
        self.store.add_table(table);
        InteractionOutcome::Created(entity)
    }

    /// Adds `obstacle` if its center lies inside the perimeter.
    pub fn place_obstacle(&mut self, mut obstacle: Obstacle) -> InteractionOutcome {
        if self.store.current_plan().is_none() || !self.settings.editable {
            return InteractionOutcome::Ignored;
        }
        let center = clamp_position(obstacle.center(), self.settings.width, self.settings.height);
        if !self.inside_perimeter(center) {
            tracing::debug!(
                "Rejected obstacle at ({}, {}): outside perimeter",
                center.x,
                center.y
            );
            return InteractionOutcome::OutsidePerimeter(center);
        }
        obstacle.x = center.x;
        obstacle.y = center.y;
        let entity = EntityRef::obstacle(obstacle.id.clone());
        self.store.add_obstacle(obstacle);
        InteractionOutcome::Created(entity)
    }

    /// Records a perimeter vertex; closing the polygon commits it.
    pub fn add_perimeter_point(&mut self, point: Point) -> InteractionOutcome {
        if self.store.current_plan().is_none() || !self.settings.editable {
            return InteractionOutcome::Ignored;
        }
        match self.tools.push_perimeter_point(point) {
            PerimeterStep::Added(count) => InteractionOutcome::PerimeterPoint(count),
            PerimeterStep::Closed(points) => {
                let count = points.len();
                self.store.set_perimeter(PerimeterUpdate::custom(points));
                InteractionOutcome::PerimeterClosed(count)
            }
            PerimeterStep::Ignored => InteractionOutcome::Ignored,
        }
    }

    /// Replaces the perimeter with a generated shape around `center`.
    pub fn apply_perimeter_shape(
        &mut self,
        shape: PerimeterShape,
        params: PerimeterParams,
        center: Point,
    ) -> InteractionOutcome {
        let points = generate_regular_polygon_points(shape, &params, center);
        if points.len() < 3 {
            return InteractionOutcome::Ignored;
        }
        let count = points.len();
        self.store.set_perimeter(PerimeterUpdate {
            perimeter: points,
            perimeter_shape: shape,
            perimeter_params: Some(params),
        });
        InteractionOutcome::PerimeterClosed(count)
    }

    /// Begins dragging `entity`. Only allowed when editable and in drag mode.
    pub fn drag_start(&mut self, entity: EntityRef, pointer: Point) -> InteractionOutcome {
        if !self.can_drag() {
            return InteractionOutcome::Ignored;
        }
        let Some((origin, _, _)) = self.entity_geometry(&entity) else {
            return InteractionOutcome::Ignored;
        };
        let position = if pointer.is_finite() { pointer } else { origin };
        self.drag = Some(DragState {
            entity: entity.clone(),
            origin,
            position,
            last_emit: None,
        });
        InteractionOutcome::DragStarted(entity)
    }

    /// Tracks the pointer. Reports a position for redraw at most once per
    /// throttle interval; nothing is committed.
    pub fn drag_move(&mut self, pointer: Point) -> InteractionOutcome {
        self.drag_move_at(pointer, Instant::now())
    }

    pub fn drag_move_at(&mut self, pointer: Point, now: Instant) -> InteractionOutcome {
        let throttle = self.drag_throttle;
        let Some(drag) = self.drag.as_mut() else {
            return InteractionOutcome::Ignored;
        };
        if !pointer.is_finite() {
            return InteractionOutcome::Ignored;
        }
        drag.position = pointer;

        let due = drag
            .last_emit
            .is_none_or(|last| now.saturating_duration_since(last) >= throttle);
        if !due {
            return InteractionOutcome::Ignored;
        }
        drag.last_emit = Some(now);
        InteractionOutcome::DragMoved {
            entity: drag.entity.clone(),
            position: pointer,
        }
    }

    /// Finishes a drag at `pointer`.
    ///
    /// With a closed perimeter, a center outside it is rejected and the
    /// entity keeps its position. Otherwise the position is committed and
    /// the drag-end callback runs.
    pub fn drag_end(&mut self, pointer: Point) -> InteractionOutcome {
        let Some(drag) = self.drag.take() else {
            return InteractionOutcome::Ignored;
        };
        let position = if pointer.is_finite() {
            pointer
        } else {
            drag.position
        };
        let position = clamp_position(position, self.settings.width, self.settings.height);

        if !self.inside_perimeter(position) {
            tracing::debug!(
                "Rejected drag of {} to ({}, {}): outside perimeter",
                drag.entity,
                position.x,
                position.y
            );
            return InteractionOutcome::DragRejected {
                entity: drag.entity,
                position,
            };
        }

        let committed = match drag.entity.kind {
            EntityKind::Table => self.store.update_table_position(drag.entity.id.clone(), position),
            EntityKind::Obstacle => self
                .store
                .update_obstacle_position(drag.entity.id.clone(), position),
        };
        if !committed && !self.entity_exists(&drag.entity) {
            return InteractionOutcome::Ignored;
        }

        if let Some(callback) = self.on_drag_end.as_mut() {
            callback(&DragEndEvent {
                entity: drag.entity.clone(),
                from: drag.origin,
                to: position,
            });
        }
        InteractionOutcome::Moved {
            entity: drag.entity,
            position,
        }
    }

    /// Abandons a drag without committing.
    pub fn drag_cancel(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Commits a resize/rotate gesture.
    ///
    /// The new size is the stored size times the transform's scale, at least
    /// [`MIN_TRANSFORM_SIZE`]. The transform's scale is reset to 1 afterwards
    /// so it is never applied twice.
    pub fn transform_end(
        &mut self,
        entity: &EntityRef,
        transform: &mut Transform,
    ) -> InteractionOutcome {
        if !self.settings.editable {
            return InteractionOutcome::Ignored;
        }
        let Some((_, width, height)) = self.entity_geometry(entity) else {
            return InteractionOutcome::Ignored;
        };

        let scaled = |size: f64, scale: f64| {
            let scale = if scale.is_finite() { scale.abs() } else { 1.0 };
            (size * scale).max(MIN_TRANSFORM_SIZE)
        };
        let width = scaled(width, transform.scale_x);
        let height = scaled(height, transform.scale_y);
        let rotation = normalize_rotation(transform.rotation);
        let position = transform.position.filter(Point::is_finite);

        match entity.kind {
            EntityKind::Table => {
                let update = TableUpdate {
                    width: Some(width),
                    height: Some(height),
                    rotation: Some(rotation),
                    x: position.map(|p| p.x),
                    y: position.map(|p| p.y),
                    ..Default::default()
                };
                self.store.update_table(entity.id.clone(), update);
            }
            EntityKind::Obstacle => {
                let update = ObstacleUpdate {
                    width: Some(width),
                    height: Some(height),
                    rotation: Some(rotation),
                    x: position.map(|p| p.x),
                    y: position.map(|p| p.y),
                    ..Default::default()
                };
                self.store.update_obstacle(entity.id.clone(), update);
            }
        }

        transform.scale_x = 1.0;
        transform.scale_y = 1.0;
        InteractionOutcome::Transformed(entity.clone())
    }

    /// Deletes the selected entity and clears the selection.
    pub fn delete_selected(&mut self) -> InteractionOutcome {
        if !self.settings.editable {
            return InteractionOutcome::Ignored;
        }
        let Some(entity) = self.tools.selection_manager_mut().take() else {
            return InteractionOutcome::Ignored;
        };
        match entity.kind {
            EntityKind::Table => self.store.delete_table(entity.id.clone()),
            EntityKind::Obstacle => self.store.remove_obstacle(entity.id.clone()),
        };
        if self.drag.as_ref().is_some_and(|d| d.entity == entity) {
            self.drag = None;
        }
        InteractionOutcome::Deleted(entity)
    }

    /// Duplicates the selected obstacle and selects the copy.
    pub fn duplicate_selected(&mut self) -> InteractionOutcome {
        if !self.settings.editable {
            return InteractionOutcome::Ignored;
        }
        let Some(id) = self
            .tools
            .selection_manager()
            .selected_id_of(EntityKind::Obstacle)
            .map(str::to_string)
        else {
            return InteractionOutcome::Ignored;
        };
        match self.store.duplicate_obstacle(id, self.duplicate_offset) {
            Some(new_id) => {
                let entity = EntityRef::obstacle(new_id);
                self.tools.select(entity.clone());
                InteractionOutcome::Duplicated(entity)
            }
            None => InteractionOutcome::Ignored,
        }
    }

    /// Escape key.
    pub fn cancel(&mut self) -> InteractionOutcome {
        let dragging = self.drag_cancel();
        if self.tools.cancel() || dragging {
            InteractionOutcome::Cancelled
        } else {
            InteractionOutcome::Ignored
        }
    }
}
