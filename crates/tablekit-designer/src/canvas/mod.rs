//! Canvas for placing and manipulating tables and obstacles.

mod operations;
mod render;
mod types;

pub use render::{entity_at, scene_view, ObstacleView, SceneView, TableView};
pub use types::{DragEndCallback, DragEndEvent, DragState, InteractionOutcome, Transform};

use std::fmt;
use std::time::Duration;

use tablekit_core::{EntityRef, FloorPlan, Point};
use tablekit_settings::{CanvasSettings, EditorSettings};

use crate::geometry::ContainmentCache;
use crate::store::{FloorPlanStore, SizeLimits};
use crate::tools::{ToolMode, ToolState};

/// Canvas state: the domain store, tool state and the live gesture.
pub struct Canvas {
    store: FloorPlanStore,
    tools: ToolState,
    settings: CanvasSettings,
    drag: Option<DragState>,
    drag_throttle: Duration,
    hit_tolerance: f64,
    duplicate_offset: f64,
    containment: ContainmentCache,
    on_drag_end: Option<DragEndCallback>,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("store", &self.store)
            .field("tools", &self.tools)
            .field("settings", &self.settings)
            .field("drag", &self.drag)
            .field("has_drag_end_callback", &self.on_drag_end.is_some())
            .finish()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(&EditorSettings::default(), CanvasSettings::default())
    }
}

impl Canvas {
    /// Creates a canvas with an empty store.
    pub fn new(editor: &EditorSettings, settings: CanvasSettings) -> Self {
        Self {
            store: FloorPlanStore::new(SizeLimits::from(editor))
                .with_history_limit(editor.history_limit),
            tools: ToolState::new(editor.closure_threshold),
            settings,
            drag: None,
            drag_throttle: Duration::from_millis(editor.drag_throttle_ms),
            hit_tolerance: editor.hit_tolerance,
            duplicate_offset: editor.duplicate_offset,
            containment: ContainmentCache::new(editor.containment_cache_capacity),
            on_drag_end: None,
        }
    }

    pub fn store(&self) -> &FloorPlanStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FloorPlanStore {
        &mut self.store
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn current_plan(&self) -> Option<&FloorPlan> {
        self.store.current_plan()
    }

    /// Sets the tool mode.
    pub fn set_mode(&mut self, mode: ToolMode) {
        self.tools.set_mode(mode);
    }

    /// Gets the tool mode.
    pub fn mode(&self) -> ToolMode {
        self.tools.mode()
    }

    pub fn selection(&self) -> Option<&EntityRef> {
        self.tools.selection()
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.settings.editable = editable;
        if !editable {
            self.drag = None;
        }
    }

    pub fn set_drag_mode(&mut self, drag_mode: bool) {
        self.settings.drag_mode = drag_mode;
        if !drag_mode {
            self.drag = None;
        }
    }

    /// Whether entities may currently be dragged.
    pub fn can_drag(&self) -> bool {
        self.settings.editable && self.settings.drag_mode
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Registers the hook called after each committed drag.
    pub fn set_on_drag_end(&mut self, callback: DragEndCallback) {
        self.on_drag_end = Some(callback);
    }

    pub fn clear_on_drag_end(&mut self) {
        self.on_drag_end = None;
    }

    /// Shift applied to both axes of a duplicated obstacle.
    pub fn duplicate_offset(&self) -> f64 {
        self.duplicate_offset
    }

    /// `(hits, misses)` of the perimeter containment memo.
    pub fn containment_stats(&self) -> (u64, u64) {
        self.containment.stats()
    }

    /// The drawable view of the current plan.
    pub fn scene(&self) -> SceneView {
        scene_view(
            self.store.current_plan(),
            self.tools.selection(),
            self.tools.pending_perimeter(),
            &self.settings,
        )
    }

    /// Topmost entity under `point` in the current plan.
    pub fn hit_test(&self, point: Point) -> Option<EntityRef> {
        entity_at(self.store.current_plan()?, point, self.hit_tolerance)
    }

    /// Whether `point` may hold an entity center. Always true without a
    /// closed perimeter.
    pub fn inside_perimeter(&mut self, point: Point) -> bool {
        let perimeter = self
            .store
            .current_plan()
            .map(|plan| plan.perimeter.as_slice())
            .unwrap_or(&[]);
        self.containment.contains(point, perimeter)
    }

    /// Switches plan, dropping the selection and any pending gesture.
    pub fn switch_floor_plan(&mut self, id: &str) -> bool {
        if !self.store.switch_floor_plan(id) {
            return false;
        }
        self.reset_interaction();
        true
    }

    /// Replaces all plans, e.g. after a repository load.
    pub fn load_floor_plans(&mut self, plans: Vec<FloorPlan>) -> bool {
        let changed = self.store.load_floor_plans(plans);
        self.sync_selection();
        changed
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.store.undo();
        self.sync_selection();
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.store.redo();
        self.sync_selection();
        changed
    }

    fn reset_interaction(&mut self) {
        self.drag = None;
        self.tools.cancel();
    }

    /// Drops a selection or drag whose entity vanished from the current plan.
    pub(crate) fn sync_selection(&mut self) {
        let plan = self.store.current_plan();
        self.tools.selection_manager_mut().prune(plan);
        let drag_alive = self.drag.as_ref().is_some_and(|drag| {
            plan.is_some_and(|p| match drag.entity.kind {
                tablekit_core::EntityKind::Table => p.table(&drag.entity.id).is_some(),
                tablekit_core::EntityKind::Obstacle => p.obstacle(&drag.entity.id).is_some(),
            })
        });
        if !drag_alive {
            self.drag = None;
        }
    }
}
