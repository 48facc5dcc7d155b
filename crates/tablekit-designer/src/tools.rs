//! Tool-mode and selection state machine.
//!
//! The editor starts in [`ToolMode::Select`] with nothing selected. There is
//! no terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tablekit_core::{EntityRef, ObstacleCategory, Point};

use crate::selection_manager::SelectionManager;

/// Default distance (pixels) from the first vertex that closes a perimeter.
pub const DEFAULT_CLOSURE_THRESHOLD: f64 = 20.0;

/// Active interaction mode of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    #[default]
    Select,
    AddTable,
    AddObstacle,
    DrawPerimeter,
    /// Moves the view or entities; `drag` and `move` are accepted aliases
    #[serde(alias = "drag", alias = "move")]
    Pan,
}

impl ToolMode {
    /// Whether a click on empty canvas creates an entity in this mode.
    pub fn is_creation(&self) -> bool {
        matches!(self, Self::AddTable | Self::AddObstacle)
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Select => "select",
            Self::AddTable => "add_table",
            Self::AddObstacle => "add_obstacle",
            Self::DrawPerimeter => "draw_perimeter",
            Self::Pan => "pan",
        };
        f.write_str(s)
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "select" => Ok(Self::Select),
            "add_table" | "addtable" | "table" => Ok(Self::AddTable),
            "add_obstacle" | "addobstacle" | "obstacle" => Ok(Self::AddObstacle),
            "draw_perimeter" | "drawperimeter" | "perimeter" => Ok(Self::DrawPerimeter),
            "pan" | "drag" | "move" => Ok(Self::Pan),
            _ => Err(format!("unknown tool mode '{}'", s)),
        }
    }
}

/// Result of a click while drawing a perimeter.
#[derive(Debug, Clone, PartialEq)]
pub enum PerimeterStep {
    /// A vertex was appended; holds the pending vertex count
    Added(usize),
    /// The click closed the polygon; holds the committed vertices
    Closed(Vec<Point>),
    /// Not in perimeter mode, or the point was not finite
    Ignored,
}

/// Tool mode, selection and the perimeter being drawn.
#[derive(Debug, Clone)]
pub struct ToolState {
    mode: ToolMode,
    selection: SelectionManager,
    pending_perimeter: Vec<Point>,
    closure_threshold: f64,
    obstacle_category: ObstacleCategory,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSURE_THRESHOLD)
    }
}

impl ToolState {
    pub fn new(closure_threshold: f64) -> Self {
        let closure_threshold = if closure_threshold.is_finite() && closure_threshold > 0.0 {
            closure_threshold
        } else {
            DEFAULT_CLOSURE_THRESHOLD
        };
        Self {
            mode: ToolMode::Select,
            selection: SelectionManager::new(),
            pending_perimeter: Vec::new(),
            closure_threshold,
            obstacle_category: ObstacleCategory::default(),
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Switches tool. Leaving `Select` clears the selection and leaving
    /// `DrawPerimeter` discards the pending vertices.
    pub fn set_mode(&mut self, mode: ToolMode) {
        if mode == self.mode {
            return;
        }
        if self.mode == ToolMode::Select {
            self.selection.deselect();
        }
        if self.mode == ToolMode::DrawPerimeter {
            self.pending_perimeter.clear();
        }
        tracing::debug!("Tool mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    /// Parses and applies a tool name. Unknown names are logged and ignored.
    pub fn set_mode_by_name(&mut self, name: &str) -> bool {
        match name.parse() {
            Ok(mode) => {
                self.set_mode(mode);
                true
            }
            Err(err) => {
                tracing::warn!("{}", err);
                false
            }
        }
    }

    pub fn selection(&self) -> Option<&EntityRef> {
        self.selection.selected()
    }

    pub fn selection_manager(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selection_manager_mut(&mut self) -> &mut SelectionManager {
        &mut self.selection
    }

    /// Selects `entity` and forces the tool back to `Select`.
    pub fn select(&mut self, entity: EntityRef) {
        self.set_mode(ToolMode::Select);
        self.selection.select(entity);
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection.deselect()
    }

    pub fn obstacle_category(&self) -> ObstacleCategory {
        self.obstacle_category
    }

    /// Category used by the next `AddObstacle` click.
    pub fn set_obstacle_category(&mut self, category: ObstacleCategory) {
        self.obstacle_category = category;
    }

    /// Picks the add-obstacle tool for `category`.
    pub fn begin_add_obstacle(&mut self, category: ObstacleCategory) {
        self.obstacle_category = category;
        self.set_mode(ToolMode::AddObstacle);
    }

    pub fn closure_threshold(&self) -> f64 {
        self.closure_threshold
    }

    pub fn pending_perimeter(&self) -> &[Point] {
        &self.pending_perimeter
    }

    /// Records a perimeter click.
    ///
    /// Once three or more vertices are pending, a click within the closure
    /// threshold of the first vertex commits them and returns to `Select`.
    pub fn push_perimeter_point(&mut self, point: Point) -> PerimeterStep {
        if self.mode != ToolMode::DrawPerimeter || !point.is_finite() {
            return PerimeterStep::Ignored;
        }

        if self.pending_perimeter.len() >= 3 {
            if let Some(first) = self.pending_perimeter.first() {
                if first.distance_to(&point) <= self.closure_threshold {
                    let points = std::mem::take(&mut self.pending_perimeter);
                    self.mode = ToolMode::Select;
                    return PerimeterStep::Closed(points);
                }
            }
        }

        self.pending_perimeter.push(point);
        PerimeterStep::Added(self.pending_perimeter.len())
    }

    /// Returns to `Select` after an entity was created.
    pub fn finish_creation(&mut self) {
        if self.mode.is_creation() {
            self.mode = ToolMode::Select;
        }
    }

    /// Escape: drops a pending perimeter, returns to `Select` and clears the
    /// selection. Returns whether anything changed.
    pub fn cancel(&mut self) -> bool {
        let changed = !self.pending_perimeter.is_empty()
            || self.mode != ToolMode::Select
            || self.selection.has_selection();
        self.pending_perimeter.clear();
        self.mode = ToolMode::Select;
        self.selection.deselect();
        changed
    }
}
