//! # TableKit Designer
//!
//! This crate provides the interactive floor-plan editor: placing tables and
//! obstacles, drawing room perimeters and keeping a canvas view consistent
//! with a normalized store under frequent small edits.
//!
//! ## Core Components
//!
//! ### Model and State
//! - **Geometry**: point-in-polygon, clamping, perimeter shape generation
//! - **Store**: immutable snapshots reduced from `FloorPlanAction`s, undo/redo
//! - **Tools**: tool mode and selection state machine
//!
//! ### Interaction
//! - **Canvas**: gestures to store mutations with live perimeter checks
//! - **Render view**: sanitized, drawable projection of the current plan
//! - **Editor**: permissions, notifications and persistence around the canvas
//!
//! ### Import/Export
//! - **JSON**: full plan round-trip with minimal import validation
//! - **CSV**: table list export
//! - **SVG**: standalone drawing of a plan
//! - **Seed**: back-office room and table records to plans
//!
//! ## Architecture
//!
//! ```text
//! FloorPlanEditor (permissions, notifications, repository)
//!   └── Canvas (gestures, drag/transform, hit testing)
//!         ├── ToolState (mode, selection, pending perimeter)
//!         └── FloorPlanStore (snapshots, history)
//!               └── geometry (clamping, containment)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tablekit_designer::{FloorPlanEditor, ToolMode};
//!
//! editor.set_tool(ToolMode::AddTable);
//! editor.click(Point::new(300.0, 300.0))?;
//! let svg = editor.export_svg()?;
//! ```

pub mod canvas;
pub mod export;
pub mod geometry;
pub mod seed;
pub mod selection_manager;
pub mod serialization;
pub mod store;
pub mod svg_renderer;
pub mod tools;

// Integration modules
pub mod editor;

// Re-export all public types from submodules
pub use canvas::{
    entity_at, scene_view, Canvas, DragEndCallback, DragEndEvent, DragState, InteractionOutcome,
    ObstacleView, SceneView, TableView, Transform,
};
pub use export::{export_tables_csv, CSV_HEADER};
pub use geometry::{
    clamp_dimensions, clamp_position, coerce_dimension, generate_regular_polygon_points,
    normalize_rotation, point_in_polygon, polygon_bounds, polygon_centroid, ContainmentCache,
    HitShape,
};
pub use seed::{transform_seed, RoomRecord, SeedData, TableRecord};
pub use selection_manager::SelectionManager;
pub use serialization::{export_json, import_json, load_plan_from_file, save_plan_to_file};
pub use store::{FloorPlanAction, FloorPlanState, FloorPlanStore, SizeLimits};
pub use svg_renderer::render_plan_svg;
pub use tools::{PerimeterStep, ToolMode, ToolState};

// State and integration
pub use editor::{Capability, FloorPlanEditor, PendingSave, SaveOutcome};
