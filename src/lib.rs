//! # TableKit
//!
//! Restaurant floor-plan editing core: tables, obstacles and room perimeters
//! placed on an interactive canvas, kept consistent with a normalized store.
//!
//! ## Architecture
//!
//! TableKit is organized as a workspace with multiple crates:
//!
//! 1. **tablekit-core** - Data model, errors, notifications, collaborator traits
//! 2. **tablekit-designer** - Geometry, store, tools, canvas, import/export, editor
//! 3. **tablekit-settings** - Configuration files and validation
//! 4. **tablekit** - Composition root and demo binary
//!
//! ## Features
//!
//! - **Placement rules**: size clamping and perimeter containment on every edit
//! - **Perimeters**: click-drawn or generated (rectangle, circle, triangle, n-gon)
//! - **Obstacles**: categories with presets that respect user customizations
//! - **History**: immutable snapshots with undo/redo
//! - **Import/Export**: JSON round-trip, CSV table list, standalone SVG

mod app;

pub use app::App;

pub use tablekit_designer as designer;
pub use tablekit_settings as settings;

pub use tablekit_core::{
    EntityId, EntityKind, EntityRef, Error, FloorPlan, FloorPlanRepository, FullAccess,
    ImportError, InMemoryRepository, MessageLevel, Notification, NotificationCenter, Obstacle,
    ObstacleCategory, PermissionPolicy, PersistenceError, Point, ReadOnly, Result, Role,
    RolePermissions, Table,
};

pub use tablekit_designer::{
    Canvas, FloorPlanEditor, FloorPlanStore, InteractionOutcome, SceneView, SeedData, ToolMode,
};

pub use tablekit_settings::{CanvasSettings, Config, EditorSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, `info` when unset
///
/// Calling it again once a subscriber is installed is a no-op.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }

    Ok(())
}
