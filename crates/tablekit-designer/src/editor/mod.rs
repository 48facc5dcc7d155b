//! Floor-plan editor for UI integration.
//! Wires the canvas to permissions, notifications and persistence.
//!
//! This module is split into submodules:
//! - `entities`: gated table/obstacle/perimeter/plan mutations
//! - `gestures`: pointer and keyboard handling on top of the canvas
//! - `file_io`: repository load/save/delete, import/export, plan files

mod entities;
mod file_io;
mod gestures;

pub use file_io::{PendingSave, SaveOutcome};

use std::path::PathBuf;
use std::sync::Arc;

use tablekit_core::{
    EntityKind, Error, FloorPlan, FloorPlanRepository, NotificationCenter, PermissionPolicy, Result, Role,
};
use tablekit_settings::Config;

use crate::canvas::{Canvas, InteractionOutcome, SceneView};

/// Capability checked before a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    View,
    Edit,
    Delete,
}

/// Editor state for UI integration
pub struct FloorPlanEditor {
    pub canvas: Canvas,
    notifications: NotificationCenter,
    permissions: Arc<dyn PermissionPolicy>,
    role: Role,
    repository: Arc<dyn FloorPlanRepository>,
    current_file_path: Option<PathBuf>,
    saved_revision: u64,
}

impl std::fmt::Debug for FloorPlanEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloorPlanEditor")
            .field("canvas", &self.canvas)
            .field("notifications", &self.notifications)
            .field("role", &self.role)
            .field("current_file_path", &self.current_file_path)
            .finish()
    }
}

impl FloorPlanEditor {
    /// Creates an editor with an empty store.
    pub fn new(
        config: &Config,
        permissions: Arc<dyn PermissionPolicy>,
        role: Role,
        repository: Arc<dyn FloorPlanRepository>,
    ) -> Self {
        Self {
            canvas: Canvas::new(&config.editor, config.canvas.clone()),
            notifications: NotificationCenter::new(),
            permissions,
            role,
            repository,
            current_file_path: None,
            saved_revision: 0,
        }
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn set_role(&mut self, role: Role) {
        tracing::info!("Editor role set to {}", role);
        self.role = role;
    }

    pub fn can_view(&self) -> bool {
        self.permissions.can_view(&self.role)
    }

    pub fn can_edit(&self) -> bool {
        self.permissions.can_edit(&self.role)
    }

    pub fn can_delete(&self) -> bool {
        self.permissions.can_delete(&self.role)
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn repository(&self) -> Arc<dyn FloorPlanRepository> {
        Arc::clone(&self.repository)
    }

    pub fn current_plan(&self) -> Option<&FloorPlan> {
        self.canvas.current_plan()
    }

    pub fn plans(&self) -> &[FloorPlan] {
        self.canvas.store().plans()
    }

    pub fn current_file_path(&self) -> Option<&PathBuf> {
        self.current_file_path.as_ref()
    }

    /// Whether the store changed since the last successful save or load.
    pub fn is_modified(&self) -> bool {
        self.canvas.store().revision() != self.saved_revision
    }

    pub(crate) fn mark_saved(&mut self) {
        self.saved_revision = self.canvas.store().revision();
    }

    /// The drawable view of the current plan.
    pub fn scene(&self) -> SceneView {
        self.canvas.scene()
    }

    /// Fails with a warning notification when the role lacks `capability`.
    pub(crate) fn require(&mut self, capability: Capability, action: &str) -> Result<()> {
        let allowed = match capability {
            Capability::View => self.can_view(),
            Capability::Edit => self.can_edit(),
            Capability::Delete => self.can_delete(),
        };
        if allowed {
            return Ok(());
        }
        self.notifications
            .warning(format!("You are not allowed to {}", action));
        Err(Error::permission_denied(action))
    }

    /// Turns rejections into notifications and flags capacity overruns.
    pub(crate) fn report(&mut self, outcome: &InteractionOutcome) {
        match outcome {
            InteractionOutcome::OutsidePerimeter(_) => {
                self.notifications
                    .warning("Cannot place an element outside the room perimeter");
            }
            InteractionOutcome::DragRejected { entity, .. } => {
                self.notifications
                    .warning(format!("Cannot move {} outside the room perimeter", entity.kind));
            }
            InteractionOutcome::Created(entity) if entity.kind == EntityKind::Table => {
                self.check_capacity()
            }
            _ => {}
        }
    }

    /// Advisory warning when the plan seats more than its limit.
    pub(crate) fn check_capacity(&mut self) {
        let Some(status) = self.canvas.store().capacity_status() else {
            return;
        };
        if status.exceeded {
            self.notifications.warning(format!(
                "Capacity exceeded: {} seats for a limit of {}",
                status.total, status.limit
            ));
        }
    }
}
