//! Repository and file operations for the editor.
//!
//! Saving never blocks editing: [`FloorPlanEditor::begin_save`] snapshots the
//! current plan into a [`PendingSave`] that runs without borrowing the
//! editor, and [`FloorPlanEditor::complete_save`] folds the result back in.
//! A failed save leaves the in-memory plan untouched.

use std::path::Path;
use std::sync::Arc;

use tablekit_core::{
    new_entity_id, EntityId, Error, FloorPlan, FloorPlanRepository, PersistenceError, Result,
};

use super::{Capability, FloorPlanEditor};
use crate::{export, serialization, svg_renderer};

/// A save in flight.
pub struct PendingSave {
    plan: FloorPlan,
    repository: Arc<dyn FloorPlanRepository>,
}

impl PendingSave {
    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    /// Sends the snapshot to the repository.
    pub async fn run(self) -> SaveOutcome {
        let result = self.repository.save_floor_plan(&self.plan).await;
        SaveOutcome {
            sent: self.plan,
            result,
        }
    }
}

/// Result of a [`PendingSave`].
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub sent: FloorPlan,
    pub result: std::result::Result<FloorPlan, PersistenceError>,
}

impl FloorPlanEditor {
    /// Replaces every plan with the repository's and selects the first one.
    pub async fn load_from_repository(&mut self) -> Result<usize> {
        self.require(Capability::View, "view floor plans")?;
        match self.repository.load_floor_plans().await {
            Ok(plans) => {
                let count = plans.len();
                self.canvas.load_floor_plans(plans);
                self.mark_saved();
                tracing::info!("Loaded {} floor plans from repository", count);
                Ok(count)
            }
            Err(err) => {
                self.notifications_mut()
                    .error(format!("Failed to load floor plans: {}", err));
                Err(err.into())
            }
        }
    }

    /// Snapshots the current plan for saving.
    pub fn begin_save(&mut self) -> Result<PendingSave> {
        self.require(Capability::Edit, "save floor plans")?;
        let plan = self.current_plan().cloned().ok_or(Error::NoCurrentPlan)?;
        Ok(PendingSave {
            plan,
            repository: self.repository(),
        })
    }

    /// Applies a finished save.
    ///
    /// On success the stored version replaces the local plan only if the
    /// plan was not edited while the save was pending. On failure an error
    /// notification is raised and local state is kept.
    pub fn complete_save(&mut self, outcome: SaveOutcome) -> Result<FloorPlan> {
        match outcome.result {
            Ok(stored) => {
                let untouched = self
                    .canvas
                    .store()
                    .state()
                    .plan(&outcome.sent.id)
                    .is_some_and(|plan| *plan == outcome.sent);
                if untouched {
                    self.canvas.store_mut().upsert_floor_plan(stored.clone());
                    self.mark_saved();
                }
                self.notifications_mut()
                    .success(format!("Floor plan '{}' saved", stored.name));
                Ok(stored)
            }
            Err(err) => {
                tracing::error!("Saving floor plan {} failed: {}", outcome.sent.id, err);
                self.notifications_mut()
                    .error(format!("Failed to save floor plan: {}", err));
                Err(err.into())
            }
        }
    }

    /// Saves the current plan and waits for the repository.
    pub async fn save_current(&mut self) -> Result<FloorPlan> {
        let pending = self.begin_save()?;
        let outcome = pending.run().await;
        self.complete_save(outcome)
    }

    /// Creates an empty plan and makes it current. It is not persisted until
    /// saved.
    pub fn create_floor_plan(&mut self, name: &str) -> Result<EntityId> {
        self.require(Capability::Edit, "create floor plans")?;
        let name = name.trim();
        if name.is_empty() {
            self.notifications_mut()
                .warning("A floor plan name cannot be empty");
            return Err(Error::other("empty floor plan name"));
        }
        let plan = FloorPlan::new(name);
        let id = plan.id.clone();
        self.canvas.store_mut().add_floor_plan(plan);
        self.canvas.switch_floor_plan(&id);
        Ok(id)
    }

    /// Deletes a plan from the repository and the store.
    ///
    /// A plan the repository never saw is removed locally.
    pub async fn delete_floor_plan(&mut self, id: &str) -> Result<()> {
        self.require(Capability::Delete, "delete floor plans")?;
        match self.repository.delete_floor_plan(id).await {
            Ok(()) | Err(PersistenceError::NotFound { .. }) => {
                self.canvas.store_mut().remove_floor_plan(id);
                self.canvas.sync_selection();
                self.notifications_mut().success("Floor plan deleted");
                Ok(())
            }
            Err(err) => {
                self.notifications_mut()
                    .error(format!("Failed to delete floor plan: {}", err));
                Err(err.into())
            }
        }
    }

    /// Imports plan JSON as a new current plan.
    ///
    /// Malformed input raises an error notification and changes nothing.
    pub fn import_json(&mut self, text: &str) -> Result<EntityId> {
        self.require(Capability::Edit, "import floor plans")?;
        match serialization::import_json(text) {
            Ok(plan) => Ok(self.adopt_plan(plan)),
            Err(err) => {
                self.notifications_mut()
                    .error(format!("Import failed: {}", err));
                Err(err.into())
            }
        }
    }

    fn adopt_plan(&mut self, mut plan: FloorPlan) -> EntityId {
        if self.canvas.store().state().plan(&plan.id).is_some() {
            plan.id = new_entity_id("plan");
        }
        let id = plan.id.clone();
        let name = plan.name.clone();
        self.canvas.store_mut().add_floor_plan(plan);
        self.canvas.switch_floor_plan(&id);
        self.notifications_mut()
            .success(format!("Floor plan '{}' imported", name));
        id
    }

    fn plan_for_export(&mut self) -> Result<FloorPlan> {
        self.require(Capability::View, "export floor plans")?;
        self.current_plan().cloned().ok_or(Error::NoCurrentPlan)
    }

    pub fn export_json(&mut self) -> Result<String> {
        let plan = self.plan_for_export()?;
        Ok(serialization::export_json(&plan)?)
    }

    pub fn export_csv(&mut self) -> Result<String> {
        let plan = self.plan_for_export()?;
        Ok(export::export_tables_csv(&plan))
    }

    pub fn export_svg(&mut self) -> Result<String> {
        let plan = self.plan_for_export()?;
        let settings = self.canvas.settings();
        Ok(svg_renderer::render_plan_svg(
            &plan,
            settings.width,
            settings.height,
        ))
    }

    /// Save the current plan to a JSON file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let plan = self.plan_for_export()?;
        serialization::save_plan_to_file(&plan, &path)?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        Ok(())
    }

    /// Load a plan from a JSON file and make it current.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<EntityId> {
        self.require(Capability::Edit, "import floor plans")?;
        let plan = match serialization::load_plan_from_file(&path) {
            Ok(plan) => plan,
            Err(err) => {
                self.notifications_mut()
                    .error(format!("Failed to open floor plan: {:#}", err));
                return Err(err);
            }
        };
        let id = self.adopt_plan(plan);
        self.current_file_path = Some(path.as_ref().to_path_buf());
        Ok(id)
    }
}
