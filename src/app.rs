//! Application composition: config, permissions, repository and editor.

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tablekit_core::{FloorPlanRepository, PermissionPolicy, Result, Role};
use tablekit_designer::FloorPlanEditor;
use tablekit_settings::Config;

/// A wired editor plus its one-time start-up state.
#[derive(Debug)]
pub struct App {
    config: Config,
    editor: FloorPlanEditor,
    initialized: bool,
}

impl App {
    pub fn new(
        config: Config,
        permissions: Arc<dyn PermissionPolicy>,
        role: Role,
        repository: Arc<dyn FloorPlanRepository>,
    ) -> Self {
        let editor = FloorPlanEditor::new(&config, permissions, role, repository);
        Self {
            config,
            editor,
            initialized: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn editor(&self) -> &FloorPlanEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut FloorPlanEditor {
        &mut self.editor
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Loads plans from the repository and selects the first one.
    ///
    /// Runs once; later calls return the current plan count without touching
    /// the repository. A failed load leaves the app uninitialized so it can be
    /// retried.
    pub async fn initialize(&mut self) -> Result<usize> {
        if self.initialized {
            return Ok(self.editor.plans().len());
        }
        let count = self.editor.load_from_repository().await?;
        self.initialized = true;
        tracing::info!(
            "TableKit initialized with {} floor plans ({})",
            count,
            self.editor
                .current_plan()
                .map_or("none", |plan| plan.name.as_str())
        );
        Ok(count)
    }

    /// Writes `<plan-id>.json`, `.csv` and `.svg` for every plan into `dir`.
    ///
    /// The current plan is restored afterwards.
    pub fn export_all(&mut self, dir: impl AsRef<Path>) -> anyhow::Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

        let current = self.editor.current_plan().map(|plan| plan.id.clone());
        let ids: Vec<String> = self.editor.plans().iter().map(|p| p.id.clone()).collect();
        let mut written = Vec::with_capacity(ids.len() * 3);

        for id in &ids {
            self.editor.switch_floor_plan(id)?;
            let outputs = [
                ("json", self.editor.export_json()?),
                ("csv", self.editor.export_csv()?),
                ("svg", self.editor.export_svg()?),
            ];
            for (extension, content) in outputs {
                let path = dir.join(format!("{}.{}", id, extension));
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                written.push(path);
            }
        }

        if let Some(id) = current {
            self.editor.switch_floor_plan(&id)?;
        }
        tracing::info!("Exported {} files to {}", written.len(), dir.display());
        Ok(written)
    }
}
