//! JSON import/export of floor plans.
//!
//! Exported JSON is the plan object itself (camelCase fields, `type` tags on
//! tables and obstacles). Import is lenient: only a `name`
//! string and a `tables` array are required, everything else falls back to
//! defaults. Anything structurally wrong becomes an [`ImportError`].

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

use tablekit_core::{FloorPlan, ImportError};

/// Pretty-printed JSON of `plan`.
pub fn export_json(plan: &FloorPlan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(plan)
}

/// Parses pasted or loaded plan JSON.
pub fn import_json(text: &str) -> std::result::Result<FloorPlan, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    import_value(value)
}

/// Validates and converts an already-parsed JSON value.
pub fn import_value(value: Value) -> std::result::Result<FloorPlan, ImportError> {
    let Value::Object(mut object) = value else {
        return Err(ImportError::NotAnObject);
    };

    if !object.get("name").is_some_and(Value::is_string) {
        return Err(ImportError::MissingName);
    }
    if !object.get("tables").is_some_and(Value::is_array) {
        return Err(ImportError::MissingTables);
    }

    tag_entities(&mut object, "tables", "table");
    tag_entities(&mut object, "obstacles", "obstacle");

    serde_json::from_value(Value::Object(object))
        .map_err(|e| ImportError::InvalidStructure(e.to_string()))
}

// Hand-written files often omit the `type` tag.
fn tag_entities(object: &mut Map<String, Value>, key: &str, tag: &str) {
    let Some(Value::Array(items)) = object.get_mut(key) else {
        return;
    };
    for item in items.iter_mut() {
        if let Value::Object(fields) = item {
            fields
                .entry("type")
                .or_insert_with(|| Value::String(tag.to_string()));
        }
    }
}

/// Save a plan as JSON
pub fn save_plan_to_file(plan: &FloorPlan, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = export_json(plan).context("Failed to serialize floor plan")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create export directory")?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write floor plan file {}", path.display()))?;

    tracing::info!("Saved floor plan '{}' to {}", plan.name, path.display());
    Ok(())
}

/// Load a plan from a JSON file
pub fn load_plan_from_file(path: impl AsRef<Path>) -> Result<FloorPlan> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read floor plan file {}", path.display()))?;

    let plan = import_json(&content).context("Failed to parse floor plan file")?;
    tracing::info!("Loaded floor plan '{}' from {}", plan.name, path.display());
    Ok(plan)
}
