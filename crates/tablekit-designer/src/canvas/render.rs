//! Sanitized render view and hit testing.
//!
//! The canvas never draws raw store values. [`scene_view`] maps the current
//! plan into a view where every number is finite, rotations are normalized
//! and entities with a non-positive size are dropped.

use serde::Serialize;

use tablekit_core::{
    CapacityStatus, EntityRef, FloorPlan, ObstacleCategory, ObstacleShape, Point, TableShape,
    DEFAULT_TABLE_COLOR,
};
use tablekit_settings::CanvasSettings;

use crate::geometry::{normalize_rotation, shape_contains, HitShape};

const FALLBACK_OBSTACLE_COLOR: &str = "#808080";

/// Drawable table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub id: String,
    pub label: String,
    pub capacity: u32,
    pub shape: TableShape,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub selected: bool,
}

impl TableView {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Drawable obstacle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleView {
    pub id: String,
    pub category: ObstacleCategory,
    pub shape: ObstacleShape,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub name: String,
    pub selected: bool,
}

impl ObstacleView {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneView {
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    /// Drawn below the tables
    pub obstacles: Vec<ObstacleView>,
    pub tables: Vec<TableView>,
    pub perimeter: Vec<Point>,
    /// Vertices of a perimeter being drawn
    pub pending_perimeter: Vec<Point>,
    pub capacity: Option<CapacityStatus>,
    pub selected: Option<EntityRef>,
}

impl SceneView {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.obstacles.is_empty() && self.perimeter.is_empty()
    }
}

fn finite(v: f64, default: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        default
    }
}

fn positive_size(width: f64, height: f64) -> Option<(f64, f64)> {
    let width = finite(width, 0.0);
    let height = finite(height, 0.0);
    (width > 0.0 && height > 0.0).then_some((width, height))
}

fn color_or(color: &str, fallback: &str) -> String {
    if color.trim().is_empty() {
        fallback.to_string()
    } else {
        color.to_string()
    }
}

/// Derives the drawable view of `plan`.
pub fn scene_view(
    plan: Option<&FloorPlan>,
    selection: Option<&EntityRef>,
    pending_perimeter: &[Point],
    settings: &CanvasSettings,
) -> SceneView {
    let is_selected = |id: &str| selection.is_some_and(|s| s.id == id);

    let mut view = SceneView {
        width: finite(settings.width, 0.0).max(0.0),
        height: finite(settings.height, 0.0).max(0.0),
        background_color: color_or(&settings.background_color, "#FFFFFF"),
        obstacles: Vec::new(),
        tables: Vec::new(),
        perimeter: Vec::new(),
        pending_perimeter: pending_perimeter
            .iter()
            .copied()
            .filter(Point::is_finite)
            .collect(),
        capacity: None,
        selected: None,
    };

    let Some(plan) = plan else {
        return view;
    };

    if let Some(color) = plan.background_color.as_deref() {
        view.background_color = color_or(color, &view.background_color);
    }
    view.capacity = Some(plan.capacity_status());
    view.selected = selection.cloned();
    view.perimeter = plan
        .perimeter
        .iter()
        .copied()
        .filter(Point::is_finite)
        .collect();

    view.tables = plan
        .tables
        .iter()
        .filter_map(|t| {
            let (width, height) = positive_size(t.width, t.height)?;
            Some(TableView {
                id: t.id.clone(),
                label: t.label.clone(),
                capacity: t.capacity,
                shape: t.shape,
                color: color_or(&t.color, DEFAULT_TABLE_COLOR),
                x: finite(t.x, 0.0),
                y: finite(t.y, 0.0),
                width,
                height,
                rotation: normalize_rotation(t.rotation),
                selected: is_selected(&t.id),
            })
        })
        .collect();

    view.obstacles = plan
        .obstacles
        .iter()
        .filter_map(|o| {
            let (width, height) = positive_size(o.width, o.height)?;
            Some(ObstacleView {
                id: o.id.clone(),
                category: o.category,
                shape: o.shape,
                color: color_or(&o.color, FALLBACK_OBSTACLE_COLOR),
                x: finite(o.x, 0.0),
                y: finite(o.y, 0.0),
                width,
                height,
                rotation: normalize_rotation(o.rotation),
                name: o.display_name().to_string(),
                selected: is_selected(&o.id),
            })
        })
        .collect();

    view
}

fn table_hit_shape(shape: TableShape) -> HitShape {
    match shape {
        TableShape::Rectangle => HitShape::Rectangle,
        TableShape::Circle => HitShape::Ellipse,
    }
}

fn obstacle_hit_shape(shape: ObstacleShape) -> HitShape {
    match shape {
        ObstacleShape::Rectangle => HitShape::Rectangle,
        ObstacleShape::Circle => HitShape::Ellipse,
        ObstacleShape::Triangle => HitShape::Triangle,
    }
}

/// Topmost entity under `point`.
///
/// Tables are drawn above obstacles, and later entries above earlier ones,
/// so the search runs tables last-to-first, then obstacles last-to-first.
pub fn entity_at(plan: &FloorPlan, point: Point, tolerance: f64) -> Option<EntityRef> {
    if !point.is_finite() {
        return None;
    }

    let table = plan.tables.iter().rev().find(|t| {
        positive_size(t.width, t.height).is_some()
            && shape_contains(
                table_hit_shape(t.shape),
                t.center(),
                t.width,
                t.height,
                t.rotation,
                point,
                tolerance,
            )
    });
    if let Some(table) = table {
        return Some(EntityRef::table(table.id.clone()));
    }

    plan.obstacles
        .iter()
        .rev()
        .find(|o| {
            positive_size(o.width, o.height).is_some()
                && shape_contains(
                    obstacle_hit_shape(o.shape),
                    o.center(),
                    o.width,
                    o.height,
                    o.rotation,
                    point,
                    tolerance,
                )
        })
        .map(|o| EntityRef::obstacle(o.id.clone()))
}
